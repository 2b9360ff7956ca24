//! Carousel index state and its single transition function.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::carousel::models::Testimonial;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CarouselError {
    #[error("carousel needs at least one testimonial")]
    Empty,

    #[error("carousel has been unmounted")]
    Unmounted,

    #[error("auto-advance interval must be greater than zero")]
    ZeroInterval,
}

/// Which way the last transition moved. Only picks the slide geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselState {
    pub current_index: usize,
    pub direction: Direction,
}

impl Default for CarouselState {
    fn default() -> Self {
        Self {
            current_index: 0,
            direction: Direction::Forward,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "index", rename_all = "snake_case")]
pub enum CarouselAction {
    Next,
    Previous,
    /// Any integer is accepted and wrapped onto the list.
    JumpTo(i64),
}

/// `(state, action) -> state`. `len` must be at least 1.
pub fn reduce(state: CarouselState, action: CarouselAction, len: usize) -> CarouselState {
    debug_assert!(len > 0);
    match action {
        CarouselAction::Next => CarouselState {
            current_index: (state.current_index + 1) % len,
            direction: Direction::Forward,
        },
        CarouselAction::Previous => CarouselState {
            current_index: (state.current_index + len - 1) % len,
            direction: Direction::Backward,
        },
        CarouselAction::JumpTo(target) => {
            let index = wrap_index(target, len);
            let direction = if index >= state.current_index {
                Direction::Forward
            } else {
                Direction::Backward
            };
            CarouselState {
                current_index: index,
                direction,
            }
        }
    }
}

fn wrap_index(target: i64, len: usize) -> usize {
    target.rem_euclid(len as i64) as usize
}

/// A fixed, non-empty testimonial list plus the current position in it.
#[derive(Debug, Clone)]
pub struct Carousel {
    testimonials: Arc<[Testimonial]>,
    state: CarouselState,
}

impl Carousel {
    pub fn new(testimonials: Vec<Testimonial>) -> Result<Self, CarouselError> {
        if testimonials.is_empty() {
            return Err(CarouselError::Empty);
        }
        Ok(Self {
            testimonials: testimonials.into(),
            state: CarouselState::default(),
        })
    }

    pub fn state(&self) -> CarouselState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.testimonials.len()
    }

    /// The list this carousel was created with. Shared, never copied.
    pub fn testimonials(&self) -> Arc<[Testimonial]> {
        Arc::clone(&self.testimonials)
    }

    pub fn current(&self) -> &Testimonial {
        &self.testimonials[self.state.current_index]
    }

    /// Applies `action`. Returns whether the visible index changed.
    pub fn dispatch(&mut self, action: CarouselAction) -> bool {
        let next = reduce(self.state, action, self.len());
        let changed = next.current_index != self.state.current_index;
        self.state = next;
        changed
    }
}
