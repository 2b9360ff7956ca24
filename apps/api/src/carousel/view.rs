use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

use crate::carousel::models::{Testimonial, MAX_RATING};
use crate::carousel::state::{CarouselState, Direction};

/// Horizontal slide distance of the enter/exit animation, in pixels.
pub const SLIDE_OFFSET_PX: i32 = 1000;

/// Enter and exit offsets for the card transition. Cosmetic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub enter_x: i32,
    pub exit_x: i32,
}

impl Transition {
    /// Forward slides in from the right, backward from the left.
    pub fn for_direction(direction: Direction) -> Self {
        match direction {
            Direction::Forward => Transition {
                enter_x: SLIDE_OFFSET_PX,
                exit_x: -SLIDE_OFFSET_PX,
            },
            Direction::Backward => Transition {
                enter_x: -SLIDE_OFFSET_PX,
                exit_x: SLIDE_OFFSET_PX,
            },
        }
    }
}

/// The single visible testimonial, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestimonialCard {
    pub id: u32,
    pub index: usize,
    pub total: usize,
    pub quote: String,
    pub author: String,
    pub byline: String,
    pub stars: u8,
    pub star_bar: String,
    pub avatar_url: String,
    pub transition: Transition,
}

impl TestimonialCard {
    pub fn new(testimonial: &Testimonial, state: &CarouselState, total: usize) -> Self {
        let stars = testimonial.stars();
        let star_bar: String = (0..MAX_RATING as u8)
            .map(|i| if i < stars { '★' } else { '☆' })
            .collect();

        TestimonialCard {
            id: testimonial.id,
            index: state.current_index,
            total,
            quote: testimonial.quote.clone(),
            author: testimonial.author.clone(),
            byline: format!("{}, {}", testimonial.title, testimonial.company),
            stars,
            star_bar,
            avatar_url: testimonial.avatar().to_string(),
            transition: Transition::for_direction(state.direction),
        }
    }
}

/// One-shot guard for the reveal animation played when the section first
/// scrolls into view. Independent of index transitions.
#[derive(Debug, Default)]
pub struct RevealGuard {
    played: AtomicBool,
}

impl RevealGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// True only on the first call.
    pub fn on_visible(&self) -> bool {
        !self.played.swap(true, Ordering::SeqCst)
    }
}
