//! Auto-advance: runs a mounted carousel on its own task.
//!
//! The task owns the `Carousel`. Manual actions arrive over an mpsc channel, the
//! timer fires `Next` every `interval`, and every index change restarts the
//! countdown. State is published on a watch channel. Unmounting (or dropping the
//! handle) stops the task, so no timer outlives the view.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use crate::carousel::models::Testimonial;
use crate::carousel::state::{Carousel, CarouselAction, CarouselError, CarouselState};

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);
const ACTION_BUFFER: usize = 16;

pub struct CarouselHandle {
    testimonials: Arc<[Testimonial]>,
    actions: mpsc::Sender<CarouselAction>,
    state: watch::Receiver<CarouselState>,
    task: Option<JoinHandle<()>>,
}

/// Mounts `carousel` and starts the auto-advance timer. `interval` must be non-zero.
pub fn spawn_carousel(
    carousel: Carousel,
    interval: Duration,
) -> Result<CarouselHandle, CarouselError> {
    if interval.is_zero() {
        return Err(CarouselError::ZeroInterval);
    }
    let (action_tx, action_rx) = mpsc::channel(ACTION_BUFFER);
    let (state_tx, state_rx) = watch::channel(carousel.state());

    info!(
        testimonials = carousel.len(),
        interval_ms = interval.as_millis() as u64,
        "carousel mounted"
    );
    let testimonials = carousel.testimonials();
    let task = tokio::spawn(run(carousel, interval, action_rx, state_tx));

    Ok(CarouselHandle {
        testimonials,
        actions: action_tx,
        state: state_rx,
        task: Some(task),
    })
}

impl CarouselHandle {
    pub async fn send(&self, action: CarouselAction) -> Result<(), CarouselError> {
        self.actions
            .send(action)
            .await
            .map_err(|_| CarouselError::Unmounted)
    }

    pub fn current(&self) -> CarouselState {
        *self.state.borrow()
    }

    /// The list the carousel was mounted with; indices in `current()` refer to it.
    pub fn testimonials(&self) -> Arc<[Testimonial]> {
        Arc::clone(&self.testimonials)
    }

    #[allow(dead_code)]
    pub fn state(&self) -> watch::Receiver<CarouselState> {
        self.state.clone()
    }

    /// Stops the auto-advance task and waits for it to finish.
    pub async fn unmount(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
            info!("carousel unmounted");
        }
    }
}

impl Drop for CarouselHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn run(
    mut carousel: Carousel,
    interval: Duration,
    mut actions: mpsc::Receiver<CarouselAction>,
    state_tx: watch::Sender<CarouselState>,
) {
    let timer = sleep(interval);
    tokio::pin!(timer);

    loop {
        let (action, from_timer) = tokio::select! {
            () = &mut timer => (CarouselAction::Next, true),
            received = actions.recv() => match received {
                Some(action) => (action, false),
                None => break,
            },
        };

        let changed = carousel.dispatch(action);
        let next = carousel.state();
        state_tx.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });

        if changed || from_timer {
            timer.as_mut().reset(Instant::now() + interval);
        }
        debug!(
            ?action,
            index = next.current_index,
            author = %carousel.current().author,
            "carousel transition"
        );
    }
}
