use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::carousel::models::Testimonial;
use crate::carousel::state::{reduce, CarouselAction, CarouselState};
use crate::carousel::view::TestimonialCard;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct LiveCardResponse {
    pub card: TestimonialCard,
    /// True only for the first request after mount.
    pub play_reveal: bool,
}

/// GET /api/v1/testimonials
pub async fn handle_list(State(state): State<AppState>) -> Json<Vec<Testimonial>> {
    Json(state.carousel.testimonials().to_vec())
}

/// GET /api/v1/testimonials/:index
///
/// Any integer is accepted and wrapped onto the list.
pub async fn handle_card_at(
    State(state): State<AppState>,
    Path(index): Path<i64>,
) -> Json<TestimonialCard> {
    let testimonials = state.carousel.testimonials();
    let selected = reduce(
        CarouselState::default(),
        CarouselAction::JumpTo(index),
        testimonials.len(),
    );
    Json(TestimonialCard::new(
        &testimonials[selected.current_index],
        &selected,
        testimonials.len(),
    ))
}

/// GET /api/v1/carousel
pub async fn handle_live_card(State(state): State<AppState>) -> Json<LiveCardResponse> {
    let testimonials = state.carousel.testimonials();
    let current = state.carousel.current();
    let card = TestimonialCard::new(
        &testimonials[current.current_index],
        &current,
        testimonials.len(),
    );
    Json(LiveCardResponse {
        card,
        play_reveal: state.reveal.on_visible(),
    })
}

/// POST /api/v1/carousel
///
/// Body: `{"action": "next"}`, `{"action": "previous"}` or `{"action": "jump_to", "index": 2}`.
pub async fn handle_navigate(
    State(state): State<AppState>,
    Json(action): Json<CarouselAction>,
) -> Result<StatusCode, AppError> {
    state.carousel.send(action).await?;
    Ok(StatusCode::ACCEPTED)
}
