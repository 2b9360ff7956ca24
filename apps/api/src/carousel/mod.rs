// Testimonial Carousel
// Implements: testimonial records, the index reducer, card rendering, and the auto-advance task.

pub mod driver;
pub mod handlers;
pub mod models;
pub mod state;
pub mod view;

pub use driver::{spawn_carousel, CarouselHandle};
pub use models::default_testimonials;
pub use state::Carousel;
pub use view::RevealGuard;
