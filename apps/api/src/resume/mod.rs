// Résumé Document Builder
// Implements: font metrics, pagination, PDF rendering, file save, generation status.
// Layout is pure; rendering and saving sit behind traits so they can be swapped in tests.

pub mod builder;
pub mod font_metrics;
pub mod handlers;
pub mod layout;
pub mod models;
pub mod render;
pub mod sink;

// Re-export the public API consumed by state and main.
pub use builder::ResumeBuilder;
pub use font_metrics::FontFamily;
pub use layout::default_page_config;
pub use models::ResumeDocument;
