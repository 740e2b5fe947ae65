//! TUI: app state, event loop, contact form rendering.

pub mod app;
pub mod error;
pub mod widgets;

pub use app::App;
pub use error::AppError;
