//! HTTP API handlers for docgen-ui

pub mod form;
pub mod health;
pub mod preview;
pub mod ui;
pub mod uploads;

pub use health::health_routes;
pub use preview::preview_routes;
pub use ui::ui_routes;
pub use uploads::upload_routes;
