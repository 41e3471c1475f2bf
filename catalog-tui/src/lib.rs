//! Terminal product catalog with multi-select.
//!
//! Fetches the catalog once at startup and shows it as a scrollable list
//! with "Select All"/"Deselect All", "Clear" and per-row checkboxes.

pub mod config;
pub mod error;
pub mod fetch;
pub mod input;
pub mod paths;
pub mod runtime;
pub mod screen;
pub mod selection;
pub mod view;

pub use config::Config;
pub use error::AppError;
pub use screen::{Action, CatalogScreen, Control, LoadState};
pub use selection::SelectionTracker;
