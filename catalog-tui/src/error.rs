//! Application errors.
//!
//! A failed fetch is not an `AppError`: it is logged and the screen shows an
//! empty list.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Terminal setup, input or drawing failed.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}
