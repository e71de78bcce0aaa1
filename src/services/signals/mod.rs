//! Technical indicator engine.
//!
//! Series utilities, RSI/MACD indicators and the VaultSignal composite
//! scorer. Everything here is synchronous and pure: short or empty input
//! produces the documented neutral values, and only programmer errors
//! (such as a zero period) are reported as [`SignalError`].

pub mod composite;
pub mod indicators;
pub mod series;

pub use composite::{blend_scores, compute_composite_score, volume_bonus, CompositeInputs};
pub use indicators::{compute_macd, compute_rsi, compute_snapshot, DEFAULT_RSI_PERIOD};

use thiserror::Error;

/// Errors raised by the indicator engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignalError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, SignalError>;

/// Reject a zero period.
pub(crate) fn check_period(name: &str, period: usize) -> Result<()> {
    if period == 0 {
        return Err(SignalError::InvalidArgument(format!(
            "{} period must be at least 1",
            name
        )));
    }
    Ok(())
}
