//! The log density the sampler draws from.
//!
//! A [`LogTarget`] maps a scalar position to the natural log of an
//! unnormalized posterior density. Any `FnMut(f64) -> f64` closure is a
//! log target, so most callers never implement the trait by hand.

use std::convert::Infallible;

/// Errors that happen when we evaluate the log density.
pub trait LogpError: std::error::Error + Send + Sync + 'static {
    /// Unrecoverable errors during logp computation stop sampling,
    /// recoverable errors reject the proposal that caused them.
    fn is_recoverable(&self) -> bool;
}

impl LogpError for Infallible {
    fn is_recoverable(&self) -> bool {
        match *self {}
    }
}

/// An unnormalized log posterior density over a single parameter.
///
/// The density may return `f64::NEG_INFINITY` to mark a position as
/// impossible. A NaN log density is treated the same way.
pub trait LogTarget {
    type LogpError: LogpError;

    fn logp(&mut self, position: f64) -> Result<f64, Self::LogpError>;
}

impl<F> LogTarget for F
where
    F: FnMut(f64) -> f64,
{
    type LogpError = Infallible;

    fn logp(&mut self, position: f64) -> Result<f64, Infallible> {
        Ok(self(position))
    }
}
