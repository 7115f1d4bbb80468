//! Block-wise tuning of the proposal scale.
//!
//! After each block of Metropolis steps the proposal standard deviation is
//! multiplied by `rate / TARGET_ACCEPT_RATE`: a block that accepted too
//! often widens the proposal, one that accepted too rarely narrows it.

use crate::{acceptance::AcceptanceCounter, sampler::MetropolisError};

/// Acceptance rate the adaptation steers toward.
pub const TARGET_ACCEPT_RATE: f64 = 0.4;

/// Diagnostics of one completed adaptation block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockStats {
    /// Position of the block in the slice passed to `adapt`.
    pub block: usize,
    pub length: u64,
    pub accepted: u64,
    pub scale_before: f64,
    pub scale_after: f64,
}

impl BlockStats {
    pub fn accept_rate(&self) -> f64 {
        self.accepted as f64 / self.length as f64
    }
}

pub(crate) fn check_block_lengths(block_lengths: &[u64]) -> Result<(), MetropolisError> {
    match block_lengths.iter().position(|&length| length == 0) {
        Some(index) => Err(MetropolisError::InvalidBlockLength { index }),
        None => Ok(()),
    }
}

pub(crate) fn check_scale(scale: f64) -> Result<f64, MetropolisError> {
    if scale.is_finite() && scale > 0. {
        Ok(scale)
    } else {
        Err(MetropolisError::InvalidProposalScale(scale))
    }
}

/// The proposal scale for the next block, given the counts of this one.
pub(crate) fn rescale(
    scale: f64,
    block: usize,
    counter: &AcceptanceCounter,
) -> Result<f64, MetropolisError> {
    let rate = match counter.rate() {
        Some(rate) if rate > 0. => rate,
        _ => {
            return Err(MetropolisError::AdaptationStalled {
                block,
                length: counter.total(),
            })
        }
    };
    check_scale(scale * (rate / TARGET_ACCEPT_RATE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn counts(accepted: u64, total: u64) -> AcceptanceCounter {
        let mut counter = AcceptanceCounter::new();
        (0..total).for_each(|i| counter.add(i < accepted));
        counter
    }

    #[test]
    fn block_lengths() {
        assert!(check_block_lengths(&[]).is_ok());
        assert!(check_block_lengths(&[1, 200, 3]).is_ok());
        assert!(matches!(
            check_block_lengths(&[10, 0, 5, 0]),
            Err(MetropolisError::InvalidBlockLength { index: 1 })
        ));
    }

    #[test]
    fn rescale_toward_target() {
        // On target, unchanged.
        assert_eq!(rescale(2., 0, &counts(40, 100)).unwrap(), 2.);
        // Too many acceptances widen the proposal.
        assert_eq!(rescale(1., 0, &counts(80, 100)).unwrap(), 2.);
        // Too few narrow it.
        assert_eq!(rescale(1., 0, &counts(20, 100)).unwrap(), 0.5);
    }

    #[test]
    fn stalled_block() {
        let err = rescale(1., 3, &counts(0, 50)).unwrap_err();
        assert!(matches!(
            err,
            MetropolisError::AdaptationStalled {
                block: 3,
                length: 50
            }
        ));
    }

    #[test]
    fn non_finite_scale() {
        assert!(matches!(
            rescale(f64::MAX, 0, &counts(100, 100)),
            Err(MetropolisError::InvalidProposalScale(_))
        ));
        assert!(check_scale(0.).is_err());
        assert!(check_scale(-1.).is_err());
        assert!(check_scale(f64::NAN).is_err());
        assert_eq!(check_scale(0.25).unwrap(), 0.25);
    }

    #[test]
    fn block_stats_rate() {
        let stats = BlockStats {
            block: 0,
            length: 200,
            accepted: 80,
            scale_before: 1.,
            scale_after: 1.,
        };
        assert_eq!(stats.accept_rate(), 0.4);
    }
}
