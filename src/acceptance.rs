use crate::random::RandomSource;

/// Log of the Metropolis acceptance probability for a symmetric proposal.
///
/// The difference of log densities is clamped at zero, so the result is
/// never positive. An undefined difference (both densities `-inf`, both
/// `+inf`, or any NaN) yields `-inf`: a chain stuck at an impossible state
/// rejects instead of moving on an indeterminate ratio.
#[inline]
pub fn log_accept_prob(current_logp: f64, proposed_logp: f64) -> f64 {
    let diff = proposed_logp - current_logp;
    if diff.is_nan() {
        return f64::NEG_INFINITY;
    }
    diff.min(0.)
}

/// Metropolis acceptance probability, always in `[0, 1]`.
#[inline]
pub fn accept_prob(current_logp: f64, proposed_logp: f64) -> f64 {
    log_accept_prob(current_logp, proposed_logp).exp()
}

/// Decide whether the chain moves to the proposal.
///
/// Consumes exactly one uniform draw, whatever the outcome.
pub fn accept<R: RandomSource + ?Sized>(
    rng: &mut R,
    current_logp: f64,
    proposed_logp: f64,
) -> bool {
    let prob = accept_prob(current_logp, proposed_logp);
    rng.uniform() < prob
}

/// Counts accepted proposals within a block or a chain segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AcceptanceCounter {
    accepted: u64,
    total: u64,
}

impl AcceptanceCounter {
    pub fn new() -> AcceptanceCounter {
        AcceptanceCounter::default()
    }

    pub fn add(&mut self, accepted: bool) {
        if accepted {
            self.accepted += 1;
        }
        self.total += 1;
    }

    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Fraction of accepted proposals, `None` before the first step.
    pub fn rate(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(self.accepted as f64 / self.total as f64)
    }

    pub fn reset(&mut self) {
        self.accepted = 0;
        self.total = 0;
    }
}
