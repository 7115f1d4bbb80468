use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    acceptance::{self, AcceptanceCounter},
    adapt::{self, BlockStats},
    logp::{LogTarget, LogpError},
    random::RandomSource,
    summary::{self, Summary},
};

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum MetropolisError {
    #[error("block length at index {index} is zero")]
    InvalidBlockLength { index: usize },
    #[error("no proposal accepted in adaptation block {block} of length {length}")]
    AdaptationStalled { block: usize, length: u64 },
    #[error("no samples have been drawn")]
    EmptySampleHistory,
    #[error("sample count must be positive")]
    InvalidSampleCount,
    #[error("proposal scale must be positive and finite, got {0}")]
    InvalidProposalScale(f64),
    #[error("initial state must be finite, got {0}")]
    InvalidInitialState(f64),
    #[error("credible level must lie strictly between 0 and 1, got {0}")]
    InvalidCredibleLevel(f64),
    #[error("Logp function returned unrecoverable error")]
    LogpFailure(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = MetropolisError> = std::result::Result<T, E>;

/// Settings for a seeded sampler
#[derive(Debug, Clone, Copy)]
pub struct SamplerSettings {
    /// Standard deviation of the proposal before any adaptation.
    pub initial_scale: f64,
    /// Seed of the ChaCha8 generator driving the chain.
    pub seed: u64,
}

impl Default for SamplerSettings {
    fn default() -> Self {
        Self {
            initial_scale: 1.,
            seed: 0,
        }
    }
}

/// Outcome of a single Metropolis step.
#[derive(Debug, Clone, Copy)]
struct Transition {
    accepted: bool,
}

/// An adaptive random-walk Metropolis chain over one scalar parameter.
///
/// The chain is tuned with [`Sampler::adapt`], extended with
/// [`Sampler::sample`] and summarized with [`Sampler::summary`]. Only
/// `sample` records draws; adaptation moves the state and the proposal
/// scale but keeps no history.
pub struct Sampler<F: LogTarget, R: RandomSource = ChaCha8Rng> {
    log_target: F,
    rng: R,
    current_state: f64,
    current_logp: f64,
    proposal_scale: f64,
    samples: Vec<f64>,
    adapt_stats: Vec<BlockStats>,
    sample_acceptance: AcceptanceCounter,
}

impl<F: LogTarget> Sampler<F, ChaCha8Rng> {
    /// A sampler with default settings.
    pub fn new(log_target: F, initial_state: f64) -> Result<Self> {
        Self::with_settings(log_target, initial_state, SamplerSettings::default())
    }

    pub fn with_settings(
        log_target: F,
        initial_state: f64,
        settings: SamplerSettings,
    ) -> Result<Self> {
        let rng = ChaCha8Rng::seed_from_u64(settings.seed);
        Self::with_rng(log_target, initial_state, settings.initial_scale, rng)
    }
}

impl<F: LogTarget, R: RandomSource> Sampler<F, R> {
    /// A sampler drawing its variates from `rng`.
    ///
    /// This fails if the state or scale are invalid or if the log density
    /// returns an error at the initial state.
    pub fn with_rng(
        mut log_target: F,
        initial_state: f64,
        initial_scale: f64,
        rng: R,
    ) -> Result<Self> {
        if !initial_state.is_finite() {
            return Err(MetropolisError::InvalidInitialState(initial_state));
        }
        let proposal_scale = adapt::check_scale(initial_scale)?;
        let current_logp = log_target
            .logp(initial_state)
            .map(impossible_if_nan)
            .map_err(|err| MetropolisError::LogpFailure(Box::new(err)))?;
        Ok(Sampler {
            log_target,
            rng,
            current_state: initial_state,
            current_logp,
            proposal_scale,
            samples: vec![],
            adapt_stats: vec![],
            sample_acceptance: AcceptanceCounter::new(),
        })
    }

    /// Tune the proposal scale on successive blocks of Metropolis steps.
    ///
    /// After each block the scale is multiplied by the ratio of the block's
    /// acceptance rate to [`crate::TARGET_ACCEPT_RATE`]. Every block
    /// length is checked before the first step is taken. If a block accepts no
    /// proposal, the scale keeps its value from before that block and
    /// `AdaptationStalled` is returned.
    pub fn adapt(&mut self, block_lengths: &[u64]) -> Result<&mut Self> {
        adapt::check_block_lengths(block_lengths)?;

        for (block, &length) in block_lengths.iter().enumerate() {
            let mut counter = AcceptanceCounter::new();
            for _ in 0..length {
                let transition = self.step()?;
                counter.add(transition.accepted);
            }

            let scale_before = self.proposal_scale;
            let scale_after = match adapt::rescale(scale_before, block, &counter) {
                Ok(scale) => scale,
                Err(err) => {
                    warn!(
                        block,
                        length,
                        scale = scale_before,
                        "proposal scale adaptation failed: {err}"
                    );
                    return Err(err);
                }
            };
            self.proposal_scale = scale_after;

            let stats = BlockStats {
                block,
                length,
                accepted: counter.accepted(),
                scale_before,
                scale_after,
            };
            debug!(
                block,
                length,
                accepted = stats.accepted,
                rate = stats.accept_rate(),
                scale_before,
                scale_after,
                "adapted proposal scale"
            );
            self.adapt_stats.push(stats);
        }

        info!(
            blocks = block_lengths.len(),
            scale = self.proposal_scale,
            state = self.current_state,
            "adaptation finished"
        );
        Ok(self)
    }

    /// Extend the chain by `n` draws at the current proposal scale.
    ///
    /// A rejected proposal repeats the previous state, so the history grows
    /// by exactly `n` values.
    pub fn sample(&mut self, n: u64) -> Result<&mut Self> {
        if n == 0 {
            return Err(MetropolisError::InvalidSampleCount);
        }
        for _ in 0..n {
            let transition = self.step()?;
            self.sample_acceptance.add(transition.accepted);
            self.samples.push(self.current_state);
        }
        info!(
            draws = n,
            total = self.samples.len(),
            accept_rate = ?self.sample_acceptance.rate(),
            "sampling finished"
        );
        Ok(self)
    }

    /// Posterior mean and 95% credible interval over every recorded draw.
    pub fn summary(&self) -> Result<Summary> {
        Summary::from_samples(&self.samples)
    }

    /// Central credible interval holding `level` of the recorded draws.
    pub fn credible_interval(&self, level: f64) -> Result<(f64, f64)> {
        summary::credible_interval(&self.samples, level)
    }

    pub fn current_state(&self) -> f64 {
        self.current_state
    }

    pub fn proposal_scale(&self) -> f64 {
        self.proposal_scale
    }

    /// Recorded draws in chronological order.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }

    /// One entry per adaptation block completed so far.
    pub fn adapt_stats(&self) -> &[BlockStats] {
        &self.adapt_stats
    }

    /// Acceptance rate over all draws made by [`Sampler::sample`].
    pub fn acceptance_rate(&self) -> Option<f64> {
        self.sample_acceptance.rate()
    }

    fn step(&mut self) -> Result<Transition> {
        let proposal = self.rng.normal(self.current_state, self.proposal_scale);
        let proposal_logp = match self.log_target.logp(proposal) {
            Ok(logp) => impossible_if_nan(logp),
            Err(err) if err.is_recoverable() => f64::NEG_INFINITY,
            Err(err) => return Err(MetropolisError::LogpFailure(Box::new(err))),
        };

        let accepted = acceptance::accept(&mut self.rng, self.current_logp, proposal_logp);
        if accepted {
            self.current_state = proposal;
            self.current_logp = proposal_logp;
        }
        Ok(Transition { accepted })
    }
}

/// A NaN log density marks an impossible state, like `-inf`.
#[inline]
fn impossible_if_nan(logp: f64) -> f64 {
    if logp.is_nan() {
        f64::NEG_INFINITY
    } else {
        logp
    }
}
