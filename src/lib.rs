//! Adaptive random-walk Metropolis sampling of a single scalar parameter.
//!
//! A [`Sampler`] draws from an unnormalized log density, tunes its
//! Gaussian proposal scale toward a 40% acceptance rate, records a chain
//! and summarizes it with the posterior mean and a 95% credible interval.
//!
//! ```
//! use adaptive_metropolis::{Sampler, SamplerSettings};
//!
//! let settings = SamplerSettings { seed: 42, ..Default::default() };
//! let mut sampler = Sampler::with_settings(|x: f64| -x * x / 2., 0., settings)?;
//! sampler.adapt(&[200, 200, 200])?.sample(5000)?;
//!
//! let summary = sampler.summary()?;
//! assert!(summary.c025 < 0. && 0. < summary.c975);
//! # Ok::<(), adaptive_metropolis::MetropolisError>(())
//! ```

pub(crate) mod acceptance;
pub(crate) mod adapt;
pub(crate) mod logp;
pub(crate) mod math;
pub(crate) mod random;
pub(crate) mod sampler;
pub(crate) mod summary;

pub use acceptance::{accept, accept_prob, log_accept_prob, AcceptanceCounter};
pub use adapt::{BlockStats, TARGET_ACCEPT_RATE};
pub use logp::{LogTarget, LogpError};
pub use random::RandomSource;
pub use sampler::{MetropolisError, Result, Sampler, SamplerSettings};
pub use summary::{credible_interval, Summary};
