use std::fmt;

use itertools::Itertools;

use crate::{math, sampler::MetropolisError};

/// Posterior mean and central 95% credible interval of a chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean: f64,
    /// 2.5th percentile of the samples.
    pub c025: f64,
    /// 97.5th percentile of the samples.
    pub c975: f64,
}

impl Summary {
    pub fn from_samples(samples: &[f64]) -> Result<Summary, MetropolisError> {
        if samples.is_empty() {
            return Err(MetropolisError::EmptySampleHistory);
        }
        let sorted = sort(samples);
        Ok(Summary {
            mean: math::mean(samples),
            c025: math::percentile(&sorted, 2.5),
            c975: math::percentile(&sorted, 97.5),
        })
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.mean, self.c025, self.c975)
    }
}

/// Central credible interval holding `level` of the posterior mass.
pub fn credible_interval(samples: &[f64], level: f64) -> Result<(f64, f64), MetropolisError> {
    if !(level > 0. && level < 1.) {
        return Err(MetropolisError::InvalidCredibleLevel(level));
    }
    if samples.is_empty() {
        return Err(MetropolisError::EmptySampleHistory);
    }
    let sorted = sort(samples);
    let tail = (1. - level) / 2. * 100.;
    Ok((
        math::percentile(&sorted, tail),
        math::percentile(&sorted, 100. - tail),
    ))
}

fn sort(samples: &[f64]) -> Vec<f64> {
    samples
        .iter()
        .copied()
        .sorted_by(f64::total_cmp)
        .collect_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_history() {
        assert!(matches!(
            Summary::from_samples(&[]),
            Err(MetropolisError::EmptySampleHistory)
        ));
        assert!(matches!(
            credible_interval(&[], 0.9),
            Err(MetropolisError::EmptySampleHistory)
        ));
    }

    #[test]
    fn summary_of_unsorted_chain() {
        let samples = [4., 1., 3., 2.];
        let summary = Summary::from_samples(&samples).unwrap();
        assert_eq!(summary.mean, 2.5);
        assert_abs_diff_eq!(summary.c025, 1.075, epsilon = 1e-12);
        assert_abs_diff_eq!(summary.c975, 3.925, epsilon = 1e-12);
    }

    #[test]
    fn interval_matches_summary() {
        let samples: Vec<f64> = (0..1001).map(|i| (i as f64 * 0.37).sin()).collect();
        let summary = Summary::from_samples(&samples).unwrap();
        let (lo, hi) = credible_interval(&samples, 0.95).unwrap();
        assert_abs_diff_eq!(lo, summary.c025, epsilon = 1e-12);
        assert_abs_diff_eq!(hi, summary.c975, epsilon = 1e-12);

        let (lo50, hi50) = credible_interval(&samples, 0.5).unwrap();
        assert!(lo <= lo50 && lo50 <= hi50 && hi50 <= hi);
    }

    #[test]
    fn invalid_level() {
        for level in [0., 1., -0.5, 1.5, f64::NAN] {
            assert!(matches!(
                credible_interval(&[1., 2.], level),
                Err(MetropolisError::InvalidCredibleLevel(_))
            ));
        }
    }

    #[test]
    fn display() {
        let summary = Summary {
            mean: 0.5,
            c025: -1.25,
            c975: 2.,
        };
        assert_eq!(summary.to_string(), "0.5 (-1.25, 2)");
    }
}
