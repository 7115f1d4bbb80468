//! Bayesian fit of a one-parameter ROC curve to simulated
//! signal-detection data.
//!
//! The curve `H = Φ(a + Φ⁻¹(FA))` is fitted to counts from several
//! response criteria, with a wide normal prior on `a`.

use std::convert::Infallible;

use adaptive_metropolis::{LogTarget, Sampler, SamplerSettings};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Binomial, Distribution};
use statrs::distribution::{Continuous, ContinuousCDF, Normal};
use tracing::{info, Level};

#[derive(Debug, Clone, Copy)]
struct SignalDetection {
    hits: f64,
    misses: f64,
    false_alarms: f64,
    correct_rejections: f64,
}

impl SignalDetection {
    fn hit_rate(&self) -> f64 {
        self.hits / (self.hits + self.misses)
    }

    fn false_alarm_rate(&self) -> f64 {
        self.false_alarms / (self.false_alarms + self.correct_rejections)
    }

    /// Adds half a count to every cell so no rate is exactly 0 or 1.
    fn log_linear(self) -> SignalDetection {
        SignalDetection {
            hits: self.hits + 0.5,
            misses: self.misses + 0.5,
            false_alarms: self.false_alarms + 0.5,
            correct_rejections: self.correct_rejections + 0.5,
        }
    }

    fn neg_log_likelihood(&self, hit_rate: f64, false_alarm_rate: f64) -> f64 {
        -(self.hits * hit_rate.ln()
            + self.misses * (1. - hit_rate).ln()
            + self.false_alarms * false_alarm_rate.ln()
            + self.correct_rejections * (1. - false_alarm_rate).ln())
    }

    /// One dataset per criterion, for an observer with sensitivity `d_prime`.
    fn simulate<R: rand::Rng + ?Sized>(
        rng: &mut R,
        d_prime: f64,
        criteria: &[f64],
        signal_count: u64,
        noise_count: u64,
    ) -> anyhow::Result<Vec<SignalDetection>> {
        let std_normal = Normal::standard();
        criteria
            .iter()
            .map(|&criterion| -> anyhow::Result<SignalDetection> {
                let k = criterion + d_prime / 2.;
                let hits = Binomial::new(signal_count, 1. - std_normal.cdf(k - d_prime))?
                    .sample(rng);
                let false_alarms =
                    Binomial::new(noise_count, 1. - std_normal.cdf(k))?.sample(rng);
                Ok(SignalDetection {
                    hits: hits as f64,
                    misses: (signal_count - hits) as f64,
                    false_alarms: false_alarms as f64,
                    correct_rejections: (noise_count - false_alarms) as f64,
                })
            })
            .collect()
    }
}

fn roc_curve(false_alarm_rate: f64, a: f64) -> f64 {
    let std_normal = Normal::standard();
    std_normal.cdf(a + std_normal.inverse_cdf(false_alarm_rate))
}

/// Log posterior of the ROC intercept `a`.
struct RocPosterior {
    data: Vec<SignalDetection>,
    prior: Normal,
}

impl RocPosterior {
    fn roc_loss(&self, a: f64) -> f64 {
        self.data
            .iter()
            .map(|sdt| {
                let false_alarm_rate = sdt.false_alarm_rate();
                sdt.neg_log_likelihood(roc_curve(false_alarm_rate, a), false_alarm_rate)
            })
            .sum()
    }
}

impl LogTarget for RocPosterior {
    type LogpError = Infallible;

    fn logp(&mut self, a: f64) -> Result<f64, Infallible> {
        Ok(-self.roc_loss(a) + self.prior.ln_pdf(a))
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let data = SignalDetection::simulate(&mut rng, 1., &[-1., 0., 1.], 40, 40)?;
    for sdt in &data {
        info!(
            hit_rate = sdt.hit_rate(),
            false_alarm_rate = sdt.false_alarm_rate(),
            "simulated criterion"
        );
    }

    let posterior = RocPosterior {
        data: data.into_iter().map(SignalDetection::log_linear).collect(),
        prior: Normal::new(0., 10.)?,
    };
    let settings = SamplerSettings {
        seed: 2,
        ..Default::default()
    };
    let mut sampler = Sampler::with_settings(posterior, 0., settings)?;
    sampler.adapt(&[2000; 3])?.sample(4000)?;

    let summary = sampler.summary()?;
    info!("Estimated a: {summary}");

    for false_alarm_rate in [0.1, 0.25, 0.5, 0.75, 0.9] {
        info!(
            false_alarm_rate,
            hit_rate = roc_curve(false_alarm_rate, summary.mean),
            lower = roc_curve(false_alarm_rate, summary.c025),
            upper = roc_curve(false_alarm_rate, summary.c975),
            "fitted ROC curve"
        );
    }
    Ok(())
}
