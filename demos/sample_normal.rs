use adaptive_metropolis::{Sampler, SamplerSettings};
use tracing::{info, Level};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .init();

    let mu = 3.;
    let logp = |x: f64| {
        let diff = x - mu;
        -diff * diff / 2.
    };

    let settings = SamplerSettings {
        seed: 42,
        ..Default::default()
    };
    let mut sampler = Sampler::with_settings(logp, 0., settings)?;
    sampler.adapt(&[200, 200, 200])?.sample(5000)?;

    let summary = sampler.summary()?;
    info!(
        scale = sampler.proposal_scale(),
        accept_rate = ?sampler.acceptance_rate(),
        "mean (c025, c975) = {summary}"
    );
    Ok(())
}
