use rand::Rng;
use rand_distr::{Beta, Normal};
use serde::Serialize;

/// Synthetic datasets contrasting how skewness moves the mean away from the median.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(super) enum Dataset {
    /// Normal(50, 10).
    Normal,
    /// Beta(5, 2) scaled to [0, 100].
    LeftSkewed,
    /// Beta(2, 5) scaled to [0, 100].
    RightSkewed,
}

impl Dataset {
    pub(super) const ALL: [Dataset; 3] = [Dataset::Normal, Dataset::LeftSkewed, Dataset::RightSkewed];

    const BETA_SCALE: f64 = 100.0;

    pub(super) fn title(self) -> &'static str {
        match self {
            Dataset::Normal => "Normal",
            Dataset::LeftSkewed => "Left-Skewed",
            Dataset::RightSkewed => "Right-Skewed",
        }
    }

    pub(super) fn description(self) -> &'static str {
        match self {
            Dataset::Normal => "Normal(mu=50, sigma=10)",
            Dataset::LeftSkewed => "100 * Beta(alpha=5, beta=2)",
            Dataset::RightSkewed => "100 * Beta(alpha=2, beta=5)",
        }
    }

    pub(super) fn sample<R>(self, rng: &mut R, size: usize) -> anyhow::Result<Vec<f64>>
    where
        R: Rng + ?Sized,
    {
        let values = match self {
            Dataset::Normal => {
                let normal = Normal::new(50.0, 10.0)?;
                (0..size).map(|_| rng.sample(normal)).collect()
            }
            Dataset::LeftSkewed => sample_scaled_beta(rng, 5.0, 2.0, size)?,
            Dataset::RightSkewed => sample_scaled_beta(rng, 2.0, 5.0, size)?,
        };
        Ok(values)
    }
}

fn sample_scaled_beta<R>(rng: &mut R, alpha: f64, beta: f64, size: usize) -> anyhow::Result<Vec<f64>>
where
    R: Rng + ?Sized,
{
    let beta = Beta::new(alpha, beta)?;
    Ok((0..size)
        .map(|_| rng.sample(&beta) * Dataset::BETA_SCALE)
        .collect())
}
