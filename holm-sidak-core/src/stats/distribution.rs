use statrs::distribution::{ContinuousCDF, StudentsT};

use super::TDistribution;

/// Student's t CDF backed by `statrs`.
///
/// This is the distribution the command line uses. Infinite arguments map to
/// the CDF limits without touching the underlying implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct StudentsTDistribution;

impl StudentsTDistribution {
    pub fn new() -> Self {
        Self
    }
}

impl TDistribution for StudentsTDistribution {
    fn cdf(&self, t: f64, df: f64) -> f64 {
        if t == f64::INFINITY {
            return 1.0;
        }
        if t == f64::NEG_INFINITY {
            return 0.0;
        }
        match StudentsT::new(0.0, 1.0, df) {
            Ok(dist) => dist.cdf(t),
            // Conservative fallback: centre of the distribution, so p never
            // drops below 0.5 on a bad df.
            Err(_) => 0.5,
        }
    }
}
