//! Synthetic leakage injected at junctions.
//!
//! Leakage is additive: a junction reports `base * (1 + fraction)` with
//! `fraction >= 0`, never less than its children account for.

use rand::Rng;
use wf_core::{Real, WfResult, ensure_fraction};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LeakModel {
    /// Leak-free baseline. Consumes no random draws.
    #[default]
    Disabled,
    /// With `probability`, leak a fraction drawn uniformly from `[0, max_fraction]`.
    Random { probability: Real, max_fraction: Real },
    /// Leak exactly `fraction` at every junction every step.
    Fixed { fraction: Real },
}

impl LeakModel {
    pub fn random(probability: Real, max_fraction: Real) -> WfResult<Self> {
        Ok(LeakModel::Random {
            probability: ensure_fraction(probability, "leak_probability")?,
            max_fraction: ensure_fraction(max_fraction, "max_leak_fraction")?,
        })
    }

    pub fn fixed(fraction: Real) -> WfResult<Self> {
        Ok(LeakModel::Fixed {
            fraction: ensure_fraction(fraction, "leak_fraction")?,
        })
    }

    /// Decide whether this junction leaks this step, and by what fraction.
    ///
    /// A zero probability draws nothing, so `Random { probability: 0.0, .. }`
    /// and `Disabled` leave the random stream, and therefore the whole
    /// dataset, identical.
    pub fn draw_fraction<R: Rng>(&self, rng: &mut R) -> Option<Real> {
        match *self {
            LeakModel::Disabled => None,
            LeakModel::Random {
                probability,
                max_fraction,
            } => {
                if probability <= 0.0 || rng.random::<f64>() >= probability {
                    return None;
                }
                if max_fraction > 0.0 {
                    Some(rng.random_range(0.0..=max_fraction))
                } else {
                    Some(0.0)
                }
            }
            LeakModel::Fixed { fraction } => Some(fraction),
        }
    }

    pub fn is_enabled(&self) -> bool {
        match *self {
            LeakModel::Disabled => false,
            LeakModel::Random { probability, .. } => probability > 0.0,
            LeakModel::Fixed { .. } => true,
        }
    }
}
