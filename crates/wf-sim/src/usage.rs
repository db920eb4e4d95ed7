//! Endpoint usage model.

use rand::Rng;
use wf_core::{EndpointCategory, Real};

/// Smallest non-zero usage an endpoint can report.
pub const MIN_USAGE: u32 = 10;

/// Per-category usage parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsageProfile {
    /// Chance of drawing water in a given step.
    pub probability: Real,
    /// Largest usage in one step.
    pub max_usage: u32,
}

impl UsageProfile {
    pub fn for_category(category: EndpointCategory) -> Self {
        let (probability, max_usage) = match category {
            EndpointCategory::Home => (0.7, 100),
            EndpointCategory::Factory => (0.8, 500),
            EndpointCategory::AgriculturalChannel => (0.6, 400),
            EndpointCategory::FireHydrant => (0.01, 1000),
        };
        Self {
            probability,
            max_usage,
        }
    }

    /// Usage for one step: uniform integer in `[MIN_USAGE, max_usage]` with
    /// probability `probability`, otherwise 0. No memory between steps.
    pub fn simulate_usage<R: Rng>(&self, rng: &mut R) -> Real {
        if rng.random::<f64>() < self.probability {
            Real::from(rng.random_range(MIN_USAGE..=self.max_usage))
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn draws_are_zero_or_in_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for category in EndpointCategory::ALL {
            let profile = UsageProfile::for_category(category);
            for _ in 0..2_000 {
                let u = profile.simulate_usage(&mut rng);
                assert!(
                    u == 0.0 || (Real::from(MIN_USAGE)..=Real::from(profile.max_usage)).contains(&u),
                    "{category}: {u}"
                );
                assert_eq!(u.fract(), 0.0);
            }
        }
    }

    #[test]
    fn hydrants_mostly_idle_homes_mostly_busy() {
        let mut rng = StdRng::seed_from_u64(2);
        let busy = |c: EndpointCategory, rng: &mut StdRng| {
            let p = UsageProfile::for_category(c);
            (0..10_000).filter(|_| p.simulate_usage(rng) > 0.0).count()
        };
        let hydrant = busy(EndpointCategory::FireHydrant, &mut rng);
        let home = busy(EndpointCategory::Home, &mut rng);
        assert!(hydrant < 300, "hydrant busy {hydrant}");
        assert!((6_500..7_500).contains(&home), "home busy {home}");
    }

    #[test]
    fn profile_table() {
        let f = UsageProfile::for_category(EndpointCategory::Factory);
        assert_eq!((f.probability, f.max_usage), (0.8, 500));
        let a = UsageProfile::for_category(EndpointCategory::AgriculturalChannel);
        assert_eq!((a.probability, a.max_usage), (0.6, 400));
    }
}
