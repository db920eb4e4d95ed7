//! Resolution of declared topologies into buildable layouts.

use std::str::FromStr;

use rand::Rng;
use wf_core::{EndpointCategory, SensorId};
use wf_network::{LocalLayout, Network, TopologyLayout, random_network};
use wf_project::{SimulationDef, TopologyDef};

use crate::error::AppResult;

/// Resolve category names of an explicit topology. `None` for a random one.
///
/// Unknown category names fail with a configuration error.
pub fn resolve_layout(def: &TopologyDef) -> AppResult<Option<TopologyLayout>> {
    let locals = match def {
        TopologyDef::Random => return Ok(None),
        TopologyDef::Explicit { locals } => locals,
    };

    let mut layout = TopologyLayout::default();
    for local in locals {
        let mut resolved = LocalLayout::default();
        for group in &local.endpoints {
            let category = EndpointCategory::from_str(&group.category)?;
            resolved.endpoints.push((category, group.count));
        }
        layout.locals.push(resolved);
    }
    Ok(Some(layout))
}

/// Build the network a simulation definition describes.
///
/// A random topology draws from `rng`; an explicit one does not.
pub fn build_network<R: Rng>(def: &SimulationDef, rng: &mut R) -> AppResult<Network> {
    let master = SensorId(def.master_sensor_id);
    let network = match resolve_layout(&def.topology)? {
        None => random_network(master, rng)?,
        Some(layout) => layout.build(master)?,
    };
    Ok(network)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use wf_project::{EndpointGroupDef, LocalDef};

    use crate::AppError;

    fn explicit(categories: &[(&str, u32)]) -> TopologyDef {
        TopologyDef::Explicit {
            locals: vec![LocalDef {
                endpoints: categories
                    .iter()
                    .map(|&(category, count)| EndpointGroupDef {
                        category: category.to_string(),
                        count,
                    })
                    .collect(),
            }],
        }
    }

    #[test]
    fn random_topology_has_no_layout() {
        assert_eq!(resolve_layout(&TopologyDef::Random).unwrap(), None);
    }

    #[test]
    fn explicit_categories_resolve() {
        let layout = resolve_layout(&explicit(&[("Home", 2), ("Fire_Hydrant", 1)]))
            .unwrap()
            .unwrap();
        assert_eq!(
            layout.locals[0].endpoints,
            vec![(EndpointCategory::Home, 2), (EndpointCategory::FireHydrant, 1)]
        );
    }

    #[test]
    fn unknown_category_is_a_configuration_error() {
        let err = resolve_layout(&explicit(&[("Swimming_Pool", 1)])).unwrap_err();
        assert!(matches!(err, AppError::Configuration(ref m) if m.contains("Swimming_Pool")), "{err}");
    }

    #[test]
    fn explicit_network_is_built_as_declared() {
        let def = SimulationDef {
            time_units: 1,
            start_time: "2023-01-01 00:00:00".to_string(),
            master_sensor_id: 500,
            leak_probability: 0.0,
            max_leak_fraction: 0.0,
            seed: None,
            topology: explicit(&[("Factory", 3)]),
        };
        let net = build_network(&def, &mut StdRng::seed_from_u64(0)).unwrap();
        let summary = net.summary();
        assert_eq!(summary.master, Some(SensorId(500)));
        assert_eq!(summary.local_junctions, 1);
        assert_eq!(summary.endpoints, 3);
    }
}
