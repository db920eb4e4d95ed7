//! End-to-end checks of the service layer.

use std::path::PathBuf;

use wf_app::{
    AppError, DetectionMode, RunRequest, analyze_records, detection_mode, load_project,
    run_simulation, save_project, usage_window, validate_project,
};
use wf_project::{DetectionDef, EndpointGroupDef, LocalDef, Project, SimulationDef, TopologyDef};

fn project(topology: TopologyDef, leak_probability: f64) -> Project {
    Project {
        version: 1,
        name: "smoke".to_string(),
        simulation: SimulationDef {
            time_units: 24,
            start_time: "2023-01-01 00:00:00".to_string(),
            master_sensor_id: 1000,
            leak_probability,
            max_leak_fraction: 0.3,
            seed: Some(7),
            topology,
        },
        detection: DetectionDef::default(),
    }
}

fn temp_path(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("wf-app-{}-{name}", std::process::id()));
    dir
}

#[test]
fn project_file_roundtrip_both_formats() {
    let p = project(TopologyDef::Random, 0.1);
    for name in ["project.yaml", "project.json"] {
        let path = temp_path(name);
        save_project(&path, &p).unwrap();
        let loaded = load_project(&path).unwrap();
        assert_eq!(loaded, p);
        std::fs::remove_file(&path).unwrap();
    }
}

#[test]
fn unknown_extension_is_rejected() {
    let err = load_project(&temp_path("project.toml")).unwrap_err();
    assert!(matches!(err, AppError::UnsupportedFormat { .. }));
}

#[test]
fn invalid_probability_fails_validation() {
    let p = project(TopologyDef::Random, 1.5);
    assert!(matches!(validate_project(&p), Err(AppError::Validation(_))));
}

#[test]
fn same_request_reproduces_run() {
    let p = project(TopologyDef::Random, 0.2);
    let a = run_simulation(&p, &RunRequest::default()).unwrap();
    let b = run_simulation(&p, &RunRequest::default()).unwrap();
    assert_eq!(a.run_id, b.run_id);
    assert_eq!(a.usage_digest, b.usage_digest);
    assert_eq!(a.records, b.records);

    let c = run_simulation(
        &p,
        &RunRequest {
            seed: Some(8),
            ..RunRequest::default()
        },
    )
    .unwrap();
    assert_ne!(a.run_id, c.run_id);
}

#[test]
fn usage_window_narrows_totals() {
    let p = project(TopologyDef::Random, 0.0);
    let full = run_simulation(&p, &RunRequest::default()).unwrap();
    let first_hour = run_simulation(
        &p,
        &RunRequest {
            usage_window: Some(usage_window("2023-01-01 00:00:00", "2023-01-01 00:00:00").unwrap()),
            ..RunRequest::default()
        },
    )
    .unwrap();

    assert_eq!(full.records, first_hour.records);
    assert_eq!(full.usage.len(), first_hour.usage.len());
    for (all, one) in full.usage.iter().zip(&first_hour.usage) {
        assert_eq!(all.sensor_id, one.sensor_id);
        assert!(one.total <= all.total);
    }
}

#[test]
fn baseline_run_is_clean_and_leaky_run_is_flagged() {
    let topology = TopologyDef::Explicit {
        locals: vec![
            LocalDef {
                endpoints: vec![EndpointGroupDef {
                    category: "Home".to_string(),
                    count: 4,
                }],
            },
            LocalDef {
                endpoints: vec![EndpointGroupDef {
                    category: "Factory".to_string(),
                    count: 2,
                }],
            },
        ],
    };
    let mut p = project(topology, 1.0);
    p.simulation.max_leak_fraction = 0.5;

    let baseline = run_simulation(
        &p,
        &RunRequest {
            leak_free: true,
            ..RunRequest::default()
        },
    )
    .unwrap();
    assert_eq!(baseline.network.endpoints, 6);
    for mode in [DetectionMode::Strict, detection_mode(&p, Some(0.0), false)] {
        assert!(analyze_records(&baseline.records, mode).unwrap().is_empty());
    }

    let leaky = run_simulation(&p, &RunRequest::default()).unwrap();
    let report = analyze_records(&leaky.records, detection_mode(&p, None, true)).unwrap();
    assert!(!report.is_empty());
    assert!(report.total_leakage > 0.0);
}

#[test]
fn negative_tolerance_is_a_detection_error() {
    let err = analyze_records(&[], DetectionMode::Tolerance(-1.0)).unwrap_err();
    assert!(matches!(err, AppError::Detection(_)));
}

#[test]
fn bundled_projects_load_and_run() {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.pop(); // crates
    dir.pop(); // repo root
    dir.push("projects");

    for name in ["town.yaml", "industrial_park.yaml"] {
        let path = dir.join(name);
        if !path.exists() {
            eprintln!("Skipping: project not found at {:?}", path);
            continue;
        }
        let project = load_project(&path).expect("bundled project loads");
        let response = run_simulation(&project, &RunRequest::default()).expect("runs");
        assert_eq!(response.seed, project.simulation.seed.unwrap());
        assert!(!response.records.is_empty());
    }
}

#[test]
fn loading_alone_rejects_an_invalid_project_file() {
    let path = temp_path("invalid.yaml");
    std::fs::write(
        &path,
        "version: 1\nname: bad\nsimulation:\n  time_units: 4\n  start_time: \"2023-01-01 00:00:00\"\n  master_sensor_id: 1000\n  leak_probability: 1.5\n",
    )
    .unwrap();
    let err = load_project(&path).unwrap_err();
    std::fs::remove_file(&path).unwrap();
    assert!(matches!(err, AppError::Validation(_)), "{err}");
}
