//! Records survive serialization unchanged, and so does their usage digest.

use wf_core::{DeviceType, SensorId};
use wf_results::{FlowRecord, endpoint_usage, parse_timestamp, usage_digest};

fn record(ts: &str, sensor: u32, path: &str, device: DeviceType, flow: f64) -> FlowRecord {
    FlowRecord {
        timestamp: parse_timestamp(ts).unwrap(),
        sensor_id: SensorId(sensor),
        path_to_master: path.to_string(),
        node_type: device.node_type(),
        device_type: device,
        water_usage: flow,
    }
}

fn sample() -> Vec<FlowRecord> {
    vec![
        record("2023-01-01 00:00:00", 1011, "1000->1001->1011", DeviceType::Home, 42.0),
        record("2023-01-01 00:00:00", 1012, "1000->1001->1012", DeviceType::AgriculturalChannel, 0.0),
        record("2023-01-01 00:00:00", 1001, "1000->1001", DeviceType::Local, 46.2),
        record("2023-01-01 00:00:00", 1000, "1000", DeviceType::Master, 46.2),
        record("2023-01-01 01:00:00", 1011, "1000->1001->1011", DeviceType::Home, 17.0),
        record("2023-01-01 01:00:00", 1012, "1000->1001->1012", DeviceType::AgriculturalChannel, 300.0),
    ]
}

#[test]
fn json_roundtrip_preserves_records_and_digest() {
    let records = sample();
    let json = serde_json::to_string(&records).unwrap();
    let loaded: Vec<FlowRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(loaded, records);

    let before = usage_digest(&endpoint_usage(&records, None));
    let after = usage_digest(&endpoint_usage(&loaded, None));
    assert_eq!(before, after);
}

#[test]
fn wire_field_names_and_formats() {
    let value = serde_json::to_value(&sample()[1]).unwrap();
    assert_eq!(value["timestamp"], "2023-01-01 00:00:00");
    assert_eq!(value["sensor_id"], 1012);
    assert_eq!(value["path_to_master"], "1000->1001->1012");
    assert_eq!(value["type"], "Endpoint");
    assert_eq!(value["device_type"], "Agricultural_Channel");
}

#[test]
fn bad_timestamp_is_rejected_on_load() {
    let json = r#"{"timestamp":"01/01/2023 00:00","sensor_id":1,"path_to_master":"1",
        "type":"Junction","device_type":"Master","water_usage":0.0}"#;
    let err = serde_json::from_str::<FlowRecord>(json).unwrap_err();
    assert!(err.to_string().contains("Invalid timestamp"), "{err}");
}
