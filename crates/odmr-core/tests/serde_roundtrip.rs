use odmr_core::provenance::{SchemaVersion, SpectrumProvenance};

#[test]
fn provenance_round_trip_json() {
    let provenance = SpectrumProvenance {
        schema_version: SchemaVersion::new(1, 0, 0),
        config_hash: "abc123".into(),
        seed: 99,
        noise: true,
        tool_version: "0.1.0".into(),
    };

    let json = serde_json::to_string_pretty(&provenance).expect("serialize");
    let decoded: SpectrumProvenance = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(decoded, provenance);
    assert_eq!(SchemaVersion::default(), SchemaVersion::new(1, 0, 0));
}
