#![cfg(feature = "schema")]

use sarif_om::SarifLog;

#[test]
fn test_schema_generation() {
    let schema = serde_json::to_value(schemars::schema_for!(SarifLog)).unwrap();

    assert_eq!(schema["title"], "SarifLog");
    assert_eq!(schema["properties"]["$schema"]["type"], serde_json::json!(["string", "null"]));

    let defs = &schema["$defs"];
    for name in ["Run", "Result", "Region", "Sentinel"] {
        assert!(defs.get(name).is_some(), "missing definition for {name}");
    }
    assert_eq!(defs["Sentinel"]["minimum"], -1);
}
