//! Interop with logs produced by `serde-sarif`.

use pretty_assertions::assert_eq;
use sarif_om::{
    FailureLevel, PropertyBag, ResultKind, SarifLog, SarifNode, SarifVersion, ValueHash,
};
use serde_sarif::sarif::{
    ArtifactContent, ArtifactLocation, Invocation, Location, LogicalLocation, Message,
    MultiformatMessageString, PhysicalLocation, PropertyBag as SarifPropertyBag, Region,
    ReportingDescriptor, Result as SarifResult, ResultKind as SarifResultKind, ResultLevel, Run,
    Sarif, Tool, ToolComponent,
};

fn build_location(uri: &str, line: i64, annotation: &str) -> Location {
    Location::builder()
        .logical_locations([LogicalLocation::builder()
            .properties(
                SarifPropertyBag::builder()
                    .additional_properties([(
                        "symbolic".into(),
                        serde_json::json!({ "key": uri, "annotation": annotation }),
                    )])
                    .build(),
            )
            .build()])
        .physical_location(
            PhysicalLocation::builder()
                .artifact_location(ArtifactLocation::builder().uri(uri).build())
                .region(
                    Region::builder()
                        .start_line(line)
                        .end_line(line)
                        .start_column(1)
                        .end_column(20)
                        .source_language("yaml")
                        .snippet(ArtifactContent::builder().text("uses: actions/checkout@v4").build())
                        .build(),
                )
                .build(),
        )
        .message(Message::builder().text(annotation).build())
        .build()
}

fn build_log() -> Sarif {
    let rule = ReportingDescriptor::builder()
        .id("demo/unpinned-uses")
        .name("unpinned-uses")
        .help_uri("https://example.com/rules/unpinned-uses")
        .help(
            MultiformatMessageString::builder()
                .text("unpinned action reference")
                .markdown("**unpinned** action reference")
                .build(),
        )
        .properties(SarifPropertyBag::builder().tags(["security".into()]).build())
        .build();

    let result = SarifResult::builder()
        .rule_id("demo/unpinned-uses")
        .message("unpinned action reference")
        .locations(vec![build_location(".github/workflows/ci.yml", 12, "this step")])
        .related_locations(vec![build_location(".github/workflows/ci.yml", 3, "this job")])
        .level(ResultLevel::Error)
        .kind(SarifResultKind::Fail)
        .build();

    let run = Run::builder()
        .tool(
            Tool::builder()
                .driver(
                    ToolComponent::builder()
                        .name("demo")
                        .version("1.2.3")
                        .semantic_version("1.2.3")
                        .information_uri("https://example.com")
                        .rules(vec![rule])
                        .build(),
                )
                .build(),
        )
        .results(vec![result])
        .invocations([Invocation::builder().execution_successful(true).build()])
        .build();

    Sarif::builder()
        .version("2.1.0")
        .schema("https://docs.oasis-open.org/sarif/sarif/v2.1.0/os/schemas/sarif-schema-2.1.0.json")
        .runs([run])
        .build()
}

fn load(sarif: &Sarif) -> SarifLog {
    serde_json::from_value(serde_json::to_value(sarif).unwrap()).unwrap()
}

#[test]
fn test_load_serde_sarif_log() {
    let log = load(&build_log());

    assert_eq!(log.version, SarifVersion::V2_1_0);
    assert_eq!(log.schema.as_deref(), Some(sarif_om::SCHEMA_URI));

    let run = log.runs().next().unwrap();
    assert_eq!(run.tool.driver.name, "demo");
    assert_eq!(run.tool.driver.semantic_version.as_deref(), Some("1.2.3"));
    assert!(run.invocations.as_ref().unwrap()[0].as_ref().unwrap().execution_successful);

    let result = run.results().next().unwrap();
    assert_eq!(result.effective_kind(), ResultKind::Fail);
    assert_eq!(result.effective_level(), FailureLevel::Error);
    assert!(result.rule_index.is_unset());

    let rule = result.resolve_rule(run).unwrap();
    assert_eq!(rule.name.as_deref(), Some("unpinned-uses"));
    assert!(rule.properties.as_ref().is_some_and(|bag| bag.has_tag("security")));
    assert_eq!(
        result.message_text(Some(rule)).as_deref(),
        Some("unpinned action reference")
    );

    let location = result.locations.as_ref().unwrap()[0].as_ref().unwrap();
    let region = location
        .physical_location
        .as_ref()
        .and_then(|p| p.region.as_ref())
        .unwrap();
    assert_eq!((region.start_line, region.end_column), (Some(12), Some(20)));
    assert!(region.is_line_column_based());
    assert!(region.char_offset.is_unset());

    let logical = location.logical_locations.as_ref().unwrap()[0].as_ref().unwrap();
    assert!(logical.index.is_unset());
    assert_eq!(
        logical.property::<serde_json::Value>("symbolic").unwrap(),
        Some(serde_json::json!({ "key": ".github/workflows/ci.yml", "annotation": "this step" }))
    );
}

#[test]
fn test_round_trip_through_both_models() {
    let sarif = build_log();
    let log = load(&sarif);

    // Our model re-serializes to something serde-sarif accepts, which
    // then loads back to an equal log.
    let reloaded: Sarif = serde_json::from_value(serde_json::to_value(&log).unwrap()).unwrap();
    let again = load(&reloaded);
    assert_eq!(log, again);
    assert_eq!(log.value_hash(), again.value_hash());
    assert_eq!(log.deep_clone(), again);
}

#[test]
fn test_rule_tags() {
    let log = load(&build_log());
    let run = log.runs().next().unwrap();
    let rule = run.tool.driver.rule_by_id("demo/unpinned-uses").unwrap();

    let mut bag = PropertyBag::new();
    bag.add_tag("security");
    assert_eq!(rule.properties.as_ref(), Some(&bag));
}
