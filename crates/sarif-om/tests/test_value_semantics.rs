use pretty_assertions::{assert_eq, assert_ne};
use sarif_om::{
    ArtifactChange, ArtifactContent, ArtifactLocation, Error, Location, LogicalLocation, Message,
    NodeList, NodeRef, OwnedNode, PropertyBag, Region, Replacement, Run, SarifLog, SarifNode,
    SarifNodeKind, Tool, ToolComponentReference, ValueHash,
};
use serde_json::json;

/// Runs `$check::<T>()` for every node type.
macro_rules! for_each_node {
    ($check:ident) => {
        for_each_node!(
            @call $check:
            sarif_om::SarifLog,
            sarif_om::Address,
            sarif_om::Artifact,
            sarif_om::ArtifactChange,
            sarif_om::ArtifactContent,
            sarif_om::ArtifactLocation,
            sarif_om::Attachment,
            sarif_om::CodeFlow,
            sarif_om::ConfigurationOverride,
            sarif_om::Conversion,
            sarif_om::Edge,
            sarif_om::EdgeTraversal,
            sarif_om::Exception,
            sarif_om::ExternalProperties,
            sarif_om::ExternalPropertyFileReference,
            sarif_om::ExternalPropertyFileReferences,
            sarif_om::Fix,
            sarif_om::Graph,
            sarif_om::GraphTraversal,
            sarif_om::Invocation,
            sarif_om::Location,
            sarif_om::LocationRelationship,
            sarif_om::LogicalLocation,
            sarif_om::Message,
            sarif_om::MultiformatMessageString,
            sarif_om::Node,
            sarif_om::Notification,
            sarif_om::PhysicalLocation,
            sarif_om::Rectangle,
            sarif_om::Region,
            sarif_om::Replacement,
            sarif_om::ReportingConfiguration,
            sarif_om::ReportingDescriptor,
            sarif_om::ReportingDescriptorReference,
            sarif_om::ReportingDescriptorRelationship,
            sarif_om::Result,
            sarif_om::ResultProvenance,
            sarif_om::Run,
            sarif_om::RunAutomationDetails,
            sarif_om::SpecialLocations,
            sarif_om::Stack,
            sarif_om::StackFrame,
            sarif_om::Suppression,
            sarif_om::ThreadFlow,
            sarif_om::ThreadFlowLocation,
            sarif_om::Tool,
            sarif_om::ToolComponent,
            sarif_om::ToolComponentReference,
            sarif_om::TranslationMetadata,
            sarif_om::VersionControlDetails,
            sarif_om::WebRequest,
            sarif_om::WebResponse,
        )
    };
    (@call $check:ident: $($ty:ty),+ $(,)?) => {
        $( $check::<$ty>(); )+
    };
}

fn type_name_tail<T>() -> &'static str {
    let name = std::any::type_name::<T>();
    name.rsplit("::").next().unwrap_or(name)
}

fn check_copy_from_absent<T: SarifNode>() {
    match T::copy_from(None) {
        Err(Error::NullSource { kind }) => assert_eq!(kind, T::KIND),
        other => panic!("expected NullSource for {}, got {other:?}", T::KIND),
    }
}

fn check_default_node<T: SarifNode>() {
    let node = T::default();

    // Reflexivity, clone fidelity and hash consistency.
    assert!(node.value_eq(&node));
    let clone = node.deep_clone();
    assert!(node.value_eq(&clone) && clone.value_eq(&node));
    assert_eq!(node.value_hash(), clone.value_hash());

    let copied = T::copy_from(Some(&node)).unwrap();
    assert_eq!(node, copied);

    // Kind tags line up with type names.
    assert_eq!(node.kind(), T::KIND);
    assert_eq!(T::KIND.as_str(), type_name_tail::<T>());
    assert_eq!(node.as_node().kind(), T::KIND);
}

fn check_property_participates<T: SarifNode>() {
    let plain = T::default();
    let mut tagged = T::default();
    tagged.set_property("x", "1").unwrap();

    assert_ne!(plain, tagged);
    assert_eq!(tagged.property::<String>("x").unwrap().as_deref(), Some("1"));

    tagged.properties_mut().as_mut().unwrap().remove("x");
    // An empty bag is still a present bag.
    assert_ne!(plain, tagged);

    *tagged.properties_mut() = None;
    assert_eq!(plain, tagged);
    assert_eq!(plain.value_hash(), tagged.value_hash());
}

#[test]
fn test_copy_from_absent_source() {
    for_each_node!(check_copy_from_absent);

    let err = Region::copy_from(None).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"cannot copy-construct a Region from an absent source");
}

#[test]
fn test_default_nodes() {
    for_each_node!(check_default_node);
    assert_eq!(SarifNodeKind::ALL.len(), 52);
}

#[test]
fn test_properties_participate_in_equality() {
    for_each_node!(check_property_participates);
}

#[test]
fn test_region_scenario() {
    let region = Region {
        start_line: Some(10),
        start_column: Some(1),
        end_line: Some(12),
        end_column: Some(5),
        ..Default::default()
    };

    let mut clone = region.deep_clone();
    assert_eq!(region, clone);
    assert_eq!(region.value_hash(), clone.value_hash());

    clone.start_line = Some(11);
    assert_eq!(region.start_line, Some(10));
    assert_ne!(region, clone);
}

#[test]
fn test_message_properties_scenario() {
    let first = Message {
        properties: Some(PropertyBag::from([("x", json!("1"))])),
        ..Message::text("hello")
    };
    let mut second = Message {
        properties: Some(PropertyBag::from([("x", json!("1")), ("y", json!("2"))])),
        ..Message::text("hello")
    };

    assert_ne!(first, second);

    second.properties.as_mut().unwrap().remove("y");
    assert_eq!(first, second);
    assert_eq!(first.value_hash(), second.value_hash());
}

#[test]
fn test_property_order_insensitive() {
    let ab = Message {
        properties: Some(PropertyBag::from([("a", json!(1)), ("b", json!(2))])),
        ..Default::default()
    };
    let ba = Message {
        properties: Some(PropertyBag::from([("b", json!(2)), ("a", json!(1))])),
        ..Default::default()
    };

    assert_eq!(ab, ba);
    assert_eq!(ba, ab);
    assert_eq!(ab.value_hash(), ba.value_hash());
}

#[test]
fn test_replacements_order_sensitive() {
    let first = Replacement::new(Region::lines(1, 1, 1, 2), Some("a"));
    let second = Replacement::new(Region::lines(2, 1, 2, 2), Some("b"));

    let forward = ArtifactChange {
        replacements: NodeList::from([first.clone(), second.clone()]),
        ..Default::default()
    };
    let backward = ArtifactChange {
        replacements: NodeList::from([second, first]),
        ..Default::default()
    };

    assert_ne!(forward, backward);
    assert_ne!(backward, forward);
}

#[test]
fn test_null_replacement_round_trip() {
    let change = ArtifactChange {
        artifact_location: ArtifactLocation::new("src/lib.rs"),
        replacements: NodeList::from(vec![
            Some(Replacement::new(Region::lines(3, 1, 3, 8), Some("let x"))),
            None,
            Some(Replacement::new(Region::lines(9, 1, 9, 1), None)),
        ]),
        ..Default::default()
    };

    let clone = change.deep_clone();
    assert_eq!(clone.replacements.len(), 3);
    assert!(clone.replacements.is_null(1));
    assert_eq!(change, clone);
    assert_eq!(change.value_hash(), clone.value_hash());

    // Null slots survive the wire too.
    let json = serde_json::to_value(&change).unwrap();
    assert_eq!(json["replacements"][1], serde_json::Value::Null);
    let back: ArtifactChange = serde_json::from_value(json).unwrap();
    assert_eq!(back, change);
}

#[test]
fn test_absent_list_is_not_empty_list() {
    let absent = Run::new(Tool::named("tool"));
    let empty = Run {
        results: Some(NodeList::new()),
        ..absent.clone()
    };

    assert_ne!(absent, empty);
    assert!(absent.deep_clone().results.is_none());
    assert_eq!(empty.deep_clone().results.map(|r| r.len()), Some(0));
}

#[test]
fn test_clone_is_structurally_independent() {
    let mut run = Run::new(Tool::named("tool"));
    run.results = Some(NodeList::from([sarif_om::Result {
        locations: Some(NodeList::from([Location::physical(
            ArtifactLocation::new("a.c"),
            Some(Region::lines(1, 1, 1, 1)),
        )])),
        ..sarif_om::Result::new("msg")
    }]));

    let mut clone = run.deep_clone();
    let location = clone.results.as_mut().unwrap()[0]
        .as_mut()
        .unwrap()
        .locations
        .as_mut()
        .unwrap()
        .get_mut(0)
        .unwrap();
    location.message = Some(Message::text("changed"));

    assert_ne!(run, clone);
    let original = run.results().next().unwrap();
    assert!(original.locations.as_ref().unwrap()[0].as_ref().unwrap().message.is_none());
}

#[test]
fn test_sentinel_defaults() {
    assert_eq!(ArtifactLocation::default().index, -1);

    let logical = LogicalLocation::default();
    assert_eq!(logical.index, -1);
    assert_eq!(logical.parent_index, -1);

    assert_eq!(ToolComponentReference::default().index, -1);
    assert_eq!(sarif_om::ExternalPropertyFileReference::default().item_count, -1);

    // Unset sentinels are left off the wire, and come back unset.
    let json = serde_json::to_string(&ArtifactLocation::new("a.c")).unwrap();
    assert_eq!(json, r#"{"uri":"a.c"}"#);
    let back: ArtifactLocation = serde_json::from_str(&json).unwrap();
    assert!(back.index.is_unset());

    // An explicit -1 is the same as leaving it out.
    let explicit: LogicalLocation = serde_json::from_str(r#"{"index": -1, "parentIndex": 4}"#).unwrap();
    assert!(explicit.index.is_unset());
    assert_eq!(explicit.parent_index.get(), Some(4));

    assert!(serde_json::from_str::<LogicalLocation>(r#"{"index": -2}"#).is_err());
}

#[test]
fn test_sentinel_participates_in_equality() {
    let unset = ArtifactLocation::new("a.c");
    let zero = ArtifactLocation {
        index: 0_usize.into(),
        ..unset.clone()
    };

    assert_ne!(unset, zero);
    assert_eq!(zero.index.as_index(), Some(0));
}

#[test]
fn test_float_fields_compare_exactly() {
    let a = sarif_om::Rectangle {
        top: Some(0.1 + 0.2),
        ..Default::default()
    };
    let b = sarif_om::Rectangle {
        top: Some(0.3),
        ..Default::default()
    };
    assert_ne!(a, b);

    let zero = sarif_om::Rectangle {
        left: Some(0.0),
        ..Default::default()
    };
    let negative_zero = sarif_om::Rectangle {
        left: Some(-0.0),
        ..Default::default()
    };
    assert_eq!(zero, negative_zero);
    assert_eq!(zero.value_hash(), negative_zero.value_hash());
}

#[test]
fn test_generic_dispatch() {
    let content = ArtifactContent::text("fn main() {}");
    let node = content.as_node();
    assert_eq!(node.kind(), SarifNodeKind::ArtifactContent);

    let back: &ArtifactContent = node.try_into().unwrap();
    assert_eq!(back, &content);

    let wrong: Result<&Region, _> = node.try_into();
    assert_eq!(wrong.unwrap_err(), SarifNodeKind::ArtifactContent);

    let owned: OwnedNode = content.clone().into();
    assert_eq!(owned.kind(), SarifNodeKind::ArtifactContent);
    assert_eq!(owned.as_ref().value_hash(), content.value_hash());
    assert_eq!(owned.as_ref(), NodeRef::ArtifactContent(&content));

    let deep = node.deep_clone();
    assert_eq!(ArtifactContent::try_from(deep).unwrap(), content);
}

#[test]
fn test_children_skip_scalars_and_nulls() {
    let log = SarifLog::new([Run::new(Tool::named("tool"))]);
    let kinds = log
        .children()
        .iter()
        .map(NodeRef::kind)
        .collect::<Vec<_>>();
    assert_eq!(kinds, [SarifNodeKind::Run]);

    let mut change = ArtifactChange {
        replacements: NodeList::from(vec![None, Some(Replacement::default())]),
        ..Default::default()
    };
    insta::assert_debug_snapshot!(
        change.children().iter().map(NodeRef::kind).collect::<Vec<_>>(),
        @r"
    [
        ArtifactLocation,
        Replacement,
    ]
    "
    );
    assert_eq!(change.children_mut().len(), 2);
}
