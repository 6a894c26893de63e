//! Results, suppressions and fixes.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    list::NodeList,
    property_bag::PropertyBag,
    v2_1_0::{
        ArtifactContent, ArtifactLocation, CodeFlow, FailureLevel, Graph, GraphTraversal, Location,
        Message, PhysicalLocation, Region, ReportingDescriptor, ReportingDescriptorReference, Run,
        Stack, WebRequest, WebResponse,
    },
    wire::Sentinel,
};

/// A value that categorizes results by evaluation state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum ResultKind {
    NotApplicable,
    Pass,
    Fail,
    Review,
    Open,
    Informational,
}

leaf!(hash = std: ResultKind);

/// The state of a result relative to a baseline of a previous run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum BaselineState {
    New,
    Unchanged,
    Updated,
    Absent,
}

leaf!(hash = std: BaselineState);

/// Where a suppression is persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum SuppressionKind {
    #[default]
    InSource,
    External,
}

leaf!(hash = std: SuppressionKind);

/// The state of a suppression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum SuppressionStatus {
    Accepted,
    UnderReview,
    Rejected,
}

leaf!(hash = std: SuppressionStatus);

sarif_node! {
    /// A result produced by an analysis tool.
    pub struct Result {
        /// The stable, unique identifier of the rule, if any, to which this result is relevant.
        pub rule_id: Option<String>,
        /// The index within the tool component rules array of the rule object associated with this result.
        pub rule_index: Sentinel,
        /// A reference used to locate the rule descriptor relevant to this result.
        pub rule: Option<ReportingDescriptorReference>,
        /// A value that categorizes results by evaluation state.
        pub kind: Option<ResultKind>,
        /// A value specifying the severity level of the result.
        pub level: Option<FailureLevel>,
        /// A message that describes the result. The first sentence of the message only will be
        /// displayed when visible space is limited.
        pub message: Message,
        /// Identifies the artifact that the analysis tool was instructed to scan. This need not be
        /// the same as the artifact where the result actually occurred.
        pub analysis_target: Option<ArtifactLocation>,
        /// The set of locations where the result was detected. Specify only one location unless the
        /// problem indicated by the result can only be corrected by making a change at every specified location.
        pub locations: Option<NodeList<Location>>,
        /// A stable, unique identifier for the result in the form of a GUID.
        pub guid: Option<String>,
        /// A stable, unique identifier for the equivalence class of logically identical results to
        /// which this result belongs, in the form of a GUID.
        pub correlation_guid: Option<String>,
        /// A positive integer specifying the number of times this logically unique result was observed in this run.
        pub occurrence_count: Option<i64>,
        /// A set of strings that contribute to the stable, unique identity of the result.
        pub partial_fingerprints: Option<IndexMap<String, String>>,
        /// A set of strings each of which individually defines a stable, unique identity for the result.
        pub fingerprints: Option<IndexMap<String, String>>,
        /// An array of 'stack' objects relevant to the result.
        pub stacks: Option<NodeList<Stack>>,
        /// An array of 'codeFlow' objects relevant to the result.
        pub code_flows: Option<NodeList<CodeFlow>>,
        /// An array of zero or more unique graph objects associated with the result.
        pub graphs: Option<NodeList<Graph>>,
        /// An array of one or more unique 'graphTraversal' objects.
        pub graph_traversals: Option<NodeList<GraphTraversal>>,
        /// A set of locations relevant to this result.
        pub related_locations: Option<NodeList<Location>>,
        /// A set of suppressions relevant to this result.
        pub suppressions: Option<NodeList<Suppression>>,
        /// The state of a result relative to a baseline of a previous run.
        pub baseline_state: Option<BaselineState>,
        /// A number representing the priority or importance of the result.
        pub rank: Option<f64>,
        /// A set of artifacts relevant to the result.
        pub attachments: Option<NodeList<Attachment>>,
        /// An absolute URI at which the result can be viewed.
        pub hosted_viewer_uri: Option<String>,
        /// The URIs of the work items associated with this result.
        pub work_item_uris: Option<Vec<String>>,
        /// Information about how and when the result was detected.
        pub provenance: Option<ResultProvenance>,
        /// An array of 'fix' objects, each of which represents a proposed fix to the problem indicated by the result.
        pub fixes: Option<NodeList<Fix>>,
        /// An array of references to taxonomy reporting descriptors that are applicable to the result.
        pub taxa: Option<NodeList<ReportingDescriptorReference>>,
        /// A web request associated with this result.
        pub web_request: Option<WebRequest>,
        /// A web response associated with this result.
        pub web_response: Option<WebResponse>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// Contains information about how and when a result was detected.
    pub struct ResultProvenance {
        /// The Coordinated Universal Time (UTC) date and time at which the result was first detected.
        pub first_detection_time_utc: Option<DateTime<Utc>>,
        /// The Coordinated Universal Time (UTC) date and time at which the result was most recently detected.
        pub last_detection_time_utc: Option<DateTime<Utc>>,
        /// A GUID-valued string equal to the automationDetails.guid property of the run in which the result was first detected.
        pub first_detection_run_guid: Option<String>,
        /// A GUID-valued string equal to the automationDetails.guid property of the run in which the result was most recently detected.
        pub last_detection_run_guid: Option<String>,
        /// The index within the run.invocations array of the invocation object which describes the tool invocation that detected the result.
        pub invocation_index: Sentinel,
        /// An array of physicalLocation objects which specify the portions of an analysis tool's
        /// output that a converter transformed into the result.
        pub conversion_sources: Option<NodeList<PhysicalLocation>>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// A suppression that is relevant to a result.
    pub struct Suppression {
        /// A stable, unique identifier for the suppression in the form of a GUID.
        pub guid: Option<String>,
        /// A string that indicates where the suppression is persisted.
        pub kind: SuppressionKind,
        /// A string that indicates the state of the suppression.
        pub status: Option<SuppressionStatus>,
        /// A string representing the justification for the suppression.
        pub justification: Option<String>,
        /// Identifies the location associated with the suppression.
        pub location: Option<Location>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// An artifact relevant to a result.
    pub struct Attachment {
        /// A message describing the role played by the attachment.
        pub description: Option<Message>,
        /// The location of the attachment.
        pub artifact_location: ArtifactLocation,
        /// An array of regions of interest within the attachment.
        pub regions: Option<NodeList<Region>>,
        /// An array of rectangles specifying areas of interest within the image.
        pub rectangles: Option<NodeList<Rectangle>>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// An area within an image.
    pub struct Rectangle {
        /// The Y coordinate of the top edge of the rectangle, measured in the image's natural units.
        pub top: Option<f64>,
        /// The X coordinate of the left edge of the rectangle, measured in the image's natural units.
        pub left: Option<f64>,
        /// The Y coordinate of the bottom edge of the rectangle, measured in the image's natural units.
        pub bottom: Option<f64>,
        /// The X coordinate of the right edge of the rectangle, measured in the image's natural units.
        pub right: Option<f64>,
        /// A message relevant to the rectangle.
        pub message: Option<Message>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// A proposed fix for the problem represented by a result object. A fix specifies a set of
    /// artifacts to modify. For each artifact, it specifies a set of bytes to remove, and provides
    /// a set of new bytes to replace them.
    pub struct Fix {
        /// A message that describes the proposed fix, enabling viewers to present the proposed change to an end user.
        pub description: Option<Message>,
        /// One or more artifact changes that comprise a fix for a result.
        pub artifact_changes: NodeList<ArtifactChange>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// A change to a single artifact.
    pub struct ArtifactChange {
        /// The location of the artifact to change.
        pub artifact_location: ArtifactLocation,
        /// An array of replacement objects, each of which represents the replacement of a single
        /// region in a single artifact specified by 'artifactLocation'.
        pub replacements: NodeList<Replacement>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// The replacement of a single region of an artifact.
    pub struct Replacement {
        /// The region of the artifact to delete.
        pub deleted_region: Region,
        /// The content to insert at the location specified by the 'deletedRegion' property.
        pub inserted_content: Option<ArtifactContent>,
        pub properties: Option<PropertyBag>,
    }
}

impl Result {
    /// Creates a result with the given `message`.
    pub fn new(message: impl Into<Message>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    /// Creates a result for the rule `rule_id` with the given `message`.
    pub fn for_rule(rule_id: impl Into<String>, message: impl Into<Message>) -> Self {
        Self {
            rule_id: Some(rule_id.into()),
            ..Self::new(message)
        }
    }

    /// Returns the result's kind, defaulting to [`ResultKind::Fail`].
    pub fn effective_kind(&self) -> ResultKind {
        self.kind.unwrap_or(ResultKind::Fail)
    }

    /// Returns the result's level without consulting its rule.
    ///
    /// An absent level is [`FailureLevel::Warning`] for failing results and
    /// [`FailureLevel::None`] for every other kind. Use
    /// [`Result::effective_level_for`] when the rule is at hand.
    pub fn effective_level(&self) -> FailureLevel {
        self.effective_level_for(None)
    }

    /// Returns the result's level, taking `rule`'s default configuration
    /// into account.
    ///
    /// For a failing result with no level of its own, the rule's
    /// `defaultConfiguration.level` applies before the `warning` fallback.
    pub fn effective_level_for(&self, rule: Option<&ReportingDescriptor>) -> FailureLevel {
        match (self.level, self.effective_kind()) {
            (Some(level), _) => level,
            (None, ResultKind::Fail) => rule
                .and_then(|rule| rule.default_configuration.as_ref())
                .map_or(FailureLevel::Warning, |config| config.effective_level()),
            (None, _) => FailureLevel::None,
        }
    }

    /// Returns the effective rule identifier: `ruleId`, or else `rule.id`.
    pub fn effective_rule_id(&self) -> Option<&str> {
        self.rule_id
            .as_deref()
            .or_else(|| self.rule.as_ref()?.id.as_deref())
    }

    /// Finds the rule this result refers to within `run`.
    ///
    /// Rules are looked up in the tool component named by `rule.toolComponent`
    /// (the driver when absent), first by `ruleIndex` (or `rule.index`) and
    /// then by rule id. A hierarchical id such as `C2001/1` also matches the
    /// rule `C2001`.
    pub fn resolve_rule<'a>(&self, run: &'a Run) -> Option<&'a ReportingDescriptor> {
        let reference = self.rule.as_ref();
        let component = run
            .tool
            .component(reference.and_then(|r| r.tool_component.as_ref()))?;

        let index = self
            .rule_index
            .as_index()
            .or_else(|| reference?.index.as_index());
        if let Some(index) = index {
            return component.rule(index);
        }

        let id = self.effective_rule_id()?;
        component.rule_by_id(id).or_else(|| {
            let (base, _) = id.split_once('/')?;
            component.rule_by_id(base)
        })
    }

    /// Returns the result's message text.
    ///
    /// Inline `text` wins; otherwise `message.id` is looked up in `rule`'s
    /// message strings. Either way the message's arguments are substituted.
    pub fn message_text(&self, rule: Option<&ReportingDescriptor>) -> Option<String> {
        if let Some(text) = &self.message.text {
            return Some(self.message.format(text));
        }

        let template = rule?.message_string(self.message.id.as_deref()?)?;
        Some(self.message.format(&template.text))
    }

    /// Returns whether any suppression applies to this result.
    ///
    /// Suppressions that are under review or were rejected don't count.
    pub fn is_suppressed(&self) -> bool {
        self.suppressions.iter().flat_map(|s| s.iter()).any(|s| {
            !matches!(
                s.status,
                Some(SuppressionStatus::UnderReview | SuppressionStatus::Rejected)
            )
        })
    }
}

impl Replacement {
    /// Creates a replacement that swaps `deleted_region` for `inserted_text`.
    pub fn new(deleted_region: Region, inserted_text: Option<&str>) -> Self {
        Self {
            deleted_region,
            inserted_content: inserted_text.map(ArtifactContent::text),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;

    use super::{
        ArtifactChange, FailureLevel, Replacement, Result, ResultKind, Suppression,
        SuppressionStatus,
    };
    use crate::{
        hash::ValueHash,
        list::NodeList,
        v2_1_0::{
            ArtifactLocation, Message, MultiformatMessageString, Region, ReportingConfiguration,
            ReportingDescriptor, ReportingDescriptorReference, Run, Tool, ToolComponent,
            ToolComponentReference,
        },
        wire::Sentinel,
    };

    fn run_with_rules() -> Run {
        let mut run = Run::new(Tool::named("tool"));
        run.tool.driver.rules = Some(NodeList::from([
            ReportingDescriptor::new("C2001"),
            ReportingDescriptor {
                message_strings: Some(IndexMap::from([(
                    "default".to_string(),
                    MultiformatMessageString::new("'{0}' was not disposed"),
                )])),
                ..ReportingDescriptor::new("C2002")
            },
        ]));
        run
    }

    #[test]
    fn test_result_defaults() {
        let result = Result::default();
        assert_eq!(result.rule_index, -1);
        assert_eq!(result.effective_kind(), ResultKind::Fail);
        assert_eq!(result.effective_level(), FailureLevel::Warning);

        let pass = Result {
            kind: Some(ResultKind::Pass),
            ..Default::default()
        };
        assert_eq!(pass.effective_level(), FailureLevel::None);
    }

    #[test]
    fn test_resolve_rule() {
        let run = run_with_rules();

        let by_index = Result {
            rule_index: Sentinel::new(1),
            ..Result::for_rule("ignored", "msg")
        };
        assert_eq!(by_index.resolve_rule(&run).map(|r| r.id.as_str()), Some("C2002"));

        let by_id = Result::for_rule("C2001", "msg");
        assert_eq!(by_id.resolve_rule(&run).map(|r| r.id.as_str()), Some("C2001"));

        let hierarchical = Result::for_rule("C2001/2", "msg");
        assert_eq!(hierarchical.resolve_rule(&run).map(|r| r.id.as_str()), Some("C2001"));

        let by_reference = Result {
            rule: Some(ReportingDescriptorReference {
                id: Some("C2002".into()),
                ..Default::default()
            }),
            ..Result::new("msg")
        };
        assert_eq!(by_reference.resolve_rule(&run).map(|r| r.id.as_str()), Some("C2002"));

        assert!(Result::for_rule("C9999", "msg").resolve_rule(&run).is_none());
        assert!(Result::new("msg").resolve_rule(&run).is_none());
    }

    #[test]
    fn test_effective_level_for_rule() {
        let rule = ReportingDescriptor {
            default_configuration: Some(ReportingConfiguration {
                level: Some(FailureLevel::Error),
                ..Default::default()
            }),
            ..ReportingDescriptor::new("C2001")
        };

        let result = Result::for_rule("C2001", "msg");
        assert_eq!(result.effective_level_for(Some(&rule)), FailureLevel::Error);
        assert_eq!(result.effective_level_for(None), FailureLevel::Warning);
        assert_eq!(
            result.effective_level_for(Some(&ReportingDescriptor::new("C2001"))),
            FailureLevel::Warning
        );

        let explicit = Result {
            level: Some(FailureLevel::Note),
            ..result.clone()
        };
        assert_eq!(explicit.effective_level_for(Some(&rule)), FailureLevel::Note);

        let review = Result {
            kind: Some(ResultKind::Review),
            ..result
        };
        assert_eq!(review.effective_level_for(Some(&rule)), FailureLevel::None);
    }

    #[test]
    fn test_resolve_rule_in_extension() {
        let mut run = Run::new(Tool::named("driver"));
        run.tool.driver.rules = Some(NodeList::from([ReportingDescriptor {
            name: Some("driver-rule".into()),
            ..ReportingDescriptor::new("R1")
        }]));
        run.tool.extensions = Some(NodeList::from([ToolComponent {
            guid: Some("G".into()),
            rules: Some(NodeList::from([ReportingDescriptor {
                name: Some("ext-rule".into()),
                ..ReportingDescriptor::new("R1")
            }])),
            ..ToolComponent::new("ext")
        }]));

        let rule_in = |tool_component: ToolComponentReference| Result {
            rule: Some(ReportingDescriptorReference {
                id: Some("R1".into()),
                tool_component: Some(tool_component),
                ..Default::default()
            }),
            ..Result::new("msg")
        };

        let by_guid = rule_in(ToolComponentReference {
            guid: Some("G".into()),
            ..Default::default()
        });
        assert_eq!(
            by_guid.resolve_rule(&run).and_then(|r| r.name.as_deref()),
            Some("ext-rule")
        );

        let by_name = rule_in(ToolComponentReference {
            name: Some("ext".into()),
            ..Default::default()
        });
        assert_eq!(
            by_name.resolve_rule(&run).and_then(|r| r.name.as_deref()),
            Some("ext-rule")
        );

        let unqualified = Result::for_rule("R1", "msg");
        assert_eq!(
            unqualified.resolve_rule(&run).and_then(|r| r.name.as_deref()),
            Some("driver-rule")
        );
    }

    #[test]
    fn test_message_text() {
        let run = run_with_rules();

        let inline = Result::new(Message {
            text: Some("'{0}' leaks".into()),
            arguments: Some(vec!["conn".into()]),
            ..Default::default()
        });
        assert_eq!(inline.message_text(None).as_deref(), Some("'conn' leaks"));

        let templated = Result {
            rule_index: Sentinel::new(1),
            ..Result::new(Message::with_id("default", ["stream"]))
        };
        let rule = templated.resolve_rule(&run);
        assert_eq!(
            templated.message_text(rule).as_deref(),
            Some("'stream' was not disposed")
        );
        assert_eq!(templated.message_text(None), None);
    }

    #[test]
    fn test_is_suppressed() {
        let mut result = Result::new("msg");
        assert!(!result.is_suppressed());

        result.suppressions = Some(NodeList::from([Suppression {
            status: Some(SuppressionStatus::Rejected),
            ..Default::default()
        }]));
        assert!(!result.is_suppressed());

        result
            .suppressions
            .as_mut()
            .unwrap()
            .push(Suppression::default());
        assert!(result.is_suppressed());
    }

    #[test]
    fn test_artifact_change_null_replacement() {
        let change = ArtifactChange {
            artifact_location: ArtifactLocation::new("a.c"),
            replacements: NodeList::from(vec![
                Some(Replacement::new(Region::lines(1, 1, 1, 4), Some("foo"))),
                None,
            ]),
            ..Default::default()
        };

        let cloned = change.clone();
        assert_eq!(change, cloned);
        assert_eq!(change.value_hash(), cloned.value_hash());
        assert!(cloned.replacements.is_null(1));

        let filled = ArtifactChange {
            replacements: NodeList::from(vec![
                Some(Replacement::new(Region::lines(1, 1, 1, 4), Some("foo"))),
                Some(Replacement::default()),
            ]),
            ..change.clone()
        };
        assert_ne!(change, filled);
    }

    #[test]
    fn test_result_wire_shape() {
        let result = Result {
            level: Some(FailureLevel::Error),
            rule_index: Sentinel::new(0),
            ..Result::for_rule("R1", "bad thing")
        };

        insta::assert_snapshot!(
            serde_json::to_string(&result).unwrap(),
            @r#"{"ruleId":"R1","ruleIndex":0,"level":"error","message":{"text":"bad thing"}}"#
        );
    }
}
