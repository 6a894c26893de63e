//! Runs and their run-level metadata.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    list::NodeList,
    property_bag::PropertyBag,
    v2_1_0::{
        Address, Artifact, ArtifactLocation, DEFAULT_LANGUAGE, ExternalPropertyFileReferences,
        Graph, Invocation, LogicalLocation, Message, Result, ThreadFlowLocation, Tool,
        ToolComponent, WebRequest, WebResponse,
    },
    wire::Sentinel,
};

/// Specifies the unit in which the tool measures columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum ColumnKind {
    Utf16CodeUnits,
    UnicodeCodePoints,
}

leaf!(hash = std: ColumnKind);

sarif_node! {
    /// Describes a single run of an analysis tool, and contains the reported output of that run.
    pub struct Run {
        /// Information about the tool or tool pipeline that generated the results in this run.
        pub tool: Tool,
        /// Describes the invocation of the analysis tool.
        pub invocations: Option<NodeList<Invocation>>,
        /// A conversion object that describes how a converter transformed an analysis tool's native reporting format into the SARIF format.
        pub conversion: Option<Conversion>,
        /// The language of the messages emitted into the log file during this run (expressed as an
        /// ISO 639-1 two-letter lowercase culture code) and an optional region (expressed as an
        /// ISO 3166-1 two-letter uppercase subculture code associated with a country or region).
        pub language: Option<String>,
        /// Specifies the revision in version control of the artifacts that were scanned.
        pub version_control_provenance: Option<NodeList<VersionControlDetails>>,
        /// The artifact location specified by each uriBaseId symbol on the machine where the tool originally ran.
        pub original_uri_base_ids: Option<IndexMap<String, ArtifactLocation>>,
        /// An array of artifact objects relevant to the run.
        pub artifacts: Option<NodeList<Artifact>>,
        /// An array of logical locations such as namespaces, types or functions.
        pub logical_locations: Option<NodeList<LogicalLocation>>,
        /// An array of zero or more unique graph objects associated with the run.
        pub graphs: Option<NodeList<Graph>>,
        /// The set of results contained in an SARIF log.
        pub results: Option<NodeList<Result>>,
        /// Automation details that describe this run.
        pub automation_details: Option<RunAutomationDetails>,
        /// Automation details that describe the aggregate of runs to which this run belongs.
        pub run_aggregates: Option<NodeList<RunAutomationDetails>>,
        /// The 'guid' property of a previous SARIF 'run' that comprises the baseline that was used
        /// to compute result 'baselineState' properties for the run.
        pub baseline_guid: Option<String>,
        /// An array of strings used to replace sensitive information in a redaction-aware property.
        pub redaction_tokens: Option<Vec<String>>,
        /// Specifies the default encoding for any artifact object that refers to a text file.
        pub default_encoding: Option<String>,
        /// Specifies the default source language for any artifact object that refers to a text file that contains source code.
        pub default_source_language: Option<String>,
        /// An ordered list of character sequences that were treated as line breaks when computing region information for the run.
        pub newline_sequences: Option<Vec<String>>,
        /// Specifies the unit in which the tool measures columns.
        pub column_kind: Option<ColumnKind>,
        /// References to external property files that should be inlined with the content of a root log file.
        pub external_property_file_references: Option<ExternalPropertyFileReferences>,
        /// An array of threadFlowLocation objects cached at run level.
        pub thread_flow_locations: Option<NodeList<ThreadFlowLocation>>,
        /// An array of toolComponent objects relevant to a taxonomy in which results are categorized.
        pub taxonomies: Option<NodeList<ToolComponent>>,
        /// Addresses associated with this run instance, if any.
        pub addresses: Option<NodeList<Address>>,
        /// The set of available translations of the localized data provided by the tool.
        pub translations: Option<NodeList<ToolComponent>>,
        /// Contains configurations that may potentially override both reportingDescriptor.defaultConfiguration
        /// (the tool's default severities) and invocation.configurationOverrides (severities established at run-time from the command line).
        pub policies: Option<NodeList<ToolComponent>>,
        /// An array of request objects cached at run level.
        pub web_requests: Option<NodeList<WebRequest>>,
        /// An array of response objects cached at run level.
        pub web_responses: Option<NodeList<WebResponse>>,
        /// A specialLocations object that defines locations of special significance to SARIF consumers.
        pub special_locations: Option<SpecialLocations>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// Information that describes a run's identity and role within an engineering system process.
    pub struct RunAutomationDetails {
        /// A description of the identity and role played within the engineering system by this object's containing run object.
        pub description: Option<Message>,
        /// A hierarchical string that uniquely identifies this object's containing run object.
        pub id: Option<String>,
        /// A stable, unique identifier for this object's containing run object in the form of a GUID.
        pub guid: Option<String>,
        /// A stable, unique identifier for the equivalence class of runs to which this object's containing run object belongs in the form of a GUID.
        pub correlation_guid: Option<String>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// Defines locations of special significance to SARIF consumers.
    pub struct SpecialLocations {
        /// Provides a suggestion to SARIF consumers to display file paths relative to the specified location.
        pub display_base: Option<ArtifactLocation>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// Specifies the information necessary to retrieve a desired revision from a version control system.
    pub struct VersionControlDetails {
        /// The absolute URI of the repository.
        pub repository_uri: String,
        /// A string that uniquely and permanently identifies the revision within the repository.
        pub revision_id: Option<String>,
        /// The name of a branch containing the revision.
        pub branch: Option<String>,
        /// A tag that has been applied to the revision.
        pub revision_tag: Option<String>,
        /// A Coordinated Universal Time (UTC) date and time that can be used to synchronize an enlistment to the state of the repository at that time.
        pub as_of_time_utc: Option<DateTime<Utc>>,
        /// The location in the local file system to which the root of the repository was mapped at the time of the analysis.
        pub mapped_to: Option<ArtifactLocation>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// Describes how a converter transformed the output of a static analysis tool from the analysis tool's native output format into the SARIF format.
    pub struct Conversion {
        /// A tool object that describes the converter.
        pub tool: Tool,
        /// An invocation object that describes the invocation of the converter.
        pub invocation: Option<Invocation>,
        /// The locations of the analysis tool's per-run log files.
        pub analysis_tool_log_files: Option<NodeList<ArtifactLocation>>,
        pub properties: Option<PropertyBag>,
    }
}

impl Run {
    /// Creates a run for `tool` with no results.
    pub fn new(tool: Tool) -> Self {
        Self {
            tool,
            ..Default::default()
        }
    }

    /// Returns the run's language, falling back to `en-US`.
    pub fn effective_language(&self) -> &str {
        self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }

    /// Iterates over the run's results, skipping null slots.
    pub fn results(&self) -> impl Iterator<Item = &Result> {
        self.results.iter().flat_map(|results| results.iter())
    }

    /// Finds the index of the artifact that `location` refers to in
    /// `run.artifacts`, matching on `uri` and `uriBaseId`.
    ///
    /// If there is no such artifact and `add_if_missing` is set, a new
    /// artifact for `location` is appended. On success `location.index` is
    /// updated to the found index. Otherwise [`Sentinel::UNSET`] is returned
    /// and `location` is left unchanged.
    pub fn artifact_index(&mut self, location: &mut ArtifactLocation, add_if_missing: bool) -> Sentinel {
        let matches = |artifact: &Artifact| {
            artifact
                .location
                .as_ref()
                .is_some_and(|candidate| candidate.same_artifact(location))
        };

        // An existing index is trusted only if it still points at a matching artifact.
        let found = self.artifacts.as_ref().and_then(|artifacts| {
            location
                .index
                .as_index()
                .filter(|&idx| artifacts.get(idx).is_some_and(matches))
                .or_else(|| artifacts.position(matches))
        });

        let index = match found {
            Some(index) => index,
            None if add_if_missing => {
                let artifacts = self.artifacts.get_or_insert_with(NodeList::new);
                let index = artifacts.len();
                artifacts.push(Artifact::new(ArtifactLocation {
                    index: Sentinel::from(index),
                    ..location.clone()
                }));
                tracing::debug!(
                    index,
                    uri = location.uri.as_deref(),
                    "added artifact to run"
                );
                index
            }
            None => return Sentinel::UNSET,
        };

        location.index = Sentinel::from(index);
        location.index
    }
}

impl VersionControlDetails {
    /// Creates version control details for `repository_uri`.
    pub fn new(repository_uri: impl Into<String>) -> Self {
        Self {
            repository_uri: repository_uri.into(),
            ..Default::default()
        }
    }
}
