//! The top-level log and externalized property files.

use serde::{Deserialize, Serialize};

use crate::{
    list::NodeList,
    property_bag::PropertyBag,
    v2_1_0::{
        Address, Artifact, ArtifactLocation, Conversion, Graph, Invocation, LogicalLocation, Result, Run,
        ThreadFlowLocation, ToolComponent, WebRequest, WebResponse,
    },
    wire::Sentinel,
};

/// The JSON schema URI for SARIF 2.1.0 logs.
pub const SCHEMA_URI: &str =
    "https://docs.oasis-open.org/sarif/sarif/v2.1.0/os/schemas/sarif-schema-2.1.0.json";

/// The SARIF format version of a log file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub enum SarifVersion {
    #[default]
    #[serde(rename = "2.1.0")]
    V2_1_0,
}

leaf!(hash = std: SarifVersion);

sarif_node! {
    /// Static Analysis Results Format (SARIF) Version 2.1.0 JSON Schema.
    pub struct SarifLog {
        /// The URI of the JSON schema corresponding to the version.
        #[serde(rename = "$schema")]
        pub schema: Option<String>,
        /// The SARIF format version of this log file.
        pub version: SarifVersion,
        /// The set of runs contained in this log file.
        pub runs: Option<NodeList<Run>>,
        /// References to external property files that share data between runs.
        pub inline_external_properties: Option<NodeList<ExternalProperties>>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// The top-level element of an external property file.
    pub struct ExternalProperties {
        /// The URI of the JSON schema corresponding to the version of the external property file format.
        #[serde(rename = "$schema")]
        pub schema: Option<String>,
        /// The SARIF format version of this external properties object.
        pub version: Option<SarifVersion>,
        /// A stable, unique identifier for this external properties object, in the form of a GUID.
        pub guid: Option<String>,
        /// A stable, unique identifier for the run associated with this external properties object.
        pub run_guid: Option<String>,
        /// A conversion object that will be merged with a separate run.
        pub conversion: Option<Conversion>,
        /// An array of graph objects that will be merged with a separate run.
        pub graphs: Option<NodeList<Graph>>,
        /// Key/value pairs that provide additional information that will be merged with a separate run.
        pub externalized_properties: Option<PropertyBag>,
        /// An array of artifact objects that will be merged with a separate run.
        pub artifacts: Option<NodeList<Artifact>>,
        /// Describes the invocation of the analysis tool that will be merged with a separate run.
        pub invocations: Option<NodeList<Invocation>>,
        /// An array of logical locations such as namespaces, types or functions that will be merged with a separate run.
        pub logical_locations: Option<NodeList<LogicalLocation>>,
        /// An array of threadFlowLocation objects that will be merged with a separate run.
        pub thread_flow_locations: Option<NodeList<ThreadFlowLocation>>,
        /// An array of result objects that will be merged with a separate run.
        pub results: Option<NodeList<Result>>,
        /// Tool taxonomies that will be merged with a separate run.
        pub taxonomies: Option<NodeList<ToolComponent>>,
        /// The analysis tool object that will be merged with a separate run.
        pub driver: Option<ToolComponent>,
        /// Tool extensions that will be merged with a separate run.
        pub extensions: Option<NodeList<ToolComponent>>,
        /// Tool policies that will be merged with a separate run.
        pub policies: Option<NodeList<ToolComponent>>,
        /// Tool translations that will be merged with a separate run.
        pub translations: Option<NodeList<ToolComponent>>,
        /// Addresses that will be merged with a separate run.
        pub addresses: Option<NodeList<Address>>,
        /// Requests that will be merged with a separate run.
        pub web_requests: Option<NodeList<WebRequest>>,
        /// Responses that will be merged with a separate run.
        pub web_responses: Option<NodeList<WebResponse>>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// Contains information that enables a SARIF consumer to locate the external property file
    /// that contains the value of an externalized property associated with the run.
    pub struct ExternalPropertyFileReference {
        /// The location of the external property file.
        pub location: Option<ArtifactLocation>,
        /// A stable, unique identifier for the external property file in the form of a GUID.
        pub guid: Option<String>,
        /// A non-negative integer specifying the number of items contained in the external property file.
        pub item_count: Sentinel,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// References to external property files that should be inlined with the content of a root log file.
    pub struct ExternalPropertyFileReferences {
        pub conversion: Option<ExternalPropertyFileReference>,
        pub graphs: Option<NodeList<ExternalPropertyFileReference>>,
        pub externalized_properties: Option<ExternalPropertyFileReference>,
        pub artifacts: Option<NodeList<ExternalPropertyFileReference>>,
        pub invocations: Option<NodeList<ExternalPropertyFileReference>>,
        pub logical_locations: Option<NodeList<ExternalPropertyFileReference>>,
        pub thread_flow_locations: Option<NodeList<ExternalPropertyFileReference>>,
        pub results: Option<NodeList<ExternalPropertyFileReference>>,
        pub taxonomies: Option<NodeList<ExternalPropertyFileReference>>,
        pub addresses: Option<NodeList<ExternalPropertyFileReference>>,
        pub driver: Option<ExternalPropertyFileReference>,
        pub extensions: Option<NodeList<ExternalPropertyFileReference>>,
        pub policies: Option<NodeList<ExternalPropertyFileReference>>,
        pub translations: Option<NodeList<ExternalPropertyFileReference>>,
        pub web_requests: Option<NodeList<ExternalPropertyFileReference>>,
        pub web_responses: Option<NodeList<ExternalPropertyFileReference>>,
        pub properties: Option<PropertyBag>,
    }
}

impl SarifLog {
    /// Creates a 2.1.0 log containing `runs`, with `$schema` set to [`SCHEMA_URI`].
    pub fn new(runs: impl IntoIterator<Item = Run>) -> Self {
        Self {
            schema: Some(SCHEMA_URI.into()),
            runs: Some(runs.into_iter().collect()),
            ..Default::default()
        }
    }

    /// Iterates over the log's runs, skipping null slots.
    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.runs.iter().flat_map(|runs| runs.iter())
    }
}
