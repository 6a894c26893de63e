//! SARIF 2.1.0 models.
//!
//! Resources:
//! * [SARIF 2.1.0 specification](https://docs.oasis-open.org/sarif/sarif/v2.1.0/sarif-v2.1.0.html)
//! * [JSON Schema for SARIF 2.1.0](https://docs.oasis-open.org/sarif/sarif/v2.1.0/os/schemas/sarif-schema-2.1.0.json)
//!
//! Field names are the snake_case forms of the schema's property names;
//! the `serde` derives map them back to camelCase on the wire.

mod artifact;
mod flow;
mod graph;
mod invocation;
mod location;
mod log;
mod message;
mod result;
mod run;
mod tool;
mod web;

pub use artifact::{Artifact, ArtifactContent, ArtifactLocation, ArtifactRole};
pub use flow::{CodeFlow, Stack, StackFrame, ThreadFlow, ThreadFlowLocation, ThreadFlowLocationImportance};
pub use graph::{Edge, EdgeTraversal, Graph, GraphTraversal, Node};
pub use invocation::{Exception, Invocation, Notification};
pub use location::{Address, Location, LocationRelationship, LogicalLocation, PhysicalLocation, Region};
pub use log::{
    ExternalProperties, ExternalPropertyFileReference, ExternalPropertyFileReferences, SCHEMA_URI,
    SarifLog, SarifVersion,
};
pub use message::{Message, MultiformatMessageString};
pub use result::{
    ArtifactChange, Attachment, BaselineState, Fix, Rectangle, Replacement, Result, ResultKind,
    ResultProvenance, Suppression, SuppressionKind, SuppressionStatus,
};
pub use run::{ColumnKind, Conversion, Run, RunAutomationDetails, SpecialLocations, VersionControlDetails};
pub use tool::{
    ConfigurationOverride, FailureLevel, ReportingConfiguration, ReportingDescriptor,
    ReportingDescriptorReference, ReportingDescriptorRelationship, Tool, ToolComponent,
    ToolComponentContent, ToolComponentReference, TranslationMetadata,
};
pub use web::{WebRequest, WebResponse};

/// The language tag implied when `run.language` or `toolComponent.language`
/// is absent.
pub const DEFAULT_LANGUAGE: &str = "en-US";
