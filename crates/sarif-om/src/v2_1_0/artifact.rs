//! Artifacts and references to them.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    property_bag::PropertyBag,
    v2_1_0::{Message, MultiformatMessageString},
    wire::Sentinel,
};

sarif_node! {
    /// A single artifact. In some cases, this artifact might be nested within another artifact.
    pub struct Artifact {
        /// A short description of the artifact.
        pub description: Option<Message>,
        /// The location of the artifact.
        pub location: Option<ArtifactLocation>,
        /// Identifies the index of the immediate parent of the artifact, if this artifact is nested.
        pub parent_index: Sentinel,
        /// The offset in bytes of the artifact within its containing artifact.
        pub offset: Option<i64>,
        /// The length of the artifact in bytes.
        pub length: Sentinel,
        /// The role or roles played by the artifact in the analysis.
        pub roles: Option<Vec<ArtifactRole>>,
        /// The MIME type (RFC 2045) of the artifact.
        pub mime_type: Option<String>,
        /// The contents of the artifact.
        pub contents: Option<ArtifactContent>,
        /// Specifies the encoding for an artifact object that refers to a text file.
        pub encoding: Option<String>,
        /// Specifies the source language for any artifact object that refers to a text file that contains source code.
        pub source_language: Option<String>,
        /// A dictionary, each of whose keys is the name of a hash function and each of whose
        /// values is the hashed value of the artifact produced by the specified hash function.
        pub hashes: Option<IndexMap<String, String>>,
        /// The Coordinated Universal Time (UTC) date and time at which the artifact was most recently modified.
        pub last_modified_time_utc: Option<DateTime<Utc>>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// Represents the contents of an artifact.
    pub struct ArtifactContent {
        /// UTF-8-encoded content from a text artifact.
        pub text: Option<String>,
        /// MIME Base64-encoded content from a binary artifact, or from a text artifact in its original encoding.
        pub binary: Option<String>,
        /// An alternate rendered representation of the artifact (e.g., a decompiled representation of a binary region).
        pub rendered: Option<MultiformatMessageString>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// Specifies the location of an artifact.
    pub struct ArtifactLocation {
        /// A string containing a valid relative or absolute URI.
        pub uri: Option<String>,
        /// A string which indirectly specifies the absolute URI with respect to which a relative URI in the "uri" property is interpreted.
        pub uri_base_id: Option<String>,
        /// The index within the run artifacts array of the artifact object associated with the artifact location.
        pub index: Sentinel,
        /// A short description of the artifact location.
        pub description: Option<Message>,
        pub properties: Option<PropertyBag>,
    }
}

/// A role played by an artifact in an analysis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum ArtifactRole {
    AnalysisTarget,
    Attachment,
    ResponseFile,
    ResultFile,
    StandardStream,
    TracedFile,
    Unmodified,
    Modified,
    Added,
    Deleted,
    Renamed,
    Uncontrolled,
    Driver,
    Extension,
    Translation,
    Taxonomy,
    Policy,
    ReferencedOnCommandLine,
    MemoryContents,
    Directory,
    UserSpecifiedConfiguration,
    ToolSpecifiedConfiguration,
    DebugOutputFile,
}

leaf!(hash = std: ArtifactRole);

impl Artifact {
    /// Creates an artifact for `location`.
    pub fn new(location: ArtifactLocation) -> Self {
        Self {
            location: Some(location),
            ..Default::default()
        }
    }

    /// Returns whether the artifact plays `role`.
    pub fn has_role(&self, role: ArtifactRole) -> bool {
        self.roles.as_ref().is_some_and(|roles| roles.contains(&role))
    }
}

impl ArtifactContent {
    /// Creates text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }
}

impl ArtifactLocation {
    /// Creates a location referring to `uri`.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: Some(uri.into()),
            ..Default::default()
        }
    }

    /// Creates a location referring to `uri`, relative to the base named `uri_base_id`.
    pub fn with_base(uri: impl Into<String>, uri_base_id: impl Into<String>) -> Self {
        Self {
            uri_base_id: Some(uri_base_id.into()),
            ..Self::new(uri)
        }
    }

    /// Returns whether `other` identifies the same artifact, i.e. has the same
    /// `uri` and `uriBaseId`. The index, description and properties are ignored.
    pub fn same_artifact(&self, other: &ArtifactLocation) -> bool {
        self.uri == other.uri && self.uri_base_id == other.uri_base_id
    }

    /// Reconstructs this location's absolute URI by following `uriBaseId`
    /// through `original_uri_base_ids` (a run's `originalUriBaseIds`).
    ///
    /// Returns `None` if the location has no URI, or if a base is missing,
    /// has no URI of its own, or the chain of bases is cyclic.
    pub fn resolve(&self, original_uri_base_ids: &IndexMap<String, ArtifactLocation>) -> Option<String> {
        let mut uri = self.uri.clone()?;
        let mut base_id = self.uri_base_id.as_deref();
        let mut seen = vec![];

        while let Some(id) = base_id {
            if seen.contains(&id) {
                tracing::debug!(id, "cyclic uriBaseId chain");
                return None;
            }
            seen.push(id);

            let base = original_uri_base_ids.get(id)?;
            let prefix = base.uri.as_deref()?;
            uri = join_uri(prefix, &uri);
            base_id = base.uri_base_id.as_deref();
        }

        Some(uri)
    }
}

fn join_uri(base: &str, relative: &str) -> String {
    match (base.ends_with('/'), relative.starts_with('/')) {
        (true, true) => format!("{base}{}", &relative[1..]),
        (false, false) => format!("{base}/{relative}"),
        _ => format!("{base}{relative}"),
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::{Artifact, ArtifactLocation, ArtifactRole};
    use crate::wire::Sentinel;

    #[test]
    fn test_artifact_location_defaults() {
        let location = ArtifactLocation::default();
        assert_eq!(location.index, -1);
        assert_eq!(location.index, Sentinel::UNSET);
        assert!(location.uri.is_none());
    }

    #[test]
    fn test_artifact_defaults() {
        let artifact = Artifact::default();
        assert!(artifact.parent_index.is_unset());
        assert!(artifact.length.is_unset());
        assert_eq!(artifact.offset, None);
    }

    #[test]
    fn test_has_role() {
        let mut artifact = Artifact::new(ArtifactLocation::new("src/lib.rs"));
        assert!(!artifact.has_role(ArtifactRole::AnalysisTarget));

        artifact.roles = Some(vec![ArtifactRole::AnalysisTarget, ArtifactRole::Modified]);
        assert!(artifact.has_role(ArtifactRole::Modified));
        assert!(!artifact.has_role(ArtifactRole::Deleted));
    }

    #[test]
    fn test_resolve() {
        let bases = IndexMap::from([
            ("SRCROOT".to_string(), ArtifactLocation::with_base("src", "REPOROOT")),
            ("REPOROOT".to_string(), ArtifactLocation::new("file:///home/user/repo/")),
            ("LOOP_A".to_string(), ArtifactLocation::with_base("a", "LOOP_B")),
            ("LOOP_B".to_string(), ArtifactLocation::with_base("b", "LOOP_A")),
        ]);

        let location = ArtifactLocation::with_base("lib.rs", "SRCROOT");
        assert_eq!(
            location.resolve(&bases).as_deref(),
            Some("file:///home/user/repo/src/lib.rs")
        );

        let absolute = ArtifactLocation::new("https://example.com/x.c");
        assert_eq!(absolute.resolve(&bases).as_deref(), Some("https://example.com/x.c"));

        assert_eq!(ArtifactLocation::with_base("x", "MISSING").resolve(&bases), None);
        assert_eq!(ArtifactLocation::with_base("x", "LOOP_A").resolve(&bases), None);
        assert_eq!(ArtifactLocation::default().resolve(&bases), None);
    }

    #[test]
    fn test_role_wire_names() {
        assert_eq!(
            serde_json::to_string(&ArtifactRole::ReferencedOnCommandLine).unwrap(),
            r#""referencedOnCommandLine""#
        );
    }
}
