//! Physical and logical locations.

use crate::{
    list::NodeList,
    property_bag::PropertyBag,
    v2_1_0::{ArtifactContent, ArtifactLocation, Message},
    wire::Sentinel,
};

sarif_node! {
    /// A location within a programming artifact.
    pub struct Location {
        /// Value that distinguishes this location from all other locations within a single result object.
        pub id: Sentinel,
        /// Identifies the artifact and region.
        pub physical_location: Option<PhysicalLocation>,
        /// The logical locations associated with the result.
        pub logical_locations: Option<NodeList<LogicalLocation>>,
        /// A message relevant to the location.
        pub message: Option<Message>,
        /// A set of regions relevant to the location.
        pub annotations: Option<NodeList<Region>>,
        /// An array of objects that describe relationships between this location and others.
        pub relationships: Option<NodeList<LocationRelationship>>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// Information about the relation of one location to another.
    pub struct LocationRelationship {
        /// A reference to the related location.
        pub target: i64,
        /// A set of distinct strings that categorize the relationship.
        /// Well-known kinds include 'includes', 'isIncludedBy' and 'relevant'.
        pub kinds: Option<Vec<String>>,
        /// A description of the location relationship.
        pub description: Option<Message>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// A physical location relevant to a result. Specifies a reference to a
    /// programming artifact together with a range of bytes or characters
    /// within that artifact.
    pub struct PhysicalLocation {
        /// The address of the location.
        pub address: Option<Address>,
        /// The location of the artifact.
        pub artifact_location: Option<ArtifactLocation>,
        /// Specifies a portion of the artifact.
        pub region: Option<Region>,
        /// Specifies a portion of the artifact that encloses the region.
        /// Allows a viewer to display additional context around the region.
        pub context_region: Option<Region>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// A logical location of a construct that produced a result.
    pub struct LogicalLocation {
        /// Identifies the construct in which the result occurred.
        pub name: Option<String>,
        /// The index within the logical locations array.
        pub index: Sentinel,
        /// The human-readable fully qualified name of the logical location.
        pub fully_qualified_name: Option<String>,
        /// The machine-readable name for the logical location, such as a mangled function name.
        pub decorated_name: Option<String>,
        /// Identifies the index of the immediate parent of the construct in which the result was detected.
        pub parent_index: Sentinel,
        /// The type of construct this logical location component refers to.
        pub kind: Option<String>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// A region within an artifact where a result was detected.
    pub struct Region {
        /// The line number of the first character in the region.
        pub start_line: Option<i64>,
        /// The column number of the first character in the region.
        pub start_column: Option<i64>,
        /// The line number of the last character in the region.
        pub end_line: Option<i64>,
        /// The column number of the character following the end of the region.
        pub end_column: Option<i64>,
        /// The zero-based offset from the beginning of the artifact of the first character in the region.
        pub char_offset: Sentinel,
        /// The length of the region in characters.
        pub char_length: Option<i64>,
        /// The zero-based offset from the beginning of the artifact of the first byte in the region.
        pub byte_offset: Sentinel,
        /// The length of the region in bytes.
        pub byte_length: Option<i64>,
        /// The portion of the artifact contents within the specified region.
        pub snippet: Option<ArtifactContent>,
        /// A message relevant to the region.
        pub message: Option<Message>,
        /// Specifies the source language, if any, of the portion of the artifact specified by the region object.
        pub source_language: Option<String>,
        pub properties: Option<PropertyBag>,
    }
}

sarif_node! {
    /// A physical or virtual address, or a range of addresses, in an 'addressable region' (memory or a binary file).
    pub struct Address {
        /// The address expressed as a byte offset from the start of the addressable region.
        pub absolute_address: Sentinel,
        /// The address expressed as a byte offset from the absolute address of the top-most parent object.
        pub relative_address: Option<i64>,
        /// The number of bytes in this range of addresses.
        pub length: Option<i64>,
        /// An open-ended string that identifies the address kind.
        pub kind: Option<String>,
        /// A name that is associated with the address, e.g., '.text'.
        pub name: Option<String>,
        /// A human-readable fully qualified name that is associated with the address.
        pub fully_qualified_name: Option<String>,
        /// The byte offset of this address from the absolute or relative address of the parent object.
        pub offset_from_parent: Option<i64>,
        /// The index within run.addresses of the cached object for this address.
        pub index: Sentinel,
        /// The index within run.addresses of the parent object.
        pub parent_index: Sentinel,
        pub properties: Option<PropertyBag>,
    }
}

impl Location {
    /// Creates a location pointing at `region` within `artifact_location`.
    pub fn physical(artifact_location: ArtifactLocation, region: Option<Region>) -> Self {
        Self {
            physical_location: Some(PhysicalLocation {
                artifact_location: Some(artifact_location),
                region,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    /// Returns the artifact location of this location's physical location, if any.
    pub fn artifact_location(&self) -> Option<&ArtifactLocation> {
        self.physical_location.as_ref()?.artifact_location.as_ref()
    }
}

impl Region {
    /// Creates a text region spanning `start_line:start_column` through `end_line:end_column`.
    pub fn lines(start_line: i64, start_column: i64, end_line: i64, end_column: i64) -> Self {
        Self {
            start_line: Some(start_line),
            start_column: Some(start_column),
            end_line: Some(end_line),
            end_column: Some(end_column),
            ..Default::default()
        }
    }

    /// Returns whether this region is specified by line and column.
    pub fn is_line_column_based(&self) -> bool {
        self.start_line.is_some()
    }

    /// Returns whether this region is specified by character offset.
    pub fn is_offset_based(&self) -> bool {
        !self.char_offset.is_unset()
    }

    /// Returns whether this region is a binary region, i.e. specified only by byte offset.
    pub fn is_binary(&self) -> bool {
        !self.byte_offset.is_unset() && !self.is_line_column_based() && !self.is_offset_based()
    }
}
