//! The capability set shared by every SARIF node.
//!
//! Each node type implements [`SarifNode`], which provides its kind tag,
//! structural equality (through `PartialEq`), structural hashing (through
//! [`ValueHash`]) and deep cloning. For code that handles nodes of
//! different types uniformly, [`NodeRef`], [`NodeMut`] and [`OwnedNode`] are
//! closed sum types over every node type.
//!
//! [`OwnedNode`] is named to avoid clashing with the graph [`Node`](crate::v2_1_0::Node) type.

use std::fmt::{self, Debug, Display};

use indexmap::IndexMap;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    error::Error, hash::ValueHash, list::NodeList, property_bag::PropertyBag, wire::Sentinel,
};

/// Collects the owned child nodes directly reachable through a field.
///
/// Node-typed values push themselves; containers delegate to their
/// elements; scalars contribute nothing. Integer cross-references such as
/// `ruleIndex` are scalars, so they are never followed.
pub(crate) trait ChildNodes {
    fn collect<'a>(&'a self, out: &mut Vec<NodeRef<'a>>);
    fn collect_mut<'a>(&'a mut self, out: &mut Vec<NodeMut<'a>>);
}

impl<T: ChildNodes> ChildNodes for Option<T> {
    fn collect<'a>(&'a self, out: &mut Vec<NodeRef<'a>>) {
        if let Some(value) = self {
            value.collect(out);
        }
    }

    fn collect_mut<'a>(&'a mut self, out: &mut Vec<NodeMut<'a>>) {
        if let Some(value) = self {
            value.collect_mut(out);
        }
    }
}

impl<T: ChildNodes> ChildNodes for Vec<T> {
    fn collect<'a>(&'a self, out: &mut Vec<NodeRef<'a>>) {
        for value in self {
            value.collect(out);
        }
    }

    fn collect_mut<'a>(&'a mut self, out: &mut Vec<NodeMut<'a>>) {
        for value in self {
            value.collect_mut(out);
        }
    }
}

impl<T: ChildNodes> ChildNodes for NodeList<T> {
    fn collect<'a>(&'a self, out: &mut Vec<NodeRef<'a>>) {
        for value in self {
            value.collect(out);
        }
    }

    fn collect_mut<'a>(&'a mut self, out: &mut Vec<NodeMut<'a>>) {
        for value in self {
            value.collect_mut(out);
        }
    }
}

impl<K, V: ChildNodes, S> ChildNodes for IndexMap<K, V, S> {
    fn collect<'a>(&'a self, out: &mut Vec<NodeRef<'a>>) {
        for value in self.values() {
            value.collect(out);
        }
    }

    fn collect_mut<'a>(&'a mut self, out: &mut Vec<NodeMut<'a>>) {
        for value in self.values_mut() {
            value.collect_mut(out);
        }
    }
}

leaf!(
    String,
    bool,
    i64,
    f64,
    Sentinel,
    chrono::DateTime<chrono::Utc>,
    PropertyBag,
    Value,
);

/// A SARIF node: one schema-defined record type.
pub trait SarifNode: Clone + Debug + Default + PartialEq + ValueHash {
    /// The static discriminant for this node type.
    const KIND: SarifNodeKind;

    /// Returns this node's kind.
    fn kind(&self) -> SarifNodeKind {
        Self::KIND
    }

    /// Borrows this node as a [`NodeRef`].
    fn as_node(&self) -> NodeRef<'_>;

    /// Mutably borrows this node as a [`NodeMut`].
    fn as_node_mut(&mut self) -> NodeMut<'_>;

    /// Converts this node into an [`OwnedNode`].
    fn into_node(self) -> OwnedNode;

    /// Returns the owned child nodes directly below this node, in field
    /// declaration order.
    fn children(&self) -> Vec<NodeRef<'_>>;

    /// Mutable variant of [`SarifNode::children`].
    fn children_mut(&mut self) -> Vec<NodeMut<'_>>;

    /// Returns this node's property bag, if it has one.
    fn properties(&self) -> Option<&PropertyBag>;

    /// Returns this node's property bag slot.
    fn properties_mut(&mut self) -> &mut Option<PropertyBag>;

    /// Returns a structurally independent copy of this node.
    fn deep_clone(&self) -> Self {
        self.clone()
    }

    /// Copy-constructs a node from `source`.
    ///
    /// An absent source is a precondition violation and is reported as
    /// [`Error::NullSource`].
    fn copy_from(source: Option<&Self>) -> Result<Self, Error> {
        source
            .map(Self::deep_clone)
            .ok_or(Error::NullSource { kind: Self::KIND })
    }

    /// Structural equality.
    fn value_eq(&self, other: &Self) -> bool {
        self == other
    }

    /// Returns a property from this node's property bag, converted to `T`.
    fn property<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, Error> {
        match self.properties() {
            Some(bag) => bag.get(name),
            None => Ok(None),
        }
    }

    /// Sets a property on this node, creating the property bag if needed.
    fn set_property<T: Serialize>(
        &mut self,
        name: impl Into<String>,
        value: T,
    ) -> Result<Option<Value>, Error> {
        self.properties_mut()
            .get_or_insert_with(PropertyBag::new)
            .set(name, value)
    }
}

/// Declares the closed set of node types and the sum types over them.
macro_rules! sarif_nodes {
    ($($name:ident),+ $(,)?) => {
        /// Identifies the concrete type of a SARIF node.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum SarifNodeKind {
            $(
                $name,
            )+
        }

        impl SarifNodeKind {
            /// Every node kind, in declaration order.
            pub const ALL: &'static [SarifNodeKind] = &[$(SarifNodeKind::$name),+];

            /// Returns the node type's name.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(SarifNodeKind::$name => stringify!($name),)+
                }
            }
        }

        /// A borrowed node of any type.
        #[derive(Clone, Copy, Debug, PartialEq)]
        pub enum NodeRef<'a> {
            $(
                $name(&'a crate::v2_1_0::$name),
            )+
        }

        /// A mutably borrowed node of any type.
        #[derive(Debug)]
        pub enum NodeMut<'a> {
            $(
                $name(&'a mut crate::v2_1_0::$name),
            )+
        }

        /// An owned node of any type.
        #[derive(Clone, Debug, PartialEq)]
        pub enum OwnedNode {
            $(
                $name(crate::v2_1_0::$name),
            )+
        }

        impl<'a> NodeRef<'a> {
            /// Returns the node's kind.
            pub fn kind(&self) -> SarifNodeKind {
                match self {
                    $(NodeRef::$name(_) => SarifNodeKind::$name,)+
                }
            }

            /// Returns the node's owned children, in field declaration order.
            pub fn children(&self) -> Vec<NodeRef<'a>> {
                match *self {
                    $(NodeRef::$name(node) => node.children(),)+
                }
            }

            /// Returns the node's property bag, if it has one.
            pub fn properties(&self) -> Option<&'a PropertyBag> {
                match *self {
                    $(NodeRef::$name(node) => node.properties.as_ref(),)+
                }
            }

            /// Deep-clones the borrowed node.
            pub fn deep_clone(&self) -> OwnedNode {
                match *self {
                    $(NodeRef::$name(node) => OwnedNode::$name(node.deep_clone()),)+
                }
            }
        }

        impl ValueHash for NodeRef<'_> {
            fn value_hash(&self) -> i32 {
                match self {
                    $(NodeRef::$name(node) => node.value_hash(),)+
                }
            }
        }

        impl<'a> NodeMut<'a> {
            /// Returns the node's kind.
            pub fn kind(&self) -> SarifNodeKind {
                match self {
                    $(NodeMut::$name(_) => SarifNodeKind::$name,)+
                }
            }

            /// Reborrows this node immutably.
            pub fn as_ref(&self) -> NodeRef<'_> {
                match self {
                    $(NodeMut::$name(node) => NodeRef::$name(&**node),)+
                }
            }

            /// Converts this borrow into mutable borrows of the node's children.
            pub fn into_children(self) -> Vec<NodeMut<'a>> {
                match self {
                    $(NodeMut::$name(node) => node.children_mut(),)+
                }
            }

            /// Returns the node's property bag slot.
            pub fn properties_mut(&mut self) -> &mut Option<PropertyBag> {
                match self {
                    $(NodeMut::$name(node) => &mut node.properties,)+
                }
            }
        }

        impl OwnedNode {
            /// Returns the node's kind.
            pub fn kind(&self) -> SarifNodeKind {
                self.as_ref().kind()
            }

            /// Borrows the node.
            pub fn as_ref(&self) -> NodeRef<'_> {
                match self {
                    $(OwnedNode::$name(node) => NodeRef::$name(node),)+
                }
            }

            /// Mutably borrows the node.
            pub fn as_mut(&mut self) -> NodeMut<'_> {
                match self {
                    $(OwnedNode::$name(node) => NodeMut::$name(node),)+
                }
            }
        }

        impl ValueHash for OwnedNode {
            fn value_hash(&self) -> i32 {
                self.as_ref().value_hash()
            }
        }

        $(
            impl<'a> TryFrom<NodeRef<'a>> for &'a crate::v2_1_0::$name {
                type Error = SarifNodeKind;

                /// Downcasts a borrowed node, returning its actual kind on mismatch.
                fn try_from(node: NodeRef<'a>) -> Result<Self, Self::Error> {
                    match node {
                        NodeRef::$name(node) => Ok(node),
                        other => Err(other.kind()),
                    }
                }
            }

            impl TryFrom<OwnedNode> for crate::v2_1_0::$name {
                type Error = OwnedNode;

                fn try_from(node: OwnedNode) -> Result<Self, Self::Error> {
                    match node {
                        OwnedNode::$name(node) => Ok(node),
                        other => Err(other),
                    }
                }
            }
        )+
    };
}

sarif_nodes!(
    SarifLog,
    Address,
    Artifact,
    ArtifactChange,
    ArtifactContent,
    ArtifactLocation,
    Attachment,
    CodeFlow,
    ConfigurationOverride,
    Conversion,
    Edge,
    EdgeTraversal,
    Exception,
    ExternalProperties,
    ExternalPropertyFileReference,
    ExternalPropertyFileReferences,
    Fix,
    Graph,
    GraphTraversal,
    Invocation,
    Location,
    LocationRelationship,
    LogicalLocation,
    Message,
    MultiformatMessageString,
    Node,
    Notification,
    PhysicalLocation,
    Rectangle,
    Region,
    Replacement,
    ReportingConfiguration,
    ReportingDescriptor,
    ReportingDescriptorReference,
    ReportingDescriptorRelationship,
    Result,
    ResultProvenance,
    Run,
    RunAutomationDetails,
    SpecialLocations,
    Stack,
    StackFrame,
    Suppression,
    ThreadFlow,
    ThreadFlowLocation,
    Tool,
    ToolComponent,
    ToolComponentReference,
    TranslationMetadata,
    VersionControlDetails,
    WebRequest,
    WebResponse,
);

impl Display for SarifNodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
