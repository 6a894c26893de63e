//! Visitor traits for traversing SARIF logs.
//!
//! [`Visitor`] walks a tree of nodes read-only; [`VisitorMut`] walks it with
//! mutable access so that a visitor can rewrite nodes in place. Both follow
//! the same shape: every `visit_*` method defaults to the matching `super_*`
//! method, which performs the recursive descent into owned children.
//! Override a `visit_*` method to act on a node, and call its `super_*`
//! counterpart to keep descending.
//!
//! Integer cross-references (`ruleIndex`, `parentIndex` and friends) are
//! plain scalars, so traversal never follows them.
//!
//! ## Example Usage
//!
//! ```rust
//! use sarif_om::{ArtifactLocation, Location, Region, Run, SarifLog, Tool};
//! use sarif_om::visitor::{Visitable, Visitor};
//!
//! struct RegionCounter(usize);
//!
//! impl<'a> Visitor<'a> for RegionCounter {
//!     fn visit_region(&mut self, region: &'a Region) {
//!         self.0 += 1;
//!         self.super_region(region);
//!     }
//! }
//!
//! let mut result = sarif_om::Result::new("oops");
//! result.locations = Some(
//!     vec![Location::physical(
//!         ArtifactLocation::new("src/main.rs"),
//!         Some(Region::lines(1, 1, 1, 5)),
//!     )]
//!     .into(),
//! );
//! let log = SarifLog::new([Run {
//!     results: Some(vec![result].into()),
//!     ..Run::new(Tool::named("demo"))
//! }]);
//!
//! let mut counter = RegionCounter(0);
//! log.accept(&mut counter);
//! assert_eq!(counter.0, 1);
//! ```

use crate::{
    node::{NodeMut, NodeRef, SarifNode},
    v2_1_0::{self, ArtifactLocation, Location, Message, Region},
};

/// A read-only visitor over SARIF nodes.
pub trait Visitor<'a> {
    /// Visit a node of any kind.
    ///
    /// This is the main entry point for visiting nodes.
    fn visit_node(&mut self, node: NodeRef<'a>) {
        self.super_node(node);
    }

    /// Visit a result.
    fn visit_result(&mut self, result: &'a v2_1_0::Result) {
        self.super_result(result);
    }

    /// Visit a location.
    fn visit_location(&mut self, location: &'a Location) {
        self.super_location(location);
    }

    /// Visit an artifact location.
    fn visit_artifact_location(&mut self, location: &'a ArtifactLocation) {
        self.super_artifact_location(location);
    }

    /// Visit a region.
    fn visit_region(&mut self, region: &'a Region) {
        self.super_region(region);
    }

    /// Visit a message.
    fn visit_message(&mut self, message: &'a Message) {
        self.super_message(message);
    }

    /// Dispatches to the typed `visit_*` method for `node`, or descends
    /// into its children if there is none.
    fn super_node(&mut self, node: NodeRef<'a>) {
        match node {
            NodeRef::Result(result) => self.visit_result(result),
            NodeRef::Location(location) => self.visit_location(location),
            NodeRef::ArtifactLocation(location) => self.visit_artifact_location(location),
            NodeRef::Region(region) => self.visit_region(region),
            NodeRef::Message(message) => self.visit_message(message),
            _ => self.super_children(node),
        }
    }

    fn super_result(&mut self, result: &'a v2_1_0::Result) {
        self.super_children(result.as_node());
    }

    fn super_location(&mut self, location: &'a Location) {
        self.super_children(location.as_node());
    }

    fn super_artifact_location(&mut self, location: &'a ArtifactLocation) {
        self.super_children(location.as_node());
    }

    fn super_region(&mut self, region: &'a Region) {
        self.super_children(region.as_node());
    }

    fn super_message(&mut self, message: &'a Message) {
        self.super_children(message.as_node());
    }

    /// Visits each of `node`'s owned children, in field declaration order.
    fn super_children(&mut self, node: NodeRef<'a>) {
        for child in node.children() {
            self.visit_node(child);
        }
    }
}

/// A visitor over SARIF nodes that may rewrite them in place.
///
/// Mirrors [`Visitor`]: each `visit_*_mut` method defaults to its
/// `super_*_mut` counterpart, which descends into the node's children.
pub trait VisitorMut {
    /// Visit a node of any kind.
    fn visit_node_mut(&mut self, node: NodeMut<'_>) {
        self.super_node_mut(node);
    }

    /// Visit a result.
    fn visit_result_mut(&mut self, result: &mut v2_1_0::Result) {
        self.super_result_mut(result);
    }

    /// Visit a location.
    fn visit_location_mut(&mut self, location: &mut Location) {
        self.super_location_mut(location);
    }

    /// Visit an artifact location.
    fn visit_artifact_location_mut(&mut self, location: &mut ArtifactLocation) {
        self.super_artifact_location_mut(location);
    }

    /// Visit a region.
    fn visit_region_mut(&mut self, region: &mut Region) {
        self.super_region_mut(region);
    }

    /// Visit a message.
    fn visit_message_mut(&mut self, message: &mut Message) {
        self.super_message_mut(message);
    }

    fn super_node_mut(&mut self, node: NodeMut<'_>) {
        match node {
            NodeMut::Result(result) => self.visit_result_mut(result),
            NodeMut::Location(location) => self.visit_location_mut(location),
            NodeMut::ArtifactLocation(location) => self.visit_artifact_location_mut(location),
            NodeMut::Region(region) => self.visit_region_mut(region),
            NodeMut::Message(message) => self.visit_message_mut(message),
            node => self.super_children_mut(node),
        }
    }

    fn super_result_mut(&mut self, result: &mut v2_1_0::Result) {
        self.super_children_mut(result.as_node_mut());
    }

    fn super_location_mut(&mut self, location: &mut Location) {
        self.super_children_mut(location.as_node_mut());
    }

    fn super_artifact_location_mut(&mut self, location: &mut ArtifactLocation) {
        self.super_children_mut(location.as_node_mut());
    }

    fn super_region_mut(&mut self, region: &mut Region) {
        self.super_children_mut(region.as_node_mut());
    }

    fn super_message_mut(&mut self, message: &mut Message) {
        self.super_children_mut(message.as_node_mut());
    }

    /// Visits each of `node`'s owned children, in field declaration order.
    fn super_children_mut(&mut self, node: NodeMut<'_>) {
        for child in node.into_children() {
            self.visit_node_mut(child);
        }
    }
}

/// Extension trait to add visitor functionality to nodes.
pub trait Visitable {
    /// Accept a read-only visitor, starting at this node.
    fn accept<'a, V: Visitor<'a>>(&'a self, visitor: &mut V);

    /// Accept a rewriting visitor, starting at this node.
    fn accept_mut<V: VisitorMut>(&mut self, visitor: &mut V);
}

impl<T: SarifNode> Visitable for T {
    fn accept<'a, V: Visitor<'a>>(&'a self, visitor: &mut V) {
        visitor.visit_node(self.as_node());
    }

    fn accept_mut<V: VisitorMut>(&mut self, visitor: &mut V) {
        visitor.visit_node_mut(self.as_node_mut());
    }
}
