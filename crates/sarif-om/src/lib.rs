//! An object model for the Static Analysis Results Interchange Format
//! (SARIF), version 2.1.0.
//!
//! Every schema-defined SARIF object is a plain Rust struct (a *node*) with
//! value semantics:
//!
//! * equality is structural (`PartialEq`), with maps compared regardless of
//!   insertion order;
//! * [`ValueHash`] gives a structural hash consistent with that equality;
//! * [`SarifNode::deep_clone`] produces a fully independent copy;
//! * [`SarifNode::kind`] reports a [`SarifNodeKind`] tag, and [`NodeRef`],
//!   [`NodeMut`] and [`OwnedNode`] let generic code handle any node.
//!
//! Integer fields that SARIF leaves "unset" as `-1` are modeled with
//! [`Sentinel`]; optional lists of nodes are [`NodeList`]s, which keep null
//! slots in place.
//!
//! ```rust
//! use sarif_om::{ArtifactLocation, Location, Region, Run, SarifLog, SarifNode, Tool, ValueHash};
//!
//! let mut result = sarif_om::Result::for_rule("R1", "something happened");
//! result.locations = Some(
//!     vec![Location::physical(
//!         ArtifactLocation::new("src/main.rs"),
//!         Some(Region::lines(1, 1, 1, 10)),
//!     )]
//!     .into(),
//! );
//!
//! let log = SarifLog::new([Run {
//!     results: Some(vec![result].into()),
//!     ..Run::new(Tool::named("demo"))
//! }]);
//!
//! let copy = log.deep_clone();
//! assert_eq!(log, copy);
//! assert_eq!(log.value_hash(), copy.value_hash());
//! assert!(log.runs().next().unwrap().results().next().unwrap().rule_index.is_unset());
//! ```

#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod error;
mod hash;
mod list;
mod node;
mod property_bag;
pub mod v2_1_0;
pub mod visitor;
mod wire;

pub use error::Error;
pub use hash::ValueHash;
pub use list::NodeList;
pub use node::{NodeMut, NodeRef, OwnedNode, SarifNode, SarifNodeKind};
pub use property_bag::PropertyBag;
pub use v2_1_0::*;
pub use visitor::{Visitable, Visitor, VisitorMut};
pub use wire::Sentinel;
