//! Errors produced by the object model.

use thiserror::Error;

use crate::node::SarifNodeKind;

/// Errors produced by the object model.
///
/// Structural equality, hashing and cloning never fail; these errors only
/// come from precondition violations and typed property access.
#[derive(Debug, Error)]
pub enum Error {
    /// A node was copy-constructed from an absent source.
    #[error("cannot copy-construct a {kind} from an absent source")]
    NullSource {
        /// The kind of node that was being constructed.
        kind: SarifNodeKind,
    },
    /// A property bag value couldn't be converted to or from the requested type.
    #[error("property `{name}` has an incompatible value")]
    Property {
        /// The property's key.
        name: String,
        /// The underlying conversion error.
        #[source]
        source: serde_json::Error,
    },
    /// A sentinel integer was below the `-1` "unset" value.
    #[error("invalid sentinel value {0}: must be -1 (unset) or non-negative")]
    InvalidSentinel(i64),
}
