//! Declarative helpers that stamp out the per-node boilerplate.
//!
//! Every SARIF node is a plain struct whose fields are declared once with
//! [`sarif_node!`]. The macro derives structural equality and deep cloning,
//! wires up the wire-format policies, and generates the structural hash and
//! child enumeration by visiting every field in declaration order.

/// Declares a SARIF node type.
///
/// Fields may carry a `= expr` default; fields without one use
/// [`Default::default`]. Every node must declare a trailing
/// `properties: Option<PropertyBag>` field.
macro_rules! sarif_node {
    (@default) => {
        ::core::default::Default::default()
    };
    (@default $default:expr) => {
        $default
    };
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                pub $field:ident : $ty:ty $(= $default:expr)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[cfg_attr(feature = "schema", derive(::schemars::JsonSchema))]
        #[serde(default, rename_all = "camelCase")]
        pub struct $name {
            $(
                $(#[$fmeta])*
                #[serde(skip_serializing_if = "crate::wire::Absent::is_absent")]
                pub $field: $ty,
            )*
        }

        impl ::core::default::Default for $name {
            fn default() -> Self {
                Self {
                    $( $field: sarif_node!(@default $($default)?), )*
                }
            }
        }

        impl crate::hash::ValueHash for $name {
            fn value_hash(&self) -> i32 {
                let result = crate::hash::SEED;
                $( let result = crate::hash::ValueHash::fold_hash(&self.$field, result); )*
                result
            }
        }

        impl crate::wire::Absent for $name {}

        impl crate::node::ChildNodes for $name {
            fn collect<'a>(&'a self, out: &mut Vec<crate::node::NodeRef<'a>>) {
                out.push(crate::node::NodeRef::$name(self));
            }

            fn collect_mut<'a>(&'a mut self, out: &mut Vec<crate::node::NodeMut<'a>>) {
                out.push(crate::node::NodeMut::$name(self));
            }
        }

        impl crate::node::SarifNode for $name {
            const KIND: crate::node::SarifNodeKind = crate::node::SarifNodeKind::$name;

            fn as_node(&self) -> crate::node::NodeRef<'_> {
                crate::node::NodeRef::$name(self)
            }

            fn as_node_mut(&mut self) -> crate::node::NodeMut<'_> {
                crate::node::NodeMut::$name(self)
            }

            fn into_node(self) -> crate::node::OwnedNode {
                crate::node::OwnedNode::$name(self)
            }

            fn children(&self) -> Vec<crate::node::NodeRef<'_>> {
                let mut out = vec![];
                $( crate::node::ChildNodes::collect(&self.$field, &mut out); )*
                out
            }

            fn children_mut(&mut self) -> Vec<crate::node::NodeMut<'_>> {
                let mut out = vec![];
                $( crate::node::ChildNodes::collect_mut(&mut self.$field, &mut out); )*
                out
            }

            fn properties(&self) -> Option<&crate::property_bag::PropertyBag> {
                self.properties.as_ref()
            }

            fn properties_mut(&mut self) -> &mut Option<crate::property_bag::PropertyBag> {
                &mut self.properties
            }
        }

        impl From<$name> for crate::node::OwnedNode {
            fn from(node: $name) -> Self {
                crate::node::OwnedNode::$name(node)
            }
        }
    };
}

/// Implements the scalar-leaf policies for types that never own child nodes
/// and are always written when present.
///
/// `hash = std` hashes through [`std::hash::Hash`]; otherwise the type must
/// already implement `ValueHash`.
macro_rules! leaf {
    (hash = std: $($ty:ty),+ $(,)?) => {
        $(
            impl crate::hash::ValueHash for $ty {
                fn value_hash(&self) -> i32 {
                    crate::hash::std_hash(self)
                }
            }

            impl crate::wire::Absent for $ty {}
        )+

        leaf!($($ty),+);
    };
    ($($ty:ty),+ $(,)?) => {
        $(
            impl crate::node::ChildNodes for $ty {
                fn collect<'a>(&'a self, _: &mut Vec<crate::node::NodeRef<'a>>) {}
                fn collect_mut<'a>(&'a mut self, _: &mut Vec<crate::node::NodeMut<'a>>) {}
            }
        )+
    };
}
