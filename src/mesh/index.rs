//! Index types for mesh entities.
//!
//! Nodes, edges, and elements live in contiguous arrays owned by the
//! [`Mesh`](super::Mesh). Cross-references between them are type-safe
//! indices into those arrays, so an edge can never be mistaken for a node.

use std::fmt::{self, Debug};

/// A type-safe node index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

/// A type-safe edge index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct EdgeId(u32);

/// A type-safe element (triangle) index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct ElementId(u32);

macro_rules! impl_index_type {
    ($name:ident, $display:literal) => {
        impl $name {
            /// Create a new index from a raw value.
            #[inline]
            pub fn new(index: usize) -> Self {
                debug_assert!(index <= u32::MAX as usize, "index {} too large for u32", index);
                Self(index as u32)
            }

            /// Get the raw index value.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", $display, self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<usize> for $name {
            fn from(v: usize) -> Self {
                Self::new(v)
            }
        }
    };
}

impl_index_type!(NodeId, "N");
impl_index_type!(EdgeId, "E");
impl_index_type!(ElementId, "T");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id() {
        let n = NodeId::new(42);
        assert_eq!(n.index(), 42);
        assert_eq!(NodeId::from(42usize), n);
    }

    #[test]
    fn test_type_safety() {
        // These are different types and cannot be mixed
        let n = NodeId::new(0);
        let e = EdgeId::new(0);
        let t = ElementId::new(0);

        // All have the same raw value but are distinct types
        assert_eq!(n.index(), e.index());
        assert_eq!(e.index(), t.index());
    }

    #[test]
    fn test_debug_format() {
        assert_eq!(format!("{:?}", NodeId::new(7)), "N(7)");
        assert_eq!(format!("{:?}", EdgeId::new(3)), "E(3)");
        assert_eq!(format!("{:?}", ElementId::new(9)), "T(9)");
        assert_eq!(format!("{}", ElementId::new(9)), "9");
    }
}
