//! Strongly-typed native representation of an imported type graph.
//!
//! Composite nodes are shared: any number of `Ty` values may hold an `Rc` to
//! the same `CompositeType`, including that node's own properties (cycles).
//! A node's property map is filled exactly once by the importer and is
//! read-only afterwards; nothing outside the importer ever observes an
//! unfilled node.

use std::fmt;
use std::rc::Rc;

use indexmap::{IndexMap, IndexSet};
use once_cell::unsync::OnceCell;

/// Candidate display names: duplicate-free, first-seen order kept. Downstream
/// naming picks from these in order, so order is meaningful.
pub type NameSet = IndexSet<String>;

/// Property name → type, insertion order preserved.
pub type PropertyMap = IndexMap<String, Ty>;

/// The named root types of a graph, insertion order preserved.
pub type TopLevels = IndexMap<String, Ty>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Any,
    Null,
    Bool,
    Integer,
    Double,
    String,
}

impl PrimitiveKind {
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Any => "any",
            PrimitiveKind::Null => "null",
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Integer => "integer",
            PrimitiveKind::Double => "double",
            PrimitiveKind::String => "string",
        }
    }
}

/// A named, property-bearing type, identified by its table position.
///
/// Allocated as an empty shell so that forward, self, and mutual references
/// can point at it before its own properties exist.
pub struct CompositeType {
    index: usize,
    names: NameSet,
    properties: OnceCell<PropertyMap>,
}

impl CompositeType {
    pub fn new(index: usize, names: NameSet) -> Self {
        Self {
            index,
            names,
            properties: OnceCell::new(),
        }
    }

    /// Table position; the node's identity.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn names(&self) -> &NameSet {
        &self.names
    }

    /// `None` only while the importer is still filling the graph; every node
    /// reachable from `import_graph`'s output has its properties set.
    pub fn properties(&self) -> Option<&PropertyMap> {
        self.properties.get()
    }

    /// One-shot fill. A second call is an importer bug, not bad input data.
    pub(crate) fn fill_properties(&self, properties: PropertyMap) {
        let already_filled = self.properties.set(properties).is_err();
        debug_assert!(!already_filled, "composite {} filled twice", self.index);
    }
}

impl fmt::Debug for CompositeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Properties may reach this node again; print the identity only.
        f.debug_struct("CompositeType")
            .field("index", &self.index)
            .field("names", &self.names)
            .finish_non_exhaustive()
    }
}

/// Native type node. Mirrors the interchange vocabulary one-to-one; adding a
/// kind on either side leaves a compile-visible hole in the importer.
#[derive(Debug, Clone)]
pub enum Ty {
    Primitive(PrimitiveKind),
    Array { items: Box<Ty> },
    Map { values: Box<Ty> },
    Enum { names: NameSet, cases: IndexSet<String> },
    Union { names: NameSet, members: Vec<Ty> },
    Composite(Rc<CompositeType>),
}

/// Structural equality, except composites compare by node identity. Any cycle
/// passes through a composite, so comparison always terminates.
impl PartialEq for Ty {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Ty::Primitive(a), Ty::Primitive(b)) => a == b,
            (Ty::Array { items: a }, Ty::Array { items: b }) => a == b,
            (Ty::Map { values: a }, Ty::Map { values: b }) => a == b,
            (
                Ty::Enum { names: an, cases: ac },
                Ty::Enum { names: bn, cases: bc },
            ) => an == bn && ac == bc,
            (
                Ty::Union { names: an, members: am },
                Ty::Union { names: bn, members: bm },
            ) => an == bn && am == bm,
            (Ty::Composite(a), Ty::Composite(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for Ty {}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> NameSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn composite_equality_is_identity_not_structure() {
        let a = Rc::new(CompositeType::new(0, names(&["Same"])));
        let b = Rc::new(CompositeType::new(0, names(&["Same"])));

        assert_ne!(Ty::Composite(Rc::clone(&a)), Ty::Composite(b));
        assert_eq!(Ty::Composite(Rc::clone(&a)), Ty::Composite(a));
    }

    #[test]
    fn properties_start_unset_and_fill_once() {
        let node = CompositeType::new(3, names(&["Node"]));
        assert!(node.properties().is_none());

        node.fill_properties(PropertyMap::from_iter([(
            "flag".to_string(),
            Ty::Primitive(PrimitiveKind::Bool),
        )]));

        let properties = node.properties().unwrap();
        assert_eq!(properties["flag"], Ty::Primitive(PrimitiveKind::Bool));
    }

    #[test]
    fn debug_of_a_cyclic_node_terminates() {
        let node = Rc::new(CompositeType::new(0, names(&["Loop"])));
        node.fill_properties(PropertyMap::from_iter([(
            "next".to_string(),
            Ty::Composite(Rc::clone(&node)),
        )]));

        // Would overflow the stack if Debug walked into properties.
        let rendered = format!("{:?}", Ty::Composite(node));
        assert!(rendered.contains("Loop"));
    }

    #[test]
    fn structural_equality_covers_nested_shapes() {
        let a = Ty::Array {
            items: Box::new(Ty::Map {
                values: Box::new(Ty::Primitive(PrimitiveKind::String)),
            }),
        };
        let b = Ty::Array {
            items: Box::new(Ty::Map {
                values: Box::new(Ty::Primitive(PrimitiveKind::String)),
            }),
        };
        let c = Ty::Array {
            items: Box::new(Ty::Primitive(PrimitiveKind::String)),
        };

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
