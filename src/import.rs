//! The importer: interchange graph → native type graph.
//!
//! Two phases make cyclic references resolvable without any cycle primitive:
//! first allocate one empty `CompositeType` shell per present table slot,
//! then fill every shell's properties against the finished table. A reference
//! to slot `i` always yields the same shared node, whether or not that node's
//! own properties are filled yet, so self- and mutual references terminate.
//!
//! This is a faithful structural transcription: no simplification, no
//! deduplication beyond ordered-set semantics, no naming.

use std::rc::Rc;

use thiserror::Error;

use crate::interchange::{CompositeEntry, InterchangeGraph, InterchangeType, NameList};
use crate::ty::{CompositeType, NameSet, PrimitiveKind, PropertyMap, TopLevels, Ty};

/// Index-aligned shells for the graph's composite table.
pub type CompositeTable = Vec<Option<Rc<CompositeType>>>;

/// The one failure mode of the conversion. It means the interchange graph
/// itself is malformed (a producer bug), so the whole import aborts with no
/// partial output.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImportError {
    /// A composite reference addressed a tombstone slot or lay outside the
    /// table entirely. The two cases carry no distinct recovery behavior, so
    /// they share one value.
    #[error("unresolved composite reference: no type at table index {0}")]
    UnresolvedComposite(usize),
}

/// Collapse duplicate names, keeping each first occurrence's position.
pub fn import_name_set(names: &NameList) -> NameSet {
    names.names.iter().cloned().collect()
}

/// Phase one: allocate a shell per present entry, index-aligned with the
/// input, properties untouched. Tombstone slots stay empty; a tombstone only
/// becomes an error when something dereferences it later.
pub fn build_composite_table(entries: &[Option<CompositeEntry>]) -> CompositeTable {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            entry
                .as_ref()
                .map(|entry| Rc::new(CompositeType::new(index, import_name_set(&entry.names))))
        })
        .collect()
}

/// Map one interchange type node to its native counterpart.
///
/// Recurses through array items, map values, and union members; stops at
/// composite references, which resolve to a shared handle on the table shell.
pub fn import_type(ty: &InterchangeType, table: &CompositeTable) -> Result<Ty, ImportError> {
    let native = match ty {
        InterchangeType::Any => Ty::Primitive(PrimitiveKind::Any),
        InterchangeType::Null => Ty::Primitive(PrimitiveKind::Null),
        InterchangeType::Bool => Ty::Primitive(PrimitiveKind::Bool),
        InterchangeType::Integer => Ty::Primitive(PrimitiveKind::Integer),
        InterchangeType::Double => Ty::Primitive(PrimitiveKind::Double),
        InterchangeType::String => Ty::Primitive(PrimitiveKind::String),
        InterchangeType::Array { items } => Ty::Array {
            items: Box::new(import_type(items, table)?),
        },
        InterchangeType::Map { values } => Ty::Map {
            values: Box::new(import_type(values, table)?),
        },
        InterchangeType::Enum { names, cases } => Ty::Enum {
            names: import_name_set(names),
            cases: cases.iter().cloned().collect(),
        },
        InterchangeType::Union { names, members } => {
            let mut native_members = Vec::with_capacity(members.len());
            for member in members {
                let member = import_type(member, table)?;
                // ordered-set insert: collapse duplicates, keep first-seen order
                if !native_members.contains(&member) {
                    native_members.push(member);
                }
            }
            Ty::Union {
                names: import_name_set(names),
                members: native_members,
            }
        }
        InterchangeType::Composite { index } => match table.get(*index) {
            Some(Some(composite)) => Ty::Composite(Rc::clone(composite)),
            _ => return Err(ImportError::UnresolvedComposite(*index)),
        },
    };
    Ok(native)
}

/// Import a whole graph: build the table, fill every composite's properties,
/// then resolve the named top-level types in input order.
pub fn import_graph(graph: &InterchangeGraph) -> Result<TopLevels, ImportError> {
    let table = build_composite_table(&graph.composites);

    // Phase two. Fill order between shells is irrelevant: references resolve
    // to the shared shells either way.
    for (entry, slot) in graph.composites.iter().zip(&table) {
        let (Some(entry), Some(composite)) = (entry, slot) else {
            continue;
        };
        let mut properties = PropertyMap::with_capacity(entry.properties.len());
        for (name, ty) in &entry.properties {
            properties.insert(name.clone(), import_type(ty, &table)?);
        }
        composite.fill_properties(properties);
    }

    let mut toplevels = TopLevels::with_capacity(graph.toplevels.len());
    for (name, ty) in &graph.toplevels {
        toplevels.insert(name.clone(), import_type(ty, &table)?);
    }
    Ok(toplevels)
}

// ------------------------------- Tests ------------------------------------ //
