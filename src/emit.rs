//! JSON-ish emission of an imported graph (inspection view).
//!
//! Composites are never inlined: a reference prints as its table index and
//! the node bodies go into one `composites` section, so cyclic graphs render
//! finitely. No simplification, deduplication, or naming happens here.

use std::collections::BTreeMap;
use std::rc::Rc;

use serde_json::{Value, json};

use crate::ty::{CompositeType, TopLevels, Ty};

/// Render one type node. Composite references become `{"type": "composite",
/// "ref": N}`; the referenced body is emitted by `emit_graph`, once.
pub fn emit_type(ty: &Ty) -> Value {
    match ty {
        Ty::Primitive(kind) => json!({ "type": kind.name() }),
        Ty::Array { items } => json!({ "type": "array", "items": emit_type(items) }),
        Ty::Map { values } => json!({ "type": "map", "values": emit_type(values) }),
        Ty::Enum { names, cases } => json!({
            "type": "enum",
            "names": names.iter().collect::<Vec<_>>(),
            "cases": cases.iter().collect::<Vec<_>>(),
        }),
        Ty::Union { names, members } => json!({
            "type": "union",
            "names": names.iter().collect::<Vec<_>>(),
            "members": members.iter().map(emit_type).collect::<Vec<_>>(),
        }),
        Ty::Composite(composite) => json!({ "type": "composite", "ref": composite.index() }),
    }
}

/// Render a whole graph: top-levels in input order plus a table of every
/// composite reachable from them, keyed by table index.
pub fn emit_graph(toplevels: &TopLevels) -> Value {
    let mut reachable = BTreeMap::<usize, Rc<CompositeType>>::new();
    let mut pending: Vec<Rc<CompositeType>> = Vec::new();

    for ty in toplevels.values() {
        collect_composites(ty, &mut reachable, &mut pending);
    }
    while let Some(composite) = pending.pop() {
        if let Some(properties) = composite.properties() {
            for ty in properties.values() {
                collect_composites(ty, &mut reachable, &mut pending);
            }
        }
    }

    let toplevel_view: serde_json::Map<String, Value> = toplevels
        .iter()
        .map(|(name, ty)| (name.clone(), emit_type(ty)))
        .collect();

    let composite_view: serde_json::Map<String, Value> = reachable
        .values()
        .map(|composite| {
            let properties: serde_json::Map<String, Value> = composite
                .properties()
                .into_iter()
                .flatten()
                .map(|(name, ty)| (name.clone(), emit_type(ty)))
                .collect();
            let body = json!({
                "names": composite.names().iter().collect::<Vec<_>>(),
                "properties": properties,
            });
            (composite.index().to_string(), body)
        })
        .collect();

    json!({ "toplevels": toplevel_view, "composites": composite_view })
}

/// Seen-set worklist: mark a composite once, queue it for a property walk.
fn collect_composites(
    ty: &Ty,
    reachable: &mut BTreeMap<usize, Rc<CompositeType>>,
    pending: &mut Vec<Rc<CompositeType>>,
) {
    match ty {
        Ty::Primitive(_) | Ty::Enum { .. } => {}
        Ty::Array { items } => collect_composites(items, reachable, pending),
        Ty::Map { values } => collect_composites(values, reachable, pending),
        Ty::Union { members, .. } => {
            for member in members {
                collect_composites(member, reachable, pending);
            }
        }
        Ty::Composite(composite) => {
            if !reachable.contains_key(&composite.index()) {
                reachable.insert(composite.index(), Rc::clone(composite));
                pending.push(Rc::clone(composite));
            }
        }
    }
}

// ------------------------------- Tests ------------------------------------ //
