//! Serde data model for the interchange graph (wire side).
//!
//! The producer transmits its type graph flat: all composite types sit in one
//! positional table and everything else points at them by index, so even a
//! cyclic graph serializes as plain acyclic JSON. Table slots may be `null`
//! (retired by the producer); a slot is only wrong if something actually
//! dereferences it, which is the importer's business, not this module's.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered candidate names for a type. Duplicates are allowed on the wire;
/// the importer collapses them. Extra producer fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NameList {
    pub names: Vec<String>,
}

/// One serialized type node, dispatched by its `kind` tag.
///
/// Primitive kinds are flat (`{"kind": "integer"}` and so on) rather than
/// nested under a separate primitive wrapper, matching the producer's output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum InterchangeType {
    Any,
    Null,
    Bool,
    Integer,
    Double,
    String,
    Array {
        items: Box<InterchangeType>,
    },
    Map {
        values: Box<InterchangeType>,
    },
    Enum {
        names: NameList,
        cases: Vec<String>,
    },
    Union {
        names: NameList,
        members: Vec<InterchangeType>,
    },
    /// Reference into the graph's composite table.
    Composite {
        index: usize,
    },
}

/// A present composite-table slot: candidate names plus the property map in
/// the producer's insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeEntry {
    pub names: NameList,
    pub properties: IndexMap<String, InterchangeType>,
}

/// The whole serialized graph: the positional composite table (tombstones
/// included) and the named root types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterchangeGraph {
    pub composites: Vec<Option<CompositeEntry>>,
    pub toplevels: IndexMap<String, InterchangeType>,
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn primitive_kind_tags_decode_flat() {
        let ty: InterchangeType = serde_json::from_value(json!({ "kind": "integer" })).unwrap();
        assert!(matches!(ty, InterchangeType::Integer));

        let ty: InterchangeType = serde_json::from_value(json!({ "kind": "double" })).unwrap();
        assert!(matches!(ty, InterchangeType::Double));
    }

    #[test]
    fn composite_table_decodes_tombstones_in_place() {
        let graph: InterchangeGraph = serde_json::from_value(json!({
            "composites": [
                null,
                { "names": { "names": ["Point"] }, "properties": { "x": { "kind": "double" } } }
            ],
            "toplevels": {}
        }))
        .unwrap();

        assert_eq!(graph.composites.len(), 2);
        assert!(graph.composites[0].is_none());
        let entry = graph.composites[1].as_ref().unwrap();
        assert_eq!(entry.names.names, ["Point"]);
        assert!(matches!(
            entry.properties["x"],
            InterchangeType::Double
        ));
    }

    #[test]
    fn property_order_survives_decoding() {
        let graph: InterchangeGraph = serde_json::from_value(json!({
            "composites": [
                { "names": { "names": ["Row"] }, "properties": {
                    "zeta": { "kind": "string" },
                    "alpha": { "kind": "bool" },
                    "mid": { "kind": "null" }
                } }
            ],
            "toplevels": {}
        }))
        .unwrap();

        let entry = graph.composites[0].as_ref().unwrap();
        let keys: Vec<&str> = entry.properties.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn name_list_ignores_producer_extras() {
        let names: NameList =
            serde_json::from_value(json!({ "names": ["A", "B"], "combined": "A" })).unwrap();
        assert_eq!(names.names, ["A", "B"]);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let result: Result<InterchangeType, _> =
            serde_json::from_value(json!({ "kind": "frobnicate" }));
        assert!(result.is_err());
    }

    #[test]
    fn nested_kinds_decode_recursively() {
        let ty: InterchangeType = serde_json::from_value(json!({
            "kind": "array",
            "items": {
                "kind": "union",
                "names": { "names": ["U"] },
                "members": [
                    { "kind": "string" },
                    { "kind": "composite", "index": 3 }
                ]
            }
        }))
        .unwrap();

        let InterchangeType::Array { items } = ty else {
            panic!("expected array");
        };
        let InterchangeType::Union { names, members } = *items else {
            panic!("expected union items");
        };
        assert_eq!(names.names, ["U"]);
        assert_eq!(members.len(), 2);
        assert!(matches!(members[1], InterchangeType::Composite { index: 3 }));
    }
}
