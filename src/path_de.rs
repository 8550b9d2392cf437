use anyhow::anyhow;
use serde::de::DeserializeOwned;

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> anyhow::Result<T> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| {
        let path = err.path().to_string();
        anyhow!("at JSON path {path}: {}", err.into_inner())
    })
}

/// Same, for an already-parsed subnode (e.g. one selected by a JSON pointer).
pub fn from_value_with_path<T: DeserializeOwned>(value: serde_json::Value) -> anyhow::Result<T> {
    serde_path_to_error::deserialize::<_, T>(value).map_err(|err| {
        let path = err.path().to_string();
        anyhow!("at JSON path {path}: {}", err.into_inner())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interchange::InterchangeGraph;

    #[test]
    fn errors_carry_the_failing_path() {
        let src = r#"{
            "composites": [ { "names": { "names": ["A"] }, "properties": { "x": { "kind": 7 } } } ],
            "toplevels": {}
        }"#;
        let err = from_str_with_path::<InterchangeGraph>(src).unwrap_err();
        assert!(err.to_string().contains("composites"), "got: {err}");
    }
}
