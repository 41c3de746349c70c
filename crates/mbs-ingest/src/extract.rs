//! Item extraction from the converted MBS tree.

use mbs_model::ITEMS_COLLECTION;
use serde_json::{Map, Value};

use crate::error::{IngestError, Result};
use crate::xml::xml_to_json;

/// Root element of the MBS XML file.
pub const ROOT_ELEMENT: &str = "MBS_XML";

/// Element name of a single MBS item.
pub const DATA_ELEMENT: &str = "Data";

/// Re-root the converted tree as `{ "MBS_Items": <MBS_XML.Data> }`.
///
/// The shape of `Data` is not checked here; a single item converts to an
/// object rather than an array and is rejected later by normalization.
pub fn extract_items(tree: Value) -> Result<Value> {
    let Value::Object(mut root) = tree else {
        return Err(unexpected("document root is not an object"));
    };
    let Some(Value::Object(mut mbs)) = root.remove(ROOT_ELEMENT) else {
        return Err(unexpected(format!("missing {ROOT_ELEMENT} object")));
    };
    let data = mbs
        .remove(DATA_ELEMENT)
        .ok_or_else(|| unexpected(format!("missing {DATA_ELEMENT} object")))?;

    let mut document = Map::new();
    document.insert(ITEMS_COLLECTION.to_string(), data);
    Ok(Value::Object(document))
}

/// Convert raw MBS XML into the items document.
pub fn convert_source(xml: &[u8]) -> Result<Value> {
    let tree = xml_to_json(xml)?;
    extract_items(tree)
}

fn unexpected(reason: impl Into<String>) -> IngestError {
    IngestError::UnexpectedStructure {
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_items_renames_data() {
        let tree = json!({"MBS_XML": {"Data": [{"ItemNum": "1"}, {"ItemNum": "2"}]}});
        let document = extract_items(tree).unwrap();
        assert_eq!(
            document,
            json!({"MBS_Items": [{"ItemNum": "1"}, {"ItemNum": "2"}]})
        );
    }

    #[test]
    fn test_extract_items_structure_errors() {
        let err = extract_items(json!({"Other": {}})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unexpected JSON structure: missing MBS_XML object"
        );

        let err = extract_items(json!({"MBS_XML": "text"})).unwrap_err();
        assert!(matches!(err, IngestError::UnexpectedStructure { .. }));

        let err = extract_items(json!({"MBS_XML": {"Items": []}})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unexpected JSON structure: missing Data object"
        );
    }
}
