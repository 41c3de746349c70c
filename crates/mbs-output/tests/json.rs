//! Rendering and persistence of the normalized document.

use chrono::NaiveDate;
use mbs_model::{FieldValue, ITEMS_COLLECTION, NormalizedRecord, NormalizedRecordSet};
use mbs_output::{render_record_set, write_release_output};
use tempfile::TempDir;

fn sample_set() -> NormalizedRecordSet {
    let record: NormalizedRecord = [
        ("ItemNum".to_string(), FieldValue::String("23".to_string())),
        ("NewItem".to_string(), FieldValue::Boolean(true)),
        (
            "ItemStartDate".to_string(),
            FieldValue::Date(NaiveDate::from_ymd_opt(1989, 12, 1)),
        ),
        ("ItemEndDate".to_string(), FieldValue::Date(None)),
        ("ScheduleFee".to_string(), FieldValue::Numeric(41.4)),
    ]
    .into_iter()
    .collect();
    NormalizedRecordSet::new(ITEMS_COLLECTION, vec![record])
}

#[test]
fn renders_indented_document() {
    let rendered = render_record_set(&sample_set()).unwrap();

    assert!(rendered.ends_with("}\n"));
    insta::assert_snapshot!(rendered.trim_end(), @r#"
    {
      "MBS_Items": [
        {
          "ItemEndDate": null,
          "ItemNum": "23",
          "ItemStartDate": "1989-12-01",
          "NewItem": true,
          "ScheduleFee": 41.4
        }
      ]
    }
    "#);
}

#[test]
fn renders_empty_collection() {
    let set = NormalizedRecordSet::new(ITEMS_COLLECTION, Vec::new());
    let rendered = render_record_set(&set).unwrap();

    assert_eq!(rendered, "{\n  \"MBS_Items\": []\n}\n");
}

#[test]
fn writes_release_file_into_new_directory() {
    let dir = TempDir::new().unwrap();
    let output_dir = dir.path().join("downloads");

    let path = write_release_output(&output_dir, "20240301", &sample_set()).unwrap();

    assert_eq!(path, output_dir.join("mbs_20240301.json"));
    let written = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(parsed["MBS_Items"][0]["ItemNum"], "23");
    assert_eq!(
        parsed["MBS_Items"][0]["ItemEndDate"],
        serde_json::Value::Null
    );
}
