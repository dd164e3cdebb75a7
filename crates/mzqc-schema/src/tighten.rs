//! Structural invariants that the derived schemas cannot express.

use serde_json::{Map, Value, json};

/// Accession format `PREFIX:NNNNNNN`.
pub const ACCESSION_PATTERN: &str = "^[A-Z]+:[0-9]{7}$";

/// Lists that must hold at least one entry.
const NON_EMPTY_LISTS: &[&str] = &[
    "controlledVocabularies",
    "inputFiles",
    "analysisSoftware",
    "qualityMetrics",
];

/// Patch every object schema reachable from `schema` in place.
pub fn tighten(schema: &mut Value) {
    match schema {
        Value::Object(map) => {
            if let Some(Value::Object(properties)) = map.get_mut("properties") {
                tighten_properties(properties);
            }
            let has_both = map
                .get("properties")
                .and_then(Value::as_object)
                .is_some_and(|p| p.contains_key("runQualities") && p.contains_key("setQualities"));
            if has_both {
                map.insert(
                    "anyOf".to_string(),
                    json!([{"required": ["runQualities"]}, {"required": ["setQualities"]}]),
                );
            }
            for child in map.values_mut() {
                tighten(child);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(tighten),
        _ => {}
    }
}

fn tighten_properties(properties: &mut Map<String, Value>) {
    for name in NON_EMPTY_LISTS {
        if let Some(Value::Object(list)) = properties.get_mut(*name) {
            list.insert("minItems".to_string(), json!(1));
        }
    }
    if let Some(Value::Object(accession)) = properties.get_mut("accession") {
        accession.insert("pattern".to_string(), json!(ACCESSION_PATTERN));
    }
}
