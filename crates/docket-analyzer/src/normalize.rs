//! Response normalization: repair the model's untyped JSON
//!
//! A total function over `serde_json::Value`: it never fails, coercing
//! absent or wrongly-typed fields to neutral defaults, and is idempotent
//! (running it on its own output changes nothing). Enum membership and
//! numeric ranges are deliberately NOT checked here; values that are
//! present with the right JSON type pass through untouched and are the
//! structural validator's responsibility.

use serde_json::{json, Map, Value};

/// Repair a parsed completion into the shape the structural validator
/// requires.
pub fn normalize(value: Value) -> Value {
    let mut root = match value {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    ensure_string(&mut root, "motion_type", "Unknown");
    ensure_string_list(&mut root, "parties");
    ensure_string_list(&mut root, "procedural_issues");
    ensure_string_list(&mut root, "evidence_challenges");
    ensure_string_list(&mut root, "expert_witness_issues");
    ensure_string_list(&mut root, "recommended_actions");
    ensure_string_list(&mut root, "notable_omissions");
    ensure_string(&mut root, "overall_strength", "moderate");
    ensure_u64(&mut root, "risk_assessment", 5);

    let arguments = normalize_arguments(&mut root);
    normalize_research_priorities(&mut root);

    // Category-indexed grouping, derived only when absent; the grouping
    // files each argument id under its declared category.
    if !matches!(root.get("arguments_by_category"), Some(Value::Object(_))) {
        let mut grouping: Map<String, Value> = Map::new();
        for argument in &arguments {
            let category = argument
                .get("category")
                .and_then(Value::as_str)
                .unwrap_or("other")
                .to_string();
            let id = argument
                .get("argument_id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            if let Some(ids) = grouping
                .entry(category)
                .or_insert_with(|| Value::Array(Vec::new()))
                .as_array_mut()
            {
                ids.push(Value::String(id));
            }
        }
        root.insert("arguments_by_category".to_string(), Value::Object(grouping));
    }

    // The total count is never trusted from the model.
    root.insert(
        "total_arguments_found".to_string(),
        json!(arguments.len()),
    );

    if !matches!(root.get("categories_used"), Some(Value::Array(_))) {
        let keys: Vec<Value> = root
            .get("arguments_by_category")
            .and_then(Value::as_object)
            .map(|grouping| {
                grouping
                    .keys()
                    .map(|k| Value::String(k.clone()))
                    .collect()
            })
            .unwrap_or_default();
        root.insert("categories_used".to_string(), Value::Array(keys));
    }

    if !matches!(root.get("custom_categories"), Some(Value::Array(_))) {
        let standard = docket_domain::ArgumentCategory::STANDARD;
        let custom: Vec<Value> = root
            .get("categories_used")
            .and_then(Value::as_array)
            .map(|used| {
                used.iter()
                    .filter_map(Value::as_str)
                    .filter(|label| !standard.iter().any(|s| s.as_label() == *label))
                    .map(|label| Value::String(label.to_string()))
                    .collect()
            })
            .unwrap_or_default();
        root.insert("custom_categories".to_string(), Value::Array(custom));
    }

    Value::Object(root)
}

/// Normalize the argument array in place and return a copy of the
/// normalized entries for grouping derivation.
fn normalize_arguments(root: &mut Map<String, Value>) -> Vec<Value> {
    let mut arguments = match root.remove("primary_arguments") {
        Some(Value::Array(entries)) => entries,
        _ => Vec::new(),
    };

    for (idx, entry) in arguments.iter_mut().enumerate() {
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        if let Some(obj) = entry.as_object_mut() {
            // Identifier assignment is stable and deterministic: 1-based
            // position in the received array, independent of every other
            // step.
            if !matches!(obj.get("argument_id"), Some(Value::String(_))) {
                obj.insert(
                    "argument_id".to_string(),
                    Value::String(format!("arg_{:03}", idx + 1)),
                );
            }

            ensure_string(obj, "category", "other");
            ensure_string(obj, "argument_summary", "");
            ensure_string(obj, "legal_basis", "");
            ensure_string_list(obj, "strength_indicators");
            ensure_string_list(obj, "statute_citations");
            ensure_string_list(obj, "counterarguments");
            ensure_string_list(obj, "weaknesses");
            ensure_string(obj, "strength_assessment", "moderate");
            ensure_f64(obj, "confidence_score", 0.5);
            ensure_u64(obj, "response_priority", 3);

            normalize_cited_cases(obj);
        }
    }

    root.insert("primary_arguments".to_string(), Value::Array(arguments.clone()));
    arguments
}

fn normalize_cited_cases(argument: &mut Map<String, Value>) {
    let mut cases = match argument.remove("cited_cases") {
        Some(Value::Array(entries)) => entries,
        _ => Vec::new(),
    };

    for entry in cases.iter_mut() {
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        if let Some(obj) = entry.as_object_mut() {
            ensure_string(obj, "full_citation", "");
            ensure_string(obj, "case_name", "");
            ensure_string(obj, "legal_principle", "");
            ensure_string(obj, "application", "");
            ensure_string(obj, "jurisdiction", "Unknown");
            ensure_i64(obj, "year", 0);
            ensure_bool(obj, "is_binding", false);
            ensure_string(obj, "citation_strength", "moderate");
        }
    }

    argument.insert("cited_cases".to_string(), Value::Array(cases));
}

fn normalize_research_priorities(root: &mut Map<String, Value>) {
    let mut priorities = match root.remove("research_priorities") {
        Some(Value::Array(entries)) => entries,
        _ => Vec::new(),
    };

    for entry in priorities.iter_mut() {
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        if let Some(obj) = entry.as_object_mut() {
            ensure_string(obj, "research_area", "");
            ensure_u64(obj, "priority_level", 3);
            ensure_string_list(obj, "suggested_sources");
            ensure_string_list(obj, "key_questions");
            ensure_string_list(obj, "related_argument_ids");
        }
    }

    root.insert("research_priorities".to_string(), Value::Array(priorities));
}

fn ensure_string(obj: &mut Map<String, Value>, key: &str, default: &str) {
    if !matches!(obj.get(key), Some(Value::String(_))) {
        obj.insert(key.to_string(), Value::String(default.to_string()));
    }
}

fn ensure_string_list(obj: &mut Map<String, Value>, key: &str) {
    match obj.get_mut(key) {
        Some(Value::Array(entries)) => {
            // Drop non-string members rather than failing.
            entries.retain(|v| v.is_string());
        }
        _ => {
            obj.insert(key.to_string(), Value::Array(Vec::new()));
        }
    }
}

fn ensure_u64(obj: &mut Map<String, Value>, key: &str, default: u64) {
    if !matches!(obj.get(key), Some(Value::Number(n)) if n.is_u64()) {
        obj.insert(key.to_string(), json!(default));
    }
}

fn ensure_i64(obj: &mut Map<String, Value>, key: &str, default: i64) {
    if !matches!(obj.get(key), Some(Value::Number(n)) if n.is_i64()) {
        obj.insert(key.to_string(), json!(default));
    }
}

fn ensure_f64(obj: &mut Map<String, Value>, key: &str, default: f64) {
    if !matches!(obj.get(key), Some(Value::Number(_))) {
        obj.insert(key.to_string(), json!(default));
    }
}

fn ensure_bool(obj: &mut Map<String, Value>, key: &str, default: bool) {
    if !matches!(obj.get(key), Some(Value::Bool(_))) {
        obj.insert(key.to_string(), Value::Bool(default));
    }
}
