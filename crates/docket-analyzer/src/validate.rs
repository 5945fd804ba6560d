//! Structural validation: normalized JSON -> typed `MotionAnalysis`
//!
//! This is the hard stop between repair and post-processing. Every field's
//! declared type, enumeration membership, and numeric bounds are enforced
//! here, and a failure names the offending field path. Post-processing
//! assumes these invariants hold and must never run on an object that
//! failed validation.

use crate::error::AnalyzerError;
use docket_domain::{
    Argument, ArgumentCategory, CitedCase, MotionAnalysis, ResearchPriority, StrengthLevel,
};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

type Result<T> = std::result::Result<T, AnalyzerError>;

/// Parse a normalized JSON object into the strongly-typed analysis result.
pub fn parse_analysis(value: &Value) -> Result<MotionAnalysis> {
    let root = value
        .as_object()
        .ok_or_else(|| AnalyzerError::violation("", "expected a JSON object"))?;

    let arguments_value = require_array(root, "", "primary_arguments")?;
    let mut primary_arguments = Vec::with_capacity(arguments_value.len());
    for (idx, entry) in arguments_value.iter().enumerate() {
        let path = format!("primary_arguments[{}]", idx);
        primary_arguments.push(parse_argument(entry, &path)?);
    }

    let research_value = require_array(root, "", "research_priorities")?;
    let mut research_priorities = Vec::with_capacity(research_value.len());
    for (idx, entry) in research_value.iter().enumerate() {
        let path = format!("research_priorities[{}]", idx);
        research_priorities.push(parse_research_priority(entry, &path)?);
    }

    Ok(MotionAnalysis {
        motion_type: require_string(root, "", "motion_type")?,
        case_number: optional_string(root, "", "case_number")?,
        parties: require_string_list(root, "", "parties")?,
        filing_date: optional_string(root, "", "filing_date")?,
        primary_arguments,
        arguments_by_category: parse_grouping(root)?,
        categories_used: require_string_list(root, "", "categories_used")?,
        custom_categories: require_string_list(root, "", "custom_categories")?,
        notable_omissions: require_string_list(root, "", "notable_omissions")?,
        procedural_issues: require_string_list(root, "", "procedural_issues")?,
        evidence_challenges: require_string_list(root, "", "evidence_challenges")?,
        expert_witness_issues: require_string_list(root, "", "expert_witness_issues")?,
        research_priorities,
        overall_strength: require_strength(root, "", "overall_strength")?,
        risk_assessment: require_u8_in(root, "", "risk_assessment", 1, 10)?,
        recommended_actions: require_string_list(root, "", "recommended_actions")?,
        total_arguments_found: require_usize(root, "", "total_arguments_found")?,
    })
}

fn parse_argument(value: &Value, path: &str) -> Result<Argument> {
    let obj = require_object(value, path)?;

    let cases_value = require_array(obj, path, "cited_cases")?;
    let mut cited_cases = Vec::with_capacity(cases_value.len());
    for (idx, entry) in cases_value.iter().enumerate() {
        let case_path = format!("{}.cited_cases[{}]", path, idx);
        cited_cases.push(parse_cited_case(entry, &case_path)?);
    }

    Ok(Argument {
        argument_id: require_string(obj, path, "argument_id")?,
        category: ArgumentCategory::parse(&require_string(obj, path, "category")?),
        argument_summary: require_string(obj, path, "argument_summary")?,
        legal_basis: require_string(obj, path, "legal_basis")?,
        strength_indicators: require_string_list(obj, path, "strength_indicators")?,
        cited_cases,
        statute_citations: require_string_list(obj, path, "statute_citations")?,
        counterarguments: require_string_list(obj, path, "counterarguments")?,
        weaknesses: require_string_list(obj, path, "weaknesses")?,
        strength_assessment: require_strength(obj, path, "strength_assessment")?,
        confidence_score: require_f64_in(obj, path, "confidence_score", 0.0, 1.0)?,
        response_priority: require_u8_in(obj, path, "response_priority", 1, 5)?,
    })
}

fn parse_cited_case(value: &Value, path: &str) -> Result<CitedCase> {
    let obj = require_object(value, path)?;

    Ok(CitedCase {
        full_citation: require_string(obj, path, "full_citation")?,
        case_name: require_string(obj, path, "case_name")?,
        legal_principle: require_string(obj, path, "legal_principle")?,
        application: require_string(obj, path, "application")?,
        jurisdiction: require_string(obj, path, "jurisdiction")?,
        year: require_i32(obj, path, "year")?,
        is_binding: require_bool(obj, path, "is_binding")?,
        citation_strength: require_strength(obj, path, "citation_strength")?,
    })
}

fn parse_research_priority(value: &Value, path: &str) -> Result<ResearchPriority> {
    let obj = require_object(value, path)?;

    Ok(ResearchPriority {
        research_area: require_string(obj, path, "research_area")?,
        priority_level: require_u8_in(obj, path, "priority_level", 1, 5)?,
        suggested_sources: require_string_list(obj, path, "suggested_sources")?,
        key_questions: require_string_list(obj, path, "key_questions")?,
        related_argument_ids: require_string_list(obj, path, "related_argument_ids")?,
    })
}

fn parse_grouping(root: &Map<String, Value>) -> Result<BTreeMap<String, Vec<String>>> {
    let grouping = get(root, "", "arguments_by_category")?
        .as_object()
        .ok_or_else(|| AnalyzerError::violation("arguments_by_category", "expected an object"))?;

    let mut parsed = BTreeMap::new();
    for (category, ids) in grouping {
        let path = format!("arguments_by_category.{}", category);
        let ids = ids
            .as_array()
            .ok_or_else(|| AnalyzerError::violation(&path, "expected an array"))?;
        let mut members = Vec::with_capacity(ids.len());
        for (idx, id) in ids.iter().enumerate() {
            let id = id.as_str().ok_or_else(|| {
                AnalyzerError::violation(format!("{}[{}]", path, idx), "expected a string")
            })?;
            members.push(id.to_string());
        }
        parsed.insert(category.clone(), members);
    }
    Ok(parsed)
}

fn field_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn get<'a>(obj: &'a Map<String, Value>, path: &str, key: &str) -> Result<&'a Value> {
    obj.get(key)
        .ok_or_else(|| AnalyzerError::violation(field_path(path, key), "missing required field"))
}

fn require_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| AnalyzerError::violation(path, "expected a JSON object"))
}

fn require_array<'a>(
    obj: &'a Map<String, Value>,
    path: &str,
    key: &str,
) -> Result<&'a Vec<Value>> {
    get(obj, path, key)?
        .as_array()
        .ok_or_else(|| AnalyzerError::violation(field_path(path, key), "expected an array"))
}

fn require_string(obj: &Map<String, Value>, path: &str, key: &str) -> Result<String> {
    get(obj, path, key)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| AnalyzerError::violation(field_path(path, key), "expected a string"))
}

fn optional_string(obj: &Map<String, Value>, path: &str, key: &str) -> Result<Option<String>> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(AnalyzerError::violation(
            field_path(path, key),
            "expected a string or null",
        )),
    }
}

fn require_string_list(obj: &Map<String, Value>, path: &str, key: &str) -> Result<Vec<String>> {
    let entries = require_array(obj, path, key)?;
    let mut list = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.iter().enumerate() {
        let s = entry.as_str().ok_or_else(|| {
            AnalyzerError::violation(
                format!("{}[{}]", field_path(path, key), idx),
                "expected a string",
            )
        })?;
        list.push(s.to_string());
    }
    Ok(list)
}

fn require_bool(obj: &Map<String, Value>, path: &str, key: &str) -> Result<bool> {
    get(obj, path, key)?
        .as_bool()
        .ok_or_else(|| AnalyzerError::violation(field_path(path, key), "expected a boolean"))
}

fn require_i32(obj: &Map<String, Value>, path: &str, key: &str) -> Result<i32> {
    let n = get(obj, path, key)?
        .as_i64()
        .ok_or_else(|| AnalyzerError::violation(field_path(path, key), "expected an integer"))?;
    i32::try_from(n)
        .map_err(|_| AnalyzerError::violation(field_path(path, key), "integer out of range"))
}

fn require_usize(obj: &Map<String, Value>, path: &str, key: &str) -> Result<usize> {
    let n = get(obj, path, key)?
        .as_u64()
        .ok_or_else(|| {
            AnalyzerError::violation(field_path(path, key), "expected a non-negative integer")
        })?;
    Ok(n as usize)
}

fn require_u8_in(
    obj: &Map<String, Value>,
    path: &str,
    key: &str,
    min: u64,
    max: u64,
) -> Result<u8> {
    let n = get(obj, path, key)?
        .as_u64()
        .ok_or_else(|| {
            AnalyzerError::violation(field_path(path, key), "expected a non-negative integer")
        })?;
    if n < min || n > max {
        return Err(AnalyzerError::violation(
            field_path(path, key),
            format!("{} out of range [{}, {}]", n, min, max),
        ));
    }
    Ok(n as u8)
}

fn require_f64_in(
    obj: &Map<String, Value>,
    path: &str,
    key: &str,
    min: f64,
    max: f64,
) -> Result<f64> {
    let n = get(obj, path, key)?
        .as_f64()
        .ok_or_else(|| AnalyzerError::violation(field_path(path, key), "expected a number"))?;
    if !(min..=max).contains(&n) {
        return Err(AnalyzerError::violation(
            field_path(path, key),
            format!("{} out of range [{}, {}]", n, min, max),
        ));
    }
    Ok(n)
}

fn require_strength(obj: &Map<String, Value>, path: &str, key: &str) -> Result<StrengthLevel> {
    let label = require_string(obj, path, key)?;
    StrengthLevel::parse(&label).ok_or_else(|| {
        AnalyzerError::violation(
            field_path(path, key),
            format!("'{}' is not a recognized strength level", label),
        )
    })
}
