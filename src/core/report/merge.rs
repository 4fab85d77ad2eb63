use std::fs;
use std::path::Path;

use log::debug;
use serde_json::Value;

use crate::types::{AppError, AppResult, ProjectPair};

/// Valid empty-`files` skeleton of the mutation-report schema; every
/// aggregate starts from this document.
const REPORT_TEMPLATE: &str = include_str!("../../../assets/mutation-report.json");

/// Read and parse one per-pair report. Missing or malformed reports are
/// fatal to the merge.
pub fn load_report(path: &Path) -> AppResult<Value> {
    let text = fs::read_to_string(path)?;
    let document: Value =
        serde_json::from_str(&text).map_err(|source| AppError::MalformedReport {
            path: path.to_path_buf(),
            source,
        })?;

    if !document.get("files").is_some_and(Value::is_object) {
        return Err(AppError::InvalidReportShape(path.to_path_buf()));
    }

    Ok(document)
}

/// Merge per-pair report documents into a fresh aggregate seeded from the
/// bundled template. Entries of each document's `files` object are moved
/// into the aggregate in input order; callers guarantee disjoint key sets.
pub fn merge_documents(documents: Vec<Value>) -> AppResult<Value> {
    let mut aggregate: Value = serde_json::from_str(REPORT_TEMPLATE)?;
    let merged = aggregate
        .get_mut("files")
        .and_then(Value::as_object_mut)
        .expect("bundled report template has a files object");

    for mut document in documents {
        let files = document
            .get_mut("files")
            .and_then(Value::as_object_mut)
            .map(std::mem::take)
            .unwrap_or_default();
        for (file_path, data) in files {
            merged.insert(file_path, data);
        }
    }

    Ok(aggregate)
}

/// Load and merge the reports of `pairs`, in pair order.
pub fn merge_reports(pairs: &[ProjectPair]) -> AppResult<Value> {
    let mut documents = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let report_path = pair.report_path();
        debug!("merging {}", report_path.display());
        documents.push(load_report(&report_path)?);
    }
    merge_documents(documents)
}
