//! Turning raw JSON / JSON Lines input into documents.

use crate::error::{RankError, Result};
use crate::Document;
use serde::de::Error as _;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Parse a corpus from text: a JSON array of documents, a single document
/// object, or JSON Lines with one document per non-blank line.
pub fn parse_corpus(text: &str) -> Result<Vec<Document>> {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(value) => corpus_from_value(value),
        Err(_) if looks_like_jsonl(text) => parse_jsonl(text),
        Err(e) => Err(RankError::invalid("corpus is not valid JSON", e)),
    }
}

/// Interpret an already-parsed JSON value as a corpus.
pub fn corpus_from_value(value: serde_json::Value) -> Result<Vec<Document>> {
    match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                serde_json::from_value(item).map_err(|e| RankError::invalid(format!("record {i}"), e))
            })
            .collect(),
        obj @ serde_json::Value::Object(_) => {
            let doc = serde_json::from_value(obj).map_err(|e| RankError::invalid("record 0", e))?;
            Ok(vec![doc])
        }
        other => Err(RankError::invalid(
            "corpus",
            serde_json::Error::custom(format!("expected an array or object of documents, found {}", kind(&other))),
        )),
    }
}

fn parse_jsonl(text: &str) -> Result<Vec<Document>> {
    let mut docs = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        if line.trim().is_empty() { continue; }
        let doc = serde_json::from_str(line).map_err(|e| RankError::invalid(format!("line {}", lineno + 1), e))?;
        docs.push(doc);
    }
    Ok(docs)
}

/// More than one non-blank line, opening with an object rather than an array.
fn looks_like_jsonl(text: &str) -> bool {
    text.trim_start().starts_with('{') && text.lines().filter(|l| !l.trim().is_empty()).count() > 1
}

fn kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Load a corpus from a file or a directory tree of `.json` / `.jsonl` files.
/// Directory entries are read in sorted path order.
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<Vec<Document>> {
    let path = path.as_ref();
    let mut files: Vec<PathBuf> = Vec::new();
    if path.is_dir() {
        for entry in WalkDir::new(path).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(extension(p), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else {
        files.push(path.to_path_buf());
    }

    let mut docs = Vec::new();
    for file in files {
        let text = fs::read_to_string(&file).map_err(|source| RankError::Io { path: file.clone(), source })?;
        let parsed = if extension(&file) == Some("jsonl") { parse_jsonl(&text) } else { parse_corpus(&text) };
        match parsed {
            Ok(mut batch) => {
                tracing::debug!(file = %file.display(), num_docs = batch.len(), "read corpus file");
                docs.append(&mut batch);
            }
            Err(RankError::InvalidCorpus { context, source }) => {
                return Err(RankError::invalid(format!("{}: {context}", file.display()), source));
            }
            Err(e) => return Err(e),
        }
    }
    Ok(docs)
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|s| s.to_str())
}
