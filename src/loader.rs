// ============================================
// src/loader.rs
// Reads content documents, falling back to built-in content
// ============================================

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ContentError;
use crate::questions::{ConversationContent, ConversationDocument};

fn read_document(path: &Path) -> Result<Value, ContentError> {
    let file = File::open(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| ContentError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Extracts the array stored under `key` in a JSON document.
pub fn load_collection<T: DeserializeOwned>(
    path: &Path,
    key: &str,
) -> Result<Vec<T>, ContentError> {
    let mut document = read_document(path)?;
    let raw = document
        .get_mut(key)
        .map(Value::take)
        .ok_or_else(|| ContentError::MissingKey {
            path: path.to_path_buf(),
            key: key.to_string(),
        })?;
    let items: Vec<T> = serde_json::from_value(raw).map_err(|source| ContentError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    if items.is_empty() {
        return Err(ContentError::Empty {
            path: path.to_path_buf(),
            key: key.to_string(),
        });
    }
    tracing::info!(path = %path.display(), key, count = items.len(), "content loaded");
    Ok(items)
}

/// Like `load_collection`, but any failure is logged and replaced by
/// `fallback`, so the caller always gets a non-empty pool.
pub fn load_or_fallback<T, F>(path: &Path, key: &str, fallback: F) -> Vec<T>
where
    T: DeserializeOwned,
    F: FnOnce() -> Vec<T>,
{
    match load_collection(path, key) {
        Ok(items) => items,
        Err(err) => {
            tracing::warn!(error = %err, "using built-in content");
            fallback()
        }
    }
}

pub fn load_conversation(path: &Path) -> Result<ConversationContent, ContentError> {
    let document = read_document(path)?;
    let parsed: ConversationDocument =
        serde_json::from_value(document).map_err(|source| ContentError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    let content = parsed.into_content();
    let pools = &content.pools;
    for (key, pool) in [
        ("questions", &pools.questions),
        ("answers", &pools.answers),
        ("throwbacks", &pools.follow_ups),
        ("throwback-answers", &pools.follow_up_replies),
    ] {
        if pool.is_empty() {
            return Err(ContentError::Empty {
                path: path.to_path_buf(),
                key: key.to_string(),
            });
        }
    }
    tracing::info!(
        path = %path.display(),
        rules = content.rules.len(),
        "conversation content loaded"
    );
    Ok(content)
}

pub fn conversation_or_fallback<F>(path: &Path, fallback: F) -> ConversationContent
where
    F: FnOnce() -> ConversationContent,
{
    load_conversation(path).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "using built-in conversation content");
        fallback()
    })
}
