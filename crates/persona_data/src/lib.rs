//! Read-only access to the generator's output tree.
//!
//! Every loader reads one file, decodes it into the typed model, and maps
//! failures onto [`DataError`] with the offending path in the message. The
//! datasets are small and static, so nothing here caches: each call reads
//! the filesystem fresh.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use persona_model::{
    HealthcareServerIndex, IndexData, OrderDetail, PersonaProfile, StoreIndex, ToolServerData,
};
use persona_vault::VaultError;

pub mod csv;
pub mod routes;
pub mod validate;

#[derive(Debug)]
pub enum DataError {
    NotFound(String),
    Io(String),
    Json(String),
    Csv(String),
    InvalidSegment(String),
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::NotFound(err) => write!(f, "not found: {}", err),
            DataError::Io(err) => write!(f, "io error: {}", err),
            DataError::Json(err) => write!(f, "json error: {}", err),
            DataError::Csv(err) => write!(f, "csv error: {}", err),
            DataError::InvalidSegment(seg) => write!(f, "invalid path segment: {:?}", seg),
        }
    }
}

impl std::error::Error for DataError {}

impl From<VaultError> for DataError {
    fn from(err: VaultError) -> Self {
        match err {
            VaultError::NotFound(e) => DataError::NotFound(e),
            VaultError::Io(e) => DataError::Io(e),
            VaultError::InvalidSegment(s) => DataError::InvalidSegment(s),
        }
    }
}

impl DataError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DataError::NotFound(_))
    }
}

fn check_segment(segment: &str) -> Result<(), DataError> {
    persona_vault::validate_segment(segment).map_err(DataError::from)
}

/// Read and decode one JSON file.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let bytes = read_bytes(path)?;
    serde_json::from_slice(&bytes)
        .map_err(|err| DataError::Json(format!("{}: {}", path.display(), err)))
}

pub(crate) fn read_bytes(path: &Path) -> Result<Vec<u8>, DataError> {
    fs::read(path).map_err(|err| map_io(path, err))
}

fn map_io(path: &Path, err: io::Error) -> DataError {
    let detail = format!("{}: {}", path.display(), err);
    if err.kind() == io::ErrorKind::NotFound {
        DataError::NotFound(detail)
    } else {
        DataError::Io(detail)
    }
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

pub fn load_index(data_root: &Path) -> Result<IndexData, DataError> {
    read_json(&data_root.join("index.json"))
}

pub fn load_profile(data_root: &Path, persona_id: &str) -> Result<PersonaProfile, DataError> {
    check_segment(persona_id)?;
    read_json(&data_root.join(persona_id).join("profile.json"))
}

pub fn load_store_index(
    data_root: &Path,
    persona_id: &str,
    store_id: &str,
) -> Result<StoreIndex, DataError> {
    check_segment(persona_id)?;
    check_segment(store_id)?;
    read_json(
        &data_root
            .join(persona_id)
            .join("stores")
            .join(store_id)
            .join("index.json"),
    )
}

pub fn load_order(
    data_root: &Path,
    persona_id: &str,
    store_id: &str,
    order_id: &str,
) -> Result<OrderDetail, DataError> {
    check_segment(persona_id)?;
    check_segment(store_id)?;
    check_segment(order_id)?;
    read_json(
        &data_root
            .join(persona_id)
            .join("stores")
            .join(store_id)
            .join("orders")
            .join(format!("{}.json", order_id)),
    )
}

pub fn load_healthcare_index(
    data_root: &Path,
    persona_id: &str,
    server_id: &str,
) -> Result<HealthcareServerIndex, DataError> {
    check_segment(persona_id)?;
    check_segment(server_id)?;
    read_json(
        &data_root
            .join(persona_id)
            .join("healthcare")
            .join(server_id)
            .join("index.json"),
    )
}

/// Load every tool server definition in `tools/<category>/`, in filename
/// order. Non-JSON files in the directory are skipped.
pub fn load_tool_servers(
    data_root: &Path,
    category: &str,
) -> Result<Vec<ToolServerData>, DataError> {
    check_segment(category)?;
    let dir = data_root.join("tools").join(category);
    let entries = fs::read_dir(&dir).map_err(|err| map_io(&dir, err))?;

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| map_io(&dir, err))?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("json") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut out = Vec::new();
    for path in paths {
        out.push(read_json::<ToolServerData>(&path)?);
    }
    Ok(out)
}

/// The file-reading collaborator for note pages: appends `.md` to the
/// note's relative path and returns its UTF-8 text. Each segment of the
/// relative path is validated.
pub fn read_note(
    data_root: &Path,
    persona_id: &str,
    relative_path: &str,
) -> Result<String, DataError> {
    check_segment(persona_id)?;
    let mut path = data_root.join(persona_id).join("obsidian");
    let mut segments = relative_path.split('/').peekable();
    while let Some(segment) = segments.next() {
        check_segment(segment)?;
        if segments.peek().is_some() {
            path.push(segment);
        } else {
            // Append the extension rather than replacing one: note names may
            // contain dots.
            path.push(format!("{}.md", segment));
        }
    }
    let bytes = read_bytes(&path)?;
    String::from_utf8(bytes)
        .map_err(|err| DataError::Io(format!("{}: not valid utf-8: {}", path.display(), err)))
}

// ---------------------------------------------------------------------------
// Search filter
// ---------------------------------------------------------------------------

/// Case-insensitive substring filter over a record's searchable fields.
/// A blank query matches everything; no ranking, first substring hit wins.
pub fn matches_query(haystacks: &[&str], query: &str) -> bool {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return true;
    }
    haystacks
        .iter()
        .any(|h| h.to_lowercase().contains(&q))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_query_is_case_insensitive() {
        assert!(matches_query(&["Search Orders", "tool"], "ORDER"));
        assert!(!matches_query(&["Search Orders"], "refund"));
    }

    #[test]
    fn blank_query_matches_everything() {
        assert!(matches_query(&[], ""));
        assert!(matches_query(&["anything"], "   "));
    }

    #[test]
    fn read_note_rejects_traversal_in_any_segment() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_note(dir.path(), "p1", "../secrets").unwrap_err();
        assert!(matches!(err, DataError::InvalidSegment(_)));
        let err = read_note(dir.path(), "..", "Home").unwrap_err();
        assert!(matches!(err, DataError::InvalidSegment(_)));
    }

    #[test]
    fn missing_index_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_index(dir.path()).unwrap_err();
        assert!(err.is_not_found());
    }
}
