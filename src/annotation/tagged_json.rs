//! Per-frame JSON annotation reader (Supervisely-style `ann/<frame>.json`).
//!
//! Only the top-level `tags` array is read. Anything else in the document is
//! ignored, and a document without `tags` (or with a non-array `tags`) reads
//! as an empty tag list. Syntactically invalid JSON is a parse failure.

use std::fs;
use std::path::{Path, PathBuf};

use super::model::{Tag, TagRecord};
use crate::error::ScenewalkError;

/// Extension of per-frame annotation files.
pub const TAG_JSON_EXTENSION: &str = "json";

/// Read and decode one per-frame JSON annotation.
pub fn read_tag_record(path: &Path) -> Result<TagRecord, ScenewalkError> {
    let bytes = fs::read(path).map_err(ScenewalkError::Io)?;
    let tags = parse_tags_slice(&bytes, path)?;
    Ok(TagRecord {
        source: path.to_path_buf(),
        tags,
    })
}

/// Parse the tag list of a JSON annotation from a string.
pub fn from_tag_json_str(json: &str) -> Result<Vec<Tag>, ScenewalkError> {
    parse_tags_slice(json.as_bytes(), Path::new("<string>"))
}

/// Parse the tag list of a JSON annotation from bytes.
pub fn from_tag_json_slice(bytes: &[u8]) -> Result<Vec<Tag>, ScenewalkError> {
    parse_tags_slice(bytes, Path::new("<bytes>"))
}

/// Frame file name an annotation file refers to: `frame.jpg.json` -> `frame.jpg`.
///
/// Returns `None` for files without the `.json` extension.
pub fn frame_name_for(annotation: &Path) -> Option<String> {
    let is_json = annotation
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(TAG_JSON_EXTENSION))
        .unwrap_or(false);
    if !is_json {
        return None;
    }

    annotation
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
}

/// Image path paired with an annotation file, under the scene's image folder.
pub fn frame_path_for(image_dir: &Path, annotation: &Path) -> Option<PathBuf> {
    frame_name_for(annotation).map(|name| image_dir.join(name))
}

fn parse_tags_slice(bytes: &[u8], path: &Path) -> Result<Vec<Tag>, ScenewalkError> {
    let document: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|source| ScenewalkError::TagJsonParse {
            path: path.to_path_buf(),
            source,
        })?;

    let Some(entries) = document.get("tags").and_then(|tags| tags.as_array()) else {
        return Ok(Vec::new());
    };

    Ok(entries
        .iter()
        .filter(|entry| entry.is_object())
        .filter_map(|entry| serde_json::from_value::<Tag>(entry.clone()).ok())
        .collect())
}
