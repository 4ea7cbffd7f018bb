//! CVAT XML annotation reader.
//!
//! Reads CVAT "for images" exports far enough to filter frames:
//! - every `<image>` element in document order, keyed by its `name`
//!   (elements without a usable `name` are skipped, since no frame can be
//!   paired with them)
//! - the `<box>` elements inside each image, with their `label`
//! - the `<attribute name="...">` children of each box
//!
//! Geometry, `<meta>` and non-box shapes are not interpreted.

use std::fs;
use std::path::{Path, PathBuf};

use roxmltree::{Document, Node};
use tracing::debug;

use super::model::{BoxRegion, CvatImageRecord};
use crate::error::ScenewalkError;

/// Read a CVAT XML file into image records, in document order.
pub fn read_cvat_records(path: &Path) -> Result<Vec<CvatImageRecord>, ScenewalkError> {
    let xml = fs::read_to_string(path).map_err(ScenewalkError::Io)?;
    parse_cvat_records_str(&xml, path)
}

/// Parse CVAT XML from a string.
pub fn from_cvat_xml_str(xml: &str) -> Result<Vec<CvatImageRecord>, ScenewalkError> {
    parse_cvat_records_str(xml, Path::new("<string>"))
}

/// Parse CVAT XML from bytes (must be valid UTF-8).
pub fn from_cvat_xml_slice(bytes: &[u8]) -> Result<Vec<CvatImageRecord>, ScenewalkError> {
    let xml = std::str::from_utf8(bytes).map_err(|source| ScenewalkError::CvatXmlParse {
        path: PathBuf::from("<bytes>"),
        message: format!("input is not valid UTF-8: {source}"),
    })?;
    parse_cvat_records_str(xml, Path::new("<bytes>"))
}

fn parse_cvat_records_str(xml: &str, path: &Path) -> Result<Vec<CvatImageRecord>, ScenewalkError> {
    let document = Document::parse(xml).map_err(|source| ScenewalkError::CvatXmlParse {
        path: path.to_path_buf(),
        message: source.to_string(),
    })?;

    Ok(document
        .root_element()
        .descendants()
        .filter(|n| is_element_named(*n, "image"))
        .filter_map(|image_node| parse_image_element(image_node, path))
        .collect())
}

fn parse_image_element(node: Node<'_, '_>, path: &Path) -> Option<CvatImageRecord> {
    let Some(name) = node.attribute("name").filter(|v| !v.is_empty()) else {
        debug!(
            path = %path.display(),
            offset = node.range().start,
            "skipping <image> without a 'name' attribute"
        );
        return None;
    };

    let boxes = node
        .descendants()
        .filter(|n| is_element_named(*n, "box"))
        .map(parse_box_element)
        .collect();

    Some(CvatImageRecord {
        name: name.to_string(),
        boxes,
    })
}

fn parse_box_element(node: Node<'_, '_>) -> BoxRegion {
    let label = node.attribute("label").unwrap_or_default().to_string();

    let mut attributes = Vec::new();
    for attr_node in node
        .children()
        .filter(|n| is_element_named(*n, "attribute"))
    {
        let Some(name) = attr_node.attribute("name") else {
            continue;
        };
        let value = attr_node.text().unwrap_or("").to_string();
        attributes.push((name.to_string(), value));
    }

    BoxRegion { label, attributes }
}

fn is_element_named(node: Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && node.tag_name().name() == tag
}
