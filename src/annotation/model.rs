//! Record types produced by the annotation readers.
//!
//! These are deliberately thin: they keep only what predicates need to look
//! at (box labels with their named attributes, or a flat tag list) and no
//! geometry.

use std::path::PathBuf;

use serde::Deserialize;

/// One labeled region (`<box>`) inside a CVAT `<image>` element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoxRegion {
    /// Value of the `label` attribute; empty when the attribute is absent.
    pub label: String,
    /// `<attribute name="...">text</attribute>` children as `(name, text)`,
    /// in document order. Repeated names are all kept; text is stored
    /// exactly as written.
    pub attributes: Vec<(String, String)>,
}

impl BoxRegion {
    /// Create a region with the given label and no attributes.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            attributes: Vec::new(),
        }
    }

    /// Builder-style helper to attach a named attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Raw text of the first attribute with this name, if present.
    pub fn attribute<'a>(&'a self, name: &'a str) -> Option<&'a str> {
        self.attribute_values(name).next()
    }

    /// Raw text of every attribute with this name, in document order.
    pub fn attribute_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.attributes
            .iter()
            .filter(move |(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// One `<image>` element of a CVAT XML annotation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CvatImageRecord {
    /// The `name` attribute, a path relative to the scene's image folder.
    pub name: String,
    pub boxes: Vec<BoxRegion>,
}

/// A `{ "name": ..., "value": ... }` entry of a per-frame JSON annotation.
///
/// Non-string names or values are read as `None` rather than rejected.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Tag {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: Option<String>,
}

impl Tag {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: Some(value.into()),
        }
    }
}

/// A decoded per-frame JSON annotation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagRecord {
    /// The annotation file this record was decoded from.
    pub source: PathBuf,
    pub tags: Vec<Tag>,
}

/// A single annotation record, in whichever shape its scene provides.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnnotationRecord {
    Cvat(CvatImageRecord),
    Tagged(TagRecord),
}

/// A record paired with the image file it annotates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneRecord {
    pub record: AnnotationRecord,
    pub image_path: PathBuf,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}
