//! Annotation readers.
//!
//! Each scene folder is opened into a [`SceneRecords`] stream that yields
//! one [`SceneRecord`] per annotated frame, whatever shape the scene has on
//! disk. No image bytes are read here; the stream only resolves where each
//! frame's image should be.
//!
//! - [`cvat_xml`]: one XML document per scene, parsed when the scene opens
//! - [`tagged_json`]: one JSON document per frame, parsed when it is pulled
//! - [`layout`]: decides which of the two a scene folder is

pub mod cvat_xml;
pub mod layout;
mod model;
pub mod tagged_json;

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

pub use layout::{detect_scene_layout, SceneLayout};
pub use model::{AnnotationRecord, BoxRegion, CvatImageRecord, SceneRecord, Tag, TagRecord};

use crate::error::ScenewalkError;

/// Ordered records of one open scene.
///
/// Cvat scenes hold their parsed records in memory for the lifetime of the
/// scene. Tagged scenes hold only the directory listing and decode each JSON
/// document as it is pulled, so a malformed document surfaces exactly when
/// the walk reaches it.
pub enum SceneRecords {
    Cvat {
        image_dir: PathBuf,
        images: std::vec::IntoIter<CvatImageRecord>,
    },
    Tagged {
        ann_dir: PathBuf,
        image_dir: PathBuf,
        annotations: walkdir::IntoIter,
    },
}

impl SceneRecords {
    /// Detect the scene's shape and open its record stream.
    pub fn open(scene: &Path) -> Result<Self, ScenewalkError> {
        Self::from_layout(detect_scene_layout(scene)?)
    }

    /// Open the record stream for an already detected layout.
    pub fn from_layout(layout: SceneLayout) -> Result<Self, ScenewalkError> {
        match layout {
            SceneLayout::Cvat {
                annotation,
                image_dir,
            } => {
                let records = cvat_xml::read_cvat_records(&annotation)?;
                debug!(
                    annotation = %annotation.display(),
                    records = records.len(),
                    "parsed CVAT annotation"
                );
                Ok(SceneRecords::Cvat {
                    image_dir,
                    images: records.into_iter(),
                })
            }
            SceneLayout::Tagged { ann_dir, image_dir } => {
                let annotations = WalkDir::new(&ann_dir)
                    .min_depth(1)
                    .max_depth(1)
                    .sort_by_file_name()
                    .into_iter();
                Ok(SceneRecords::Tagged {
                    ann_dir,
                    image_dir,
                    annotations,
                })
            }
        }
    }
}

impl Iterator for SceneRecords {
    type Item = Result<SceneRecord, ScenewalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            SceneRecords::Cvat { image_dir, images } => images.next().map(|image| {
                Ok(SceneRecord {
                    image_path: image_dir.join(&image.name),
                    record: AnnotationRecord::Cvat(image),
                })
            }),
            SceneRecords::Tagged {
                ann_dir,
                image_dir,
                annotations,
            } => loop {
                let entry = match annotations.next()? {
                    Ok(entry) => entry,
                    Err(source) => {
                        return Some(Err(ScenewalkError::DatasetTraversal {
                            path: ann_dir.clone(),
                            message: source.to_string(),
                        }))
                    }
                };

                if !entry.path().is_file() {
                    continue;
                }
                let Some(image_path) = tagged_json::frame_path_for(image_dir, entry.path()) else {
                    debug!(path = %entry.path().display(), "skipping non-JSON entry");
                    continue;
                };

                return Some(tagged_json::read_tag_record(entry.path()).map(|record| {
                    SceneRecord {
                        record: AnnotationRecord::Tagged(record),
                        image_path,
                    }
                }));
            },
        }
    }
}
