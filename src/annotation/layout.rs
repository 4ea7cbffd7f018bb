//! Scene shape detection.
//!
//! A scene folder comes in one of two shapes:
//!
//! ```text
//! scene/                       scene/
//!   annotations.xml              ann/
//!   images/                        0001.jpg.json
//!     0001.jpg                     0002.jpg.json
//!     0002.jpg                   img/
//!                                  0001.jpg
//!                                  0002.jpg
//! ```
//!
//! The shape is decided per scene: an `ann` subfolder selects the tagged
//! JSON shape, otherwise the scene must hold exactly one `.xml` file next to
//! an `images` subfolder.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ScenewalkError;

/// Image folder of a CVAT XML scene.
pub const CVAT_IMAGE_DIR: &str = "images";
/// Extension of the CVAT XML annotation file.
pub const CVAT_XML_EXTENSION: &str = "xml";
/// Annotation folder of a tagged JSON scene.
pub const TAGGED_ANN_DIR: &str = "ann";
/// Image folder of a tagged JSON scene.
pub const TAGGED_IMAGE_DIR: &str = "img";

/// The resolved shape of one scene folder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SceneLayout {
    /// One XML document describing every frame in `image_dir`.
    Cvat {
        annotation: PathBuf,
        image_dir: PathBuf,
    },
    /// One JSON document per frame in `ann_dir`. `image_dir` may not exist.
    Tagged { ann_dir: PathBuf, image_dir: PathBuf },
}

impl SceneLayout {
    /// Folder the paired image files are resolved against.
    pub fn image_dir(&self) -> &Path {
        match self {
            SceneLayout::Cvat { image_dir, .. } | SceneLayout::Tagged { image_dir, .. } => image_dir,
        }
    }

    /// Short name of the shape, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            SceneLayout::Cvat { .. } => "cvat-xml",
            SceneLayout::Tagged { .. } => "tagged-json",
        }
    }
}

/// Decide which shape `scene` has and resolve its annotation and image paths.
pub fn detect_scene_layout(scene: &Path) -> Result<SceneLayout, ScenewalkError> {
    let ann_dir = scene.join(TAGGED_ANN_DIR);
    if ann_dir.is_dir() {
        return Ok(SceneLayout::Tagged {
            ann_dir,
            image_dir: scene.join(TAGGED_IMAGE_DIR),
        });
    }

    let mut xml_files = Vec::new();
    let mut image_dir = None;
    for entry in fs::read_dir(scene).map_err(ScenewalkError::Io)? {
        let entry = entry.map_err(ScenewalkError::Io)?;
        let path = entry.path();
        if path.is_dir() && entry.file_name() == CVAT_IMAGE_DIR {
            image_dir = Some(path);
        } else if path.is_file() && has_xml_extension(&path) {
            xml_files.push(path);
        }
    }
    xml_files.sort();

    match (xml_files.len(), image_dir) {
        (1, Some(image_dir)) => Ok(SceneLayout::Cvat {
            annotation: xml_files.remove(0),
            image_dir,
        }),
        (0, image_dir) => Err(ScenewalkError::MissingStructure {
            path: scene.to_path_buf(),
            message: format!(
                "expected an '{TAGGED_ANN_DIR}/' folder or a .{CVAT_XML_EXTENSION} annotation file{}",
                if image_dir.is_none() {
                    format!(" with an '{CVAT_IMAGE_DIR}/' folder")
                } else {
                    String::new()
                }
            ),
        }),
        (_, None) => Err(ScenewalkError::MissingStructure {
            path: scene.to_path_buf(),
            message: format!("annotation found but '{CVAT_IMAGE_DIR}/' folder is missing"),
        }),
        (n, Some(_)) => Err(ScenewalkError::MissingStructure {
            path: scene.to_path_buf(),
            message: format!(
                "expected exactly one .{CVAT_XML_EXTENSION} annotation file, found {n}"
            ),
        }),
    }
}

fn has_xml_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(CVAT_XML_EXTENSION))
        .unwrap_or(false)
}
