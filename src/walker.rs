//! Lazy dataset traversal.
//!
//! [`DatasetWalker`] flattens the two-level layout (scenes, then records
//! within a scene) into a single forward-only iterator of decoded frames.
//! All position state lives in the walker: the scene listing, and the record
//! stream of the scene currently open. Pulling the next frame resumes right
//! after the record that produced the previous one.
//!
//! A walk moves through three states:
//!
//! ```text
//!   AtSceneBoundary --open scene--> ScanningScene --records done--> AtSceneBoundary
//!         |                               |
//!         +--no scenes left / fatal-------+-----> Exhausted
//! ```
//!
//! Structural and parse errors are yielded once as `Some(Err(_))`, after
//! which the walker is exhausted. Records that do not match, or whose frame
//! cannot be loaded, are skipped without a trace in the output.

use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::annotation::{detect_scene_layout, SceneRecords};
use crate::error::ScenewalkError;
use crate::loader::{Frame, ImageFileLoader, ImageLoader};
use crate::predicate::Predicate;

enum WalkState {
    AtSceneBoundary,
    ScanningScene { scene: PathBuf, records: SceneRecords },
    Exhausted,
}

/// Counters describing how far a walk has progressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub scenes: usize,
    pub records: usize,
    pub skipped: usize,
    pub emitted: usize,
}

/// Resumable cursor over the matching frames of a dataset.
pub struct DatasetWalker<L = ImageFileLoader> {
    root: PathBuf,
    scenes: walkdir::IntoIter,
    predicate: Predicate,
    loader: L,
    state: WalkState,
    stats: WalkStats,
}

/// Start a traversal of `root`, decoding frames with [`ImageFileLoader`].
///
/// Nothing is read until the first frame is pulled.
pub fn traverse(root: impl AsRef<Path>, predicate: Predicate) -> DatasetWalker {
    DatasetWalker::new(root, predicate)
}

impl DatasetWalker {
    pub fn new(root: impl AsRef<Path>, predicate: Predicate) -> Self {
        Self::with_loader(root, predicate, ImageFileLoader)
    }
}

impl<L: ImageLoader> DatasetWalker<L> {
    /// Start a traversal that decodes frames with a custom loader.
    pub fn with_loader(root: impl AsRef<Path>, predicate: Predicate, loader: L) -> Self {
        let root = root.as_ref().to_path_buf();
        let scenes = WalkDir::new(&root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter();
        Self {
            root,
            scenes,
            predicate,
            loader,
            state: WalkState::AtSceneBoundary,
            stats: WalkStats::default(),
        }
    }

    pub fn stats(&self) -> WalkStats {
        self.stats
    }

    /// Scene currently being scanned, if any.
    pub fn current_scene(&self) -> Option<&Path> {
        match &self.state {
            WalkState::ScanningScene { scene, .. } => Some(scene),
            _ => None,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self.state, WalkState::Exhausted)
    }

    fn fail(&mut self, err: ScenewalkError) -> Option<Result<Frame, ScenewalkError>> {
        self.state = WalkState::Exhausted;
        Some(Err(err))
    }
}

impl<L: ImageLoader> Iterator for DatasetWalker<L> {
    type Item = Result<Frame, ScenewalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match &mut self.state {
                WalkState::Exhausted => return None,
                WalkState::AtSceneBoundary => {
                    let entry = match self.scenes.next() {
                        None => {
                            debug!(root = %self.root.display(), stats = ?self.stats, "dataset exhausted");
                            self.state = WalkState::Exhausted;
                            return None;
                        }
                        Some(Err(source)) => {
                            return self.fail(ScenewalkError::DatasetTraversal {
                                path: self.root.clone(),
                                message: source.to_string(),
                            });
                        }
                        Some(Ok(entry)) => entry,
                    };

                    let scene = entry.into_path();
                    if !scene.is_dir() {
                        debug!(path = %scene.display(), "skipping non-directory dataset entry");
                        continue;
                    }

                    let opened = detect_scene_layout(&scene).and_then(|layout| {
                        info!(
                            scene = %scene.display(),
                            kind = layout.kind(),
                            images = %layout.image_dir().display(),
                            "scanning scene"
                        );
                        SceneRecords::from_layout(layout)
                    });
                    match opened {
                        Ok(records) => {
                            self.stats.scenes += 1;
                            self.state = WalkState::ScanningScene { scene, records };
                        }
                        Err(err) => return self.fail(err),
                    }
                }
                WalkState::ScanningScene { scene, records } => {
                    let candidate = match records.next() {
                        None => {
                            self.state = WalkState::AtSceneBoundary;
                            continue;
                        }
                        Some(Err(err)) => return self.fail(err),
                        Some(Ok(candidate)) => candidate,
                    };
                    self.stats.records += 1;

                    if !self.predicate.matches(&candidate.record) {
                        self.stats.skipped += 1;
                        continue;
                    }

                    match self.loader.load(&candidate.image_path) {
                        Some(image) => {
                            self.stats.emitted += 1;
                            return Some(Ok(Frame {
                                scene: scene.clone(),
                                source: candidate.image_path,
                                image,
                            }));
                        }
                        None => {
                            debug!(path = %candidate.image_path.display(), "matching record has no readable frame");
                            self.stats.skipped += 1;
                        }
                    }
                }
            }
        }
    }
}

impl<L: ImageLoader> FusedIterator for DatasetWalker<L> {}
