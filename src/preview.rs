//! Consumers for produced frame sequences.
//!
//! A [`FrameSink`] takes frames one at a time, so a lazy sequence is only
//! advanced as far as the sink asks for. Each accepted frame is reported as
//! one tab-separated line (`index`, `label`, `WIDTHxHEIGHT`) and optionally
//! saved as `<index>.png` into an output directory.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::error::ScenewalkError;
use crate::loader::Frame;

/// Writes a report line per frame and optionally saves the pixels.
#[derive(Debug)]
pub struct FrameSink<W> {
    out: W,
    save_dir: Option<PathBuf>,
    accepted: usize,
}

impl<W: Write> FrameSink<W> {
    pub fn new(out: W, save_dir: Option<PathBuf>) -> Self {
        Self {
            out,
            save_dir,
            accepted: 0,
        }
    }

    /// Number of frames accepted so far.
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Report (and save, if configured) one frame.
    pub fn accept(&mut self, label: &str, image: &DynamicImage) -> Result<(), ScenewalkError> {
        let index = self.accepted;

        let saved = match &self.save_dir {
            Some(dir) => Some(save_frame(dir, index, image)?),
            None => None,
        };

        write!(
            self.out,
            "{index:06}\t{label}\t{}x{}",
            image.width(),
            image.height()
        )?;
        if let Some(saved) = saved {
            write!(self.out, "\t{}", saved.display())?;
        }
        writeln!(self.out)?;

        self.accepted += 1;
        Ok(())
    }
}

/// Drain up to `limit` frames from a traversal into `sink`.
///
/// The first error in the sequence is returned after the frames before it
/// have been accepted. Returns how many frames were accepted by this call.
pub fn preview_frames<I, W>(
    frames: I,
    sink: &mut FrameSink<W>,
    limit: Option<usize>,
) -> Result<usize, ScenewalkError>
where
    I: IntoIterator<Item = Result<Frame, ScenewalkError>>,
    W: Write,
{
    let mut accepted = 0;
    for frame in frames.into_iter().take(limit.unwrap_or(usize::MAX)) {
        let frame = frame?;
        sink.accept(&frame.source.display().to_string(), &frame.image)?;
        accepted += 1;
    }
    Ok(accepted)
}

fn save_frame(dir: &Path, index: usize, image: &DynamicImage) -> Result<PathBuf, ScenewalkError> {
    fs::create_dir_all(dir).map_err(ScenewalkError::Io)?;
    let path = dir.join(format!("{index:06}.png"));
    image
        .save(&path)
        .map_err(|source| ScenewalkError::ImageWrite {
            path: path.clone(),
            source,
        })?;
    Ok(path)
}
