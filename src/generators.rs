//! Unbounded synthetic sequences: Fibonacci numbers and white-noise frames.

use std::fmt;
use std::str::FromStr;

use image::{GrayImage, Luma};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::error::ScenewalkError;

/// Fibonacci numbers starting at 0, 1.
///
/// Ends after the largest term that fits in a `u64` instead of overflowing.
#[derive(Clone, Debug)]
pub struct Fibonacci {
    current: Option<u64>,
    next: Option<u64>,
}

impl Fibonacci {
    pub fn new() -> Self {
        Self {
            current: Some(0),
            next: Some(1),
        }
    }
}

impl Default for Fibonacci {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for Fibonacci {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let current = self.current?;
        self.current = self.next;
        self.next = self.next.and_then(|next| next.checked_add(current));
        Some(current)
    }
}

/// Frame dimensions parsed from `WIDTHxHEIGHT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PictureSize {
    pub width: u32,
    pub height: u32,
}

impl Default for PictureSize {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
        }
    }
}

impl FromStr for PictureSize {
    type Err = ScenewalkError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || ScenewalkError::InvalidPictureSize(raw.to_string());

        let (width, height) = raw.split_once('x').ok_or_else(invalid)?;
        let parse = |part: &str| {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            part.parse::<u32>().ok().filter(|v| *v > 0)
        };

        Ok(Self {
            width: parse(width).ok_or_else(invalid)?,
            height: parse(height).ok_or_else(invalid)?,
        })
    }
}

impl fmt::Display for PictureSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Endless 8-bit grayscale frames of uniformly random pixels.
#[derive(Clone, Debug)]
pub struct WhiteNoise {
    size: PictureSize,
    rng: StdRng,
}

impl WhiteNoise {
    /// Seeded generators produce the same frames on every run.
    pub fn new(size: PictureSize, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::rng().random::<u64>());
        Self {
            size,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Iterator for WhiteNoise {
    type Item = GrayImage;

    fn next(&mut self) -> Option<GrayImage> {
        let rng = &mut self.rng;
        Some(GrayImage::from_fn(self.size.width, self.size.height, |_, _| {
            Luma([rng.random::<u8>()])
        }))
    }
}
