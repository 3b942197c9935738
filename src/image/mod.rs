// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/hearthguard

//! Camera frames and the image analysis seam

mod analyzers;

pub use analyzers::{RandomImageAnalyzer, ScriptedImageAnalyzer};

use serde::{Deserialize, Serialize};

use crate::error::AnalyzerError;

/// Largest frame accepted, one 8K UHD image
pub const MAX_FRAME_PIXELS: u64 = 7680 * 4320;

const BYTES_PER_PIXEL: u64 = 3;

/// A captured camera frame, packed RGB8
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Row-major RGB bytes
    pub pixels: Vec<u8>,
}

impl Frame {
    /// Wrap already captured pixel data
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self { width, height, pixels }
    }

    /// All-black frame of the given size.
    ///
    /// Fails with [`AnalyzerError::FrameTooLarge`] above [`MAX_FRAME_PIXELS`].
    pub fn blank(width: u32, height: u32) -> Result<Self, AnalyzerError> {
        let len = u64::from(width)
            .checked_mul(u64::from(height))
            .filter(|&area| area <= MAX_FRAME_PIXELS)
            .and_then(|area| area.checked_mul(BYTES_PER_PIXEL))
            .and_then(|bytes| usize::try_from(bytes).ok())
            .ok_or(AnalyzerError::FrameTooLarge { width, height })?;
        Ok(Self::new(width, height, vec![0; len]))
    }

    /// True when there is nothing to analyse
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    pub(crate) fn ensure_not_empty(&self) -> Result<(), AnalyzerError> {
        if self.is_empty() {
            return Err(AnalyzerError::EmptyFrame {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Decides whether a frame shows a cat
pub trait ImageAnalyzer: Send {
    /// `confidence_threshold` is a percentage; a match below it is not a cat
    fn image_contains_cat(
        &mut self,
        frame: &Frame,
        confidence_threshold: f32,
    ) -> Result<bool, AnalyzerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_frame_size() {
        let frame = Frame::blank(4, 2).unwrap();
        assert_eq!(frame.pixels.len(), 24);
        assert!(!frame.is_empty());
    }

    #[test]
    fn test_zero_area_is_rejected() {
        let frame = Frame::blank(0, 10).unwrap();
        assert!(frame.is_empty());
        assert!(matches!(
            frame.ensure_not_empty(),
            Err(AnalyzerError::EmptyFrame { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_oversized_frame_is_rejected() {
        assert!(matches!(
            Frame::blank(u32::MAX, u32::MAX),
            Err(AnalyzerError::FrameTooLarge { width: u32::MAX, height: u32::MAX })
        ));
        assert!(matches!(
            Frame::blank(7681, 4320),
            Err(AnalyzerError::FrameTooLarge { .. })
        ));
    }

    #[test]
    fn test_largest_frame_is_accepted() {
        let frame = Frame::blank(7680, 4320).unwrap();
        assert_eq!(frame.pixels.len() as u64, MAX_FRAME_PIXELS * 3);
    }
}
