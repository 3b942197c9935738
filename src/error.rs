// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/hearthguard

//! Error types surfaced by the security service and its collaborators

use thiserror::Error;

/// Failure reported by an [`ImageAnalyzer`](crate::image::ImageAnalyzer)
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Zero width, zero height or no pixel data
    #[error("frame has no pixels ({width}x{height})")]
    EmptyFrame {
        /// Frame width in pixels
        width: u32,
        /// Frame height in pixels
        height: u32,
    },

    /// More than [`MAX_FRAME_PIXELS`](crate::image::MAX_FRAME_PIXELS) pixels
    #[error("frame of {width}x{height} is too large")]
    FrameTooLarge {
        /// Requested width in pixels
        width: u32,
        /// Requested height in pixels
        height: u32,
    },

    /// A scripted analyzer ran out of queued outcomes
    #[error("scripted analyzer has no outcomes left")]
    Exhausted,

    /// Any other failure inside the analysis backend
    #[error("image analysis backend failed: {0}")]
    Backend(String),
}

/// Errors returned by [`SecurityService`](crate::core::SecurityService)
///
/// The service performs no compensating action for collaborator failures,
/// it hands them back as-is.
#[derive(Debug, Error)]
pub enum SecurityError {
    /// The image analyzer failed
    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),
}
