//! Recording sink interface.
//!
//! A sink receives frames and annotations during a scenario run, keyed by
//! the scenario name, and produces a documentation artifact when the run
//! finishes. [`NullSink`] discards everything; the GIF sink lives in
//! [`crate::media`] behind the `media` feature.

use crate::driver::Screenshot;
use crate::result::GuionResult;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A titled caption attached to a point in the recording.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Annotation {
    /// Index of the frame the annotation refers to
    pub frame: usize,
    /// Heading
    pub title: String,
    /// Body text
    pub description: String,
}

/// Sink for frames and annotations captured during a run.
pub trait RecordingSink: Send {
    /// Begin a recording keyed by the scenario name.
    fn start(&mut self, scenario: &str) -> GuionResult<()>;

    /// Append a frame.
    fn capture_frame(&mut self, screenshot: &Screenshot) -> GuionResult<()>;

    /// Attach a titled caption at the current frame position.
    fn annotate(&mut self, title: &str, description: &str) -> GuionResult<()>;

    /// Finish the recording, returning the artifact path if one was written.
    fn finish(&mut self) -> GuionResult<Option<PathBuf>>;
}

/// Sink that discards all frames and annotations.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RecordingSink for NullSink {
    fn start(&mut self, _scenario: &str) -> GuionResult<()> {
        Ok(())
    }

    fn capture_frame(&mut self, _screenshot: &Screenshot) -> GuionResult<()> {
        Ok(())
    }

    fn annotate(&mut self, _title: &str, _description: &str) -> GuionResult<()> {
        Ok(())
    }

    fn finish(&mut self) -> GuionResult<Option<PathBuf>> {
        Ok(None)
    }
}
