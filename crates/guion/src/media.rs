//! GIF recording of scenario runs for documentation.

use crate::driver::Screenshot;
use crate::recorder::{Annotation, RecordingSink};
use crate::result::{GuionError, GuionResult};
use gif::{Encoder, Frame, Repeat};
use image::imageops::FilterType;
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Configuration for GIF output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GifConfig {
    /// Frames per second (1-60)
    pub fps: u8,
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
}

impl Default for GifConfig {
    fn default() -> Self {
        Self {
            fps: 10,
            width: 640,
            height: 480,
        }
    }
}

impl GifConfig {
    /// Create a configuration with the given output dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Set frames per second.
    #[must_use]
    pub fn with_fps(mut self, fps: u8) -> Self {
        self.fps = fps.clamp(1, 60);
        self
    }

    /// Frame delay in centiseconds (the GIF timebase).
    #[must_use]
    pub fn frame_delay_cs(&self) -> u16 {
        (100 / u16::from(self.fps.max(1))).max(1)
    }
}

/// Recording sink that encodes frames into an animated GIF.
///
/// Annotations are written to a `<name>.annotations.json` sidecar next to
/// the GIF, each pointing at the frame it belongs to.
#[derive(Debug)]
pub struct GifSink {
    config: GifConfig,
    output_dir: PathBuf,
    scenario: Option<String>,
    frames: Vec<Screenshot>,
    annotations: Vec<Annotation>,
}

impl GifSink {
    /// Create a sink writing into the given directory.
    pub fn new(output_dir: impl Into<PathBuf>, config: GifConfig) -> Self {
        Self {
            config,
            output_dir: output_dir.into(),
            scenario: None,
            frames: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// Number of frames captured so far.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn resize_to_output(&self, screenshot: &Screenshot) -> GuionResult<RgbaImage> {
        let img = RgbaImage::from_raw(
            screenshot.width,
            screenshot.height,
            screenshot.data.clone(),
        )
        .ok_or_else(|| GuionError::Recording {
            message: format!(
                "frame buffer is {} bytes, expected {}x{}x4",
                screenshot.data.len(),
                screenshot.width,
                screenshot.height
            ),
        })?;
        Ok(image::imageops::resize(
            &img,
            self.config.width,
            self.config.height,
            FilterType::Triangle,
        ))
    }

    fn encode(&self, path: &Path) -> GuionResult<()> {
        let file = File::create(path)?;
        let width = self.config.width as u16;
        let height = self.config.height as u16;
        let mut encoder =
            Encoder::new(file, width, height, &[]).map_err(|e| GuionError::Recording {
                message: format!("GIF encoder: {e}"),
            })?;
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| GuionError::Recording {
                message: format!("GIF repeat: {e}"),
            })?;

        let delay = self.config.frame_delay_cs();
        for screenshot in &self.frames {
            let resized = self.resize_to_output(screenshot)?;
            let mut pixels = resized.into_raw();
            let mut frame = Frame::from_rgba_speed(width, height, &mut pixels, 10);
            frame.delay = delay;
            encoder
                .write_frame(&frame)
                .map_err(|e| GuionError::Recording {
                    message: format!("GIF frame: {e}"),
                })?;
        }
        Ok(())
    }
}

impl RecordingSink for GifSink {
    fn start(&mut self, scenario: &str) -> GuionResult<()> {
        if self.scenario.is_some() {
            return Err(GuionError::InvalidState {
                message: "GIF recording already in progress".to_string(),
            });
        }
        self.frames.clear();
        self.annotations.clear();
        self.scenario = Some(scenario.to_string());
        Ok(())
    }

    fn capture_frame(&mut self, screenshot: &Screenshot) -> GuionResult<()> {
        if self.scenario.is_none() {
            return Err(GuionError::InvalidState {
                message: "GIF recording not started".to_string(),
            });
        }
        self.frames.push(screenshot.clone());
        Ok(())
    }

    fn annotate(&mut self, title: &str, description: &str) -> GuionResult<()> {
        if self.scenario.is_none() {
            return Err(GuionError::InvalidState {
                message: "GIF recording not started".to_string(),
            });
        }
        self.annotations.push(Annotation {
            frame: self.frames.len().saturating_sub(1),
            title: title.to_string(),
            description: description.to_string(),
        });
        Ok(())
    }

    fn finish(&mut self) -> GuionResult<Option<PathBuf>> {
        let Some(scenario) = self.scenario.take() else {
            return Err(GuionError::InvalidState {
                message: "GIF recording not started".to_string(),
            });
        };
        if self.frames.is_empty() {
            tracing::debug!(scenario, "no frames captured, skipping GIF output");
            self.annotations.clear();
            return Ok(None);
        }

        std::fs::create_dir_all(&self.output_dir)?;
        let gif_path = self.output_dir.join(format!("{scenario}.gif"));
        self.encode(&gif_path)?;

        if !self.annotations.is_empty() {
            let sidecar = self.output_dir.join(format!("{scenario}.annotations.json"));
            let json = serde_json::to_vec_pretty(&self.annotations)?;
            std::fs::write(sidecar, json)?;
        }

        tracing::info!(scenario, frames = self.frames.len(), path = %gif_path.display(), "recording written");
        self.frames.clear();
        self.annotations.clear();
        Ok(Some(gif_path))
    }
}
