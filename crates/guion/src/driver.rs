//! Abstract page driver trait.
//!
//! The runner never talks to a browser directly; it drives this trait. A
//! production implementation binds it to a real automation engine, while
//! [`crate::scripted::ScriptedDriver`] backs deterministic runs and tests.
//! Missing elements surface as explicit `Option`/`Err` values, never as
//! silent no-ops.

use crate::result::GuionResult;
use crate::scenario::PointerTarget;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Options for a text-entry action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeOptions {
    /// Enter the text character-by-character so recordings show the typing
    pub animated: bool,
    /// Clear existing content before typing
    pub clear: bool,
}

impl TypeOptions {
    /// Options for an animated type, optionally clearing first.
    #[must_use]
    pub const fn animated(clear: bool) -> Self {
        Self {
            animated: true,
            clear,
        }
    }
}

/// Handle to a DOM element resolved by the driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Selector the element was resolved from
    pub selector: String,
    /// Element text content
    pub text: String,
    /// Whether the element is currently rendered
    pub visible: bool,
}

impl ElementHandle {
    /// Create a new element handle
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            text: String::new(),
            visible: true,
        }
    }

    /// Set text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set visibility
    #[must_use]
    pub const fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

/// A captured frame of the page as raw RGBA pixels.
#[derive(Debug, Clone)]
pub struct Screenshot {
    /// RGBA pixel data, row-major, `width * height * 4` bytes
    pub data: Vec<u8>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Screenshot {
    /// Create a new screenshot
    #[must_use]
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
        }
    }

    /// Check the screenshot carries data and non-zero dimensions
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.data.is_empty() && self.width > 0 && self.height > 0
    }
}

/// Abstract driver for one live page session.
///
/// All methods take `&mut self`: the session is exclusively owned by the
/// runner for the scenario's duration, so no interior locking is needed.
/// Each call suspends the caller until the interaction is acknowledged.
#[async_trait]
pub trait PageDriver: Send {
    /// Navigate to a URL
    async fn goto(&mut self, url: &str) -> GuionResult<()>;

    /// Type text into the element matching the selector
    async fn type_text(
        &mut self,
        selector: &str,
        text: &str,
        options: &TypeOptions,
    ) -> GuionResult<()>;

    /// Click the element matching the selector
    async fn click(&mut self, selector: &str) -> GuionResult<()>;

    /// Move the pointer to an element or to coordinates
    async fn move_pointer(&mut self, target: &PointerTarget) -> GuionResult<()>;

    /// Resolve a selector to an element handle, `None` when absent
    async fn query(&mut self, selector: &str) -> GuionResult<Option<ElementHandle>>;

    /// Whether the element is currently visible.
    ///
    /// An absent element counts as hidden, matching the `:visible` semantics
    /// checkpoints rely on.
    async fn is_visible(&mut self, selector: &str) -> GuionResult<bool>;

    /// Text content of the element matching the selector
    async fn text(&mut self, selector: &str) -> GuionResult<String>;

    /// Evaluate a page expression to a boolean
    async fn evaluate(&mut self, expression: &str) -> GuionResult<bool>;

    /// Capture the current page as an RGBA screenshot
    async fn screenshot(&mut self) -> GuionResult<Screenshot>;
}
