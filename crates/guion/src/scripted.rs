//! Scripted in-memory page driver.
//!
//! Models a page as a set of elements with text and visibility, plus click
//! effects that mutate other elements (optionally after a delay, so
//! checkpoint polling is actually exercised). The driver records every
//! action it performs, which makes step-order determinism observable in
//! tests. Page state is loadable from a YAML fixture, so the CLI can replay
//! scenarios without a browser.

use crate::driver::{ElementHandle, PageDriver, Screenshot, TypeOptions};
use crate::result::{GuionError, GuionResult};
use crate::scenario::PointerTarget;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// One element of the scripted page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementFixture {
    /// Text content
    #[serde(default)]
    pub text: String,
    /// Whether the element is rendered
    #[serde(default = "default_true")]
    pub visible: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ElementFixture {
    fn default() -> Self {
        Self {
            text: String::new(),
            visible: true,
        }
    }
}

/// Page mutation triggered by clicking an element.
///
/// `delay_ms` defers the mutation, imitating a server round-trip: a login
/// dialog stays visible for a while after the click, so a `WaitUntilHidden`
/// checkpoint has something to poll.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClickEffect {
    /// Selectors to hide
    #[serde(default)]
    pub hide: Vec<String>,
    /// Selectors to show (created empty if absent)
    #[serde(default)]
    pub show: Vec<String>,
    /// Text to set, keyed by selector
    #[serde(default)]
    pub set_text: HashMap<String, String>,
    /// Delay before the effect applies
    #[serde(default)]
    pub delay_ms: u64,
}

/// Serialized description of a scripted page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageFixture {
    /// Initial elements keyed by selector
    #[serde(default)]
    pub elements: HashMap<String, ElementFixture>,
    /// Click effects keyed by the clicked selector
    #[serde(default)]
    pub on_click: HashMap<String, Vec<ClickEffect>>,
    /// Scripted results for `Eval` predicates, keyed by expression
    #[serde(default)]
    pub eval: HashMap<String, bool>,
}

impl PageFixture {
    /// Parse a page fixture from YAML.
    pub fn from_yaml(yaml: &str) -> GuionResult<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| GuionError::Fixture(e.to_string()))
    }
}

#[derive(Debug)]
struct PendingEffect {
    due: Instant,
    effect: ClickEffect,
}

/// In-memory [`PageDriver`] driven by a [`PageFixture`].
#[derive(Debug, Default)]
pub struct ScriptedDriver {
    url: Option<String>,
    elements: HashMap<String, ElementFixture>,
    on_click: HashMap<String, Vec<ClickEffect>>,
    eval_results: HashMap<String, bool>,
    pending: Vec<PendingEffect>,
    actions: Vec<String>,
    viewport: (u32, u32),
}

impl ScriptedDriver {
    /// Create an empty scripted page.
    #[must_use]
    pub fn new() -> Self {
        Self {
            viewport: (320, 240),
            ..Default::default()
        }
    }

    /// Build a driver from a parsed fixture.
    #[must_use]
    pub fn from_fixture(fixture: PageFixture) -> Self {
        Self {
            elements: fixture.elements,
            on_click: fixture.on_click,
            eval_results: fixture.eval,
            ..Self::new()
        }
    }

    /// Add or replace an element.
    #[must_use]
    pub fn with_element(
        mut self,
        selector: impl Into<String>,
        text: impl Into<String>,
        visible: bool,
    ) -> Self {
        self.elements.insert(
            selector.into(),
            ElementFixture {
                text: text.into(),
                visible,
            },
        );
        self
    }

    /// Script an effect for clicks on the selector.
    #[must_use]
    pub fn with_click_effect(mut self, selector: impl Into<String>, effect: ClickEffect) -> Self {
        self.on_click.entry(selector.into()).or_default().push(effect);
        self
    }

    /// Script the result of an `Eval` predicate.
    #[must_use]
    pub fn with_eval(mut self, expression: impl Into<String>, result: bool) -> Self {
        self.eval_results.insert(expression.into(), result);
        self
    }

    /// Actions performed so far, in order.
    ///
    /// Only page-mutating interactions are logged (goto, type, click, move);
    /// visibility polls are excluded so the log is timing-independent.
    #[must_use]
    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    fn apply_due_effects(&mut self) {
        let now = Instant::now();
        let mut due = Vec::new();
        self.pending.retain(|p| {
            if p.due <= now {
                due.push(p.effect.clone());
                false
            } else {
                true
            }
        });
        for effect in due {
            self.apply_effect(&effect);
        }
    }

    fn apply_effect(&mut self, effect: &ClickEffect) {
        for selector in &effect.hide {
            if let Some(elem) = self.elements.get_mut(selector) {
                elem.visible = false;
            }
        }
        for selector in &effect.show {
            self.elements.entry(selector.clone()).or_default().visible = true;
        }
        for (selector, text) in &effect.set_text {
            self.elements
                .entry(selector.clone())
                .or_default()
                .text
                .clone_from(text);
        }
    }

    fn element(&self, selector: &str) -> GuionResult<&ElementFixture> {
        self.elements
            .get(selector)
            .ok_or_else(|| GuionError::ElementNotFound {
                selector: selector.to_string(),
            })
    }

    /// Render the page into a synthetic RGBA frame.
    ///
    /// Visible elements each paint a band whose color derives from their
    /// selector and text, so frames change whenever the page does. Enough
    /// for recording pipelines; not a browser rendering.
    fn render(&self) -> Screenshot {
        let (width, height) = self.viewport;
        let mut data = vec![0xf0_u8; (width * height * 4) as usize];
        for px in data.chunks_exact_mut(4) {
            px[3] = 0xff;
        }

        let mut visible: Vec<_> = self
            .elements
            .iter()
            .filter(|(_, e)| e.visible)
            .collect();
        visible.sort_by_key(|(selector, _)| selector.as_str());

        let band = (height / (visible.len().max(1) as u32 + 1)).max(1);
        for (i, (selector, elem)) in visible.iter().enumerate() {
            let seed = selector
                .bytes()
                .chain(elem.text.bytes())
                .fold(0xcbf2_9ce4_u32, |h, b| {
                    (h ^ u32::from(b)).wrapping_mul(0x0100_0193)
                });
            let rgb = [
                (seed >> 16) as u8,
                (seed >> 8) as u8,
                seed as u8,
            ];
            let top = band * (i as u32 + 1);
            for y in top..(top + band / 2).min(height) {
                for x in 0..width {
                    let off = ((y * width + x) * 4) as usize;
                    data[off..off + 3].copy_from_slice(&rgb);
                }
            }
        }

        Screenshot::new(data, width, height)
    }
}

#[async_trait]
impl PageDriver for ScriptedDriver {
    async fn goto(&mut self, url: &str) -> GuionResult<()> {
        self.actions.push(format!("goto:{url}"));
        self.url = Some(url.to_string());
        Ok(())
    }

    async fn type_text(
        &mut self,
        selector: &str,
        text: &str,
        options: &TypeOptions,
    ) -> GuionResult<()> {
        self.apply_due_effects();
        self.element(selector)?;
        self.actions.push(format!("type:{selector}:{text}"));
        let elem = self.elements.get_mut(selector).unwrap();
        if options.clear {
            elem.text.clear();
        }
        elem.text.push_str(text);
        Ok(())
    }

    async fn click(&mut self, selector: &str) -> GuionResult<()> {
        self.apply_due_effects();
        self.element(selector)?;
        self.actions.push(format!("click:{selector}"));
        let now = Instant::now();
        if let Some(effects) = self.on_click.get(selector).cloned() {
            for effect in effects {
                if effect.delay_ms == 0 {
                    self.apply_effect(&effect);
                } else {
                    self.pending.push(PendingEffect {
                        due: now + Duration::from_millis(effect.delay_ms),
                        effect,
                    });
                }
            }
        }
        Ok(())
    }

    async fn move_pointer(&mut self, target: &PointerTarget) -> GuionResult<()> {
        self.apply_due_effects();
        match target {
            PointerTarget::Selector { selector } => {
                self.element(selector)?;
                self.actions.push(format!("move:{selector}"));
            }
            PointerTarget::Coords { x, y } => {
                self.actions.push(format!("move:{x},{y}"));
            }
        }
        Ok(())
    }

    async fn query(&mut self, selector: &str) -> GuionResult<Option<ElementHandle>> {
        self.apply_due_effects();
        Ok(self.elements.get(selector).map(|e| {
            ElementHandle::new(selector)
                .with_text(e.text.clone())
                .with_visible(e.visible)
        }))
    }

    async fn is_visible(&mut self, selector: &str) -> GuionResult<bool> {
        self.apply_due_effects();
        Ok(self.elements.get(selector).is_some_and(|e| e.visible))
    }

    async fn text(&mut self, selector: &str) -> GuionResult<String> {
        self.apply_due_effects();
        self.element(selector).map(|e| e.text.clone())
    }

    async fn evaluate(&mut self, expression: &str) -> GuionResult<bool> {
        self.apply_due_effects();
        self.eval_results
            .get(expression)
            .copied()
            .ok_or_else(|| GuionError::Driver {
                message: format!("unscripted expression: {expression}"),
            })
    }

    async fn screenshot(&mut self) -> GuionResult<Screenshot> {
        self.apply_due_effects();
        Ok(self.render())
    }
}
