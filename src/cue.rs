use crate::error::{Result, SubcueError};
use crate::range::TimeRange;
use crate::time::TimeCode;

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

/// Style assumed when a cue does not name one.
pub const DEFAULT_STYLE: &str = "Default";

static SCROLL_EFFECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Scroll (up|down);\d+;\d+;\d+(;\d+)?$").unwrap());

static BANNER_EFFECT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Banner;\d+(;\d+){0,2}$").unwrap());

/// A margin override in pixels, written as four digits. Zero defers to the style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Margin(u16);

impl Margin {
    pub const INHERIT: Margin = Margin(0);
    pub const MAX: u16 = 9999;

    pub fn new(pixels: u16) -> Result<Self> {
        if pixels > Self::MAX {
            return Err(SubcueError::field_encoding("Margin", &pixels.to_string()));
        }
        Ok(Margin(pixels))
    }

    pub fn pixels(self) -> u16 {
        self.0
    }

    pub fn is_inherited(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Margin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

impl FromStr for Margin {
    type Err = SubcueError;

    /// Accepts one to four digits; some writers drop the zero padding.
    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || s.len() > 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SubcueError::field_encoding("Margin", s));
        }
        s.parse()
            .map(Margin)
            .map_err(|_| SubcueError::field_encoding("Margin", s))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Margins {
    pub left: Margin,
    pub right: Margin,
    pub vertical: Margin,
}

impl Margins {
    pub fn is_inherited(&self) -> bool {
        self.left.is_inherited() && self.right.is_inherited() && self.vertical.is_inherited()
    }
}

/// The transition effects renderers recognise in the effect field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    None,
    /// `Scroll up;y1;y2;delay[;fadeawayheight]`
    ScrollUp,
    /// `Scroll down;y1;y2;delay[;fadeawayheight]`
    ScrollDown,
    /// `Banner;delay[;lefttoright[;fadeawaywidth]]`
    Banner,
    Other,
}

impl EffectKind {
    pub fn of(effect: &str) -> Self {
        if effect.is_empty() {
            EffectKind::None
        } else if SCROLL_EFFECT.is_match(effect) {
            if effect.starts_with("Scroll up") {
                EffectKind::ScrollUp
            } else {
                EffectKind::ScrollDown
            }
        } else if BANNER_EFFECT.is_match(effect) {
            EffectKind::Banner
        } else {
            EffectKind::Other
        }
    }
}

/// One subtitle event: its timing, text and display metadata.
///
/// The time range is only replaced as a whole through [`Cue::set_range`], which
/// keeps start and end ordered. The remaining fields are independent and public.
/// Text lines are kept verbatim, including any `{...}` override codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    /// Draw order; higher layers are drawn over lower ones.
    pub layer: u32,
    range: TimeRange,
    /// Name of a style defined elsewhere in the document.
    pub style: String,
    /// Speaker, informational only.
    pub name: String,
    pub margins: Margins,
    /// Stored as written; see [`EffectKind`].
    pub effect: String,
    pub text: Vec<String>,
}

impl Cue {
    pub fn new<S: Into<String>>(style: S, range: TimeRange, text: Vec<String>) -> Self {
        Cue {
            layer: 0,
            range,
            style: style.into(),
            name: String::new(),
            margins: Margins::default(),
            effect: String::new(),
            text,
        }
    }

    pub fn range(&self) -> &TimeRange {
        &self.range
    }

    pub fn set_range(&mut self, range: TimeRange) {
        self.range = range;
    }

    pub fn start(&self) -> TimeCode {
        self.range.start()
    }

    pub fn end(&self) -> TimeCode {
        self.range.end()
    }

    pub fn effect_kind(&self) -> EffectKind {
        EffectKind::of(&self.effect)
    }

    pub fn with_layer(mut self, layer: u32) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn with_effect<S: Into<String>>(mut self, effect: S) -> Self {
        self.effect = effect.into();
        self
    }
}
