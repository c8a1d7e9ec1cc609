//! Subtitle cues and their SSA/ASS `Dialogue:` and SRT line representations.

pub mod convert;
pub mod cue;
pub mod error;
pub mod format;
mod parser;
pub mod range;
mod serialiser;
pub mod srt;
pub mod ssa;
pub mod time;
pub mod timeline;

pub use crate::convert::{convert, Conversion};
pub use crate::cue::{Cue, EffectKind, Margin, Margins, DEFAULT_STYLE};
pub use crate::error::{Result, SubcueError};
pub use crate::format::Standard;
pub use crate::range::TimeRange;
pub use crate::srt::{SrtReader, SrtSerialiser};
pub use crate::ssa::{DialogueSerialiser, EventField, EventFormat};
pub use crate::time::{Precision, TimeCode};
