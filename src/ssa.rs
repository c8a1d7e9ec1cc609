use crate::cue::{Cue, DEFAULT_STYLE};
use crate::error::{Result, SubcueError};
use crate::format::Standard;
use crate::parser;
use crate::range::TimeRange;
use crate::time::TimeCode;

use std::fmt;
use std::str::FromStr;

use log::debug;

const DIALOGUE: &str = "Dialogue: ";
const FIELD_SEPARATOR: char = ',';

/// A column named in an events `Format:` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventField {
    /// SSA v4 only; always written as `Marked=0`.
    Marked,
    Layer,
    Start,
    End,
    Style,
    Name,
    MarginL,
    MarginR,
    MarginV,
    Effect,
    Text,
    /// A column this crate does not know. Written empty, ignored when read.
    Other(String),
}

impl EventField {
    pub fn as_str(&self) -> &str {
        match self {
            EventField::Marked => "Marked",
            EventField::Layer => "Layer",
            EventField::Start => "Start",
            EventField::End => "End",
            EventField::Style => "Style",
            EventField::Name => "Name",
            EventField::MarginL => "MarginL",
            EventField::MarginR => "MarginR",
            EventField::MarginV => "MarginV",
            EventField::Effect => "Effect",
            EventField::Text => "Text",
            EventField::Other(name) => name.as_str(),
        }
    }
}

impl From<&str> for EventField {
    fn from(name: &str) -> Self {
        match name {
            "Marked" => EventField::Marked,
            "Layer" => EventField::Layer,
            "Start" => EventField::Start,
            "End" => EventField::End,
            "Style" => EventField::Style,
            "Name" | "Actor" => EventField::Name,
            "MarginL" => EventField::MarginL,
            "MarginR" => EventField::MarginR,
            "MarginV" => EventField::MarginV,
            "Effect" => EventField::Effect,
            "Text" => EventField::Text,
            other => EventField::Other(other.to_string()),
        }
    }
}

/// The field order of `Dialogue:` lines, as declared by the events section's
/// `Format:` line. `Text` is always the last field so it may contain commas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFormat {
    fields: Vec<EventField>,
}

impl EventFormat {
    pub const STANDARD: &'static str =
        "Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text";

    pub fn new(fields: Vec<EventField>) -> Result<Self> {
        let text_fields = fields.iter().filter(|f| **f == EventField::Text).count();
        if text_fields != 1 || fields.last() != Some(&EventField::Text) {
            return Err(SubcueError::Parse(
                "event format must end with exactly one Text field".to_string(),
            ));
        }
        Ok(EventFormat { fields })
    }

    /// Reads a field list, with or without its `Format:` key.
    pub fn parse(declaration: &str) -> Result<Self> {
        let list = parser::complete(parser::format_line, declaration).map_err(SubcueError::Parse)?;
        let fields = list
            .split(FIELD_SEPARATOR)
            .map(|name| EventField::from(name.trim()))
            .collect();
        EventFormat::new(fields)
    }

    pub fn fields(&self) -> &[EventField] {
        &self.fields
    }

    /// The `Format:` line that must precede events written with this order.
    pub fn declaration(&self) -> String {
        format!("Format: {}", self)
    }
}

impl Default for EventFormat {
    fn default() -> Self {
        EventFormat {
            fields: vec![
                EventField::Layer,
                EventField::Start,
                EventField::End,
                EventField::Style,
                EventField::Name,
                EventField::MarginL,
                EventField::MarginR,
                EventField::MarginV,
                EventField::Effect,
                EventField::Text,
            ],
        }
    }
}

impl fmt::Display for EventFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(field.as_str())?;
        }
        Ok(())
    }
}

impl FromStr for EventFormat {
    type Err = SubcueError;

    fn from_str(s: &str) -> Result<Self> {
        EventFormat::parse(s)
    }
}

/// Writes and reads `Dialogue:` lines laid out by an [`EventFormat`].
#[derive(Debug, Clone, Default)]
pub struct DialogueSerialiser {
    format: EventFormat,
}

impl DialogueSerialiser {
    pub fn new(format: EventFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> &EventFormat {
        &self.format
    }

    pub fn reconfigure(&mut self, format: EventFormat) {
        self.format = format;
    }

    pub fn serialise(&self, cue: &Cue) -> Result<String> {
        let mut line = String::from(DIALOGUE);
        for (i, field) in self.format.fields.iter().enumerate() {
            if i > 0 {
                line.push(FIELD_SEPARATOR);
            }
            match field {
                EventField::Marked => line.push_str("Marked=0"),
                EventField::Layer => line.push_str(&cue.layer.to_string()),
                EventField::Start => line.push_str(&Standard::Ssa.format_time(cue.start())),
                EventField::End => line.push_str(&Standard::Ssa.format_time(cue.end())),
                EventField::Style => line.push_str(checked_field("Style", &cue.style)?),
                EventField::Name => line.push_str(checked_field("Name", &cue.name)?),
                EventField::MarginL => line.push_str(&cue.margins.left.to_string()),
                EventField::MarginR => line.push_str(&cue.margins.right.to_string()),
                EventField::MarginV => line.push_str(&cue.margins.vertical.to_string()),
                EventField::Effect => line.push_str(checked_field("Effect", &cue.effect)?),
                EventField::Text => line.push_str(&join_text(&cue.text)?),
                EventField::Other(_) => (),
            }
        }
        Ok(line)
    }

    pub fn parse(&self, line: &str) -> Result<Cue> {
        let body = parser::complete(parser::dialogue_line, line).map_err(SubcueError::Parse)?;
        let fields = &self.format.fields;
        let values: Vec<&str> = body.splitn(fields.len(), FIELD_SEPARATOR).collect();
        if values.len() != fields.len() {
            debug!("Rejecting dialogue line with {} fields: {}", values.len(), line);
            return Err(SubcueError::Parse(format!(
                "expected {} fields, found {}",
                fields.len(),
                values.len()
            )));
        }

        let mut cue = Cue::new(DEFAULT_STYLE, TimeRange::default(), Vec::new());
        let mut start = TimeCode::ZERO;
        let mut end = TimeCode::ZERO;
        for (field, value) in fields.iter().zip(values) {
            match field {
                EventField::Layer => {
                    cue.layer = value.trim().parse().map_err(|_| {
                        SubcueError::Parse(format!("invalid layer: {:?}", value))
                    })?
                }
                EventField::Start => start = Standard::Ssa.parse_time(value.trim())?,
                EventField::End => end = Standard::Ssa.parse_time(value.trim())?,
                EventField::Style => cue.style = value.to_string(),
                EventField::Name => cue.name = value.to_string(),
                EventField::MarginL => cue.margins.left = value.trim().parse()?,
                EventField::MarginR => cue.margins.right = value.trim().parse()?,
                EventField::MarginV => cue.margins.vertical = value.trim().parse()?,
                EventField::Effect => cue.effect = value.to_string(),
                EventField::Text => cue.text = split_text(value),
                EventField::Marked | EventField::Other(_) => (),
            }
        }
        cue.set_range(TimeRange::new(start, end)?);
        Ok(cue)
    }
}

fn checked_field<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
    if value.contains(|c: char| c == FIELD_SEPARATOR || c == '\n' || c == '\r') {
        return Err(SubcueError::field_encoding(field, value));
    }
    Ok(value)
}

fn join_text(lines: &[String]) -> Result<String> {
    if let Some(line) = lines.iter().find(|l| l.contains(|c: char| c == '\n' || c == '\r')) {
        return Err(SubcueError::field_encoding("Text", line));
    }
    Ok(lines.join(Standard::Ssa.line_break()))
}

fn split_text(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    Standard::Ssa
        .split_lines(text)
        .into_iter()
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cue::{Margin, Margins};

    fn cue(start_ms: u64, end_ms: u64, text: &[&str]) -> Cue {
        let range = TimeRange::new(TimeCode::from_millis(start_ms), TimeCode::from_millis(end_ms)).unwrap();
        Cue::new(
            DEFAULT_STYLE,
            range,
            text.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn serialises_standard_line() {
        let line = DialogueSerialiser::default()
            .serialise(&cue(0, 5000, &["Hello", "World"]))
            .unwrap();
        assert_eq!(
            line,
            "Dialogue: 0,0:00:00.00,0:00:05.00,Default,,0000,0000,0000,,Hello\\NWorld"
        );
    }

    #[test]
    fn serialises_populated_fields() {
        let cue = cue(1_230, 4_560, &["{\\an8}Top, left"])
            .with_layer(2)
            .with_name("Alice")
            .with_margins(Margins {
                left: Margin::new(10).unwrap(),
                right: Margin::new(20).unwrap(),
                vertical: Margin::new(300).unwrap(),
            })
            .with_effect("Banner;30");
        let line = DialogueSerialiser::default().serialise(&cue).unwrap();
        assert_eq!(
            line,
            "Dialogue: 2,0:00:01.23,0:00:04.56,Default,Alice,0010,0020,0300,Banner;30,{\\an8}Top, left"
        );
        assert_eq!(DialogueSerialiser::default().parse(&line).unwrap(), cue);
    }

    #[test]
    fn rejects_separator_in_fixed_fields() {
        let serialiser = DialogueSerialiser::default();
        let err = serialiser
            .serialise(&cue(0, 1000, &["x"]).with_name("Smith, J."))
            .unwrap_err();
        assert_eq!(err, SubcueError::field_encoding("Name", "Smith, J."));

        let mut bad_style = cue(0, 1000, &["x"]);
        bad_style.style = "A,B".to_string();
        assert!(serialiser.serialise(&bad_style).is_err());

        assert!(serialiser.serialise(&cue(0, 1000, &["a\nb"])).is_err());
        assert!(serialiser.serialise(&cue(0, 1000, &["a, b, c"])).is_ok());
    }

    #[test]
    fn follows_declared_order() {
        let format = EventFormat::parse("Format: Marked, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text").unwrap();
        let serialiser = DialogueSerialiser::new(format);
        let line = serialiser.serialise(&cue(0, 5000, &["Hi"]).with_layer(3)).unwrap();
        assert_eq!(
            line,
            "Dialogue: Marked=0,0:00:00.00,0:00:05.00,Default,,0000,0000,0000,,Hi"
        );
        assert_eq!(serialiser.parse(&line).unwrap().layer, 0);
    }

    #[test]
    fn reconfigured_order_round_trips() {
        let mut serialiser = DialogueSerialiser::default();
        serialiser.reconfigure("Start, End, Layer, Style, Extra, Text".parse().unwrap());
        let original = cue(1_000, 2_000, &["a", "b"]).with_layer(1);
        let line = serialiser.serialise(&original).unwrap();
        assert_eq!(line, "Dialogue: 0:00:01.00,0:00:02.00,1,Default,,a\\Nb");
        assert_eq!(serialiser.parse(&line).unwrap(), original);
    }

    #[test]
    fn format_requires_trailing_text() {
        assert!(EventFormat::parse("Layer, Text, Start").is_err());
        assert!(EventFormat::parse("Layer, Start").is_err());
        assert!(EventFormat::parse("Text, Text").is_err());
        assert_eq!(EventFormat::default().to_string(), EventFormat::STANDARD);
        assert_eq!(
            EventFormat::default().declaration(),
            format!("Format: {}", EventFormat::STANDARD)
        );
        assert_eq!(EventFormat::parse(EventFormat::STANDARD).unwrap(), EventFormat::default());
    }

    #[test]
    fn parses_loose_margins_and_commas_in_text() {
        let cue = DialogueSerialiser::default()
            .parse("Dialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,15,,one, two\\Nthree")
            .unwrap();
        assert_eq!(cue.margins.vertical.pixels(), 15);
        assert_eq!(cue.text, vec!["one, two", "three"]);
    }

    #[test]
    fn parse_errors() {
        let serialiser = DialogueSerialiser::default();
        assert!(matches!(
            serialiser.parse("Comment: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,x"),
            Err(SubcueError::Parse(_))
        ));
        assert!(matches!(
            serialiser.parse("Dialogue: 0,0:00:01.00,0:00:02.00"),
            Err(SubcueError::Parse(_))
        ));
        assert!(matches!(
            serialiser.parse("Dialogue: 0,0:60:01.00,0:00:02.00,Default,,0,0,0,,x"),
            Err(SubcueError::MalformedTime { .. })
        ));
        assert!(matches!(
            serialiser.parse("Dialogue: 0,0:00:03.00,0:00:02.00,Default,,0,0,0,,x"),
            Err(SubcueError::InvalidRange { .. })
        ));
    }
}
