use crate::cue::{Cue, Margins, DEFAULT_STYLE};
use crate::error::SubcueError;
use crate::format::Standard;

use log::{debug, warn};

/// The outcome of moving a cue to another standard. Conversion always
/// completes; fields the target cannot hold are reset to their defaults and
/// reported in `dropped`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub cue: Cue,
    pub dropped: Vec<SubcueError>,
}

/// Converts `cue`, read from `from`, for writing in `to`.
///
/// Times are rounded onto the target's grid (nearest unit, ties away from
/// zero). Line breaks of the source standard left inside a text line are
/// split into separate lines.
pub fn convert(cue: &Cue, from: Standard, to: Standard) -> Conversion {
    let mut converted = cue.clone();
    converted.set_range(cue.range().quantize(to));
    converted.text = cue
        .text
        .iter()
        .flat_map(|line| from.split_lines(line))
        .map(String::from)
        .collect();

    let mut dropped = Vec::new();
    if to == Standard::Srt {
        let before = converted.text.len();
        converted.text.retain(|line| !line.trim().is_empty());
        if converted.text.len() != before {
            debug!("Dropped {} blank text lines", before - converted.text.len());
        }

        let mut report = |field: &'static str| {
            warn!("{} does not support field '{}', dropping it", to, field);
            dropped.push(SubcueError::UnsupportedField {
                field,
                standard: to.name(),
            });
        };
        if converted.layer != 0 {
            report("Layer");
        }
        if converted.style != DEFAULT_STYLE {
            report("Style");
        }
        if !converted.name.is_empty() {
            report("Name");
        }
        if !converted.margins.left.is_inherited() {
            report("MarginL");
        }
        if !converted.margins.right.is_inherited() {
            report("MarginR");
        }
        if !converted.margins.vertical.is_inherited() {
            report("MarginV");
        }
        if !converted.effect.is_empty() {
            report("Effect");
        }

        converted.layer = 0;
        converted.style = DEFAULT_STYLE.to_string();
        converted.name.clear();
        converted.margins = Margins::default();
        converted.effect.clear();
    }

    Conversion {
        cue: converted,
        dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cue::Margin;
    use crate::range::TimeRange;
    use crate::time::TimeCode;

    fn cue(start_ms: u64, end_ms: u64, text: &[&str]) -> Cue {
        let range = TimeRange::new(TimeCode::from_millis(start_ms), TimeCode::from_millis(end_ms)).unwrap();
        Cue::new(
            DEFAULT_STYLE,
            range,
            text.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn plain_cue_converts_without_warnings() {
        let original = cue(0, 5000, &["Hello", "World"]);
        let to_srt = convert(&original, Standard::Ssa, Standard::Srt);
        assert!(to_srt.dropped.is_empty());
        assert_eq!(to_srt.cue, original);
    }

    #[test]
    fn drops_ssa_only_fields() {
        let mut styled = cue(0, 5000, &["x"])
            .with_layer(1)
            .with_name("Bob")
            .with_effect("Scroll up;1;2;3");
        styled.style = "Sign".to_string();
        styled.margins.vertical = Margin::new(40).unwrap();

        let converted = convert(&styled, Standard::Ssa, Standard::Srt);
        let fields: Vec<&str> = converted
            .dropped
            .iter()
            .map(|e| match e {
                SubcueError::UnsupportedField { field, .. } => *field,
                other => panic!("unexpected {:?}", other),
            })
            .collect();
        assert_eq!(fields, vec!["Layer", "Style", "Name", "MarginV", "Effect"]);
        assert_eq!(converted.cue, cue(0, 5000, &["x"]));
    }

    #[test]
    fn rewrites_line_breaks() {
        let ssa = cue(0, 1000, &["one\\Ntwo", "three"]);
        let srt = convert(&ssa, Standard::Ssa, Standard::Srt).cue;
        assert_eq!(srt.text, vec!["one", "two", "three"]);

        let srt = cue(0, 1000, &["four\nfive"]);
        let ssa = convert(&srt, Standard::Srt, Standard::Ssa).cue;
        assert_eq!(ssa.text, vec!["four", "five"]);
    }

    #[test]
    fn crlf_breaks_from_srt_become_clean_lines() {
        let srt = cue(0, 1000, &["a\r\nb"]);
        let ssa = convert(&srt, Standard::Srt, Standard::Ssa).cue;
        assert_eq!(ssa.text, vec!["a", "b"]);
        assert!(crate::ssa::DialogueSerialiser::default().serialise(&ssa).is_ok());
    }

    #[test]
    fn srt_to_ssa_rounds_to_centiseconds() {
        let srt = cue(1_005, 2_994, &["x"]);
        let ssa = convert(&srt, Standard::Srt, Standard::Ssa);
        assert!(ssa.dropped.is_empty());
        assert_eq!(ssa.cue.start(), TimeCode::from_millis(1_010));
        assert_eq!(ssa.cue.end(), TimeCode::from_millis(2_990));
    }
}
