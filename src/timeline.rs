use crate::cue::Cue;

use std::cmp::Ordering;

/// Orders cues by start time only. Cues starting together compare equal,
/// whatever their other fields.
pub fn compare(a: &Cue, b: &Cue) -> Ordering {
    a.start().cmp(&b.start())
}

/// Stable sort by start time: cues that start together keep their input order.
pub fn sort(cues: &mut [Cue]) {
    cues.sort_by(compare);
}

pub fn is_sorted(cues: &[Cue]) -> bool {
    cues.windows(2).all(|w| compare(&w[0], &w[1]) != Ordering::Greater)
}

/// Merges two sorted sequences. On equal start times, cues from `first` come
/// before cues from `second`.
pub fn merge(first: Vec<Cue>, second: Vec<Cue>) -> Vec<Cue> {
    let mut merged = Vec::with_capacity(first.len() + second.len());
    let mut first = first.into_iter().peekable();
    let mut second = second.into_iter().peekable();
    loop {
        let take_first = match (first.peek(), second.peek()) {
            (Some(a), Some(b)) => compare(a, b) != Ordering::Greater,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        let next = if take_first { first.next() } else { second.next() };
        merged.extend(next);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cue::DEFAULT_STYLE;
    use crate::range::TimeRange;
    use crate::time::TimeCode;

    fn cue(start_ms: u64, label: &str) -> Cue {
        let start = TimeCode::from_millis(start_ms);
        let range = TimeRange::new(start, TimeCode::from_millis(start_ms + 1000)).unwrap();
        Cue::new(DEFAULT_STYLE, range, vec![label.to_string()])
    }

    fn labels(cues: &[Cue]) -> Vec<&str> {
        cues.iter().map(|c| c.text[0].as_str()).collect()
    }

    #[test]
    fn compare_ignores_everything_but_start() {
        let a = cue(1000, "a").with_layer(5);
        let mut b = cue(1000, "b");
        b.set_range(TimeRange::new(TimeCode::from_hms(0, 0, 1, 0), TimeCode::from_hms(0, 0, 9, 0)).unwrap());
        assert_eq!(compare(&a, &b), Ordering::Equal);
        assert_eq!(compare(&cue(999, "x"), &a), Ordering::Less);
    }

    #[test]
    fn sort_is_stable() {
        let mut cues = vec![cue(3000, "c"), cue(1000, "a1"), cue(2000, "b"), cue(1000, "a2")];
        assert!(!is_sorted(&cues));
        sort(&mut cues);
        assert!(is_sorted(&cues));
        assert_eq!(labels(&cues), vec!["a1", "a2", "b", "c"]);
    }

    #[test]
    fn merge_prefers_first_on_ties() {
        let merged = merge(
            vec![cue(0, "f0"), cue(2000, "f2")],
            vec![cue(0, "s0"), cue(1000, "s1"), cue(2000, "s2"), cue(5000, "s5")],
        );
        assert_eq!(labels(&merged), vec!["f0", "s0", "s1", "f2", "s2", "s5"]);
    }
}
