//! Greedy word wrap against the static font tables.
//!
//! Widths are summed in integer glyph units, so the same text always breaks
//! at the same place. Nothing is dropped: words wider than the line are split
//! at character boundaries.

use crate::layout::font_metrics::FontMetricTable;

/// Wraps free text into printed lines no wider than `max_width_pt`.
///
/// Every `\n` (also `\r\n` and lone `\r`) is a hard break and empty
/// paragraphs survive as empty lines. Runs of spaces inside a paragraph
/// collapse to one.
pub fn wrap_text(
    text: &str,
    metrics: &FontMetricTable,
    size_pt: f32,
    max_width_pt: f32,
) -> Vec<String> {
    let max_units = max_units(size_pt, max_width_pt);
    text.replace("\r\n", "\n")
        .split(['\n', '\r'])
        .flat_map(|paragraph| wrap_paragraph(paragraph, metrics, max_units))
        .collect()
}

fn max_units(size_pt: f32, max_width_pt: f32) -> u32 {
    if size_pt <= 0.0 {
        return u32::MAX;
    }
    (max_width_pt * 1000.0 / size_pt).floor().max(0.0) as u32
}

/// Wraps a single paragraph (no hard breaks). Always returns at least one line.
fn wrap_paragraph(paragraph: &str, metrics: &FontMetricTable, max_units: u32) -> Vec<String> {
    let space_units = metrics.measure_units(" ");
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_units = 0u32;

    for word in paragraph.split_whitespace() {
        let word_units = metrics.measure_units(word);

        if word_units > max_units {
            // Overlong word (URLs, hashes): flush, then split by character.
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let mut pieces = break_word(word, metrics, max_units);
            // break_word never returns an empty list for a non-empty word.
            current = pieces.pop().unwrap_or_default();
            current_units = metrics.measure_units(&current);
            lines.extend(pieces);
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            current_units = word_units;
        } else if current_units + space_units + word_units > max_units {
            lines.push(std::mem::replace(&mut current, word.to_string()));
            current_units = word_units;
        } else {
            current.push(' ');
            current.push_str(word);
            current_units += space_units + word_units;
        }
    }

    lines.push(current);
    lines
}

/// Splits one word into chunks that each fit `max_units` (at least one char per chunk).
fn break_word(word: &str, metrics: &FontMetricTable, max_units: u32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut piece_units = 0u32;

    for c in word.chars() {
        let mut buf = [0u8; 4];
        let char_units = metrics.measure_units(c.encode_utf8(&mut buf));
        if !piece.is_empty() && piece_units + char_units > max_units {
            pieces.push(std::mem::take(&mut piece));
            piece_units = 0;
        }
        piece.push(c);
        piece_units += char_units;
    }

    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::{get_metrics, BuiltinFont};

    const SIZE: f32 = 12.0;
    const WIDTH: f32 = 532.9;

    fn wrap(text: &str) -> Vec<String> {
        wrap_text(text, get_metrics(BuiltinFont::Helvetica), SIZE, WIDTH)
    }

    #[test]
    fn test_empty_text_is_one_blank_line() {
        assert_eq!(wrap(""), vec![String::new()]);
    }

    #[test]
    fn test_short_text_is_one_line() {
        assert_eq!(wrap("Phase 1: Schema design"), vec!["Phase 1: Schema design"]);
    }

    #[test]
    fn test_hard_breaks_and_blank_lines_are_preserved() {
        let lines = wrap("Title: X\n\nRelevant Experience\r\nBody");
        assert_eq!(lines, vec!["Title: X", "", "Relevant Experience", "Body"]);
    }

    #[test]
    fn test_long_paragraph_wraps_without_losing_words() {
        let paragraph = "I will design the service around a clear domain model, \
            expose it through a versioned REST interface, and back it with \
            PostgreSQL migrations that run in CI before every deployment so the \
            schema never drifts from the code that depends on it.";
        let lines = wrap(paragraph);
        assert!(lines.len() >= 2, "expected wrapping, got {lines:?}");
        assert_eq!(lines.join(" "), paragraph);

        let metrics = get_metrics(BuiltinFont::Helvetica);
        for line in &lines {
            assert!(metrics.measure_str(line, SIZE) <= WIDTH, "line too wide: {line}");
        }
    }

    #[test]
    fn test_overlong_word_is_split_not_dropped() {
        let url = format!("https://example.com/{}", "portfolio".repeat(20));
        let lines = wrap(&format!("See {url} today"));
        assert!(lines.len() >= 3);
        assert_eq!(lines.concat().replace(' ', ""), format!("See{url}today"));

        let metrics = get_metrics(BuiltinFont::Helvetica);
        for line in &lines {
            assert!(metrics.measure_str(line, SIZE) <= WIDTH);
        }
    }

    #[test]
    fn test_wide_punctuation_runs_stay_inside_the_line() {
        let metrics = get_metrics(BuiltinFont::Helvetica);
        for text in [
            "—".repeat(120),
            "…".repeat(120),
            format!("Scope {} done", "— phase —".repeat(30)),
        ] {
            let lines = wrap(&text);
            for line in &lines {
                assert!(
                    metrics.measure_str(line, SIZE) <= WIDTH,
                    "line too wide ({}pt): {line}",
                    metrics.measure_str(line, SIZE)
                );
            }
            assert_eq!(lines.concat().replace(' ', ""), text.replace(' ', ""));
        }

        // 532.9pt at 12pt is 44408 units: 44 em-dashes per line.
        let dashes = wrap(&"—".repeat(120));
        assert_eq!(dashes[0].chars().count(), 44);
        assert_eq!(dashes.len(), 3);
    }

    #[test]
    fn test_wrapping_is_deterministic() {
        let text = "alpha beta gamma delta ".repeat(40);
        assert_eq!(wrap(&text), wrap(&text));
    }
}
