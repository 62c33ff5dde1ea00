// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Greedy word wrapping against a measured width.

/// Anything that can report how wide a string renders at a given size.
///
/// Implemented by [`crate::font::LoadedFont`] and by any
/// `Fn(&str, f32) -> f32`, which keeps the wrapper independent of how fonts
/// are embedded.
pub trait TextMeasure {
    /// Rendered width of `text` at `font_size`, in the same unit as the page.
    fn text_width(&self, text: &str, font_size: f32) -> f32;
}

impl<F> TextMeasure for F
where
    F: Fn(&str, f32) -> f32,
{
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        self(text, font_size)
    }
}

/// Wrap `text` into lines no wider than `max_width`.
///
/// Words are split on whitespace and re-joined with single spaces. A word is
/// moved to a new line only when appending it would exceed `max_width` and the
/// current line already holds something, so a single word wider than
/// `max_width` is kept whole on its own line and allowed to overflow.
pub fn wrap_text<M>(text: &str, max_width: f32, measure: &M, font_size: f32) -> Vec<String>
where
    M: TextMeasure + ?Sized,
{
    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        let candidate = if current_line.is_empty() {
            word.to_string()
        } else {
            format!("{current_line} {word}")
        };

        if measure.text_width(&candidate, font_size) > max_width && !current_line.is_empty() {
            lines.push(std::mem::take(&mut current_line));
            current_line.push_str(word);
        } else {
            current_line = candidate;
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every word is `unit` wide; spaces are free.
    fn per_word(unit: f32) -> impl Fn(&str, f32) -> f32 {
        move |text: &str, _size: f32| text.split_whitespace().count() as f32 * unit
    }

    #[test]
    fn two_words_per_line() {
        let lines = wrap_text("aa bb cc dd", 20.0, &per_word(10.0), 11.0);
        assert_eq!(lines, vec!["aa bb", "cc dd"]);
    }

    #[test]
    fn odd_word_count_leaves_short_last_line() {
        let lines = wrap_text("aa bb cc dd ee", 20.0, &per_word(10.0), 11.0);
        assert_eq!(lines, vec!["aa bb", "cc dd", "ee"]);
    }

    #[test]
    fn oversized_word_is_never_split() {
        let word = "Supercalifragilisticexpialidocious";
        let by_chars = |text: &str, size: f32| text.chars().count() as f32 * size * 0.5;
        let lines = wrap_text(word, 5.0, &by_chars, 12.0);
        assert_eq!(lines, vec![word.to_string()]);
    }

    #[test]
    fn oversized_word_gets_its_own_line() {
        let by_chars = |text: &str, _size: f32| text.chars().count() as f32;
        let lines = wrap_text("ab averyveryverylongword cd", 6.0, &by_chars, 10.0);
        assert_eq!(lines, vec!["ab", "averyveryverylongword", "cd"]);
    }

    #[test]
    fn exact_fit_stays_on_one_line() {
        let by_chars = |text: &str, _size: f32| text.chars().count() as f32;
        let lines = wrap_text("abc def", 7.0, &by_chars, 10.0);
        assert_eq!(lines, vec!["abc def"]);
    }

    #[test]
    fn whitespace_is_normalised() {
        let lines = wrap_text("  Leonardo   DiCaprio,\tTom\nHardy ", 1000.0, &per_word(1.0), 11.0);
        assert_eq!(lines, vec!["Leonardo DiCaprio, Tom Hardy"]);
    }

    #[test]
    fn empty_input_produces_no_lines() {
        assert!(wrap_text("", 100.0, &per_word(1.0), 11.0).is_empty());
        assert!(wrap_text("   \n ", 100.0, &per_word(1.0), 11.0).is_empty());
    }

    #[test]
    fn measure_receives_font_size() {
        let size_sensitive = |text: &str, size: f32| text.chars().count() as f32 * size;
        let small = wrap_text("aa bb cc", 50.0, &size_sensitive, 5.0);
        let large = wrap_text("aa bb cc", 50.0, &size_sensitive, 10.0);
        assert_eq!(small.len(), 1);
        assert_eq!(large.len(), 2);
    }
}
