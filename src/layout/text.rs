use crate::font::Font;
use crate::units::Pt;

const TABSIZE: usize = 4;

/// Horizontal placement of a line of text relative to its anchor x-coordinate
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Centre,
}

/// Calculate the width of a given string of text given the font and font size
pub fn width_of_text(text: &str, font: &Font, size: Pt) -> Pt {
    font.width_of(text, size)
}

/// The x-coordinate a line must start at so that it is aligned to `anchor`
pub fn aligned_x(text: &str, font: &Font, size: Pt, anchor: Pt, align: Align) -> Pt {
    match align {
        Align::Left => anchor,
        Align::Centre => anchor - width_of_text(text, font, size) / 2.0,
    }
}

/// Splits text into lines no wider than `max_width`.
///
/// Explicit newlines always start a new line (an empty input line stays an empty
/// output line). Within a line, text is broken at whitespace; runs of whitespace
/// between words collapse into one space. A word that is wider than `max_width`
/// on its own is broken between characters, and always keeps at least one
/// character per line so that layout makes progress.
pub fn split_text_to_size(text: &str, font: &Font, size: Pt, max_width: Pt) -> Vec<String> {
    // normalize newlines and tabs
    let text = text
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\t', &" ".repeat(TABSIZE));

    text.split('\n')
        .flat_map(|paragraph| wrap_paragraph(paragraph, font, size, max_width))
        .collect()
}

fn wrap_paragraph(paragraph: &str, font: &Font, size: Pt, max_width: Pt) -> Vec<String> {
    let space = font.width_of(" ", size);

    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    let mut line_width = Pt(0.0);

    for word in paragraph.split_whitespace() {
        let word_width = font.width_of(word, size);

        if !line.is_empty() {
            if line_width + space + word_width <= max_width {
                line.push(' ');
                line.push_str(word);
                line_width += space + word_width;
                continue;
            }
            lines.push(std::mem::take(&mut line));
            line_width = Pt(0.0);
        }

        if word_width <= max_width {
            line.push_str(word);
            line_width = word_width;
        } else {
            // no break point inside the word, fall back to character breaks
            for ch in word.chars() {
                let ch_width = size * (font.char_width(ch) as f32 / 1000.0);
                if !line.is_empty() && line_width + ch_width > max_width {
                    lines.push(std::mem::take(&mut line));
                    line_width = Pt(0.0);
                }
                line.push(ch);
                line_width += ch_width;
            }
        }
    }

    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BaseFont;

    fn helvetica() -> Font {
        Font::new(BaseFont::Helvetica)
    }

    #[test]
    fn short_text_stays_on_one_line() {
        let lines = split_text_to_size("2 eggs", &helvetica(), Pt(10.0), Pt(500.0));
        assert_eq!(lines, vec!["2 eggs"]);
    }

    #[test]
    fn wraps_at_word_boundaries() {
        let font = helvetica();
        let text = "one two three four five six seven eight nine ten";
        let max = Pt(60.0);
        let lines = split_text_to_size(text, &font, Pt(10.0), max);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(width_of_text(line, &font, Pt(10.0)) <= max, "{line:?} overflows");
            assert!(!line.starts_with(' ') && !line.ends_with(' '));
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn keeps_blank_lines() {
        let lines = split_text_to_size("a\n\nb", &helvetica(), Pt(10.0), Pt(100.0));
        assert_eq!(lines, vec!["a", "", "b"]);
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        let lines = split_text_to_size("", &helvetica(), Pt(10.0), Pt(100.0));
        assert_eq!(lines, vec![""]);
    }

    #[test]
    fn breaks_long_words_between_characters() {
        let font = helvetica();
        let word = "x".repeat(40);
        let lines = split_text_to_size(&word, &font, Pt(10.0), Pt(50.0));
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(width_of_text(line, &font, Pt(10.0)) <= Pt(50.0));
        }
    }

    #[test]
    fn narrow_boxes_still_make_progress() {
        let lines = split_text_to_size("WW", &helvetica(), Pt(10.0), Pt(1.0));
        assert_eq!(lines, vec!["W", "W"]);
    }

    #[test]
    fn centre_alignment_offsets_by_half_width() {
        let font = helvetica();
        let width = width_of_text("Plan", &font, Pt(12.0));
        let x = aligned_x("Plan", &font, Pt(12.0), Pt(100.0), Align::Centre);
        assert!((x.0 - (100.0 - width.0 / 2.0)).abs() < 1e-4);
    }
}
