//! Text clean-up applied before anything is laid out.
//!
//! The base fonts can only show the WinAnsi character set, so emoji and typographic
//! symbols are replaced with plain equivalents (or dropped) up front rather than
//! showing up as garbage glyphs in the finished document.

use regex::Regex;
use std::sync::OnceLock;

/// Literal substitutions, applied in order
const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("\u{2705}", "[OK]"),
    ("\u{1F35E}", "[Bread]"),
    ("\u{2248}", "~"),
    ("\u{2022}", "- "),
    ("\u{2013}", "-"),
    ("\u{2014}", "-"),
    ("\u{2018}", "'"),
    ("\u{2019}", "'"),
    ("\u{201C}", "\""),
    ("\u{201D}", "\""),
];

fn unusual_spaces() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[\u{00A0}\u{2000}-\u{200B}\u{202F}\u{205F}\u{3000}]")
            .expect("space pattern is valid")
    })
}

fn symbols() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // pictographs, emoticons, transport, misc symbols, dingbats, plus the joiners
        // and variation selectors that glue emoji sequences together
        Regex::new(
            r"[\u{1F300}-\u{1FAFF}\u{1F600}-\u{1F64F}\u{1F680}-\u{1F6FF}\u{2600}-\u{26FF}\u{2700}-\u{27BF}\u{200D}\u{FE0E}\u{FE0F}]",
        )
        .expect("symbol pattern is valid")
    })
}

fn repeated_spaces() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r" {2,}").expect("repeated space pattern is valid"))
}

fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

fn pipe_separator() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*\|\s*").expect("pipe pattern is valid"))
}

/// Replace emoji and glyphs the base fonts cannot draw with ASCII-safe text, and
/// normalize bullets, dashes, quotes and spacing.
///
/// ```
/// use dietplan_gen::sanitize::sanitize_text;
///
/// assert_eq!(sanitize_text("\u{2022} 2 eggs \u{2705}"), "- 2 eggs [OK]");
/// ```
pub fn sanitize_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut t = text.to_string();
    for (from, to) in SUBSTITUTIONS {
        if t.contains(from) {
            t = t.replace(from, to);
        }
    }

    let t = unusual_spaces().replace_all(&t, " ");
    let t = symbols().replace_all(&t, "");
    let t = t.replace('\t', " ");
    repeated_spaces().replace_all(&t, " ").into_owned()
}

/// Sanitize a table cell and put every `|`-separated metric on its own line, so that
/// dense entries such as `Oats 50g | 190 kcal | P 7g` stay inside their column.
pub fn format_cell_text(text: &str) -> String {
    let sanitized = sanitize_text(text);
    pipe_separator()
        .replace_all(&sanitized, " |\n")
        .into_owned()
}

/// Sanitize text that is drawn on a single line, such as the footer credit. Line breaks
/// and other whitespace runs collapse to one space and the ends are trimmed.
pub fn single_line(text: &str) -> String {
    whitespace_runs()
        .replace_all(&sanitize_text(text), " ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bullets_become_hyphen_space() {
        assert_eq!(sanitize_text("\u{2022}Oats"), "- Oats");
    }

    #[test]
    fn known_symbols_are_substituted() {
        assert_eq!(sanitize_text("Done \u{2705}"), "Done [OK]");
        assert_eq!(sanitize_text("\u{1F35E} toast"), "[Bread] toast");
        assert_eq!(sanitize_text("\u{2248}200 kcal"), "~200 kcal");
        assert_eq!(sanitize_text("5\u{2013}6 meals \u{2014} daily"), "5-6 meals - daily");
        assert_eq!(
            sanitize_text("\u{201C}Don\u{2019}t skip\u{201D}"),
            "\"Don't skip\""
        );
    }

    #[test]
    fn unusual_spaces_are_normalized_and_collapsed() {
        assert_eq!(sanitize_text("a\u{00A0}b\u{2009}c\u{3000}d"), "a b c d");
        assert_eq!(sanitize_text("a\t\tb    c"), "a b c");
    }

    #[test]
    fn emoji_are_removed() {
        assert_eq!(sanitize_text("Drink water \u{1F4A7}"), "Drink water ");
        assert_eq!(sanitize_text("Sleep \u{1F634} well"), "Sleep well");
        assert_eq!(sanitize_text("Run \u{2764}\u{FE0F}"), "Run ");
    }

    #[test]
    fn plain_text_is_untouched() {
        let text = "Chicken breast 150g, rice 100g\nSalad";
        assert_eq!(sanitize_text(text), text);
        assert_eq!(sanitize_text(""), "");
    }

    #[test]
    fn sanitizing_is_deterministic_and_idempotent() {
        let text = "\u{2022} Eggs \u{2014} 3 \u{1F373}";
        let once = sanitize_text(text);
        assert_eq!(once, sanitize_text(text));
        assert_eq!(sanitize_text(&once), once);
    }

    #[test]
    fn pipes_split_cells_into_lines() {
        assert_eq!(
            format_cell_text("Oats 50g|190 kcal  |  P 7g"),
            "Oats 50g |\n190 kcal |\nP 7g"
        );
        assert_eq!(format_cell_text("Banana"), "Banana");
    }

    #[test]
    fn single_line_text_has_no_breaks() {
        assert_eq!(single_line("Coach\nSam"), "Coach Sam");
        assert_eq!(single_line("  Asha\r\n\t Rao \u{1F4AA} "), "Asha Rao");
        assert_eq!(single_line(""), "");
    }
}
