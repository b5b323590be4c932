use crate::{
    refs::{ObjectReferences, RefType},
    Pt,
};
use id_arena::Id;
use pdf_writer::{Name, Pdf};

/// The standard PDF base fonts the renderer draws with. Nothing is embedded, and only
/// the WinAnsi character set can be shown.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BaseFont {
    Helvetica,
    HelveticaBold,
}

/// Helvetica advance widths for the printable ASCII range (32..=126), in 1/1000 em
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, //
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, //
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, //
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, //
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, //
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold advance widths for the printable ASCII range (32..=126), in 1/1000 em
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, //
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, //
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, //
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, //
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, //
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width used for WinAnsi characters outside the ASCII table
const FALLBACK_WIDTH: u16 = 556;

const ASCENDER: i16 = 718;

/// Ratio of line spacing to font size
pub const LINE_HEIGHT_FACTOR: f32 = 1.15;

/// A font registered with a [Document](crate::Document). Fonts are referred to
/// throughout the renderer by their arena [Id].
#[derive(Debug, Clone)]
pub struct Font {
    pub base: BaseFont,
}

impl Font {
    pub fn new(base: BaseFont) -> Font {
        Font { base }
    }

    /// The PostScript name of the font
    pub fn name(&self) -> &'static str {
        match self.base {
            BaseFont::Helvetica => "Helvetica",
            BaseFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given font size
    pub fn ascent(&self, size: Pt) -> Pt {
        size * (ASCENDER as f32 / 1000.0)
    }

    /// Advance width of a single character, in 1/1000 em
    pub fn char_width(&self, ch: char) -> u16 {
        let table = match self.base {
            BaseFont::Helvetica => &HELVETICA_WIDTHS,
            BaseFont::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        };
        match encode_win_ansi(ch) {
            b @ 32..=126 => table[(b - 32) as usize],
            0xA0 => table[0],
            _ => FALLBACK_WIDTH,
        }
    }

    /// Width of a run of text at the given size. Newlines are ignored.
    pub fn width_of(&self, text: &str, size: Pt) -> Pt {
        let units: u32 = text
            .chars()
            .filter(|&ch| ch != '\n')
            .map(|ch| self.char_width(ch) as u32)
            .sum();
        size * (units as f32 / 1000.0)
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, id: Id<Font>, writer: &mut Pdf) {
        let font_id = refs.gen(RefType::Font(id.index()));
        writer
            .type1_font(font_id)
            .base_font(Name(self.name().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }
}

/// Map a character into the WinAnsi (Windows-1252) code page used by the base fonts.
/// Characters with no WinAnsi code point become `?`.
pub fn encode_win_ansi(ch: char) -> u8 {
    match ch {
        '\u{20}'..='\u{7E}' | '\u{A0}'..='\u{FF}' => ch as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => b'?',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_ascii_text() {
        let font = Font::new(BaseFont::Helvetica);
        // "Hi" = 722 + 222
        assert!((font.width_of("Hi", Pt(10.0)).0 - 9.44).abs() < 1e-4);
        let bold = Font::new(BaseFont::HelveticaBold);
        // "Hi" = 722 + 278
        assert_eq!(bold.width_of("Hi", Pt(10.0)), Pt(10.0));
    }

    #[test]
    fn unmappable_characters_encode_as_question_mark() {
        assert_eq!(encode_win_ansi('A'), b'A');
        assert_eq!(encode_win_ansi('é'), 0xE9);
        assert_eq!(encode_win_ansi('€'), 0x80);
        assert_eq!(encode_win_ansi('🍎'), b'?');
        assert_eq!(encode_win_ansi('\n'), b'?');
    }

    #[test]
    fn newlines_have_no_width() {
        let font = Font::new(BaseFont::Helvetica);
        assert_eq!(font.width_of("a\nb", Pt(12.0)), font.width_of("ab", Pt(12.0)));
    }
}
