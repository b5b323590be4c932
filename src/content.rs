//! Converts high-level page contents into PDF content stream operators.

use crate::colour::Colour;
use crate::font::encode_win_ansi;
use crate::page::{PageContents, RuleLayout, SpanFont, SpanLayout};
use std::io::Write;

/// Renders page contents to a PDF content stream. Fonts are referenced as `/F{index}` and
/// images as `/I{index}`, matching the resource names written for each page.
#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(contents: &[PageContents]) -> Result<Vec<u8>, std::io::Error> {
    if contents.is_empty() {
        return Ok(Vec::default());
    }

    let mut content: Vec<u8> = Vec::default();

    for page_content in contents.iter() {
        match page_content {
            PageContents::Text(spans) => {
                render_text_spans(&mut content, spans)?;
            }
            PageContents::Image(image) => {
                write!(&mut content, "q\n")?;
                write!(
                    &mut content,
                    "{} 0 0 {} {} {} cm\n",
                    *image.position.width(),
                    *image.position.height(),
                    *image.position.x1,
                    *image.position.y1
                )?;
                write!(&mut content, "/I{} Do\n", image.image_id.index())?;
                write!(&mut content, "Q\n")?;
            }
            PageContents::Fill(rect, colour) => {
                write!(&mut content, "q\n")?;
                write_fill_colour(&mut content, *colour)?;
                write!(
                    &mut content,
                    "{} {} {} {} re f\n",
                    *rect.x1,
                    *rect.y1,
                    *rect.width(),
                    *rect.height()
                )?;
                write!(&mut content, "Q\n")?;
            }
            PageContents::Rule(rule) => {
                render_rule(&mut content, rule)?;
            }
        }
    }

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn render_text_spans(content: &mut Vec<u8>, spans: &[SpanLayout]) -> Result<(), std::io::Error> {
    let Some(first) = spans.first() else {
        return Ok(());
    };

    write!(content, "q\n")?;

    let mut current_font: SpanFont = first.font;
    let mut current_colour: Colour = first.colour;

    write!(
        content,
        "/F{} {} Tf\n",
        current_font.id.index(),
        *current_font.size
    )?;
    write_fill_colour(content, current_colour)?;

    for span in spans.iter() {
        if span.font != current_font {
            current_font = span.font;
            write!(
                content,
                "/F{} {} Tf\n",
                current_font.id.index(),
                *current_font.size
            )?;
        }
        if span.colour != current_colour {
            current_colour = span.colour;
            write_fill_colour(content, current_colour)?;
        }

        write!(content, "BT\n")?;
        write!(content, "{} {} Td\n", *span.coords.0, *span.coords.1)?;
        write!(content, "<")?;
        for ch in span.text.chars() {
            write!(content, "{:02x}", encode_win_ansi(ch))?;
        }
        write!(content, "> Tj\n")?;
        write!(content, "ET\n")?;
    }

    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn render_rule(content: &mut Vec<u8>, rule: &RuleLayout) -> Result<(), std::io::Error> {
    write!(content, "q\n")?;
    write_stroke_colour(content, rule.colour)?;
    write!(content, "{} w\n", *rule.width)?;
    write!(content, "{} {} m\n", *rule.from.0, *rule.from.1)?;
    write!(content, "{} {} l\n", *rule.to.0, *rule.to.1)?;
    write!(content, "S\n")?;
    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn write_fill_colour(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    match colour {
        Colour::RGB { r, g, b } => write!(content, "{r} {g} {b} rg\n"),
        Colour::Grey { g } => write!(content, "{g} g\n"),
    }
}

#[allow(clippy::write_with_newline)]
fn write_stroke_colour(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    match colour {
        Colour::RGB { r, g, b } => write!(content, "{r} {g} {b} RG\n"),
        Colour::Grey { g } => write!(content, "{g} G\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{colours, Document, Font, BaseFont, Pt, Rect};

    #[test]
    fn text_is_hex_encoded_win_ansi() {
        let mut doc = Document::default();
        let font = doc.add_font(Font::new(BaseFont::Helvetica));
        let contents = vec![PageContents::Text(vec![SpanLayout {
            text: "Hi é".into(),
            font: SpanFont {
                id: font,
                size: Pt(10.0),
            },
            colour: colours::WHITE,
            coords: (Pt(1.0), Pt(2.0)),
        }])];
        let rendered = String::from_utf8(render_contents(&contents).unwrap()).unwrap();
        assert!(rendered.contains("/F0 10 Tf\n"));
        assert!(rendered.contains("1 g\n"));
        assert!(rendered.contains("1 2 Td\n<486920e9> Tj\n"));
    }

    #[test]
    fn fills_and_rules() {
        let contents = vec![
            PageContents::Fill(
                Rect::from_origin_size(Pt(0.0), Pt(10.0), Pt(100.0), Pt(50.0)),
                colours::BLACK,
            ),
            PageContents::Rule(RuleLayout {
                from: (Pt(0.0), Pt(5.0)),
                to: (Pt(20.0), Pt(5.0)),
                width: Pt(0.5),
                colour: colours::BLACK,
            }),
        ];
        let rendered = String::from_utf8(render_contents(&contents).unwrap()).unwrap();
        assert!(rendered.contains("0 g\n0 10 100 50 re f\n"));
        assert!(rendered.contains("0 G\n0.5 w\n0 5 m\n20 5 l\nS\n"));
    }
}
