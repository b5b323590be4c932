//! Two-column label/value tables that flow across pages.
//!
//! Each row is measured up front: both cells are wrapped to their column width and the
//! row is as tall as its taller cell plus padding. A row that does not fit in the space
//! left on the page moves to a fresh page. A row too tall for even a fresh page is split
//! between lines, continuing at the top margin of the next page.

use crate::canvas::{Canvas, FontStyle, TextStyle, CONTENT_BOTTOM, CONTENT_LEFT, CONTENT_TOP};
use crate::font::LINE_HEIGHT_FACTOR;
use crate::units::{Mm, Pt};
use tracing::debug;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TableStyle {
    pub font_size: Pt,
    /// Space between a cell's border and its text, on all sides
    pub padding: Mm,
    pub label_width: Mm,
    pub left: Mm,
    pub width: Mm,
    pub border_width: Mm,
    /// Where rows resume after a page break
    pub top_margin: Mm,
    pub bottom_margin: Mm,
}

impl TableStyle {
    /// The style used for the client and macro tables
    pub fn standard(page_width: Mm) -> TableStyle {
        TableStyle {
            font_size: Pt(10.0),
            padding: Mm(4.0),
            label_width: Mm(50.0),
            left: CONTENT_LEFT,
            width: page_width - CONTENT_LEFT * 2.0,
            border_width: Mm(0.1),
            top_margin: CONTENT_TOP,
            bottom_margin: CONTENT_BOTTOM,
        }
    }

    /// Smaller type and roomier cells for the meal schedule
    pub fn meals(page_width: Mm) -> TableStyle {
        TableStyle {
            font_size: Pt(9.0),
            padding: Mm(5.0),
            ..TableStyle::standard(page_width)
        }
    }

    pub fn value_width(&self) -> Mm {
        self.width - self.label_width
    }

    pub fn line_height(&self) -> Mm {
        (self.font_size * LINE_HEIGHT_FACTOR).into()
    }

    fn text_width(&self, column: Mm) -> Mm {
        (column - self.padding * 2.0).max(Mm(1.0))
    }

    fn row_height(&self, lines: usize) -> Mm {
        self.line_height() * lines as f32 + self.padding * 2.0
    }
}

struct Row {
    label: Vec<String>,
    value: Vec<String>,
}

impl Row {
    fn lines(&self) -> usize {
        self.label.len().max(self.value.len()).max(1)
    }

    fn segment(lines: &[String], from: usize, to: usize) -> &[String] {
        let len = lines.len();
        &lines[from.min(len)..to.min(len)]
    }
}

/// Draw a table with its top edge at `y` and return the y-coordinate of its bottom edge,
/// which may be on a later page than the one it started on.
pub fn draw_table<L: AsRef<str>, V: AsRef<str>>(
    canvas: &mut Canvas,
    rows: &[(L, V)],
    style: &TableStyle,
    y: Mm,
) -> Mm {
    let rows: Vec<Row> = rows
        .iter()
        .map(|(label, value)| Row {
            label: canvas.split_text(
                label.as_ref(),
                FontStyle::Bold,
                style.font_size,
                style.text_width(style.label_width),
            ),
            value: canvas.split_text(
                value.as_ref(),
                FontStyle::Regular,
                style.font_size,
                style.text_width(style.value_width()),
            ),
        })
        .collect();

    let bottom = canvas.page_height() - style.bottom_margin;
    let fresh_page_space = bottom - style.top_margin;
    let line_height = style.line_height();

    let mut y = y;
    let mut at_page_top = false;
    for row in rows.iter() {
        let lines = row.lines();
        let mut drawn = 0;
        while drawn < lines {
            let remaining = lines - drawn;
            let available = bottom - y;

            let fit = if style.row_height(remaining) <= available {
                remaining
            } else if !at_page_top && style.row_height(remaining) <= fresh_page_space {
                0
            } else {
                let fit = (available - style.padding * 2.0).0 / line_height.0;
                let fit = if fit > 0.0 { fit.floor() as usize } else { 0 };
                match fit.min(remaining) {
                    0 if at_page_top => 1,
                    fit => fit,
                }
            };

            if fit == 0 {
                canvas.add_page();
                debug!(page = canvas.current_page() + 1, "table continues on new page");
                y = style.top_margin;
                at_page_top = true;
                continue;
            }

            y = draw_segment(canvas, style, row, drawn, drawn + fit, y);
            drawn += fit;
            at_page_top = false;
        }
    }
    y
}

/// Draw lines `from..to` of a row as one pair of bordered cells, returning their bottom edge
fn draw_segment(canvas: &mut Canvas, style: &TableStyle, row: &Row, from: usize, to: usize, y: Mm) -> Mm {
    canvas.paint_decorations_if_needed();

    let settings = canvas.settings();
    let (accent, text_colour) = (settings.accent, settings.text_colour);
    let height = style.row_height(to - from);
    let line_height = style.line_height();
    let ascent: Mm = canvas
        .font(FontStyle::Regular)
        .ascent(style.font_size)
        .into();

    let (left, divider, right) = (
        style.left,
        style.left + style.label_width,
        style.left + style.width,
    );
    let bottom = y + height;
    for x in [left, divider, right] {
        canvas.line((x, y), (x, bottom), style.border_width, accent);
    }
    for edge in [y, bottom] {
        canvas.line((left, edge), (right, edge), style.border_width, accent);
    }

    let label_style = TextStyle::new(FontStyle::Bold, style.font_size, accent);
    let value_style = TextStyle::new(FontStyle::Regular, style.font_size, text_colour);
    let cells = [
        (left, Row::segment(&row.label, from, to), label_style),
        (divider, Row::segment(&row.value, from, to), value_style),
    ];
    for (x, lines, text_style) in cells {
        let mut baseline = y + style.padding + ascent;
        for line in lines {
            canvas.text(line, x + style.padding, baseline, text_style);
            baseline += line_height;
        }
    }

    bottom
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::BrandAssets;
    use crate::config::RenderSettings;
    use crate::image::Image;
    use crate::page::PageContents;
    use image::DynamicImage;

    fn assets() -> BrandAssets {
        BrandAssets::new(
            Image::new_svg(br#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="1"><rect width="4" height="1"/></svg>"#)
                .unwrap(),
            Image::new_raster(DynamicImage::new_rgb8(4, 4)),
        )
    }

    #[test]
    fn short_table_stays_on_one_page() {
        let settings = RenderSettings::default();
        let mut canvas = Canvas::new(&settings, assets());
        let style = TableStyle::standard(canvas.page_width());
        let rows = [("Name", "Asha Rao"), ("Age", "29")];

        let end = draw_table(&mut canvas, &rows, &style, Mm(60.0));
        assert_eq!(canvas.page_count(), 1);

        let expected = Mm(60.0) + style.row_height(1) * 2.0;
        assert!((end.0 - expected.0).abs() < 1e-3);
    }

    #[test]
    fn row_that_does_not_fit_moves_to_next_page() {
        let settings = RenderSettings::default();
        let mut canvas = Canvas::new(&settings, assets());
        let style = TableStyle::standard(canvas.page_width());
        let start = canvas.page_height() - style.bottom_margin - Mm(5.0);

        let end = draw_table(&mut canvas, &[("Goal", "Fat loss")], &style, start);
        assert_eq!(canvas.page_count(), 2);
        assert_eq!(canvas.current_page(), 1);
        let expected = CONTENT_TOP + style.row_height(1);
        assert!((end.0 - expected.0).abs() < 1e-3);
    }

    #[test]
    fn very_tall_row_is_split_across_pages() {
        let settings = RenderSettings::default();
        let mut canvas = Canvas::new(&settings, assets());
        let style = TableStyle::meals(canvas.page_width());
        let value = (0..120).map(|i| format!("item {i}")).collect::<Vec<_>>().join("\n");

        draw_table(&mut canvas, &[("Lunch", value)], &style, Mm(60.0));
        assert!(canvas.page_count() >= 2);

        let doc = canvas.finish();
        let items: usize = doc
            .iter_pages()
            .flat_map(|page| page.spans())
            .filter(|span| span.text.starts_with("item "))
            .count();
        assert_eq!(items, 120);

        // every page carries exactly one background fill
        for page in doc.iter_pages() {
            let fills = page
                .contents
                .iter()
                .filter(|c| {
                    matches!(c, PageContents::Fill(r, _) if (r.height().0 - page.height().0).abs() < 0.01)
                })
                .count();
            assert_eq!(fills, 1);
        }
    }

    #[test]
    fn repainting_decorations_mid_table_is_a_no_op() {
        let settings = RenderSettings::default();
        let mut canvas = Canvas::new(&settings, assets());
        let style = TableStyle::meals(canvas.page_width());
        let value = (0..120).map(|i| format!("item {i}")).collect::<Vec<_>>().join("\n");

        let end = draw_table(&mut canvas, &[("Lunch", value.as_str())], &style, Mm(60.0));
        assert!(canvas.current_page() >= 1);
        let before = canvas.page_count();

        canvas.paint_decorations_if_needed();
        draw_table(&mut canvas, &[("Dinner", "Rice and dal")], &style, end);
        canvas.paint_decorations_if_needed();
        assert_eq!(canvas.page_count(), before);

        let (logo, background) = (canvas.logo_image(), canvas.background_image());
        let doc = canvas.finish();
        let page_height = doc.page_at(0).unwrap().height();
        let header: Pt = crate::canvas::HEADER_HEIGHT.into();
        for (index, page) in doc.iter_pages().enumerate() {
            let count = |height: Pt| {
                page.contents
                    .iter()
                    .filter(|c| matches!(c, PageContents::Fill(r, _) if (r.height().0 - height.0).abs() < 0.01))
                    .count()
            };
            assert_eq!(count(page_height), 1);
            assert_eq!(count(header), 1);
            let images = |id: id_arena::Id<Image>| {
                page.contents
                    .iter()
                    .filter(|c| matches!(c, PageContents::Image(l) if l.image_id == id))
                    .count()
            };
            assert_eq!(images(background), 1);
            assert_eq!(images(logo), usize::from(index == 0));
        }
    }
}
