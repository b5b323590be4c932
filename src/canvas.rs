//! A page-at-a-time drawing surface for the diet plan.
//!
//! The canvas wraps a [Document] and addresses it the way the plan layout is
//! described: millimetres measured from the top-left corner of the page, with text
//! positioned by its baseline. It owns pagination: every page is created through
//! [Canvas::add_page], which paints the page background and header bar before any
//! other content, and remembers which pages it has decorated so that nothing is ever
//! painted twice, no matter how many times layout code asks for it.

use crate::assets::BrandAssets;
use crate::colour::Colour;
use crate::config::RenderSettings;
use crate::document::Document;
use crate::font::{BaseFont, Font};
use crate::image::Image;
use crate::layout::{aligned_x, split_text_to_size, Align, Margins};
use crate::page::{ImageLayout, Page, RuleLayout, SpanFont, SpanLayout};
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::units::{Mm, Pt};
use id_arena::Id;
use std::collections::BTreeSet;
use tracing::debug;

/// Height of the solid bar across the top of every page
pub const HEADER_HEIGHT: Mm = Mm(45.0);
/// Left edge shared by headings, tables and paragraphs; also the right inset
pub const CONTENT_LEFT: Mm = Mm(15.0);
/// Top of the content area below the header
pub const CONTENT_TOP: Mm = Mm(55.0);
/// Space kept clear above the bottom edge for the footer
pub const CONTENT_BOTTOM: Mm = Mm(25.0);
const LOGO_HEIGHT: Mm = Mm(16.0);
const LOGO_TOP: Mm = Mm(14.0);
const SUBTITLE_BASELINE: Mm = Mm(36.0);
const SUBTITLE_SIZE: Pt = Pt(12.0);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
}

/// How a run of text is drawn
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextStyle {
    pub font: FontStyle,
    pub size: Pt,
    pub colour: Colour,
    pub align: Align,
}

impl TextStyle {
    pub fn new(font: FontStyle, size: Pt, colour: Colour) -> TextStyle {
        TextStyle {
            font,
            size,
            colour,
            align: Align::Left,
        }
    }

    pub fn centred(mut self) -> TextStyle {
        self.align = Align::Centre;
        self
    }
}

/// Size and offset of an image scaled to cover a box while keeping its aspect ratio.
/// Returns `(x, y, width, height)` relative to the box's top-left corner; the image
/// is centred, so `x`/`y` are negative along the axis that overflows.
pub fn cover_fit(image_aspect: f32, width: Mm, height: Mm) -> (Mm, Mm, Mm, Mm) {
    let box_aspect = *width / *height;
    let (w, h) = if image_aspect >= box_aspect {
        (height * image_aspect, height)
    } else {
        (width, width / image_aspect)
    };
    ((width - w) / 2.0, (height - h) / 2.0, w, h)
}

pub struct Canvas<'s> {
    doc: Document,
    settings: &'s RenderSettings,
    page_size: PageSize,
    regular: Id<Font>,
    bold: Id<Font>,
    logo: Id<Image>,
    logo_aspect: f32,
    background: Id<Image>,
    background_aspect: f32,
    current: usize,
    background_painted: BTreeSet<usize>,
    header_painted: BTreeSet<usize>,
}

impl<'s> Canvas<'s> {
    /// Start a document with its first page already decorated
    pub fn new(settings: &'s RenderSettings, assets: BrandAssets) -> Canvas<'s> {
        let mut doc = Document::default();
        let regular = doc.add_font(Font::new(BaseFont::Helvetica));
        let bold = doc.add_font(Font::new(BaseFont::HelveticaBold));

        let BrandAssets { logo, background } = assets;
        let logo_aspect = logo.aspect_ratio();
        let background_aspect = background.aspect_ratio();
        let logo = doc.add_image(logo);
        let background = doc.add_image(background.with_opacity(settings.background_opacity));

        let mut canvas = Canvas {
            doc,
            settings,
            page_size: settings.paper.size(),
            regular,
            bold,
            logo,
            logo_aspect,
            background,
            background_aspect,
            current: 0,
            background_painted: BTreeSet::new(),
            header_painted: BTreeSet::new(),
        };
        canvas.add_page();
        canvas
    }

    pub fn settings(&self) -> &RenderSettings {
        self.settings
    }

    pub fn page_width(&self) -> Mm {
        self.page_size.0.into()
    }

    pub fn page_height(&self) -> Mm {
        self.page_size.1.into()
    }

    /// 0-based index of the page being drawn on
    pub fn current_page(&self) -> usize {
        self.current
    }

    pub fn page_count(&self) -> usize {
        self.doc.page_count()
    }

    pub fn background_image(&self) -> Id<Image> {
        self.background
    }

    pub fn logo_image(&self) -> Id<Image> {
        self.logo
    }

    pub fn font(&self, style: FontStyle) -> &Font {
        &self.doc.fonts[self.font_id(style)]
    }

    fn font_id(&self, style: FontStyle) -> Id<Font> {
        match style {
            FontStyle::Regular => self.regular,
            FontStyle::Bold => self.bold,
        }
    }

    /// The area pages reserve for content, recorded as each page's art box
    pub fn content_margins() -> Margins {
        Margins::trbl(CONTENT_TOP, CONTENT_LEFT, CONTENT_BOTTOM, CONTENT_LEFT)
    }

    /// Append a new page, make it current and decorate it
    pub fn add_page(&mut self) -> usize {
        self.doc
            .add_page(Page::new(self.page_size, Some(Self::content_margins())));
        self.current = self.doc.page_count() - 1;
        debug!(page = self.current + 1, "started page");
        self.paint_decorations_if_needed();
        self.current
    }

    /// Switch drawing to an existing page. Returns false if there is no such page.
    pub fn set_page(&mut self, index: usize) -> bool {
        if index < self.doc.page_count() {
            self.current = index;
            true
        } else {
            false
        }
    }

    /// Paint the background and header of the current page unless they are already there
    pub fn paint_decorations_if_needed(&mut self) {
        self.paint_background_if_needed();
        self.paint_header_if_needed();
    }

    fn paint_background_if_needed(&mut self) {
        if !self.background_painted.insert(self.current) {
            return;
        }
        let (width, height) = (self.page_width(), self.page_height());
        self.fill(Mm(0.0), Mm(0.0), width, height, self.settings.page_colour);

        let (x, y, w, h) = cover_fit(self.background_aspect, width, height);
        self.image(self.background, x, y, w, h);
    }

    fn paint_header_if_needed(&mut self) {
        if !self.header_painted.insert(self.current) {
            return;
        }
        let width = self.page_width();
        self.fill(Mm(0.0), Mm(0.0), width, HEADER_HEIGHT, self.settings.page_colour);

        if self.current == 0 {
            let logo_width = LOGO_HEIGHT * self.logo_aspect;
            self.image(
                self.logo,
                (width - logo_width) / 2.0,
                LOGO_TOP,
                logo_width,
                LOGO_HEIGHT,
            );

            let settings = self.settings;
            let style = TextStyle::new(FontStyle::Bold, SUBTITLE_SIZE, settings.accent).centred();
            self.text(&settings.subtitle, width / 2.0, SUBTITLE_BASELINE, style);
        }
    }

    fn page_mut(&mut self) -> &mut Page {
        self.doc
            .page_at_mut(self.current)
            .expect("current page is always in the document")
    }

    fn to_pdf(&self, x: Mm, y: Mm) -> (Pt, Pt) {
        let y: Pt = y.into();
        (x.into(), self.page_size.1 - y)
    }

    /// Draw a single line of text with its baseline at `y`. The text is not wrapped.
    pub fn text(&mut self, text: &str, x: Mm, y: Mm, style: TextStyle) {
        if text.is_empty() {
            return;
        }
        let font_id = self.font_id(style.font);
        let (anchor, baseline) = self.to_pdf(x, y);
        let x = aligned_x(text, &self.doc.fonts[font_id], style.size, anchor, style.align);
        self.page_mut().add_span(SpanLayout {
            text: text.to_string(),
            font: SpanFont {
                id: font_id,
                size: style.size,
            },
            colour: style.colour,
            coords: (x, baseline),
        });
    }

    /// Split text into lines that fit within `max_width` in the given font
    pub fn split_text(&self, text: &str, font: FontStyle, size: Pt, max_width: Mm) -> Vec<String> {
        split_text_to_size(text, self.font(font), size, max_width.into())
    }

    /// Stroke a straight line between two points
    pub fn line(&mut self, from: (Mm, Mm), to: (Mm, Mm), width: Mm, colour: Colour) {
        let from = self.to_pdf(from.0, from.1);
        let to = self.to_pdf(to.0, to.1);
        self.page_mut().add_rule(RuleLayout {
            from,
            to,
            width: width.into(),
            colour,
        });
    }

    /// Fill a rectangle given by its top-left corner and size
    pub fn fill(&mut self, x: Mm, y: Mm, width: Mm, height: Mm, colour: Colour) {
        let rect = self.rect(x, y, width, height);
        self.page_mut().add_fill(rect, colour);
    }

    /// Place an image in a box given by its top-left corner and size
    pub fn image(&mut self, image_id: Id<Image>, x: Mm, y: Mm, width: Mm, height: Mm) {
        let position = self.rect(x, y, width, height);
        self.page_mut()
            .add_image(ImageLayout { image_id, position });
    }

    fn rect(&self, x: Mm, y: Mm, width: Mm, height: Mm) -> Rect {
        let (x1, top) = self.to_pdf(x, y);
        let height: Pt = height.into();
        Rect::from_origin_size(x1, top - height, width.into(), height)
    }

    /// Finish drawing and hand back the document
    pub fn finish(self) -> Document {
        self.doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageContents;
    use image::DynamicImage;

    const LOGO: &[u8] = br#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="20"><rect width="100" height="20"/></svg>"#;

    fn assets() -> BrandAssets {
        BrandAssets::new(
            Image::new_svg(LOGO).unwrap(),
            Image::new_raster(DynamicImage::new_rgb8(30, 10)),
        )
    }

    fn images_on(doc: &Document, page: usize, id: Id<Image>) -> usize {
        doc.page_at(page)
            .unwrap()
            .contents
            .iter()
            .filter(|c| matches!(c, PageContents::Image(l) if l.image_id == id))
            .count()
    }

    #[test]
    fn cover_fit_fills_the_box() {
        // wide image: full height, overflows horizontally
        let (x, y, w, h) = cover_fit(2.0, Mm(100.0), Mm(100.0));
        assert_eq!((x, y, w, h), (Mm(-50.0), Mm(0.0), Mm(200.0), Mm(100.0)));

        // tall image: full width, overflows vertically
        let (x, y, w, h) = cover_fit(0.5, Mm(100.0), Mm(100.0));
        assert_eq!((x, y, w, h), (Mm(0.0), Mm(-50.0), Mm(100.0), Mm(200.0)));
    }

    #[test]
    fn decorations_are_painted_once_per_page() {
        let settings = RenderSettings::default();
        let mut canvas = Canvas::new(&settings, assets());
        canvas.paint_decorations_if_needed();
        canvas.add_page();
        canvas.paint_decorations_if_needed();
        canvas.set_page(0);
        canvas.paint_decorations_if_needed();

        let background = canvas.background_image();
        let logo = canvas.logo_image();
        let doc = canvas.finish();
        assert_eq!(doc.page_count(), 2);
        for page in 0..2 {
            assert_eq!(images_on(&doc, page, background), 1);
        }
        assert_eq!(images_on(&doc, 0, logo), 1);
        assert_eq!(images_on(&doc, 1, logo), 0);
    }

    #[test]
    fn background_is_painted_before_anything_else() {
        let settings = RenderSettings::default();
        let canvas = Canvas::new(&settings, assets());
        let doc = canvas.finish();
        let page = doc.page_at(0).unwrap();
        assert!(matches!(page.contents[0], PageContents::Fill(_, c) if c == settings.page_colour));
        assert!(matches!(page.contents[1], PageContents::Image(_)));
    }

    #[test]
    fn top_left_millimetres_map_to_pdf_space() {
        let settings = RenderSettings::default();
        let mut canvas = Canvas::new(&settings, assets());
        let height: Pt = canvas.page_height().into();
        canvas.text(
            "x",
            Mm(25.4),
            Mm(25.4),
            TextStyle::new(FontStyle::Regular, Pt(10.0), settings.text_colour),
        );
        let doc = canvas.finish();
        let span = doc.page_at(0).unwrap().spans().last().unwrap().clone();
        assert!((span.coords.0 .0 - 72.0).abs() < 1e-3);
        assert!((span.coords.1 .0 - (height.0 - 72.0)).abs() < 1e-3);
    }

    #[test]
    fn pages_record_the_content_area() {
        let settings = RenderSettings::default();
        let canvas = Canvas::new(&settings, assets());
        let doc = canvas.finish();
        let page = doc.page_at(0).unwrap();
        let left: Pt = CONTENT_LEFT.into();
        let bottom: Pt = CONTENT_BOTTOM.into();
        assert_eq!(page.content_box.x1, left);
        assert_eq!(page.content_box.y1, bottom);
        assert!(page.content_box.y2 < page.media_box.y2);
    }

    #[test]
    fn set_page_rejects_unknown_pages() {
        let settings = RenderSettings::default();
        let mut canvas = Canvas::new(&settings, assets());
        assert!(!canvas.set_page(3));
        assert_eq!(canvas.current_page(), 0);
    }
}
