//! Lays a [DietPlan] out onto pages.
//!
//! Content flows top to bottom: client details, daily macros, the meal schedule, then
//! supplements and notes when they were filled in. A final pass stamps the footer on
//! every page once the page count is known.

use crate::assets::BrandAssets;
use crate::canvas::{Canvas, FontStyle, TextStyle, CONTENT_LEFT, CONTENT_TOP};
use crate::config::RenderSettings;
use crate::document::Document;
use crate::error::GenerateError;
use crate::filename::output_file_name;
use crate::info::Info;
use crate::plan::DietPlan;
use crate::sanitize::{sanitize_text, single_line};
use crate::table::{draw_table, TableStyle};
use crate::units::{Mm, Pt};
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Where content resumes after a section or paragraph breaks onto a new page
const CONTINUATION_TOP: Mm = Mm(20.0);
/// A section starting lower than `page height - SECTION_CLEARANCE` goes to a new page
const SECTION_CLEARANCE: Mm = Mm(57.0);
/// Paragraph lines never start lower than `page height - PARAGRAPH_CLEARANCE`
const PARAGRAPH_CLEARANCE: Mm = Mm(30.0);
const AFTER_TABLE: Mm = Mm(10.0);
const AFTER_PARAGRAPH: Mm = Mm(10.0);

const RULE_INSET: Mm = Mm(10.0);
const HEADING_RULE_WIDTH: Mm = Mm(0.5);
const HEADING_SIZE: Pt = Pt(12.0);
const PARAGRAPH_SIZE: Pt = Pt(10.0);
const PARAGRAPH_LINE_HEIGHT: Mm = Mm(5.0);

const FOOTER_RULE_FROM_BOTTOM: Mm = Mm(20.0);
const FOOTER_TEXT_FROM_BOTTOM: Mm = Mm(12.0);
const FOOTER_SIZE: Pt = Pt(9.0);
const FOOTER_RULE_WIDTH: Mm = Mm(0.5);

/// Lay out a plan. The plan is assumed to be valid; see [generate] for the checked path.
pub fn render_plan(plan: &DietPlan, assets: BrandAssets, settings: &RenderSettings) -> Document {
    let mut canvas = Canvas::new(settings, assets);
    let table = TableStyle::standard(canvas.page_width());

    let mut y = CONTENT_TOP;
    y = section_heading(&mut canvas, "CLIENT INFORMATION", y);
    y = draw_table(&mut canvas, &plan.profile.rows(), &table, y) + AFTER_TABLE;

    y = section_heading(&mut canvas, "DAILY MACROS TARGET", y);
    y = draw_table(&mut canvas, &plan.nutrition.rows(), &table, y) + AFTER_TABLE;

    y = section_break_if_needed(&mut canvas, y);
    y = section_heading(&mut canvas, "DAILY MEAL SCHEDULE", y);
    let meals = TableStyle::meals(canvas.page_width());
    y = draw_table(&mut canvas, &plan.meals.rows(), &meals, y) + AFTER_TABLE;

    if let Some(supplements) = plan.supplements() {
        y = section_break_if_needed(&mut canvas, y);
        y = section_heading(&mut canvas, "SUPPLEMENTS", y);
        y = paragraph(&mut canvas, supplements, y) + AFTER_PARAGRAPH;
    }

    if let Some(notes) = plan.notes() {
        y = section_break_if_needed(&mut canvas, y);
        y = section_heading(&mut canvas, "TIPS & GUIDELINES", y);
        paragraph(&mut canvas, notes, y);
    }

    footers(&mut canvas, plan.profile.trainer());

    let mut doc = canvas.finish();
    doc.set_info(
        Info::new()
            .title(format!("{} - Diet Plan", single_line(&plan.profile.client_name)))
            .author(single_line(plan.profile.trainer()))
            .subject("Personalized diet plan")
            .created(Local::now().fixed_offset()),
    );
    doc
}

fn section_break_if_needed(canvas: &mut Canvas, y: Mm) -> Mm {
    if y > canvas.page_height() - SECTION_CLEARANCE {
        canvas.add_page();
        debug!(page = canvas.current_page() + 1, "section starts on new page");
        CONTINUATION_TOP
    } else {
        y
    }
}

/// An accent rule across the page with the section title below it
fn section_heading(canvas: &mut Canvas, title: &str, y: Mm) -> Mm {
    let accent = canvas.settings().accent;
    let right = canvas.page_width() - RULE_INSET;
    canvas.line((RULE_INSET, y), (right, y), HEADING_RULE_WIDTH, accent);

    let y = y + Mm(5.0);
    canvas.text(
        title,
        CONTENT_LEFT,
        y,
        TextStyle::new(FontStyle::Bold, HEADING_SIZE, accent),
    );
    y + Mm(8.0)
}

/// Sanitized, wrapped free text. Each line that would start too close to the bottom
/// goes to a new page instead.
fn paragraph(canvas: &mut Canvas, text: &str, y: Mm) -> Mm {
    let max_width = canvas.page_width() - CONTENT_LEFT * 2.0;
    let limit = canvas.page_height() - PARAGRAPH_CLEARANCE;
    let style = TextStyle::new(
        FontStyle::Regular,
        PARAGRAPH_SIZE,
        canvas.settings().text_colour,
    );

    let mut y = y;
    for line in canvas.split_text(&sanitize_text(text), FontStyle::Regular, PARAGRAPH_SIZE, max_width) {
        if y > limit {
            canvas.add_page();
            y = CONTINUATION_TOP;
        }
        canvas.text(&line, CONTENT_LEFT, y, style);
        y += PARAGRAPH_LINE_HEIGHT;
    }
    y
}

fn footers(canvas: &mut Canvas, trainer: &str) {
    let accent = canvas.settings().accent;
    let credit = format!(
        "Prepared by {} | {}",
        single_line(trainer),
        single_line(&canvas.settings().tagline)
    );
    let (width, height) = (canvas.page_width(), canvas.page_height());

    for page in 0..canvas.page_count() {
        canvas.set_page(page);
        let rule_y = height - FOOTER_RULE_FROM_BOTTOM;
        canvas.line(
            (RULE_INSET, rule_y),
            (width - RULE_INSET, rule_y),
            FOOTER_RULE_WIDTH,
            accent,
        );
        canvas.text(
            &credit,
            width / 2.0,
            height - FOOTER_TEXT_FROM_BOTTOM,
            TextStyle::new(FontStyle::Bold, FOOTER_SIZE, accent).centred(),
        );
    }
}

/// A fully serialized document and the name it should be saved under
#[derive(Debug, Clone)]
pub struct GeneratedPlan {
    pub file_name: String,
    pub page_count: usize,
    pub bytes: Vec<u8>,
}

impl GeneratedPlan {
    /// Write the document into `dir`, creating the directory if needed
    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf, GenerateError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        info!(path = %path.display(), "saved diet plan");
        Ok(path)
    }
}

/// Validate a plan, lay it out and serialize it. Nothing is produced unless every step
/// succeeds.
pub fn generate(
    plan: &DietPlan,
    assets: BrandAssets,
    settings: &RenderSettings,
    date: NaiveDate,
) -> Result<GeneratedPlan, GenerateError> {
    plan.validate()?;

    let doc = render_plan(plan, assets, settings);
    let page_count = doc.page_count();
    let bytes = doc.to_bytes()?;
    let file_name = output_file_name(&plan.profile.client_name, date);
    info!(pages = page_count, size = bytes.len(), file = %file_name, "rendered diet plan");

    Ok(GeneratedPlan {
        file_name,
        page_count,
        bytes,
    })
}
