//! Branded, multi-page diet plan documents rendered straight to PDF.
//!
//! A [DietPlan] snapshot is validated, laid out onto A4 (or letter) pages together with
//! the brand's logo and background artwork, and serialized into a single PDF. See
//! [generate] for the whole pipeline, or [render_plan] to inspect the laid out
//! [Document] before it is written.

mod assets;
pub use assets::*;

pub mod canvas;

mod colour;
pub use colour::*;

pub mod config;
pub use config::{AppConfig, RenderSettings};

mod content;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod filename;
pub use filename::*;

mod font;
pub use font::*;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

/// Utility functions and structures to layout objects (most text) on pages
pub mod layout;

mod page;
pub use page::*;

mod pagesize;
pub use pagesize::*;

mod plan;
pub use plan::*;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod render;
pub use render::*;

/// Text clean-up applied to everything the user typed before it is drawn
pub mod sanitize;

pub mod table;

mod units;
pub use units::*;

/// Re-export PDF-writer functionality, mostly for inspecting generated object ids
pub use pdf_writer;
