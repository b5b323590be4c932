//! Text measurement and wrapping utilities.
//!
//! Text is measured with the metrics of the base fonts and wrapped at word
//! boundaries. Words wider than the available width are broken between
//! characters so that no line ever overflows its box.
//!
//! # Example
//!
//! ```
//! use dietplan_gen::{BaseFont, Font, Pt};
//! use dietplan_gen::layout::split_text_to_size;
//!
//! let font = Font::new(BaseFont::Helvetica);
//! let lines = split_text_to_size("Oats with whey\nand berries", &font, Pt(10.0), Pt(80.0));
//! assert_eq!(lines, vec!["Oats with whey", "and berries"]);
//! ```

mod margins;
mod text;

pub use margins::*;
pub use text::*;
