use crate::image::ImageError;
use crate::plan::ValidationError;
use crate::refs::RefType;
use thiserror::Error;

/// Errors raised while serializing a [Document](crate::Document)
#[derive(Error, Debug)]
pub enum PDFError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// An image could not be encoded
    Image(#[from] ImageError),

    #[error("page is missing from the document")]
    PageMissing,

    #[error("no PDF object was allocated for {0:?}")]
    MissingReference(RefType),
}

/// Everything that can go wrong between a plan snapshot and a saved file
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to load {asset} asset: {source}")]
    Asset {
        asset: &'static str,
        #[source]
        source: ImageError,
    },

    #[error(transparent)]
    Pdf(#[from] PDFError),

    #[error("failed to save the document: {0}")]
    Save(#[from] std::io::Error),
}

impl GenerateError {
    /// The single message shown to the user when generation fails
    pub fn notification(&self) -> &'static str {
        match self {
            GenerateError::Validation(_) => "Please fill in required fields (Name, Age, Weight)",
            _ => "Failed to generate PDF. Please try again.",
        }
    }
}
