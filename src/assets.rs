use crate::error::GenerateError;
use crate::image::Image;
use std::path::Path;
use tracing::debug;

/// The two brand images every document is painted with
pub struct BrandAssets {
    /// Vector logo shown in the first page's header
    pub logo: Image,
    /// Raster image painted behind every page
    pub background: Image,
}

impl BrandAssets {
    pub fn new(logo: Image, background: Image) -> BrandAssets {
        BrandAssets { logo, background }
    }

    /// Decode the logo and then the background from disk. Both must load; there is
    /// no fallback artwork.
    pub fn load<L: AsRef<Path>, B: AsRef<Path>>(
        logo: L,
        background: B,
    ) -> Result<BrandAssets, GenerateError> {
        let logo_path = logo.as_ref();
        debug!(path = %logo_path.display(), "loading logo");
        let logo = Image::new_from_disk(logo_path).map_err(|source| GenerateError::Asset {
            asset: "logo",
            source,
        })?;

        let background_path = background.as_ref();
        debug!(path = %background_path.display(), "loading background");
        let background =
            Image::new_from_disk(background_path).map_err(|source| GenerateError::Asset {
                asset: "background",
                source,
            })?;

        Ok(BrandAssets { logo, background })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_files_report_which_asset_failed() {
        let dir = tempfile::tempdir().unwrap();
        let logo = dir.path().join("logo.svg");
        std::fs::write(
            &logo,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="2"><rect width="10" height="2"/></svg>"#,
        )
        .unwrap();

        let err = BrandAssets::load(&logo, dir.path().join("missing.png"))
            .err()
            .expect("background is missing");
        match err {
            GenerateError::Asset { asset, .. } => assert_eq!(asset, "background"),
            other => panic!("unexpected error {other:?}"),
        }

        let err = BrandAssets::load(dir.path().join("nope.svg"), &logo)
            .err()
            .expect("logo is missing");
        assert!(matches!(err, GenerateError::Asset { asset: "logo", .. }));
    }
}
