use crate::refs::{ObjectReferences, RefType};
use image::{DynamicImage, GenericImageView};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf, Ref};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use usvg::Tree;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Svg(#[from] usvg::Error),

    #[error("failed to convert SVG to PDF: {0}")]
    SvgConversion(String),
}

pub enum ImageType {
    Raster(DynamicImage),
    SVG(Tree),
}

/// An image that can be placed on any number of pages. Images are stored once per
/// document and referenced from page contents by their arena id.
pub struct Image {
    pub image: ImageType,
    /// Intrinsic width, in pixels for rasters and user units for SVGs
    pub width: f32,
    /// Intrinsic height, in pixels for rasters and user units for SVGs
    pub height: f32,
    /// Constant opacity baked into the soft mask of raster images
    pub opacity: f32,
}

struct EncodeOutput {
    bytes: Vec<u8>,
    mask: Option<Vec<u8>>,
}

impl Image {
    /// Load an image from disk, picking the SVG or raster decoder by file extension
    pub fn new_from_disk<P: AsRef<Path>>(path: P) -> Result<Image, ImageError> {
        let path = path.as_ref();
        let is_svg = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("svg"))
            .unwrap_or(false);

        let data = std::fs::read(path)?;
        if is_svg {
            Self::new_svg(&data)
        } else {
            let image = image::load_from_memory(&data)?;
            Ok(Self::new_raster(image))
        }
    }

    pub fn new_svg(data: &[u8]) -> Result<Image, ImageError> {
        let tree = Tree::from_data(data, &usvg::Options::default())?;
        let size = tree.size();
        let width = size.width();
        let height = size.height();

        Ok(Image {
            image: ImageType::SVG(tree),
            width,
            height,
            opacity: 1.0,
        })
    }

    pub fn new_raster(image: DynamicImage) -> Image {
        let width = image.width() as f32;
        let height = image.height() as f32;
        Image {
            image: ImageType::Raster(image),
            width,
            height,
            opacity: 1.0,
        }
    }

    /// Set a constant opacity (clamped to 0.0..=1.0). Only raster images honour it.
    pub fn with_opacity(mut self, opacity: f32) -> Image {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Width divided by height
    pub fn aspect_ratio(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    fn encode_raster(image: &DynamicImage, opacity: f32) -> EncodeOutput {
        let level = CompressionLevel::DefaultLevel as u8;

        let mask = (image.color().has_alpha() || opacity < 1.0).then(|| {
            let alphas: Vec<u8> = image
                .pixels()
                .map(|p| ((p.2).0[3] as f32 * opacity).round() as u8)
                .collect();
            compress_to_vec_zlib(&alphas, level)
        });

        let bytes = compress_to_vec_zlib(image.to_rgb8().as_raw(), level);

        EncodeOutput { bytes, mask }
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        image_index: usize,
        writer: &mut Pdf,
    ) -> Result<(), ImageError> {
        match &self.image {
            ImageType::Raster(raster) => {
                let id = refs.gen(RefType::Image(image_index));
                let encoded = Self::encode_raster(raster, self.opacity);

                let mut image = writer.image_xobject(id, encoded.bytes.as_slice());
                image.filter(Filter::FlateDecode);
                image.width(self.width as i32);
                image.height(self.height as i32);
                image.color_space().device_rgb();
                image.bits_per_component(8);

                let mask_id = encoded
                    .mask
                    .as_ref()
                    .map(|_| refs.gen(RefType::ImageMask(image_index)));
                if let Some(mask_id) = mask_id {
                    image.s_mask(mask_id);
                }

                image.finish();

                // add a transparency mask if we have one
                if let (Some(mask_id), Some(mask)) = (mask_id, encoded.mask.as_ref()) {
                    let mut s_mask = writer.image_xobject(mask_id, mask.as_slice());
                    s_mask.filter(Filter::FlateDecode);
                    s_mask.width(self.width as i32);
                    s_mask.height(self.height as i32);
                    s_mask.color_space().device_gray();
                    s_mask.bits_per_component(8);
                }
            }
            ImageType::SVG(tree) => {
                let (chunk, root) =
                    svg2pdf::to_chunk(tree, svg2pdf::ConversionOptions::default())
                        .map_err(|e| ImageError::SvgConversion(format!("{e:?}")))?;

                // svg2pdf numbers its chunk from 1, so move it into our id space
                let mut map: HashMap<Ref, Ref> = HashMap::new();
                let chunk = chunk.renumber(|old| *map.entry(old).or_insert_with(|| refs.bump()));
                let id = map.get(&root).copied().ok_or_else(|| {
                    ImageError::SvgConversion("converted chunk is missing its root".into())
                })?;
                refs.set(RefType::Image(image_index), id);
                writer.extend(&chunk);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGO: &[u8] = br##"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="40" viewBox="0 0 200 40"><rect width="200" height="40" fill="#a4ff2e"/></svg>"##;

    #[test]
    fn svg_dimensions_come_from_the_document() {
        let image = Image::new_svg(LOGO).expect("can parse svg");
        assert_eq!(image.width, 200.0);
        assert_eq!(image.height, 40.0);
        assert_eq!(image.aspect_ratio(), 5.0);
    }

    #[test]
    fn invalid_svg_is_an_error() {
        assert!(matches!(
            Image::new_svg(b"not an svg"),
            Err(ImageError::Svg(_))
        ));
    }

    #[test]
    fn opacity_is_clamped_and_baked_into_mask() {
        let raster = DynamicImage::new_rgb8(2, 2);
        let image = Image::new_raster(raster).with_opacity(3.0);
        assert_eq!(image.opacity, 1.0);

        let raster = DynamicImage::new_rgb8(2, 2);
        let encoded = Image::encode_raster(&raster, 0.5);
        let mask = encoded.mask.expect("translucent image has a mask");
        let alphas = miniz_oxide::inflate::decompress_to_vec_zlib(&mask).expect("valid zlib");
        assert_eq!(alphas, vec![128; 4]);
    }

    #[test]
    fn opaque_rgb_has_no_mask() {
        let raster = DynamicImage::new_rgb8(2, 2);
        assert!(Image::encode_raster(&raster, 1.0).mask.is_none());
    }
}
