use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{anyhow, Context};
use focusfuse::Photo;
use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ColorType, ImageEncoder};
use log::debug;

/// Decodes an image file into an 8-bit grayscale [`Photo`].
///
/// Any format the `image` crate reads is accepted; color input is converted
/// to luma and deeper samples are scaled down to 8 bits.
pub fn read_photo(path: &Path) -> anyhow::Result<Photo> {
    debug!("Reading image file: {}", path.display());
    // The decoder error already repeats its source in its own message.
    let img = image::open(path)
        .map_err(|err| anyhow!("Could not load image '{}': {err}", path.display()))?;
    let luma = img.to_luma8();
    let (width, height) = luma.dimensions();
    Photo::from_raw(width as usize, height as usize, luma.into_raw())
        .with_context(|| format!("Image '{}' has an inconsistent pixel buffer", path.display()))
}

/// Writes `photo` to `path`.
///
/// A `.pgm` extension always produces a binary (P5) graymap; other
/// extensions use whatever format the `image` crate associates with them.
pub fn save_photo(photo: &Photo, path: &Path) -> anyhow::Result<()> {
    debug!("Writing image {}", path.display());
    let width = photo.width() as u32;
    let height = photo.height() as u32;
    let data = photo.pixels().pixels();

    let is_pgm = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pgm"));

    if is_pgm {
        let file = File::create(path)
            .with_context(|| format!("Could not create output file '{}'", path.display()))?;
        PnmEncoder::new(BufWriter::new(file))
            .with_subtype(PnmSubtype::Graymap(SampleEncoding::Binary))
            .write_image(data, width, height, ColorType::L8)
            .with_context(|| format!("Failed to write PGM file '{}'", path.display()))?;
    } else {
        let img = image::GrayImage::from_raw(width, height, data.to_vec())
            .context("Pixel buffer does not match the image dimensions")?;
        img.save(path)
            .with_context(|| format!("Failed to write image '{}'", path.display()))?;
    }
    Ok(())
}
