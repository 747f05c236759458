use crate::error::{self, Result};

use std::path::Path;

use image::RgbaImage;
use snafu::ResultExt;


/// For every column, the height of the lowest visible pixel counted from
/// the bottom row, or zero if the column is fully transparent.
pub fn height_profile(img: &RgbaImage) -> Vec<u32> {
    let (width, height) = img.dimensions();

    (0..width)
        .map(|x| {
            (0..height)
                .find(|&h| img.get_pixel(x, height - 1 - h)[3] > 0)
                .unwrap_or(0)
        })
        .collect()
}

pub fn write_profile<P: AsRef<Path>>(path: P, profile: &[u32]) -> Result<()> {
    let path = path.as_ref();

    let text = profile.iter().map(|h| h.to_string()).collect::<Vec<_>>().join(",");
    std::fs::write(path, text).context(error::WriteProfileSnafu { path })
}
