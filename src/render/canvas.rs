use image::{imageops, Rgb, RgbImage, Rgba, RgbaImage};


pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);


/// Converts an RGB buffer drawn in `ink` on a plain `paper` background into
/// an RGBA image of `ink` with the coverage of each pixel as alpha, so that
/// untouched paper becomes fully transparent and blended edges keep their
/// partial coverage. Returns `None` if the buffer does not hold
/// `width * height` pixels.
pub fn unblend(buffer: Vec<u8>, width: u32, height: u32, paper: Rgb<u8>, ink: Rgb<u8>) -> Option<RgbaImage> {
    let rgb = RgbImage::from_raw(width, height, buffer)?;

    let delta: Vec<f64> = (0..3).map(|c| ink[c] as f64 - paper[c] as f64).collect();
    let norm: f64 = delta.iter().map(|d| d * d).sum();

    Some(RgbaImage::from_fn(width, height, |x, y| {
        let px = rgb.get_pixel(x, y);

        if *px == paper || norm == 0.0 {
            return TRANSPARENT;
        }

        let dot: f64 = (0..3).map(|c| (px[c] as f64 - paper[c] as f64) * delta[c]).sum();
        let alpha = (dot / norm).max(0.0).min(1.0);

        match (alpha * 255.0).round() as u8 {
            0 => TRANSPARENT,
            a => Rgba([ink[0], ink[1], ink[2], a]),
        }
    }))
}

/// Bounding box `(x, y, width, height)` of all pixels with non-zero alpha.
pub fn opaque_bounds(canvas: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;

    for (x, y, px) in canvas.enumerate_pixels() {
        if px[3] == 0 {
            continue;
        }

        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }

    bounds.map(|(x0, y0, x1, y1)| (x0, y0, x1 - x0 + 1, y1 - y0 + 1))
}

/// Crops away fully transparent borders. A canvas without any visible pixel
/// is returned unchanged.
pub fn trim(canvas: RgbaImage) -> RgbaImage {
    match opaque_bounds(&canvas) {
        Some((x, y, w, h)) if (w, h) != canvas.dimensions() => {
            imageops::crop_imm(&canvas, x, y, w, h).to_image()
        },
        _ => canvas,
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    #[test]
    fn paper_becomes_transparent_and_ink_opaque() {
        let paper = Rgb([255, 255, 255]);
        let ink = Rgb([255, 0, 0]);
        let buffer = vec![255, 255, 255, 255, 0, 0, 255, 128, 128, 255, 255, 255];

        let img = unblend(buffer, 2, 2, paper, ink).unwrap();

        assert_eq!(*img.get_pixel(0, 0), TRANSPARENT);
        assert_eq!(*img.get_pixel(1, 0), RED);
        assert_eq!(*img.get_pixel(1, 1), TRANSPARENT);

        // half blended edge keeps the ink color at half coverage
        let edge = img.get_pixel(0, 1);
        assert_eq!(&edge.0[..3], &[255, 0, 0]);
        assert!(edge[3] >= 126 && edge[3] <= 128);
    }

    #[test]
    fn unblend_checks_buffer_size() {
        assert!(unblend(vec![0; 11], 2, 2, Rgb([0, 0, 0]), Rgb([255, 0, 0])).is_none());
    }

    #[test]
    fn trim_crops_to_visible_pixels() {
        let mut c = RgbaImage::from_pixel(20, 10, TRANSPARENT);
        c.put_pixel(3, 4, RED);
        c.put_pixel(12, 7, RED);

        let t = trim(c);
        assert_eq!(t.dimensions(), (10, 4));
        assert_eq!(*t.get_pixel(0, 0), RED);
        assert_eq!(*t.get_pixel(9, 3), RED);
    }

    #[test]
    fn trim_keeps_empty_canvas() {
        let c = RgbaImage::from_pixel(5, 5, TRANSPARENT);
        assert_eq!(trim(c).dimensions(), (5, 5));
    }
}
