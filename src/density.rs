use image::{GenericImageView, GrayImage, Luma, Rgb};
use imageproc::point::Point;

use crate::contours::{external_contours, outer_hull, polygon_area};

/// Luminance strictly above this value marks a pixel as bright.
pub const BRIGHTNESS_THRESHOLD: u8 = 150;

/// Result of analysing one region.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Bright pixel count divided by hull area, or `0.0` for degenerate regions.
    pub density: f64,
    /// Convex hull around all bright components, in region-local coordinates.
    pub hull: Option<Vec<Point<i32>>>,
    pub bright_pixels: u32,
    pub hull_area: f64,
}

impl Analysis {
    fn empty() -> Self {
        Self {
            density: 0.0,
            hull: None,
            bright_pixels: 0,
            hull_area: 0.0,
        }
    }
}

/// Perceptual (ITU-R BT.601) luminance of an RGB pixel, rounded to the nearest integer.
pub fn luminance(pixel: Rgb<u8>) -> u8 {
    let [r, g, b] = pixel.0;
    let y = 0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b);
    y.round().clamp(0.0, 255.0) as u8
}

/// Thresholds the luminance of every pixel: `255` where it exceeds `threshold`, `0` elsewhere.
pub fn brightness_mask<I>(region: &I, threshold: u8) -> GrayImage
where
    I: GenericImageView<Pixel = Rgb<u8>>,
{
    let (width, height) = region.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        if luminance(region.get_pixel(x, y)) > threshold {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// Computes the brightness density of a region with the default threshold.
///
/// See [`analyze_with_threshold`].
pub fn analyze<I>(region: &I) -> Analysis
where
    I: GenericImageView<Pixel = Rgb<u8>>,
{
    analyze_with_threshold(region, BRIGHTNESS_THRESHOLD)
}

/// Computes the brightness density of a region.
///
/// The region is binarised at `threshold`, the outer borders of all bright components are
/// merged into a single convex hull, and the density is the number of bright pixels divided by
/// that hull's area. Hull vertices lie on pixel centers, so a solid `n`x`n` bright square gives
/// `n² / (n-1)²`.
///
/// Degenerate inputs never fail:
///
/// * an empty region, or one without bright pixels, yields density `0.0` and no hull;
/// * bright pixels whose hull has zero area (a single pixel, a line) yield density `0.0`
///   together with the degenerate hull.
pub fn analyze_with_threshold<I>(region: &I, threshold: u8) -> Analysis
where
    I: GenericImageView<Pixel = Rgb<u8>>,
{
    let (width, height) = region.dimensions();
    if width == 0 || height == 0 {
        return Analysis::empty();
    }

    let mask = brightness_mask(region, threshold);
    let contours = external_contours(&mask);
    let Some(hull) = outer_hull(&contours) else {
        return Analysis::empty();
    };

    let bright_pixels = mask.pixels().filter(|p| p.0[0] > 0).count() as u32;
    let hull_area = polygon_area(&hull);

    let density = if hull_area == 0.0 {
        0.0
    } else {
        f64::from(bright_pixels) / hull_area
    };

    Analysis {
        density,
        hull: Some(hull),
        bright_pixels,
        hull_area,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    fn assert_float_eq(a: f64, b: f64) {
        assert!(
            (a - b).abs() < 1e-9,
            "Assertion failed: expected {}, got {}",
            b,
            a
        );
    }

    #[test]
    fn luminance_uses_perceptual_weights() {
        assert_eq!(luminance(WHITE), 255);
        assert_eq!(luminance(BLACK), 0);
        assert_eq!(luminance(Rgb([255, 0, 0])), 76);
        assert_eq!(luminance(Rgb([0, 255, 0])), 150);
        assert_eq!(luminance(Rgb([0, 0, 255])), 29);
    }

    #[test]
    fn mask_threshold_is_strict() {
        let region = RgbImage::from_fn(3, 1, |x, _| match x {
            0 => Rgb([150, 150, 150]),
            1 => Rgb([151, 151, 151]),
            _ => Rgb([0, 255, 0]),
        });
        let mask = brightness_mask(&region, BRIGHTNESS_THRESHOLD);
        assert_eq!(mask.as_raw(), &vec![0, 255, 0]);
    }

    #[test]
    fn dark_region_has_no_hull() {
        let region = RgbImage::from_pixel(20, 20, Rgb([150, 150, 150]));
        assert_eq!(analyze(&region), Analysis::empty());
    }

    #[test]
    fn empty_region_short_circuits() {
        assert_eq!(analyze(&RgbImage::new(0, 10)), Analysis::empty());
        assert_eq!(analyze(&RgbImage::new(10, 0)), Analysis::empty());
    }

    #[test]
    fn solid_bright_square_is_nearly_uniform() {
        for n in [10u32, 50, 100] {
            let region = RgbImage::from_pixel(n, n, WHITE);
            let analysis = analyze(&region);

            let side = f64::from(n - 1);
            assert_eq!(analysis.bright_pixels, n * n);
            assert_float_eq(analysis.hull_area, side * side);
            assert_float_eq(analysis.density, f64::from(n * n) / (side * side));
        }

        let analysis = analyze(&RgbImage::from_pixel(100, 100, WHITE));
        assert!((analysis.density - 1.0).abs() < 0.05);
    }

    #[test]
    fn sparse_blobs_lower_the_density() {
        // Two 5x5 blobs in opposite corners of a 40x40 region.
        let region = RgbImage::from_fn(40, 40, |x, y| {
            let in_first = x < 5 && y < 5;
            let in_second = x >= 35 && y >= 35;
            if in_first || in_second { WHITE } else { BLACK }
        });
        let analysis = analyze(&region);

        // Hull is the 39x39 square minus two corner triangles with 35px legs.
        assert_eq!(analysis.bright_pixels, 50);
        assert_float_eq(analysis.hull_area, 296.0);
        assert_float_eq(analysis.density, 50.0 / 296.0);
    }

    #[test]
    fn blob_on_left_edge_is_measured() {
        // 4x6 block on column 0 plus a 3x3 block further right.
        let region = RgbImage::from_fn(20, 10, |x, y| {
            let left = x < 4 && (2..8).contains(&y);
            let right = (12..15).contains(&x) && (3..6).contains(&y);
            if left || right { WHITE } else { BLACK }
        });
        let analysis = analyze(&region);

        let hull = analysis.hull.unwrap();
        assert_eq!(analysis.bright_pixels, 24 + 9);
        assert_eq!(hull.iter().map(|p| p.x).min(), Some(0));
        assert_eq!(hull.iter().map(|p| p.x).max(), Some(14));
        assert!(analysis.density > 0.0);
    }

    #[test]
    fn blob_on_top_edge_is_measured() {
        let region = RgbImage::from_fn(12, 12, |x, y| {
            if (3..9).contains(&x) && y < 5 { WHITE } else { BLACK }
        });
        let analysis = analyze(&region);

        assert_eq!(analysis.bright_pixels, 30);
        assert_float_eq(analysis.hull_area, 5.0 * 4.0);
        assert_float_eq(analysis.density, 30.0 / 20.0);
    }

    #[test]
    fn single_bright_pixel_has_degenerate_hull() {
        let mut region = RgbImage::from_pixel(9, 9, BLACK);
        region.put_pixel(4, 4, WHITE);
        let analysis = analyze(&region);

        assert_eq!(analysis.bright_pixels, 1);
        assert!(analysis.hull.is_some());
        assert_float_eq(analysis.hull_area, 0.0);
        assert_float_eq(analysis.density, 0.0);
    }

    #[test]
    fn custom_threshold_changes_classification() {
        let region = RgbImage::from_pixel(6, 6, Rgb([100, 100, 100]));
        assert!(analyze(&region).hull.is_none());
        assert!(analyze_with_threshold(&region, 99).hull.is_some());
    }

    #[test]
    fn analysis_is_repeatable() {
        let region = RgbImage::from_fn(30, 20, |x, y| {
            if (x * 7 + y * 3) % 5 == 0 { WHITE } else { BLACK }
        });
        assert_eq!(analyze(&region), analyze(&region));
    }

    #[test]
    fn works_on_sub_image_views() {
        let mut image = RgbImage::from_pixel(50, 50, BLACK);
        for x in 20..30 {
            for y in 20..30 {
                image.put_pixel(x, y, WHITE);
            }
        }
        let view = image::imageops::crop_imm(&image, 10, 10, 30, 30);
        let analysis = analyze(&*view);

        assert_eq!(analysis.bright_pixels, 100);
        let hull = analysis.hull.unwrap();
        assert!(hull.iter().all(|p| (10..20).contains(&p.x) && (10..20).contains(&p.y)));
    }
}
