use image::{GrayImage, imageops::replace};
use imageproc::{
    contours::{BorderType, Contour, find_contours},
    geometry::convex_hull,
    point::Point,
};
use num_traits::AsPrimitive;

/// Traces the outer borders of every top-level bright component in a binary mask.
///
/// Any non-zero pixel of `mask` is treated as foreground and everything outside the mask counts
/// as background, so components touching the mask edges are traced like any other. Hole
/// borders, and components nested inside holes of other components, are discarded: they always
/// lie inside the hull of their enclosing component and therefore never change the result of
/// [`outer_hull`].
///
/// # Arguments
///
/// * `mask`: A binary image, typically produced by [`crate::density::brightness_mask`].
///
/// # Returns
///
/// The external contours in mask coordinates, in the order [`find_contours`] discovers them
/// (raster order of their first pixel). Empty when the mask has no foreground pixel.
pub fn external_contours(mask: &GrayImage) -> Vec<Contour<i32>> {
    let (width, height) = mask.dimensions();
    if width == 0 || height == 0 {
        return Vec::new();
    }

    // find_contours only starts outer borders away from column 0, so trace on a dark frame.
    let mut framed = GrayImage::new(width + 2, height + 2);
    replace(&mut framed, mask, 1, 1);

    let mut contours = find_contours::<i32>(&framed);
    contours
        .retain(|contour| contour.border_type == BorderType::Outer && contour.parent.is_none());

    for contour in &mut contours {
        for point in &mut contour.points {
            point.x -= 1;
            point.y -= 1;
        }
    }
    contours
}

/// Computes the convex hull enclosing the union of all contour points.
///
/// Returns `None` if `contours` holds no points at all. A single bright pixel, or bright
/// pixels along one line, still yield a hull; its area is simply zero.
pub fn outer_hull(contours: &[Contour<i32>]) -> Option<Vec<Point<i32>>> {
    let points: Vec<Point<i32>> = contours
        .iter()
        .flat_map(|contour| contour.points.iter().copied())
        .collect();

    if points.is_empty() {
        return None;
    }

    Some(convex_hull(points))
}

/// Calculates the enclosed area of a simple polygon with the shoelace formula.
///
/// The vertices are taken in order and the polygon is closed implicitly, so the first point
/// must not be repeated at the end. The result is non-negative regardless of the winding
/// direction. Polygons with fewer than 3 vertices have an area of `0.0`.
///
/// # Type Parameters
///
/// * `T`: The numeric type of the vertex coordinates, convertible to `f64`.
pub fn polygon_area<T>(points: &[Point<T>]) -> f64
where
    T: Copy + AsPrimitive<f64>,
{
    if points.len() < 3 {
        return 0.0;
    }

    let twice_signed_area: f64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(p1, p2)| {
            let (x1, y1): (f64, f64) = (p1.x.as_(), p1.y.as_());
            let (x2, y2): (f64, f64) = (p2.x.as_(), p2.y.as_());
            x1 * y2 - x2 * y1
        })
        .sum();

    twice_signed_area.abs() / 2.0
}
