//! Overlay drawing for selections and hulls.

use imageproc::{
    drawing::{Canvas, draw_hollow_rect_mut, draw_line_segment_mut},
    point::Point,
    rect::Rect,
};

use crate::rect::SelectionRect;

/// Draws the outline of a selection with both corners inclusive.
///
/// Strokes thicker than one pixel grow outwards; anything outside the canvas is clipped.
pub fn draw_selection_outline<C>(
    canvas: &mut C,
    selection: SelectionRect,
    color: C::Pixel,
    thickness: u32,
) where
    C: Canvas,
{
    for t in 0..thickness.max(1) {
        let offset = t as i32;
        let rect = Rect::at(selection.x1 as i32 - offset, selection.y1 as i32 - offset)
            .of_size(selection.width() + 1 + 2 * t, selection.height() + 1 + 2 * t);
        draw_hollow_rect_mut(canvas, rect, color);
    }
}

/// Draws a closed polygon through `hull` in canvas coordinates.
///
/// Each extra unit of `thickness` repeats the outline shifted one pixel right and down.
pub fn draw_hull_outline<C>(canvas: &mut C, hull: &[Point<i32>], color: C::Pixel, thickness: u32)
where
    C: Canvas,
{
    if hull.is_empty() {
        return;
    }

    let offsets = stroke_offsets(thickness);
    for i in 0..hull.len() {
        let p1 = hull[i];
        let p2 = hull[(i + 1) % hull.len()];
        for &(dx, dy) in &offsets {
            draw_line_segment_mut(
                canvas,
                (p1.x as f32 + dx, p1.y as f32 + dy),
                (p2.x as f32 + dx, p2.y as f32 + dy),
                color,
            );
        }
    }
}

/// Offsets of the parallel strokes that make up a line of the given thickness.
fn stroke_offsets(thickness: u32) -> Vec<(f32, f32)> {
    let mut offsets = vec![(0.0, 0.0)];
    for t in 1..thickness.max(1) {
        let shift = t as f32;
        offsets.push((shift, 0.0));
        offsets.push((0.0, shift));
    }
    offsets
}
