use std::fmt;

use image::math::Rect;

/// An axis-aligned selection with `x1 <= x2` and `y1 <= y2`.
///
/// The covered region spans the half-open ranges `x1..x2` and `y1..y2`, so a rectangle with
/// equal coordinates on either axis selects no pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionRect {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl SelectionRect {
    /// Normalizes two arbitrary corners (e.g. drag anchor and release point).
    ///
    /// # Examples
    ///
    /// ```
    /// use brightness_density::SelectionRect;
    ///
    /// let rect = SelectionRect::from_corners((90, 10), (30, 70));
    ///
    /// assert_eq!((rect.x1, rect.y1, rect.x2, rect.y2), (30, 10, 90, 70));
    /// assert_eq!(rect.width(), 60);
    /// ```
    pub fn from_corners(a: (u32, u32), b: (u32, u32)) -> Self {
        Self {
            x1: a.0.min(b.0),
            y1: a.1.min(b.1),
            x2: a.0.max(b.0),
            y2: a.1.max(b.1),
        }
    }

    pub fn width(&self) -> u32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> u32 {
        self.y2 - self.y1
    }

    /// Whether the selection covers no pixels.
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// The part of the selection that lies inside an image of the given size.
    ///
    /// The result may have zero width or height when the selection is outside the image.
    pub fn clamped_to(&self, width: u32, height: u32) -> Rect {
        let x = self.x1.min(width);
        let y = self.y1.min(height);

        Rect {
            x,
            y,
            width: self.x2.min(width).saturating_sub(x),
            height: self.y2.min(height).saturating_sub(y),
        }
    }
}

impl fmt::Display for SelectionRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})-({}, {})", self.x1, self.y1, self.x2, self.y2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_normalizes_any_drag_direction() {
        let expected = SelectionRect {
            x1: 10,
            y1: 20,
            x2: 60,
            y2: 80,
        };
        assert_eq!(SelectionRect::from_corners((10, 20), (60, 80)), expected);
        assert_eq!(SelectionRect::from_corners((60, 80), (10, 20)), expected);
        assert_eq!(SelectionRect::from_corners((60, 20), (10, 80)), expected);
        assert_eq!(SelectionRect::from_corners((10, 80), (60, 20)), expected);
    }

    #[test]
    fn test_degenerate_selections() {
        assert!(SelectionRect::from_corners((5, 5), (5, 5)).is_degenerate());
        assert!(SelectionRect::from_corners((5, 5), (40, 5)).is_degenerate());
        assert!(SelectionRect::from_corners((5, 5), (5, 40)).is_degenerate());
        assert!(!SelectionRect::from_corners((5, 5), (6, 6)).is_degenerate());
    }

    #[test]
    fn test_clamped_to_image_bounds() {
        let inside = SelectionRect::from_corners((10, 10), (20, 30));
        assert_eq!(
            inside.clamped_to(100, 100),
            Rect {
                x: 10,
                y: 10,
                width: 10,
                height: 20
            }
        );

        let overhanging = SelectionRect::from_corners((90, 95), (150, 120));
        assert_eq!(
            overhanging.clamped_to(100, 100),
            Rect {
                x: 90,
                y: 95,
                width: 10,
                height: 5
            }
        );

        let outside = SelectionRect::from_corners((120, 120), (150, 150));
        let clamped = outside.clamped_to(100, 100);
        assert_eq!((clamped.width, clamped.height), (0, 0));
    }
}
