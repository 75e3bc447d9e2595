//! Screen-space geometry: integer points and capture regions.

use std::ops::Add;

use crate::util::{ClickerError, ClickerResult};

/// Integer 2D coordinate or displacement in screen pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Creates a point from its components.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Componentwise addition, saturating at the `i32` bounds.
impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Axis-aligned capture rectangle in screen coordinates.
///
/// Bounds are half-open: `right` and `bottom` are one past the last pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
}

impl Default for Region {
    /// A 1920x1080 screen anchored at the origin.
    fn default() -> Self {
        Self {
            left: 0,
            top: 0,
            right: 1920,
            bottom: 1080,
        }
    }
}

impl Region {
    /// Creates a region from its four bounds.
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> ClickerResult<Self> {
        if left >= right || top >= bottom {
            return Err(ClickerError::InvalidRegion {
                left,
                top,
                right,
                bottom,
            });
        }
        Ok(Self {
            left,
            top,
            right,
            bottom,
        })
    }

    /// Creates a region from its top-left corner and size.
    pub fn from_origin_size(origin: Point, width: u32, height: u32) -> ClickerResult<Self> {
        let invalid = ClickerError::InvalidRegion {
            left: origin.x,
            top: origin.y,
            right: origin.x.saturating_add_unsigned(width),
            bottom: origin.y.saturating_add_unsigned(height),
        };
        let right = i32::try_from(width)
            .ok()
            .and_then(|w| origin.x.checked_add(w))
            .ok_or_else(|| invalid.clone())?;
        let bottom = i32::try_from(height)
            .ok()
            .and_then(|h| origin.y.checked_add(h))
            .ok_or(invalid)?;
        Self::new(origin.x, origin.y, right, bottom)
    }

    pub fn left(&self) -> i32 {
        self.left
    }

    pub fn top(&self) -> i32 {
        self.top
    }

    pub fn right(&self) -> i32 {
        self.right
    }

    pub fn bottom(&self) -> i32 {
        self.bottom
    }

    /// Returns the top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> usize {
        self.right.abs_diff(self.left) as usize
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> usize {
        self.bottom.abs_diff(self.top) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::{Point, Region};
    use crate::ClickerError;

    #[test]
    fn region_from_origin_size_matches_bounds() {
        let region = Region::from_origin_size(Point::new(312, 186), 1920, 1080).unwrap();
        assert_eq!(region, Region::new(312, 186, 2232, 1266).unwrap());
        assert_eq!(region.width(), 1920);
        assert_eq!(region.height(), 1080);
        assert_eq!(region.origin(), Point::new(312, 186));
    }

    #[test]
    fn region_rejects_empty_and_inverted_bounds() {
        assert_eq!(
            Region::new(10, 0, 10, 5).unwrap_err(),
            ClickerError::InvalidRegion {
                left: 10,
                top: 0,
                right: 10,
                bottom: 5,
            }
        );
        assert!(Region::new(0, 9, 5, 3).is_err());
        assert!(Region::from_origin_size(Point::new(0, 0), 0, 10).is_err());
        assert!(Region::from_origin_size(Point::new(i32::MAX - 1, 0), 10, 10).is_err());
    }

    #[test]
    fn points_add_componentwise() {
        let p = Point::new(25, 40) + Point::new(-65, 40) + Point::new(0, 0);
        assert_eq!(p, Point::new(-40, 80));
    }

    #[test]
    fn full_range_region_has_exact_size() {
        let region = Region::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX).unwrap();
        assert_eq!(region.width(), u32::MAX as usize);
        assert_eq!(region.height(), u32::MAX as usize);
    }

    #[test]
    fn point_addition_saturates() {
        assert_eq!(Point::new(i32::MAX, 5) + Point::new(10, 1), Point::new(i32::MAX, 6));
        assert_eq!(Point::new(i32::MIN, -3) + Point::new(-1, i32::MIN), Point::new(i32::MIN, i32::MIN));
    }
}
