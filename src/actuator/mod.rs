//! Pointer actuation: absolute moves and primary-button click cycles.

use crate::geometry::Point;
use crate::util::ClickerResult;

#[cfg(feature = "platform")]
mod enigo;

#[cfg(feature = "platform")]
pub use self::enigo::EnigoActuator;

/// Returns the absolute pointer position for a located target.
///
/// Sums saturate at the `i32` bounds, so an out-of-range target is clamped
/// to the screen edge instead of wrapping.
pub fn pointer_target(point: Point, offset: Point, origin: Point) -> Point {
    point + offset + origin
}

/// Virtual pointer driven by the search and click loops.
///
/// Failures are fatal to the calling loop; implementations should not retry
/// internally.
pub trait PointerActuator {
    /// Moves the pointer to an absolute screen coordinate.
    fn move_to(&mut self, target: Point) -> ClickerResult<()>;

    /// Presses the primary button.
    fn press(&mut self) -> ClickerResult<()>;

    /// Releases the primary button.
    fn release(&mut self) -> ClickerResult<()>;

    /// Moves to `point + offset + origin` and returns that position.
    fn move_to_target(&mut self, point: Point, offset: Point, origin: Point) -> ClickerResult<Point> {
        let target = pointer_target(point, offset, origin);
        self.move_to(target)?;
        Ok(target)
    }

    /// Performs one click cycle: release first, then press.
    ///
    /// The leading release clears a button left down by the previous cycle.
    fn click(&mut self) -> ClickerResult<()> {
        self.release()?;
        self.press()
    }
}

impl<A: PointerActuator + ?Sized> PointerActuator for Box<A> {
    fn move_to(&mut self, target: Point) -> ClickerResult<()> {
        (**self).move_to(target)
    }

    fn press(&mut self) -> ClickerResult<()> {
        (**self).press()
    }

    fn release(&mut self) -> ClickerResult<()> {
        (**self).release()
    }
}

#[cfg(test)]
mod tests {
    use super::{pointer_target, PointerActuator};
    use crate::geometry::Point;
    use crate::util::ClickerResult;

    #[derive(Default)]
    struct Log(Vec<&'static str>, Vec<Point>);

    impl PointerActuator for Log {
        fn move_to(&mut self, target: Point) -> ClickerResult<()> {
            self.1.push(target);
            Ok(())
        }

        fn press(&mut self) -> ClickerResult<()> {
            self.0.push("press");
            Ok(())
        }

        fn release(&mut self) -> ClickerResult<()> {
            self.0.push("release");
            Ok(())
        }
    }

    #[test]
    fn target_adds_offset_and_origin() {
        let target = pointer_target(Point::new(25, 40), Point::new(-65, 40), Point::new(0, 0));
        assert_eq!(target, Point::new(-40, 80));
    }

    #[test]
    fn target_saturates_instead_of_wrapping() {
        let target = pointer_target(Point::new(i32::MAX - 10, 0), Point::new(65, -40), Point::new(1, i32::MIN));
        assert_eq!(target, Point::new(i32::MAX, i32::MIN));
    }

    #[test]
    fn click_releases_before_pressing() {
        let mut log = Log::default();
        log.click().unwrap();
        log.click().unwrap();
        assert_eq!(log.0, ["release", "press", "release", "press"]);
    }

    #[test]
    fn move_to_target_moves_to_combined_point() {
        let mut log = Log::default();
        let moved = log
            .move_to_target(Point::new(25, 40), Point::new(-65, 40), Point::new(312, 186))
            .unwrap();
        assert_eq!(moved, Point::new(272, 266));
        assert_eq!(log.1, [Point::new(272, 266)]);
    }
}
