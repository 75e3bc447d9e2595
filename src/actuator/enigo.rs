//! Pointer actuator backed by `enigo`.

use enigo::{Button, Coordinate, Direction, Enigo, Mouse, Settings};

use super::PointerActuator;
use crate::geometry::Point;
use crate::util::{ClickerError, ClickerResult};

/// Drives the system pointer through enigo's synthetic input.
pub struct EnigoActuator {
    enigo: Enigo,
}

impl EnigoActuator {
    /// Connects to the platform input backend.
    pub fn new() -> ClickerResult<Self> {
        let enigo = Enigo::new(&Settings::default()).map_err(|err| ClickerError::Actuator {
            reason: err.to_string(),
        })?;
        Ok(Self { enigo })
    }

    fn button(&mut self, direction: Direction) -> ClickerResult<()> {
        self.enigo
            .button(Button::Left, direction)
            .map_err(|err| ClickerError::Actuator {
                reason: err.to_string(),
            })
    }
}

impl PointerActuator for EnigoActuator {
    fn move_to(&mut self, target: Point) -> ClickerResult<()> {
        self.enigo
            .move_mouse(target.x, target.y, Coordinate::Abs)
            .map_err(|err| ClickerError::Actuator {
                reason: err.to_string(),
            })
    }

    fn press(&mut self) -> ClickerResult<()> {
        self.button(Direction::Press)
    }

    fn release(&mut self) -> ClickerResult<()> {
        self.button(Direction::Release)
    }
}
