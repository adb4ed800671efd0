//! Pointer event types consumed by the tools.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    /// Additive selection / angle-snapped drag.
    pub shift: bool,
    /// Clone selection / decouple mirrored handles.
    pub option: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        option: false,
    };

    /// Only shift held.
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        option: false,
    };

    /// Only option held.
    pub const OPTION: Modifiers = Modifiers {
        shift: false,
        option: true,
    };
}

/// A pointer sample delivered to a tool handler.
///
/// `down_point` is the position of the initiating pointer-down and
/// `delta` the movement since the previous sample; both are meaningful
/// during drags and equal to `point` / zero on a fresh down event.
/// `timestamp_ms` is monotonic wall-clock time, used only for
/// double-click detection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ToolEvent {
    /// Pointer position in world coordinates.
    pub point: Point,
    /// Position of the pointer-down that started the gesture.
    pub down_point: Point,
    /// Movement since the previous sample.
    pub delta: Vec2,
    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
    /// Monotonic timestamp in milliseconds.
    pub timestamp_ms: u64,
}

impl ToolEvent {
    /// Event for a fresh pointer-down at `point`.
    pub fn down(point: Point, modifiers: Modifiers, timestamp_ms: u64) -> Self {
        Self {
            point,
            down_point: point,
            delta: Vec2::ZERO,
            modifiers,
            timestamp_ms,
        }
    }

    /// Event for a drag sample.
    pub fn drag(
        point: Point,
        down_point: Point,
        delta: Vec2,
        modifiers: Modifiers,
        timestamp_ms: u64,
    ) -> Self {
        Self {
            point,
            down_point,
            delta,
            modifiers,
            timestamp_ms,
        }
    }

    /// Event for a buttonless pointer move.
    pub fn moved(point: Point, timestamp_ms: u64) -> Self {
        Self {
            point,
            down_point: point,
            delta: Vec2::ZERO,
            modifiers: Modifiers::NONE,
            timestamp_ms,
        }
    }

    /// Event for a pointer-up at `point`.
    pub fn up(point: Point, modifiers: Modifiers, timestamp_ms: u64) -> Self {
        Self {
            point,
            down_point: point,
            delta: Vec2::ZERO,
            modifiers,
            timestamp_ms,
        }
    }

    /// Total displacement since the gesture's pointer-down.
    pub fn drag_vector(&self) -> Vec2 {
        self.point - self.down_point
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_vector() {
        let event = ToolEvent::drag(
            Point::new(30.0, 45.0),
            Point::new(10.0, 5.0),
            Vec2::new(1.0, 1.0),
            Modifiers::NONE,
            100,
        );
        assert_eq!(event.drag_vector(), Vec2::new(20.0, 40.0));
    }
}
