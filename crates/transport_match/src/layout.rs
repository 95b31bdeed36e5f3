//! Screen-space geometry shared by input routing and rendering.
//!
//! Screen coordinates have their origin at the window's top-left corner with
//! y growing downwards, matching `Window::cursor_position`.

use bevy::math::{Rect, Vec2};

pub const WINDOW_WIDTH: f32 = 800.0;
pub const WINDOW_HEIGHT: f32 = 600.0;
pub const FRAME_RATE: f64 = 60.0;

pub const PIECE_SIZE: Vec2 = Vec2::splat(120.0);

/// Drops closer than this to the starting slot count as a click, not a drag.
pub const SNAP_BACK_DISTANCE: f32 = 20.0;

pub const PLAY_BUTTON: Rect = screen_rect(
    WINDOW_WIDTH / 2.0 - 150.0,
    WINDOW_HEIGHT / 2.0 - 60.0,
    300.0,
    80.0,
);
pub const EXIT_BUTTON: Rect = screen_rect(
    WINDOW_WIDTH / 2.0 - 100.0,
    WINDOW_HEIGHT / 2.0 + 50.0,
    200.0,
    60.0,
);
pub const BACK_BUTTON: Rect = screen_rect(10.0, 10.0, 100.0, 50.0);

/// Extra size of the Play button's glow, split evenly on both sides.
pub const GLOW_INFLATE: f32 = 10.0;

/// A horizontal row of evenly spaced piece slots
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Row {
    pub start_x: f32,
    pub y: f32,
    pub spacing: f32,
}

impl Row {
    /// Top-left corner of the `index`-th slot
    pub const fn slot(&self, index: usize) -> Vec2 {
        Vec2::new(self.start_x + index as f32 * self.spacing, self.y)
    }
}

pub const TARGET_ROW: Row = Row {
    start_x: 80.0,
    y: 380.0,
    spacing: 240.0,
};

pub const MOVABLE_ROW: Row = Row {
    start_x: 80.0,
    y: 180.0,
    spacing: 240.0,
};

pub const fn screen_rect(x: f32, y: f32, width: f32, height: f32) -> Rect {
    Rect {
        min: Vec2::new(x, y),
        max: Vec2::new(x + width, y + height),
    }
}

/// Point test including the top/left edges and excluding the bottom/right ones.
pub fn contains(rect: Rect, point: Vec2) -> bool {
    point.x >= rect.min.x && point.x < rect.max.x && point.y >= rect.min.y && point.y < rect.max.y
}

/// True when the rectangles share a positive area; touching edges do not count.
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.min.x < b.max.x && b.min.x < a.max.x && a.min.y < b.max.y && b.min.y < a.max.y
}

/// Converts a screen position to a world position for a default `Camera2d`.
pub fn screen_to_world(point: Vec2) -> Vec2 {
    Vec2::new(point.x - WINDOW_WIDTH / 2.0, WINDOW_HEIGHT / 2.0 - point.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_match_the_menu_layout() {
        assert_eq!(PLAY_BUTTON, screen_rect(250.0, 240.0, 300.0, 80.0), "play button");
        assert_eq!(EXIT_BUTTON, screen_rect(300.0, 350.0, 200.0, 60.0), "exit button");
        assert!(!overlaps(PLAY_BUTTON, EXIT_BUTTON), "menu buttons must not overlap");
    }

    #[test]
    fn contains_is_half_open() {
        let rect = screen_rect(10.0, 10.0, 100.0, 50.0);
        assert!(contains(rect, Vec2::new(10.0, 10.0)), "top-left corner is inside");
        assert!(contains(rect, Vec2::new(109.9, 59.9)), "just inside bottom-right");
        assert!(!contains(rect, Vec2::new(110.0, 30.0)), "right edge is outside");
        assert!(!contains(rect, Vec2::new(50.0, 60.0)), "bottom edge is outside");
    }

    #[test]
    fn touching_rects_do_not_overlap() {
        let left = screen_rect(0.0, 0.0, 120.0, 120.0);
        let right = screen_rect(120.0, 0.0, 120.0, 120.0);
        let shifted = screen_rect(119.0, 119.0, 120.0, 120.0);
        assert!(!overlaps(left, right), "shared edge is not an overlap");
        assert!(overlaps(left, shifted), "one pixel of overlap counts");
    }

    #[test]
    fn rows_are_evenly_spaced() {
        assert_eq!(TARGET_ROW.slot(0), Vec2::new(80.0, 380.0), "first target slot");
        assert_eq!(TARGET_ROW.slot(2), Vec2::new(560.0, 380.0), "last target slot");
        assert_eq!(MOVABLE_ROW.slot(1), Vec2::new(320.0, 180.0), "middle movable slot");
    }

    #[test]
    fn screen_center_is_world_origin() {
        assert_eq!(screen_to_world(Vec2::new(400.0, 300.0)), Vec2::ZERO, "center");
        assert_eq!(
            screen_to_world(Vec2::ZERO),
            Vec2::new(-400.0, 300.0),
            "top-left corner maps to the upper-left of the world"
        );
    }
}
