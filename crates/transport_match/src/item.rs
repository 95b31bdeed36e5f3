use bevy::math::{Rect, Vec2};
use strum::EnumIter;

use crate::layout::{self, PIECE_SIZE};

/// Category shared by a vehicle and the terrain it belongs on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
pub enum Kind {
    Road,
    Sea,
    Sky,
}

impl Kind {
    pub const fn vehicle_name(self) -> &'static str {
        match self {
            Self::Road => "Car",
            Self::Sea => "Ship",
            Self::Sky => "Plane",
        }
    }

    pub const fn terrain_name(self) -> &'static str {
        match self {
            Self::Road => "Road",
            Self::Sea => "Sea",
            Self::Sky => "Sky",
        }
    }

    pub const fn vehicle_image(self) -> &'static str {
        match self {
            Self::Road => "in-game/car.png",
            Self::Sea => "in-game/ship.png",
            Self::Sky => "in-game/plane.png",
        }
    }

    pub const fn terrain_image(self) -> &'static str {
        match self {
            Self::Road => "in-game/road.png",
            Self::Sea => "in-game/sea.png",
            Self::Sky => "in-game/sky.png",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Fixed drop zone
    Target,
    /// Piece the player drags
    Movable,
}

/// One puzzle piece, in screen coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct DraggableItem {
    pub name: &'static str,
    pub kind: Kind,
    pub role: Role,
    /// Top-left corner the piece returns to
    pub original_position: Vec2,
    pub rect: Rect,
    pub is_dragging: bool,
    /// Set once the piece sits on its target; matched pieces no longer move.
    pub is_matched: bool,
    drag_offset: Vec2,
}

impl DraggableItem {
    pub fn new(name: &'static str, kind: Kind, role: Role, position: Vec2) -> Self {
        Self {
            name,
            kind,
            role,
            original_position: position,
            rect: Rect::from_corners(position, position + PIECE_SIZE),
            is_dragging: false,
            is_matched: false,
            drag_offset: Vec2::ZERO,
        }
    }

    pub fn target(kind: Kind, position: Vec2) -> Self {
        Self::new(kind.terrain_name(), kind, Role::Target, position)
    }

    pub fn movable(kind: Kind, position: Vec2) -> Self {
        Self::new(kind.vehicle_name(), kind, Role::Movable, position)
    }

    pub fn is_target(&self) -> bool {
        self.role == Role::Target
    }

    pub const fn position(&self) -> Vec2 {
        self.rect.min
    }

    /// Starts dragging when the pointer is on a free movable piece.
    ///
    /// Returns false, changing nothing, for targets, matched pieces, pieces
    /// already being dragged and pointers outside the piece.
    pub fn try_start_drag(&mut self, pointer: Vec2) -> bool {
        if self.is_target()
            || self.is_matched
            || self.is_dragging
            || !layout::contains(self.rect, pointer)
        {
            return false;
        }
        self.is_dragging = true;
        self.drag_offset = pointer - self.rect.min;
        true
    }

    pub fn update_drag(&mut self, pointer: Vec2) {
        if self.is_dragging {
            self.move_to(pointer - self.drag_offset);
        }
    }

    /// Ends the drag where the piece currently is.
    pub fn stop_drag(&mut self) {
        self.is_dragging = false;
    }

    pub fn return_to_start(&mut self) {
        self.move_to(self.original_position);
    }

    /// Distance travelled from the starting slot
    pub fn displacement(&self) -> f32 {
        self.rect.min.distance(self.original_position)
    }

    pub fn center_on(&mut self, other: Rect) {
        self.move_to(other.center() - self.rect.half_size());
    }

    fn move_to(&mut self, top_left: Vec2) {
        let size = self.rect.size();
        self.rect = Rect::from_corners(top_left, top_left + size);
    }
}
