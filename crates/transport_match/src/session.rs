use bevy::prelude::*;
use strum::IntoEnumIterator;

use crate::item::{DraggableItem, Kind};
use crate::layout::{self, MOVABLE_ROW, SNAP_BACK_DISTANCE, TARGET_ROW};

/// What happened when the dragged piece was let go
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// Nothing was being dragged
    NoDrag,
    /// Released too close to its slot to count as a move
    Jitter { movable: usize },
    Matched { movable: usize, target: usize },
    Mismatched { movable: usize, target: usize },
    /// Dropped away from every target
    Missed { movable: usize },
}

/// Pieces of the current round.
///
/// Targets and movables each hold every [`Kind`] exactly once, so every
/// movable has exactly one matching target.
#[derive(Resource, Debug, Default)]
pub struct GameSession {
    targets: Vec<DraggableItem>,
    movables: Vec<DraggableItem>,
    dragging: Option<usize>,
    won: bool,
}

impl GameSession {
    /// Lays out a fresh round, shuffling targets and movables independently.
    pub fn new_round(rng: &mut fastrand::Rng) -> Self {
        let mut target_kinds: Vec<Kind> = Kind::iter().collect();
        let mut movable_kinds = target_kinds.clone();
        rng.shuffle(&mut target_kinds);
        rng.shuffle(&mut movable_kinds);
        Self::with_kinds(&target_kinds, &movable_kinds)
    }

    /// Round with a fixed order, left to right, for each row.
    pub fn with_kinds(target_kinds: &[Kind], movable_kinds: &[Kind]) -> Self {
        let targets = target_kinds
            .iter()
            .enumerate()
            .map(|(slot, &kind)| DraggableItem::target(kind, TARGET_ROW.slot(slot)))
            .collect();
        let movables = movable_kinds
            .iter()
            .enumerate()
            .map(|(slot, &kind)| DraggableItem::movable(kind, MOVABLE_ROW.slot(slot)))
            .collect();

        Self {
            targets,
            movables,
            dragging: None,
            won: false,
        }
    }

    pub fn targets(&self) -> &[DraggableItem] {
        &self.targets
    }

    pub fn movables(&self) -> &[DraggableItem] {
        &self.movables
    }

    /// Index of the movable being dragged, if any
    pub const fn dragging(&self) -> Option<usize> {
        self.dragging
    }

    /// Starts dragging the first movable under the pointer.
    pub fn press(&mut self, pointer: Vec2) -> Option<usize> {
        if self.dragging.is_some() {
            return None;
        }
        let index = self
            .movables
            .iter_mut()
            .position(|movable| movable.try_start_drag(pointer))?;
        self.dragging = Some(index);
        Some(index)
    }

    pub fn drag_to(&mut self, pointer: Vec2) {
        if let Some(movable) = self.dragging.and_then(|index| self.movables.get_mut(index)) {
            movable.update_drag(pointer);
        }
    }

    /// Resolves a drop against the targets, in their left-to-right order.
    ///
    /// The first target overlapping the piece decides the outcome, even when
    /// a later one overlaps more.
    pub fn release(&mut self) -> DropOutcome {
        let Some(index) = self.dragging.take() else {
            return DropOutcome::NoDrag;
        };
        let Some(movable) = self.movables.get_mut(index) else {
            return DropOutcome::NoDrag;
        };
        movable.stop_drag();

        if movable.displacement() < SNAP_BACK_DISTANCE {
            movable.return_to_start();
            return DropOutcome::Jitter { movable: index };
        }

        let hit = self
            .targets
            .iter()
            .enumerate()
            .find(|(_, target)| layout::overlaps(target.rect, movable.rect));

        match hit {
            Some((target, zone)) if zone.kind == movable.kind => {
                movable.center_on(zone.rect);
                movable.is_matched = true;
                DropOutcome::Matched {
                    movable: index,
                    target,
                }
            }
            Some((target, _)) => {
                movable.return_to_start();
                DropOutcome::Mismatched {
                    movable: index,
                    target,
                }
            }
            None => {
                movable.return_to_start();
                DropOutcome::Missed { movable: index }
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.movables.is_empty() && self.movables.iter().all(|movable| movable.is_matched)
    }

    /// True the first time the round is found complete, false afterwards.
    pub fn take_win(&mut self) -> bool {
        if self.won || !self.is_complete() {
            return false;
        }
        self.won = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    const TARGETS: [Kind; 3] = [Kind::Road, Kind::Sea, Kind::Sky];
    const MOVABLES: [Kind; 3] = [Kind::Sea, Kind::Sky, Kind::Road];

    fn session() -> GameSession {
        GameSession::with_kinds(&TARGETS, &MOVABLES)
    }

    /// Drags the movable at `index` by its center so that it ends centered at `to`.
    fn drag(session: &mut GameSession, index: usize, to: Vec2) -> DropOutcome {
        let from = session.movables[index].rect.center();
        assert_eq!(session.press(from), Some(index), "pressing the piece grabs it");
        session.drag_to(to);
        session.release()
    }

    fn target_center(session: &GameSession, kind: Kind) -> Vec2 {
        session
            .targets()
            .iter()
            .find(|target| target.kind == kind)
            .map(|target| target.rect.center())
            .expect("every kind has a target")
    }

    #[test]
    fn every_round_pairs_each_kind_once() {
        let all: HashSet<Kind> = Kind::iter().collect();
        for seed in 0..200 {
            let session = GameSession::new_round(&mut fastrand::Rng::with_seed(seed));
            let targets: Vec<Kind> = session.targets().iter().map(|item| item.kind).collect();
            let movables: Vec<Kind> = session.movables().iter().map(|item| item.kind).collect();

            assert_eq!(targets.len(), 3, "three targets");
            assert_eq!(movables.len(), 3, "three movables");
            assert_eq!(targets.iter().copied().collect::<HashSet<_>>(), all, "targets distinct");
            assert_eq!(movables.iter().copied().collect::<HashSet<_>>(), all, "movables distinct");
            assert!(session.targets().iter().all(DraggableItem::is_target), "targets are fixed");
            assert!(
                session.movables().iter().all(|item| !item.is_target()),
                "movables can move"
            );
        }
    }

    #[test]
    fn shuffles_vary_between_rounds() {
        let mut rng = fastrand::Rng::with_seed(7);
        let layouts: HashSet<Vec<Kind>> = (0..50)
            .map(|_| {
                GameSession::new_round(&mut rng)
                    .movables()
                    .iter()
                    .map(|item| item.kind)
                    .collect()
            })
            .collect();
        assert!(layouts.len() > 1, "layout should not be fixed");
    }

    #[test]
    fn rows_follow_the_layout() {
        let session = session();
        for (slot, target) in session.targets().iter().enumerate() {
            assert_eq!(target.position(), TARGET_ROW.slot(slot), "target slot {slot}");
        }
        for (slot, movable) in session.movables().iter().enumerate() {
            assert_eq!(movable.original_position, MOVABLE_ROW.slot(slot), "movable slot {slot}");
            assert!(!movable.is_matched && !movable.is_dragging, "fresh flags");
        }
    }

    #[test]
    fn only_one_piece_is_dragged_at_a_time() {
        let mut session = session();
        let first = session.movables[0].rect.center();
        let second = session.movables[1].rect.center();

        assert_eq!(session.press(Vec2::new(5.0, 5.0)), None, "empty space grabs nothing");
        assert_eq!(session.press(first), Some(0), "first piece grabbed");
        assert_eq!(session.press(second), None, "second grab refused while dragging");
        assert_eq!(session.dragging(), Some(0), "first piece still dragged");
        assert!(!session.movables[1].is_dragging, "second piece untouched");
    }

    #[test]
    fn small_moves_snap_back_silently() {
        let mut session = session();
        let start = session.movables[0].rect.center();
        let outcome = drag(&mut session, 0, start + Vec2::new(12.0, 15.0));

        assert_eq!(outcome, DropOutcome::Jitter { movable: 0 }, "under 20px is a click");
        assert_eq!(
            session.movables[0].position(),
            session.movables[0].original_position,
            "piece is back home"
        );
        assert!(!session.movables[0].is_matched, "no match from a click");
        assert_eq!(session.dragging(), None, "drag released");
    }

    #[test]
    fn jitter_over_a_target_is_still_a_click() {
        let mut session = session();
        // Park the sea target right under the sea piece.
        session.targets[1].rect = session.movables[0].rect;
        let start = session.movables[0].rect.center();

        let outcome = drag(&mut session, 0, start + Vec2::new(5.0, 0.0));
        assert_eq!(outcome, DropOutcome::Jitter { movable: 0 }, "overlap is ignored");
        assert!(!session.movables[0].is_matched, "not matched");
    }

    #[test]
    fn matching_target_locks_the_piece_in_its_center() {
        let mut session = session();
        let sea = target_center(&session, Kind::Sea);

        let outcome = drag(&mut session, 0, sea + Vec2::new(30.0, -25.0));
        assert_eq!(
            outcome,
            DropOutcome::Matched {
                movable: 0,
                target: 1
            },
            "ship on the sea"
        );
        assert!(session.movables[0].is_matched, "ship matched");
        assert_eq!(session.movables[0].rect.center(), sea, "ship centered on the sea");

        assert_eq!(session.press(sea), None, "matched pieces cannot be picked up again");
    }

    #[test]
    fn wrong_target_sends_the_piece_home() {
        let mut session = session();
        let road = target_center(&session, Kind::Road);

        let outcome = drag(&mut session, 0, road);
        assert_eq!(
            outcome,
            DropOutcome::Mismatched {
                movable: 0,
                target: 0
            },
            "ship on the road"
        );
        assert_eq!(
            session.movables[0].position(),
            session.movables[0].original_position,
            "ship back home"
        );
        assert!(!session.movables[0].is_matched, "not matched");
    }

    #[test]
    fn empty_space_sends_the_piece_home() {
        let mut session = session();
        let outcome = drag(&mut session, 1, Vec2::new(700.0, 60.0));

        assert_eq!(outcome, DropOutcome::Missed { movable: 1 }, "no target hit");
        assert_eq!(
            session.movables[1].position(),
            session.movables[1].original_position,
            "plane back home"
        );
    }

    #[test]
    fn first_overlapping_target_wins() {
        let mut session = session();
        let sea = session.targets[1].rect;
        // Road now sits mostly under the sea zone but comes first in order.
        let nudge = Vec2::new(60.0, 60.0);
        session.targets[0].rect = Rect::from_corners(sea.min + nudge, sea.max + nudge);

        let outcome = drag(&mut session, 0, sea.center());
        assert_eq!(
            outcome,
            DropOutcome::Mismatched {
                movable: 0,
                target: 0
            },
            "earlier target decides even with less overlap"
        );
    }

    #[test]
    fn release_without_drag_does_nothing() {
        let mut session = session();
        assert_eq!(session.release(), DropOutcome::NoDrag, "nothing to drop");
    }

    #[test]
    fn win_is_reported_once_all_pieces_match() {
        let mut session = session();

        for (index, kind) in MOVABLES.into_iter().enumerate() {
            assert!(!session.take_win(), "not won before piece {index}");
            let center = target_center(&session, kind);
            let outcome = drag(&mut session, index, center);
            assert!(matches!(outcome, DropOutcome::Matched { .. }), "piece {index} matched");
        }

        assert!(session.is_complete(), "every piece matched");
        assert!(session.take_win(), "win fires");
        assert!(!session.take_win(), "and only once");
    }

    #[test]
    fn scenario_sea_sky_road() {
        let mut session = session();
        let sea = target_center(&session, Kind::Sea);

        drag(&mut session, 0, sea);
        assert!(session.movables[0].is_matched, "ship matched");
        for other in 1..3 {
            let movable = &session.movables[other];
            assert!(!movable.is_matched, "piece {other} unmatched");
            assert_eq!(movable.position(), movable.original_position, "piece {other} unmoved");
        }
        assert!(!session.take_win(), "one of three is not a win");

        let sky = target_center(&session, Kind::Sky);
        let road = target_center(&session, Kind::Road);
        drag(&mut session, 1, sky);
        drag(&mut session, 2, road);
        assert!(session.take_win(), "all three placed");
    }

    #[test]
    fn empty_session_is_never_won() {
        let mut session = GameSession::default();
        assert!(!session.is_complete(), "no pieces, no win");
        assert!(!session.take_win(), "no pieces, no win");
    }
}
