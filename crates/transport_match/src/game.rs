use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bits_helpers::input::{
    just_pressed_screen_position, pointer_just_released, pointer_screen_position,
};

use crate::audio::{PlaySfx, Sfx};
use crate::layout::{self, BACK_BUTTON, EXIT_BUTTON, PLAY_BUTTON};
use crate::session::{DropOutcome, GameSession};

#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash, Default, States)]
pub enum GameState {
    #[default]
    Menu,
    Playing,
    Won,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuButton {
    Play,
    Exit,
}

pub fn menu_button_at(pointer: Vec2) -> Option<MenuButton> {
    if layout::contains(PLAY_BUTTON, pointer) {
        Some(MenuButton::Play)
    } else if layout::contains(EXIT_BUTTON, pointer) {
        Some(MenuButton::Exit)
    } else {
        None
    }
}

/// Source of the per-round shuffles
#[derive(Resource)]
pub struct RoundRng(pub fastrand::Rng);

impl Default for RoundRng {
    fn default() -> Self {
        Self(fastrand::Rng::new())
    }
}

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<GameSession>()
            .init_resource::<RoundRng>()
            .add_systems(OnEnter(GameState::Menu), discard_round)
            .add_systems(OnEnter(GameState::Playing), start_round)
            .add_systems(
                Update,
                (
                    handle_menu_press.run_if(in_state(GameState::Menu)),
                    (handle_playing_press, follow_pointer, handle_release)
                        .chain()
                        .run_if(in_state(GameState::Playing)),
                    handle_won_press.run_if(in_state(GameState::Won)),
                ),
            );
    }
}

pub fn start_round(mut session: ResMut<GameSession>, mut rng: ResMut<RoundRng>) {
    *session = GameSession::new_round(&mut rng.0);
    let movables: Vec<&str> = session.movables().iter().map(|item| item.name).collect();
    let targets: Vec<&str> = session.targets().iter().map(|item| item.name).collect();
    info!("New round: {movables:?} over {targets:?}");
}

fn discard_round(mut session: ResMut<GameSession>) {
    *session = GameSession::default();
}

fn handle_menu_press(
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: EventWriter<AppExit>,
) {
    let Some(pointer) = just_pressed_screen_position(&buttons, &touches, &windows) else {
        return;
    };

    match menu_button_at(pointer) {
        Some(MenuButton::Play) => next_state.set(GameState::Playing),
        Some(MenuButton::Exit) => {
            info!("Exit requested");
            exit.send(AppExit::Success);
        }
        None => {}
    }
}

fn handle_playing_press(
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut session: ResMut<GameSession>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Some(pointer) = just_pressed_screen_position(&buttons, &touches, &windows) else {
        return;
    };

    if layout::contains(BACK_BUTTON, pointer) {
        info!("Round abandoned, back to the menu");
        next_state.set(GameState::Menu);
        return;
    }

    if let Some(index) = session.press(pointer) {
        debug!("Dragging {}", session.movables().get(index).map_or("?", |item| item.name));
    }
}

fn follow_pointer(
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut session: ResMut<GameSession>,
) {
    if session.dragging().is_none() {
        return;
    }
    if let Some(pointer) = pointer_screen_position(&touches, &windows) {
        session.drag_to(pointer);
    }
}

fn handle_release(
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    mut session: ResMut<GameSession>,
    mut sfx: EventWriter<PlaySfx>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !pointer_just_released(&buttons, &touches) {
        return;
    }

    let outcome = session.release();
    match outcome {
        DropOutcome::NoDrag => return,
        DropOutcome::Jitter { .. } => debug!("Piece barely moved, snapped back"),
        _ => debug!("Drop resolved: {outcome:?}"),
    }

    if let Some(effect) = Sfx::for_drop(outcome) {
        sfx.send(PlaySfx(effect));
    }

    if session.take_win() {
        info!("Every vehicle is in place, round won");
        next_state.set(GameState::Won);
    }
}

fn handle_won_press(
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if just_pressed_screen_position(&buttons, &touches, &windows).is_some() {
        next_state.set(GameState::Menu);
    }
}
