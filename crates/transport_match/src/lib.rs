use bevy::prelude::*;
use bits_helpers::AppSettings;

pub mod audio;
pub mod game;
pub mod item;
pub mod layout;
pub mod scene;
pub mod session;

use audio::GameAudioPlugin;
use game::GamePlugin;
use scene::{ScenePlugin, TITLE};

/// Entry point for the game
pub fn run() -> AppExit {
    bits_helpers::get_default_app(AppSettings {
        title: TITLE,
        width: layout::WINDOW_WIDTH,
        height: layout::WINDOW_HEIGHT,
        frame_rate: layout::FRAME_RATE,
    })
    .add_plugins((GamePlugin, ScenePlugin, GameAudioPlugin))
    .add_systems(Startup, setup_camera)
    .run()
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
