use bevy::asset::AssetMetaCheck;
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy::window::{WindowMode, WindowResolution};
use bevy_framepace::{FramepacePlugin, FramepaceSettings, Limiter};

use crate::assets::AssetFallbackPlugin;

/// Directory, relative to the crate, that holds images, fonts and sounds.
pub const ASSETS_DIR: &str = "assets";

const LOG_FILTER: &str = "wgpu=error,naga=warn,symphonia=warn";

/// Window and frame pacing for a game
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AppSettings<'a> {
    pub title: &'a str,
    pub width: f32,
    pub height: f32,
    pub frame_rate: f64,
}

// Creates a Bevy app with the settings every game here shares
// This prevent duplication / errors accross different games
pub fn get_default_app(settings: AppSettings<'_>) -> App {
    let mut app = App::new();

    let asset_plugin = AssetPlugin {
        mode: bevy::asset::AssetMode::Unprocessed,
        file_path: ASSETS_DIR.to_owned(),
        processed_file_path: "imported_assets/Default".to_owned(),
        watch_for_changes_override: None,
        meta_check: AssetMetaCheck::Never,
    };

    let window_plugin = WindowPlugin {
        primary_window: Some(Window {
            title: settings.title.to_owned(),
            present_mode: bevy::window::PresentMode::Fifo,
            resolution: WindowResolution::new(settings.width, settings.height),
            resizable: false,
            mode: WindowMode::Windowed,
            ..default()
        }),
        ..default()
    };

    let log_plugin = LogPlugin {
        level: Level::INFO,
        filter: LOG_FILTER.to_owned(),
        ..default()
    };

    // Music and effects go through kira, so Bevy's own audio output is not opened.
    app.add_plugins(
        DefaultPlugins
            .set(asset_plugin)
            .set(window_plugin)
            .set(log_plugin)
            .disable::<bevy::audio::AudioPlugin>(),
    );

    app.add_plugins(FramepacePlugin);
    app.insert_resource(FramepaceSettings {
        limiter: Limiter::from_framerate(settings.frame_rate),
    });

    app.insert_resource(ClearColor(Color::BLACK));
    app.add_plugins(AssetFallbackPlugin);

    app
}
