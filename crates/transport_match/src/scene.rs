use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bits_helpers::assets::ImageFallback;
use bits_helpers::input::pointer_screen_position;
use bits_helpers::rtl::rtl_text;
use bits_helpers::screen::despawn_screen;

use crate::game::{GameState, start_round};
use crate::item::Role;
use crate::layout::{
    self, BACK_BUTTON, EXIT_BUTTON, GLOW_INFLATE, PIECE_SIZE, PLAY_BUTTON, WINDOW_HEIGHT,
    WINDOW_WIDTH,
};
use crate::session::GameSession;

pub const TITLE: &str = "لعبة وسائل المواصلات";
const INSTRUCTIONS: &str = "ضع كل وسيلة مواصلات بمكانها الصحيح";
const BACK_LABEL: &str = "رجوع";
const WIN_MESSAGE: &str = "ممتاز! إجابة صحيحة";
const WIN_HINT: &str = "اضغط للعودة للقائمة";

const BG_COLOR_MENU: Color = rgb(135, 206, 235);
const BG_COLOR_GAME: Color = rgb(240, 255, 240);
const BG_COLOR_WIN: Color = rgb(255, 223, 0);
const TITLE_BLUE: Color = rgb(9, 132, 227);
const RED: Color = rgb(220, 20, 60);
const RED_HOVER: Color = rgb(255, 80, 80);
const HINT_GRAY: Color = rgb(50, 50, 50);
const PANEL_WHITE: Color = Color::srgba(1.0, 1.0, 1.0, 0.75);

const TARGET_PLACEHOLDER: Color = Color::BLACK;
const MOVABLE_PLACEHOLDER: Color = RED;
const TARGET_FRAME: f32 = 3.0;
const TARGET_OUTLINE: f32 = 1.0;

const FONT_MAIN: &str = "fonts/NotoSansArabic-Bold.ttf";
const FONT_TITLE: &str = "fonts/NotoSansArabic-Black.ttf";
const FONT_UI: &str = "fonts/NotoSansArabic-Regular.ttf";

const FONT_SIZE_MAIN: f32 = 40.0;
const FONT_SIZE_TITLE: f32 = 30.0;
const FONT_SIZE_UI: f32 = 30.0;

const HUE_STEP: f32 = 2.0;

const fn rgb(red: u8, green: u8, blue: u8) -> Color {
    Color::srgb(
        red as f32 / 255.0,
        green as f32 / 255.0,
        blue as f32 / 255.0,
    )
}

#[derive(Component)]
struct MenuScreen;

#[derive(Component)]
struct PlayingScreen;

#[derive(Component)]
struct WonScreen;

#[derive(Component)]
struct PlayButton;

#[derive(Component)]
struct PlayButtonGlow;

#[derive(Component)]
struct ExitButton;

/// Sprite drawing one piece of the session
#[derive(Component, Clone, Copy, Debug)]
struct PieceSprite {
    role: Role,
    index: usize,
}

/// Rainbow animation of the Play button
#[derive(Resource, Debug, Default)]
pub struct MenuGlow {
    hue: f32,
}

impl MenuGlow {
    pub const fn hue(&self) -> f32 {
        self.hue
    }

    /// Moves one frame along the color wheel, wrapping at 360.
    pub fn advance(&mut self) {
        self.hue = (self.hue + HUE_STEP) % 360.0;
    }

    pub fn button_color(&self) -> Color {
        Color::hsv(self.hue, 1.0, 1.0)
    }

    /// Same hue at half brightness per channel
    pub fn glow_color(&self) -> Color {
        let color = self.button_color().to_srgba();
        Color::srgb(color.red * 0.5, color.green * 0.5, color.blue * 0.5)
    }
}

#[derive(Resource)]
struct GameFonts {
    main: Handle<Font>,
    title: Handle<Font>,
    ui: Handle<Font>,
}

impl FromWorld for GameFonts {
    fn from_world(world: &mut World) -> Self {
        let asset_server = world.resource::<AssetServer>();
        Self {
            main: asset_server.load(FONT_MAIN),
            title: asset_server.load(FONT_TITLE),
            ui: asset_server.load(FONT_UI),
        }
    }
}

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MenuGlow>()
            .init_resource::<GameFonts>()
            .add_systems(OnEnter(GameState::Menu), spawn_menu)
            .add_systems(OnExit(GameState::Menu), despawn_screen::<MenuScreen>)
            .add_systems(OnEnter(GameState::Playing), spawn_playing.after(start_round))
            .add_systems(OnExit(GameState::Playing), despawn_screen::<PlayingScreen>)
            .add_systems(OnEnter(GameState::Won), spawn_won)
            .add_systems(OnExit(GameState::Won), despawn_screen::<WonScreen>)
            .add_systems(
                Update,
                (
                    (animate_play_button, highlight_exit_button)
                        .run_if(in_state(GameState::Menu)),
                    sync_piece_sprites.run_if(in_state(GameState::Playing)),
                ),
            );
    }
}

fn rect_node(rect: Rect) -> Node {
    Node {
        position_type: PositionType::Absolute,
        left: Val::Px(rect.min.x),
        top: Val::Px(rect.min.y),
        width: Val::Px(rect.width()),
        height: Val::Px(rect.height()),
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        ..default()
    }
}

/// Full-width row that centers its content horizontally.
fn centered_row(top: f32, shift: f32) -> Node {
    Node {
        position_type: PositionType::Absolute,
        top: Val::Px(top),
        left: Val::Px(shift),
        width: Val::Percent(100.0),
        justify_content: JustifyContent::Center,
        ..default()
    }
}

fn label(text: &str, font: &Handle<Font>, font_size: f32, color: Color) -> impl Bundle {
    (
        Text::new(rtl_text(text)),
        TextFont {
            font: font.clone(),
            font_size,
            ..default()
        },
        TextColor(color),
        TextLayout::new_with_justify(JustifyText::Center),
    )
}

fn background(asset_server: &AssetServer, path: &'static str) -> impl Bundle {
    (
        Sprite {
            image: asset_server.load(path),
            custom_size: Some(Vec2::new(WINDOW_WIDTH, WINDOW_HEIGHT)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, -10.0),
        ImageFallback::Hide,
    )
}

/// Panel with a translucent white backdrop behind one line of text
fn text_panel(
    parent: &mut ChildBuilder,
    text: &str,
    font: &Handle<Font>,
    font_size: f32,
    color: Color,
    padding: UiRect,
    radius: f32,
) {
    parent
        .spawn((
            Node {
                padding,
                ..default()
            },
            BackgroundColor(PANEL_WHITE),
            BorderRadius::all(Val::Px(radius)),
        ))
        .with_children(|panel| {
            panel.spawn(label(text, font, font_size, color));
        });
}

fn spawn_menu(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    fonts: Res<GameFonts>,
    glow: Res<MenuGlow>,
    mut clear_color: ResMut<ClearColor>,
) {
    clear_color.0 = BG_COLOR_MENU;
    commands.spawn((background(&asset_server, "screens/main.png"), MenuScreen));

    // Title with a drop shadow
    commands
        .spawn((centered_row(148.0, 3.0), ZIndex(0), MenuScreen))
        .with_children(|row| {
            row.spawn(label(TITLE, &fonts.title, FONT_SIZE_TITLE, Color::BLACK));
        });
    commands
        .spawn((centered_row(145.0, 0.0), ZIndex(1), MenuScreen))
        .with_children(|row| {
            row.spawn(label(TITLE, &fonts.title, FONT_SIZE_TITLE, TITLE_BLUE));
        });

    let inset = GLOW_INFLATE / 2.0;
    let glow_rect = Rect::from_corners(
        PLAY_BUTTON.min - Vec2::splat(inset),
        PLAY_BUTTON.max + Vec2::splat(inset),
    );
    commands.spawn((
        rect_node(glow_rect),
        BackgroundColor(glow.glow_color()),
        BorderRadius::all(Val::Px(20.0)),
        ZIndex(0),
        PlayButtonGlow,
        MenuScreen,
    ));
    commands
        .spawn((
            rect_node(PLAY_BUTTON),
            BackgroundColor(glow.button_color()),
            BorderRadius::all(Val::Px(15.0)),
            ZIndex(1),
            PlayButton,
            MenuScreen,
        ))
        .with_children(|button| {
            button.spawn(label("Play", &fonts.main, FONT_SIZE_MAIN, Color::WHITE));
        });

    commands
        .spawn((
            rect_node(EXIT_BUTTON),
            BackgroundColor(RED),
            BorderRadius::all(Val::Px(15.0)),
            ExitButton,
            MenuScreen,
        ))
        .with_children(|button| {
            button.spawn(label("Exit", &fonts.main, FONT_SIZE_MAIN, Color::WHITE));
        });
}

fn animate_play_button(
    mut glow: ResMut<MenuGlow>,
    mut button: Query<&mut BackgroundColor, (With<PlayButton>, Without<PlayButtonGlow>)>,
    mut halo: Query<&mut BackgroundColor, (With<PlayButtonGlow>, Without<PlayButton>)>,
) {
    glow.advance();
    for mut color in &mut button {
        color.0 = glow.button_color();
    }
    for mut color in &mut halo {
        color.0 = glow.glow_color();
    }
}

fn highlight_exit_button(
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut button: Query<&mut BackgroundColor, With<ExitButton>>,
) {
    let hovered = pointer_screen_position(&touches, &windows)
        .is_some_and(|pointer| layout::contains(EXIT_BUTTON, pointer));
    let wanted = if hovered { RED_HOVER } else { RED };
    for mut color in &mut button {
        if color.0 != wanted {
            color.0 = wanted;
        }
    }
}

fn spawn_playing(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    fonts: Res<GameFonts>,
    session: Res<GameSession>,
    mut clear_color: ResMut<ClearColor>,
) {
    clear_color.0 = BG_COLOR_GAME;
    commands.spawn((background(&asset_server, "screens/in-game.png"), PlayingScreen));

    commands
        .spawn((centered_row(80.0, 0.0), PlayingScreen))
        .with_children(|row| {
            text_panel(
                row,
                INSTRUCTIONS,
                &fonts.ui,
                FONT_SIZE_UI,
                Color::BLACK,
                UiRect::axes(Val::Px(10.0), Val::Px(5.0)),
                10.0,
            );
        });

    commands
        .spawn((
            rect_node(BACK_BUTTON),
            BackgroundColor(RED),
            BorderRadius::all(Val::Px(10.0)),
            PlayingScreen,
        ))
        .with_children(|button| {
            button.spawn(label(BACK_LABEL, &fonts.ui, FONT_SIZE_UI, Color::WHITE));
        });

    for (index, target) in session.targets().iter().enumerate() {
        let center = layout::screen_to_world(target.rect.center());
        commands
            .spawn((
                Sprite {
                    image: asset_server.load(target.kind.terrain_image()),
                    custom_size: Some(PIECE_SIZE),
                    ..default()
                },
                Transform::from_translation(center.extend(1.0)),
                ImageFallback::Placeholder(TARGET_PLACEHOLDER),
                PieceSprite {
                    role: Role::Target,
                    index,
                },
                PlayingScreen,
            ))
            .with_children(|piece| {
                for (offset, size) in frame_edges(PIECE_SIZE, TARGET_FRAME) {
                    piece.spawn((
                        Sprite::from_color(Color::WHITE, size),
                        Transform::from_translation(offset.extend(0.1)),
                    ));
                }
                for (offset, size) in frame_edges(PIECE_SIZE, TARGET_OUTLINE) {
                    piece.spawn((
                        Sprite::from_color(Color::BLACK, size),
                        Transform::from_translation(offset.extend(0.2)),
                    ));
                }
            });
    }

    for (index, movable) in session.movables().iter().enumerate() {
        let center = layout::screen_to_world(movable.rect.center());
        commands.spawn((
            Sprite {
                image: asset_server.load(movable.kind.vehicle_image()),
                custom_size: Some(PIECE_SIZE),
                ..default()
            },
            Transform::from_translation(center.extend(2.0)),
            ImageFallback::Placeholder(MOVABLE_PLACEHOLDER),
            PieceSprite {
                role: Role::Movable,
                index,
            },
            PlayingScreen,
        ));
    }
}

/// Border strips drawn inside a piece of `size`, as (offset from center, strip size).
fn frame_edges(size: Vec2, width: f32) -> [(Vec2, Vec2); 4] {
    let half = size / 2.0 - Vec2::splat(width / 2.0);
    let horizontal = Vec2::new(size.x, width);
    let vertical = Vec2::new(width, size.y - 2.0 * width);
    [
        (Vec2::new(0.0, half.y), horizontal),
        (Vec2::new(0.0, -half.y), horizontal),
        (Vec2::new(-half.x, 0.0), vertical),
        (Vec2::new(half.x, 0.0), vertical),
    ]
}

/// Places piece sprites where the session has them; the dragged piece is drawn on top.
fn sync_piece_sprites(
    session: Res<GameSession>,
    mut pieces: Query<(&PieceSprite, &mut Transform)>,
) {
    for (piece, mut transform) in &mut pieces {
        let (item, depth) = match piece.role {
            Role::Target => (session.targets().get(piece.index), 1.0),
            Role::Movable if session.dragging() == Some(piece.index) => {
                (session.movables().get(piece.index), 3.0)
            }
            Role::Movable => (session.movables().get(piece.index), 2.0),
        };
        let Some(item) = item else {
            continue;
        };

        let translation = layout::screen_to_world(item.rect.center()).extend(depth);
        if transform.translation != translation {
            transform.translation = translation;
        }
    }
}

fn spawn_won(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    fonts: Res<GameFonts>,
    mut clear_color: ResMut<ClearColor>,
) {
    clear_color.0 = BG_COLOR_WIN;
    commands.spawn((background(&asset_server, "screens/win.png"), WonScreen));

    commands
        .spawn((centered_row(WINDOW_HEIGHT / 2.0 - 82.0, 0.0), WonScreen))
        .with_children(|row| {
            text_panel(
                row,
                WIN_MESSAGE,
                &fonts.title,
                FONT_SIZE_TITLE,
                Color::BLACK,
                UiRect::axes(Val::Px(20.0), Val::Px(10.0)),
                20.0,
            );
        });

    commands
        .spawn((centered_row(WINDOW_HEIGHT / 2.0 + 23.0, 0.0), WonScreen))
        .with_children(|row| {
            text_panel(
                row,
                WIN_HINT,
                &fonts.ui,
                FONT_SIZE_UI,
                HINT_GRAY,
                UiRect::axes(Val::Px(10.0), Val::Px(5.0)),
                10.0,
            );
        });
}
