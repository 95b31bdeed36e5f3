use bevy::prelude::*;
use bevy_kira_audio::prelude::{
    Audio, AudioApp, AudioChannel, AudioControl, AudioInstance, AudioPlugin, AudioSource,
    PlaybackState,
};
use bits_helpers::assets::AssetCatalog;
use strum::IntoStaticStr;

use crate::game::GameState;
use crate::session::DropOutcome;

/// Background music, by asset path
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, IntoStaticStr)]
pub enum Track {
    #[strum(serialize = "sounds/main-screen-intro.mp3")]
    MenuIntro,
    #[strum(serialize = "sounds/main-intro.mp3")]
    MenuLoop,
    #[strum(serialize = "sounds/in-game-screen-intro.mp3")]
    GameIntro,
    #[strum(serialize = "sounds/in-game.mp3")]
    GameLoop,
    #[strum(serialize = "sounds/yay-win.mp3")]
    Win,
}

impl Track {
    pub fn path(self) -> &'static str {
        self.into()
    }
}

/// One-shot effects, by asset path
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, IntoStaticStr)]
pub enum Sfx {
    #[strum(serialize = "sounds/select-right.mp3")]
    Correct,
    #[strum(serialize = "sounds/select-wrong.mp3")]
    Wrong,
}

impl Sfx {
    pub fn path(self) -> &'static str {
        self.into()
    }

    /// Feedback for a drop; clicks that did not really move a piece stay silent.
    pub const fn for_drop(outcome: DropOutcome) -> Option<Self> {
        match outcome {
            DropOutcome::Matched { .. } => Some(Self::Correct),
            DropOutcome::Mismatched { .. } | DropOutcome::Missed { .. } => Some(Self::Wrong),
            DropOutcome::NoDrag | DropOutcome::Jitter { .. } => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayMode {
    Once,
    Looped,
}

/// The device that plays a single background track at a time.
pub trait MusicBackend {
    fn is_available(&self, track: Track) -> bool;
    fn stop(&mut self);
    fn play(&mut self, track: Track, mode: PlayMode);
}

/// Intro-then-loop music handoff.
///
/// An intro is played once with the end-of-track notification armed; the
/// notification then starts the remembered loop.
#[derive(Resource, Debug, Default)]
pub struct MusicSequencer {
    pending_loop: Option<Track>,
    end_armed: bool,
}

impl MusicSequencer {
    pub fn play_sequence(&mut self, backend: &mut impl MusicBackend, intro: Track, looped: Track) {
        if !backend.is_available(intro) {
            warn!("Intro {} not found, skipping to the loop", intro.path());
            self.play_loop(backend, looped);
            return;
        }

        backend.stop();
        backend.play(intro, PlayMode::Once);
        info!("Playing intro {}", intro.path());
        self.end_armed = true;
        self.pending_loop = Some(looped);
    }

    pub fn play_loop(&mut self, backend: &mut impl MusicBackend, track: Track) {
        backend.stop();
        self.end_armed = false;
        self.pending_loop = None;

        if backend.is_available(track) {
            backend.play(track, PlayMode::Looped);
            info!("Playing loop {}", track.path());
        } else {
            warn!("Loop {} not found, music stays silent", track.path());
        }
    }

    /// Handles a natural end of the current track. Returns true when a loop was started.
    pub fn on_track_ended(&mut self, backend: &mut impl MusicBackend) -> bool {
        if !self.end_armed {
            debug!("Track end ignored, notification not armed");
            return false;
        }
        self.end_armed = false;

        match self.pending_loop.take() {
            Some(track) => {
                self.play_loop(backend, track);
                true
            }
            None => {
                debug!("Track end ignored, no loop pending");
                false
            }
        }
    }

    /// Replaces the music with a one-shot jingle that nothing follows.
    pub fn play_win(&mut self, backend: &mut impl MusicBackend, jingle: Track) {
        backend.stop();
        self.end_armed = false;
        self.pending_loop = None;

        if backend.is_available(jingle) {
            backend.play(jingle, PlayMode::Once);
            info!("Playing win jingle {}", jingle.path());
        } else {
            warn!("Win jingle {} not found", jingle.path());
        }
    }

    pub const fn pending_loop(&self) -> Option<Track> {
        self.pending_loop
    }

    pub const fn is_end_armed(&self) -> bool {
        self.end_armed
    }
}

/// Audio channel reserved for background music
#[derive(Resource)]
pub struct Music;

/// Sent once when a non-looping music track finishes on its own.
#[derive(Event, Debug)]
pub struct MusicTrackEnded;

#[derive(Event, Debug, Clone, Copy)]
pub struct PlaySfx(pub Sfx);

#[derive(Resource, Default)]
struct MusicPlayback {
    instance: Option<Handle<AudioInstance>>,
    looping: bool,
    started: bool,
}

#[derive(Resource, Default)]
struct SfxAssets {
    correct: Option<Handle<AudioSource>>,
    wrong: Option<Handle<AudioSource>>,
}

impl SfxAssets {
    const fn get(&self, sfx: Sfx) -> Option<&Handle<AudioSource>> {
        match sfx {
            Sfx::Correct => self.correct.as_ref(),
            Sfx::Wrong => self.wrong.as_ref(),
        }
    }
}

struct KiraMusic<'a> {
    channel: &'a AudioChannel<Music>,
    asset_server: &'a AssetServer,
    catalog: &'a AssetCatalog,
    playback: &'a mut MusicPlayback,
}

impl MusicBackend for KiraMusic<'_> {
    fn is_available(&self, track: Track) -> bool {
        self.catalog.contains(track.path())
    }

    fn stop(&mut self) {
        self.channel.stop();
        self.playback.instance = None;
    }

    fn play(&mut self, track: Track, mode: PlayMode) {
        let source = self.asset_server.load::<AudioSource>(track.path());
        let instance = match mode {
            PlayMode::Once => self.channel.play(source).handle(),
            PlayMode::Looped => self.channel.play(source).looped().handle(),
        };
        *self.playback = MusicPlayback {
            instance: Some(instance),
            looping: mode == PlayMode::Looped,
            started: false,
        };
    }
}

pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(AudioPlugin)
            .add_audio_channel::<Music>()
            .init_resource::<MusicSequencer>()
            .init_resource::<MusicPlayback>()
            .init_resource::<SfxAssets>()
            .add_event::<MusicTrackEnded>()
            .add_event::<PlaySfx>()
            .add_plugins(MusicCuePlugin)
            .add_systems(Startup, load_sfx)
            .add_systems(
                Update,
                (
                    (play_cued_music, detect_track_end, chain_pending_loop).chain(),
                    play_sfx,
                ),
            );
    }
}

fn load_sfx(asset_server: Res<AssetServer>, catalog: Res<AssetCatalog>, mut sfx: ResMut<SfxAssets>) {
    let load = |effect: Sfx| match catalog.resolve(effect.path()) {
        Ok(_) => Some(asset_server.load(effect.path())),
        Err(err) => {
            warn!("Sound effect disabled: {err}");
            None
        }
    };
    sfx.correct = load(Sfx::Correct);
    sfx.wrong = load(Sfx::Wrong);
}

/// Music change requested on entering a screen
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicCue {
    Sequence { intro: Track, looped: Track },
    Jingle(Track),
}

impl MusicCue {
    pub const fn for_state(state: GameState) -> Self {
        match state {
            GameState::Menu => Self::Sequence {
                intro: Track::MenuIntro,
                looped: Track::MenuLoop,
            },
            GameState::Playing => Self::Sequence {
                intro: Track::GameIntro,
                looped: Track::GameLoop,
            },
            GameState::Won => Self::Jingle(Track::Win),
        }
    }
}

/// Sends the [`MusicCue`] of every screen as it is entered.
struct MusicCuePlugin;

impl Plugin for MusicCuePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<MusicCue>()
            .add_systems(OnEnter(GameState::Menu), cue_music)
            .add_systems(OnEnter(GameState::Playing), cue_music)
            .add_systems(OnEnter(GameState::Won), cue_music);
    }
}

fn cue_music(state: Res<State<GameState>>, mut cues: EventWriter<MusicCue>) {
    cues.send(MusicCue::for_state(*state.get()));
}

fn play_cued_music(
    mut cues: EventReader<MusicCue>,
    mut sequencer: ResMut<MusicSequencer>,
    channel: Res<AudioChannel<Music>>,
    asset_server: Res<AssetServer>,
    catalog: Res<AssetCatalog>,
    mut playback: ResMut<MusicPlayback>,
) {
    let mut backend = KiraMusic {
        channel: &channel,
        asset_server: &asset_server,
        catalog: &catalog,
        playback: &mut playback,
    };
    for &cue in cues.read() {
        debug!("Music cue: {cue:?}");
        match cue {
            MusicCue::Sequence { intro, looped } => {
                sequencer.play_sequence(&mut backend, intro, looped);
            }
            MusicCue::Jingle(track) => sequencer.play_win(&mut backend, track),
        }
    }
}

fn detect_track_end(
    channel: Res<AudioChannel<Music>>,
    mut playback: ResMut<MusicPlayback>,
    mut ended: EventWriter<MusicTrackEnded>,
) {
    if playback.looping {
        return;
    }
    let state = match playback.instance.as_ref() {
        Some(instance) => channel.state(instance),
        None => return,
    };

    match state {
        // Not picked up by the audio thread yet, the source may still be loading
        PlaybackState::Queued => {}
        PlaybackState::Stopped => {
            if playback.started {
                playback.instance = None;
                ended.send(MusicTrackEnded);
            }
        }
        _ => playback.started = true,
    }
}

fn chain_pending_loop(
    mut ended: EventReader<MusicTrackEnded>,
    mut sequencer: ResMut<MusicSequencer>,
    channel: Res<AudioChannel<Music>>,
    asset_server: Res<AssetServer>,
    catalog: Res<AssetCatalog>,
    mut playback: ResMut<MusicPlayback>,
) {
    for _ in ended.read() {
        info!("Music track ended");
        let mut backend = KiraMusic {
            channel: &channel,
            asset_server: &asset_server,
            catalog: &catalog,
            playback: &mut playback,
        };
        sequencer.on_track_ended(&mut backend);
    }
}

fn play_sfx(audio: Res<Audio>, sfx: Res<SfxAssets>, mut requests: EventReader<PlaySfx>) {
    for PlaySfx(effect) in requests.read() {
        if let Some(handle) = sfx.get(*effect) {
            audio.play(handle.clone());
        }
    }
}
