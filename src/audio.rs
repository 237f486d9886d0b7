//! Background music and win/lose stings.
//!
//! Browsers refuse to start audio before the page has seen a user gesture, so
//! nothing is loaded until [`WebAudio::unlock`] runs from the first click.
//! Every call is best-effort: a rejected `play()` is logged and reported to the
//! advisory callback, never to the game.

use std::rc::Rc;

use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlAudioElement;

/// Audio operations the round controller relies on.
pub trait AudioAdapter {
    fn play_background(&mut self);
    fn play_win(&mut self);
    fn play_lose(&mut self);
    fn stop_all(&mut self);
    /// Flip mute; returns `true` when sound is now muted.
    fn toggle_mute(&mut self) -> bool;
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum AudioError {
    #[error("audio playback unavailable: {0}")]
    PlaybackUnavailable(String),
}

/// Asset paths and volumes.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioConfig {
    pub background_src: String,
    pub win_src: String,
    pub lose_src: String,
    pub background_volume: f64,
    pub effect_volume: f64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            background_src: "WildWest.mp3".into(),
            win_src: "Yeehaw.mp3".into(),
            lose_src: "Lose.mp3".into(),
            background_volume: 0.5,
            effect_volume: 0.7,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SessionPhase {
    /// No user gesture seen yet.
    #[default]
    Locked,
    Unlocked,
    /// At least one playback has been requested.
    Active,
}

/// One-way latch tracking whether the page may play audio.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct AudioSession {
    phase: SessionPhase,
}

impl AudioSession {
    /// Returns `true` only for the call that actually unlocked.
    pub fn unlock(&mut self) -> bool {
        if self.phase == SessionPhase::Locked {
            self.phase = SessionPhase::Unlocked;
            true
        } else {
            false
        }
    }

    pub fn mark_active(&mut self) {
        if self.phase == SessionPhase::Unlocked {
            self.phase = SessionPhase::Active;
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.phase != SessionPhase::Locked
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }
}

struct Tracks {
    background: HtmlAudioElement,
    win: HtmlAudioElement,
    lose: HtmlAudioElement,
}

impl Tracks {
    fn load(config: &AudioConfig) -> Result<Tracks, JsValue> {
        let background = HtmlAudioElement::new_with_src(&config.background_src)?;
        background.set_loop(true);
        background.set_volume(config.background_volume);
        let win = HtmlAudioElement::new_with_src(&config.win_src)?;
        win.set_volume(config.effect_volume);
        let lose = HtmlAudioElement::new_with_src(&config.lose_src)?;
        lose.set_volume(config.effect_volume);
        Ok(Tracks {
            background,
            win,
            lose,
        })
    }
}

type BlockedHandler = Rc<dyn Fn(AudioError)>;

/// `AudioAdapter` over HTML `<audio>` elements.
pub struct WebAudio {
    config: AudioConfig,
    session: AudioSession,
    tracks: Option<Tracks>,
    muted: bool,
    on_blocked: BlockedHandler,
}

impl WebAudio {
    /// `on_blocked` runs whenever the browser refuses to start a track.
    pub fn new(config: AudioConfig, on_blocked: impl Fn(AudioError) + 'static) -> Self {
        Self {
            config,
            session: AudioSession::default(),
            tracks: None,
            muted: false,
            on_blocked: Rc::new(on_blocked),
        }
    }

    /// Load the tracks after the first user gesture. Later calls do nothing.
    pub fn unlock(&mut self) -> bool {
        if !self.session.unlock() {
            return false;
        }
        match Tracks::load(&self.config) {
            Ok(tracks) => self.tracks = Some(tracks),
            Err(err) => log::warn!("could not create audio elements: {err:?}"),
        }
        log::info!("audio unlocked");
        true
    }

    pub fn session(&self) -> AudioSession {
        self.session
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    fn start(&mut self, pick: fn(&Tracks) -> &HtmlAudioElement, what: &'static str) {
        if self.muted {
            return;
        }
        let Some(tracks) = &self.tracks else {
            return;
        };
        self.session.mark_active();
        play(pick(tracks), what, &self.on_blocked);
    }
}

impl AudioAdapter for WebAudio {
    fn play_background(&mut self) {
        self.start(|t| &t.background, "background");
    }

    fn play_win(&mut self) {
        if let Some(tracks) = &self.tracks {
            rewind(&tracks.background);
        }
        self.start(|t| &t.win, "win");
    }

    fn play_lose(&mut self) {
        if let Some(tracks) = &self.tracks {
            rewind(&tracks.background);
        }
        self.start(|t| &t.lose, "lose");
    }

    fn stop_all(&mut self) {
        if let Some(tracks) = &self.tracks {
            rewind(&tracks.background);
            rewind(&tracks.win);
            rewind(&tracks.lose);
        }
    }

    fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        if self.muted {
            if let Some(tracks) = &self.tracks {
                for track in [&tracks.background, &tracks.win, &tracks.lose] {
                    track.pause().ok();
                }
            }
        } else {
            self.play_background();
        }
        self.muted
    }
}

fn rewind(track: &HtmlAudioElement) {
    if !track.paused() {
        track.pause().ok();
    }
    track.set_current_time(0.0);
}

fn play(track: &HtmlAudioElement, what: &'static str, on_blocked: &BlockedHandler) {
    match track.play() {
        Ok(promise) => {
            let notify = on_blocked.clone();
            let cb = Closure::once(move |err: JsValue| {
                let reason = describe(&err);
                log::warn!("{what} playback failed: {reason}");
                notify(AudioError::PlaybackUnavailable(reason));
            });
            let _ = promise.catch(&cb);
            cb.forget();
        }
        Err(err) => {
            let reason = describe(&err);
            log::warn!("{what} playback failed: {reason}");
            on_blocked(AudioError::PlaybackUnavailable(reason));
        }
    }
}

fn describe(err: &JsValue) -> String {
    err.dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{err:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_unlocks_once() {
        let mut session = AudioSession::default();
        assert!(!session.is_unlocked());
        session.mark_active();
        assert_eq!(session.phase(), SessionPhase::Locked);
        assert!(session.unlock());
        assert!(!session.unlock());
        session.mark_active();
        assert_eq!(session.phase(), SessionPhase::Active);
        assert!(!session.unlock());
        assert_eq!(session.phase(), SessionPhase::Active);
    }

    #[test]
    fn locked_audio_ignores_playback_but_tracks_mute() {
        let mut audio = WebAudio::new(AudioConfig::default(), |_| {});
        audio.play_background();
        audio.play_win();
        audio.stop_all();
        assert_eq!(audio.session().phase(), SessionPhase::Locked);
        assert!(audio.toggle_mute());
        assert!(!audio.toggle_mute());
        assert!(!audio.is_muted());
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn muting_pauses_a_playing_sting() {
        let mut audio = WebAudio::new(AudioConfig::default(), |_| {});
        audio.unlock();
        audio.play_win();
        assert!(audio.toggle_mute());
        let tracks = audio.tracks.as_ref().unwrap();
        assert!(tracks.background.paused());
        assert!(tracks.win.paused());
        assert!(tracks.lose.paused());
    }
}
