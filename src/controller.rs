//! Round controller: the state machine between the page and the game rules.
//!
//! The presentation layer turns clicks and key presses into [`Command`]s and
//! paints whatever [`Delta`]s come back. The controller owns the current
//! [`RoundState`] and the enabled/disabled state of every control, and it is
//! the only caller of the render and audio adapters.

use crate::audio::AudioAdapter;
use crate::error::GameError;
use crate::render::{RenderAdapter, Stage};
use crate::round::{GuessKind, Letter, RoundState};
use crate::words::{WordBank, random_index};

/// Typed user intent, one per input event.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    SelectCategory(String),
    GuessLetter(char),
    StartNewRound,
    ReturnToMenu,
    ToggleMute,
}

impl Command {
    /// Map a `KeyboardEvent.key` value to a guess. Anything but a single
    /// letter is dropped here, before it reaches the controller.
    pub fn from_key(key: &str) -> Option<Command> {
        Letter::parse(key)
            .ok()
            .map(|l| Command::GuessLetter(l.as_char()))
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Outcome {
    Won,
    Lost,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    /// Waiting for a category pick.
    Idle,
    /// A word is drawn and letters can be guessed.
    CategoryChosen,
    Terminal(Outcome),
}

/// A change the presentation layer should show.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Delta {
    /// Empty board: category buttons enabled, letters hidden, scene redrawn.
    BoardReset { categories: Vec<String> },
    CategoryLocked { active: String },
    LettersEnabled,
    WordMasked { slots: Vec<Option<char>> },
    LetterDisabled(Letter),
    Revealed { letter: Letter, positions: Vec<usize> },
    StageDrawn(Stage),
    RoundOver { outcome: Outcome, word: String },
    ReturnedToMenu,
    SoundToggled { muted: bool },
}

/// Enabled state of every on-screen control.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Controls {
    pub categories_enabled: bool,
    pub active_category: Option<String>,
    pub letters_visible: bool,
    letters_enabled: [bool; 26],
}

impl Controls {
    fn fresh() -> Self {
        Self {
            categories_enabled: true,
            active_category: None,
            letters_visible: false,
            letters_enabled: [false; 26],
        }
    }

    pub fn letter_enabled(&self, letter: Letter) -> bool {
        self.letters_enabled[letter.index()]
    }

    fn lock_all(&mut self) {
        self.categories_enabled = false;
        self.letters_enabled = [false; 26];
    }
}

type Picker = Box<dyn FnMut(usize) -> usize>;

pub struct RoundController<R, A> {
    bank: WordBank,
    render: R,
    audio: A,
    picker: Picker,
    phase: Phase,
    round: Option<RoundState>,
    controls: Controls,
}

impl<R: RenderAdapter, A: AudioAdapter> RoundController<R, A> {
    pub fn new(bank: WordBank, render: R, audio: A) -> Self {
        Self {
            bank,
            render,
            audio,
            picker: Box::new(random_index),
            phase: Phase::Idle,
            round: None,
            controls: Controls::fresh(),
        }
    }

    /// Replace the word-index picker (`pick(len)` must return `0..len`).
    pub fn with_picker(mut self, picker: impl FnMut(usize) -> usize + 'static) -> Self {
        self.picker = Box::new(picker);
        self
    }

    /// Apply one command. Only an unknown category is reported as an error;
    /// every other invalid or stale input yields no deltas.
    pub fn handle(&mut self, command: Command) -> Result<Vec<Delta>, GameError> {
        match command {
            Command::SelectCategory(name) => self.select_category(&name),
            Command::GuessLetter(c) => Ok(self.guess(c)),
            Command::StartNewRound => Ok(self.start_new_round()),
            Command::ReturnToMenu => {
                let mut deltas = self.reset();
                deltas.push(Delta::ReturnedToMenu);
                Ok(deltas)
            }
            Command::ToggleMute => {
                let muted = self.audio.toggle_mute();
                Ok(vec![Delta::SoundToggled { muted }])
            }
        }
    }

    fn select_category(&mut self, name: &str) -> Result<Vec<Delta>, GameError> {
        if self.phase != Phase::Idle || !self.controls.categories_enabled {
            return Ok(Vec::new());
        }
        let category = self.bank.category(name)?.name.clone();
        let word = self.bank.draw(&category, &mut self.picker)?;
        let round = RoundState::new(&word)?;
        log::info!("round started in '{category}' ({} letters)", word.len());

        self.controls.categories_enabled = false;
        self.controls.active_category = Some(category.clone());
        self.controls.letters_visible = true;
        self.controls.letters_enabled = [true; 26];
        let deltas = vec![
            Delta::CategoryLocked { active: category },
            Delta::LettersEnabled,
            Delta::WordMasked {
                slots: round.masked(),
            },
        ];
        self.round = Some(round);
        self.phase = Phase::CategoryChosen;
        Ok(deltas)
    }

    fn guess(&mut self, c: char) -> Vec<Delta> {
        let Some(letter) = Letter::new(c) else {
            log::debug!("ignoring non-letter guess {c:?}");
            return Vec::new();
        };
        if self.phase != Phase::CategoryChosen || !self.controls.letter_enabled(letter) {
            return Vec::new();
        }
        let Some(round) = self.round.as_mut() else {
            return Vec::new();
        };
        let result = match round.guess(letter) {
            Ok(result) => result,
            Err(err) => {
                log::debug!("{err}");
                return Vec::new();
            }
        };
        log::debug!("guess {letter}: {:?}", result.kind);

        self.controls.letters_enabled[letter.index()] = false;
        let mut deltas = vec![Delta::LetterDisabled(letter)];
        match result.kind {
            GuessKind::AlreadyGuessed => {}
            GuessKind::Hit | GuessKind::Win => {
                deltas.push(Delta::Revealed {
                    letter,
                    positions: result.positions,
                });
            }
            GuessKind::Miss | GuessKind::Loss => {
                if let Some(stage) = Stage::from_wrong_count(result.wrong_count) {
                    self.render.draw_stage(stage);
                    deltas.push(Delta::StageDrawn(stage));
                }
            }
        }
        match result.kind {
            GuessKind::Win => deltas.push(self.finish(Outcome::Won)),
            GuessKind::Loss => deltas.push(self.finish(Outcome::Lost)),
            _ => {}
        }
        deltas
    }

    fn finish(&mut self, outcome: Outcome) -> Delta {
        self.controls.lock_all();
        self.phase = Phase::Terminal(outcome);
        match outcome {
            Outcome::Won => self.audio.play_win(),
            Outcome::Lost => self.audio.play_lose(),
        }
        let word = self.round.as_ref().map(RoundState::word).unwrap_or_default();
        log::info!("round over: {outcome:?}, word was {word}");
        Delta::RoundOver { outcome, word }
    }

    fn start_new_round(&mut self) -> Vec<Delta> {
        if self.phase == Phase::CategoryChosen {
            return Vec::new();
        }
        self.reset()
    }

    fn reset(&mut self) -> Vec<Delta> {
        self.round = None;
        self.phase = Phase::Idle;
        self.controls = Controls::fresh();
        self.render.reset();
        self.audio.stop_all();
        self.audio.play_background();
        vec![Delta::BoardReset {
            categories: self.bank.categories().map(str::to_string).collect(),
        }]
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn render(&self) -> &R {
        &self.render
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Canvas(Vec<Option<Stage>>);

    impl RenderAdapter for Canvas {
        fn reset(&mut self) {
            self.0.push(None);
        }
        fn draw_stage(&mut self, stage: Stage) {
            self.0.push(Some(stage));
        }
    }

    #[derive(Default)]
    struct Speaker(Vec<&'static str>);

    impl AudioAdapter for Speaker {
        fn play_background(&mut self) {
            self.0.push("background");
        }
        fn play_win(&mut self) {
            self.0.push("win");
        }
        fn play_lose(&mut self) {
            self.0.push("lose");
        }
        fn stop_all(&mut self) {
            self.0.push("stop");
        }
        fn toggle_mute(&mut self) -> bool {
            self.0.push("mute");
            true
        }
    }

    fn controller() -> RoundController<Canvas, Speaker> {
        // Easy[1] is GOLD
        RoundController::new(WordBank::wild_west().clone(), Canvas::default(), Speaker::default())
            .with_picker(|_| 1)
    }

    #[test]
    fn key_mapping_filters_non_letters() {
        assert_eq!(Command::from_key("g"), Some(Command::GuessLetter('G')));
        assert_eq!(Command::from_key("Shift"), None);
        assert_eq!(Command::from_key("1"), None);
    }

    #[test]
    fn selecting_a_category_draws_and_locks() {
        let mut ctl = controller();
        let deltas = ctl.handle(Command::SelectCategory("easy".into())).unwrap();
        assert_eq!(
            deltas,
            vec![
                Delta::CategoryLocked {
                    active: "Easy".into()
                },
                Delta::LettersEnabled,
                Delta::WordMasked {
                    slots: vec![None; 4]
                },
            ]
        );
        assert_eq!(ctl.phase(), Phase::CategoryChosen);
        assert!(!ctl.controls().categories_enabled);
        assert_eq!(ctl.round().unwrap().word(), "GOLD");
        // Second pick is ignored while a round is running.
        assert!(ctl.handle(Command::SelectCategory("Hard".into())).unwrap().is_empty());
    }

    #[test]
    fn unknown_category_keeps_idle() {
        let mut ctl = controller();
        assert_eq!(
            ctl.handle(Command::SelectCategory("Gold Rush".into())),
            Err(GameError::UnknownCategory("Gold Rush".into()))
        );
        assert_eq!(ctl.phase(), Phase::Idle);
        assert!(ctl.round().is_none());
        assert!(ctl.controls().categories_enabled);
    }

    #[test]
    fn used_letter_is_ignored_the_second_time() {
        let mut ctl = controller();
        ctl.handle(Command::SelectCategory("Easy".into())).unwrap();
        let first = ctl.handle(Command::GuessLetter('o')).unwrap();
        assert_eq!(first[0], Delta::LetterDisabled(Letter::new('O').unwrap()));
        let before = ctl.round().cloned();
        assert!(ctl.handle(Command::GuessLetter('O')).unwrap().is_empty());
        assert_eq!(ctl.round().cloned(), before);
    }

    #[test]
    fn new_round_is_ignored_mid_round() {
        let mut ctl = controller();
        ctl.handle(Command::SelectCategory("Easy".into())).unwrap();
        assert!(ctl.handle(Command::StartNewRound).unwrap().is_empty());
        assert_eq!(ctl.phase(), Phase::CategoryChosen);
    }

    #[test]
    fn return_to_menu_abandons_round() {
        let mut ctl = controller();
        ctl.handle(Command::SelectCategory("Easy".into())).unwrap();
        let deltas = ctl.handle(Command::ReturnToMenu).unwrap();
        assert_eq!(deltas.last(), Some(&Delta::ReturnedToMenu));
        assert_eq!(ctl.phase(), Phase::Idle);
        assert!(ctl.round().is_none());
        assert_eq!(ctl.audio().0, vec!["stop", "background"]);
        assert_eq!(ctl.render().0, vec![None]);
    }

    #[test]
    fn toggle_mute_reports_state() {
        let mut ctl = controller();
        assert_eq!(
            ctl.handle(Command::ToggleMute).unwrap(),
            vec![Delta::SoundToggled { muted: true }]
        );
    }
}
