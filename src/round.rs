//! Round state and guess evaluation.
//!
//! A `RoundState` is created once per round from an already-chosen word and is
//! only ever changed through [`RoundState::guess`] (or its pure twin
//! [`evaluate`]). Spaces in the word are revealed from the start and count
//! towards the reveal total, so a round is won once every position is shown.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::GameError;

/// Number of wrong guesses that ends a round; one illustration stage each.
pub const MAX_WRONG: u8 = 6;

/// One guessable letter, always stored as uppercase ASCII A-Z.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Letter(u8);

impl Letter {
    /// Normalize `c` to uppercase; `None` for anything outside a-z / A-Z.
    pub fn new(c: char) -> Option<Letter> {
        c.is_ascii_alphabetic()
            .then(|| Letter(c.to_ascii_uppercase() as u8))
    }

    /// Parse a raw input token (a key name, a button label) into a letter.
    pub fn parse(token: &str) -> Result<Letter, GameError> {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Letter::new(c).ok_or_else(|| GameError::InvalidGuessInput(token.to_string()))
            }
            _ => Err(GameError::InvalidGuessInput(token.to_string())),
        }
    }

    pub fn as_char(self) -> char {
        self.0 as char
    }

    /// Position in the alphabet, 0 for A through 25 for Z.
    pub fn index(self) -> usize {
        (self.0 - b'A') as usize
    }

    /// A through Z in order.
    pub fn all() -> impl Iterator<Item = Letter> {
        (b'A'..=b'Z').map(Letter)
    }
}

impl TryFrom<char> for Letter {
    type Error = GameError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Letter::new(c).ok_or_else(|| GameError::InvalidGuessInput(c.to_string()))
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Letter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(self.as_char())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RoundStatus {
    InProgress,
    Won,
    Lost,
}

impl RoundStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, RoundStatus::InProgress)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum GuessKind {
    /// Letter was tried before; nothing changed.
    AlreadyGuessed,
    Hit,
    Miss,
    Win,
    Loss,
}

/// Outcome of one guess, with a snapshot of the board after it.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GuessResult {
    pub kind: GuessKind,
    pub letter: Letter,
    /// Positions revealed by this guess (empty unless `Hit` or `Win`).
    pub positions: Vec<usize>,
    pub revealed: Vec<bool>,
    pub wrong_count: u8,
}

/// Normalize a candidate word: uppercase, ASCII letters and spaces only, and at
/// least one letter so the round is winnable by guessing.
pub(crate) fn normalize_word(raw: &str) -> Result<String, GameError> {
    let valid = raw.chars().all(|c| c.is_ascii_alphabetic() || c == ' ')
        && raw.chars().any(|c| c.is_ascii_alphabetic());
    if !valid {
        return Err(GameError::InvalidWord(raw.to_string()));
    }
    Ok(raw.to_ascii_uppercase())
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundState {
    word: Vec<char>,
    revealed: Vec<bool>,
    guessed: BTreeSet<Letter>,
    wrong_count: u8,
    // Revealed positions including spaces; the round is won when it reaches word.len().
    reveal_count: usize,
    status: RoundStatus,
}

impl RoundState {
    pub fn new(word: &str) -> Result<RoundState, GameError> {
        let word: Vec<char> = normalize_word(word)?.chars().collect();
        let revealed: Vec<bool> = word.iter().map(|&c| c == ' ').collect();
        let reveal_count = revealed.iter().filter(|&&r| r).count();
        Ok(RoundState {
            word,
            revealed,
            guessed: BTreeSet::new(),
            wrong_count: 0,
            reveal_count,
            status: RoundStatus::InProgress,
        })
    }

    /// Apply one guess in place.
    ///
    /// Every occurrence of a correct letter is revealed at once, so a single
    /// guess of a repeated letter can finish the round. Guessing against a
    /// finished round is rejected with `StaleGuess` and changes nothing.
    pub fn guess(&mut self, letter: Letter) -> Result<GuessResult, GameError> {
        if self.status.is_terminal() {
            return Err(GameError::StaleGuess(letter));
        }
        if !self.guessed.insert(letter) {
            return Ok(self.result(GuessKind::AlreadyGuessed, letter, Vec::new()));
        }

        let ch = letter.as_char();
        let positions: Vec<usize> = self
            .word
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c == ch)
            .map(|(i, _)| i)
            .collect();

        if positions.is_empty() {
            self.wrong_count += 1;
            let kind = if self.wrong_count >= MAX_WRONG {
                self.status = RoundStatus::Lost;
                GuessKind::Loss
            } else {
                GuessKind::Miss
            };
            return Ok(self.result(kind, letter, positions));
        }

        for &i in &positions {
            self.revealed[i] = true;
        }
        self.reveal_count += positions.len();
        let kind = if self.reveal_count == self.word.len() {
            self.status = RoundStatus::Won;
            GuessKind::Win
        } else {
            GuessKind::Hit
        };
        Ok(self.result(kind, letter, positions))
    }

    fn result(&self, kind: GuessKind, letter: Letter, positions: Vec<usize>) -> GuessResult {
        GuessResult {
            kind,
            letter,
            positions,
            revealed: self.revealed.clone(),
            wrong_count: self.wrong_count,
        }
    }

    pub fn word(&self) -> String {
        self.word.iter().collect()
    }

    pub fn revealed(&self) -> &[bool] {
        &self.revealed
    }

    pub fn guessed(&self) -> &BTreeSet<Letter> {
        &self.guessed
    }

    pub fn wrong_count(&self) -> u8 {
        self.wrong_count
    }

    pub fn remaining_guesses(&self) -> u8 {
        MAX_WRONG - self.wrong_count
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    /// The word as the player sees it: `Some(c)` for shown positions.
    pub fn masked(&self) -> Vec<Option<char>> {
        self.word
            .iter()
            .zip(&self.revealed)
            .map(|(&c, &shown)| shown.then_some(c))
            .collect()
    }
}

/// Pure form of [`RoundState::guess`]: returns the next state and leaves the
/// input untouched.
pub fn evaluate(
    state: &RoundState,
    letter: Letter,
) -> Result<(RoundState, GuessResult), GameError> {
    let mut next = state.clone();
    let result = next.guess(letter)?;
    Ok((next, result))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letter(c: char) -> Letter {
        Letter::new(c).unwrap()
    }

    #[test]
    fn letter_parse_normalizes_and_rejects() {
        assert_eq!(Letter::parse("q").unwrap().as_char(), 'Q');
        assert_eq!(Letter::parse("Z").unwrap().index(), 25);
        assert!(matches!(Letter::parse("Enter"), Err(GameError::InvalidGuessInput(_))));
        assert!(matches!(Letter::parse("7"), Err(GameError::InvalidGuessInput(_))));
        assert!(matches!(Letter::parse(""), Err(GameError::InvalidGuessInput(_))));
        assert!(Letter::new('é').is_none());
        assert_eq!(Letter::all().count(), 26);
    }

    #[test]
    fn cat_scenario_reveals_in_guess_order() {
        let mut round = RoundState::new("cat").unwrap();
        let a = round.guess(letter('A')).unwrap();
        assert_eq!((a.kind, a.positions.clone()), (GuessKind::Hit, vec![1]));
        let c = round.guess(letter('c')).unwrap();
        assert_eq!((c.kind, c.positions.clone()), (GuessKind::Hit, vec![0]));
        let t = round.guess(letter('T')).unwrap();
        assert_eq!((t.kind, t.positions.clone()), (GuessKind::Win, vec![2]));
        assert_eq!(t.revealed, vec![true, true, true]);
        assert_eq!(round.status(), RoundStatus::Won);
    }

    #[test]
    fn dog_scenario_loses_after_six_misses() {
        let mut round = RoundState::new("DOG").unwrap();
        let mut last = None;
        for c in ['X', 'Y', 'Z', 'Q', 'W', 'R'] {
            last = Some(round.guess(letter(c)).unwrap());
        }
        let last = last.unwrap();
        assert_eq!(last.kind, GuessKind::Loss);
        assert_eq!(last.wrong_count, 6);
        assert_eq!(round.status(), RoundStatus::Lost);
    }

    #[test]
    fn repeated_letter_reveals_every_position() {
        let mut round = RoundState::new("SADDLE").unwrap();
        let d = round.guess(letter('D')).unwrap();
        assert_eq!(d.positions, vec![2, 3]);
        assert_eq!(round.masked(), vec![None, None, Some('D'), Some('D'), None, None]);
    }

    #[test]
    fn spaces_start_revealed() {
        let round = RoundState::new("so long").unwrap();
        assert_eq!(round.word(), "SO LONG");
        assert_eq!(round.revealed(), &[false, false, true, false, false, false, false]);
    }

    #[test]
    fn duplicate_guess_is_a_no_op() {
        let mut round = RoundState::new("GOLD").unwrap();
        round.guess(letter('X')).unwrap();
        let before = round.clone();
        let again = round.guess(letter('x')).unwrap();
        assert_eq!(again.kind, GuessKind::AlreadyGuessed);
        assert!(again.positions.is_empty());
        assert_eq!(round, before);
        assert_eq!(round.wrong_count(), 1);
    }

    #[test]
    fn evaluate_leaves_input_untouched() {
        let round = RoundState::new("GUNS").unwrap();
        let (next, result) = evaluate(&round, letter('G')).unwrap();
        assert_eq!(result.kind, GuessKind::Hit);
        assert_eq!(round.revealed(), &[false; 4]);
        assert_eq!(next.revealed(), &[true, false, false, false]);
    }

    #[test]
    fn finished_round_rejects_guesses() {
        let mut round = RoundState::new("GO").unwrap();
        round.guess(letter('G')).unwrap();
        round.guess(letter('O')).unwrap();
        let before = round.clone();
        assert_eq!(
            round.guess(letter('Z')),
            Err(GameError::StaleGuess(letter('Z')))
        );
        assert_eq!(round, before);
    }

    #[test]
    fn rejects_words_without_letters() {
        assert!(matches!(RoundState::new("   "), Err(GameError::InvalidWord(_))));
        assert!(matches!(RoundState::new("high-noon"), Err(GameError::InvalidWord(_))));
        assert!(matches!(RoundState::new(""), Err(GameError::InvalidWord(_))));
    }
}
