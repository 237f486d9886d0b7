// Integration tests for word bank invariants and guess evaluation.
// These tests are native-friendly and avoid wasm/browser APIs.

use std::collections::{BTreeSet, HashSet};

use wildwest_hangman::{GuessKind, Letter, MAX_WRONG, RoundState, RoundStatus, WordBank, evaluate};

fn letter(c: char) -> Letter {
    Letter::new(c).unwrap()
}

fn all_words() -> Vec<String> {
    let bank = WordBank::wild_west();
    let mut out = Vec::new();
    for cat in bank.categories() {
        let len = bank.words_for(cat).unwrap().len();
        for i in 0..len {
            out.push(bank.draw(cat, |_| i).unwrap());
        }
    }
    out
}

#[test]
fn category_words_are_unique_and_nonempty() {
    let bank = WordBank::wild_west();
    for cat in bank.categories() {
        let words = bank.words_for(cat).unwrap();
        assert!(!words.is_empty(), "category '{}' is empty", cat);
        let mut seen = HashSet::new();
        for w in words {
            assert!(seen.insert(w.to_ascii_uppercase()), "duplicate word '{}' in '{}'", w, cat);
        }
    }
}

#[test]
fn drawn_words_are_uppercase_letters_and_spaces() {
    for word in all_words() {
        assert!(!word.is_empty());
        for c in word.chars() {
            assert!(c.is_ascii_uppercase() || c == ' ', "invalid char '{}' in '{}'", c, word);
        }
    }
}

#[test]
fn guessing_each_letter_once_wins_in_any_order() {
    for word in all_words() {
        let distinct: BTreeSet<char> = word.chars().filter(|c| *c != ' ').collect();
        let forward: Vec<char> = distinct.iter().copied().collect();
        let backward: Vec<char> = distinct.iter().rev().copied().collect();
        for order in [forward, backward] {
            let mut round = RoundState::new(&word).unwrap();
            let mut kinds = Vec::new();
            for &c in &order {
                kinds.push(round.guess(letter(c)).unwrap().kind);
            }
            assert_eq!(round.status(), RoundStatus::Won, "'{}' not won", word);
            assert_eq!(kinds.last(), Some(&GuessKind::Win));
            assert!(kinds[..kinds.len() - 1].iter().all(|k| *k == GuessKind::Hit));
            assert!(round.revealed().iter().all(|r| *r));
            assert_eq!(round.wrong_count(), 0);
        }
    }
}

#[test]
fn six_misses_lose_and_five_do_not() {
    let mut round = RoundState::new("WANTED").unwrap();
    for c in ['B', 'C', 'F', 'G', 'H'] {
        assert_eq!(round.guess(letter(c)).unwrap().kind, GuessKind::Miss);
    }
    assert_eq!(round.status(), RoundStatus::InProgress);
    assert_eq!(round.remaining_guesses(), 1);
    assert_eq!(round.guess(letter('I')).unwrap().kind, GuessKind::Loss);
    assert_eq!(round.status(), RoundStatus::Lost);
    assert_eq!(round.wrong_count(), MAX_WRONG);
}

#[test]
fn repeated_miss_costs_only_once() {
    let round = RoundState::new("HORSE").unwrap();
    let (once, first) = evaluate(&round, letter('Z')).unwrap();
    let (twice, second) = evaluate(&once, letter('z')).unwrap();
    assert_eq!(first.kind, GuessKind::Miss);
    assert_eq!(second.kind, GuessKind::AlreadyGuessed);
    assert_eq!(once, twice);
    assert_eq!(twice.wrong_count(), 1);
}

#[test]
fn phrase_with_space_is_won_by_its_letters() {
    let mut round = RoundState::new("SO LONG").unwrap();
    assert!(round.revealed()[2]);
    let mut last = None;
    for c in ['S', 'O', 'L', 'N', 'G'] {
        last = Some(round.guess(letter(c)).unwrap().kind);
    }
    assert_eq!(last, Some(GuessKind::Win));
    assert_eq!(round.status(), RoundStatus::Won);
}

#[test]
fn terminal_round_is_frozen() {
    let mut round = RoundState::new("DOG").unwrap();
    for c in ['X', 'Y', 'Z', 'Q', 'W', 'R'] {
        round.guess(letter(c)).unwrap();
    }
    let frozen = round.clone();
    assert!(round.guess(letter('D')).is_err());
    assert!(evaluate(&round, letter('O')).is_err());
    assert_eq!(round, frozen);
    assert_eq!(round.guessed().len(), 6);
}
