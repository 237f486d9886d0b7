//! Word bank: difficulty categories and the words drawn for each round.

use std::sync::OnceLock;

use crate::error::GameError;
use crate::round::normalize_word;

// -----------------------------------------------------------------------------
// Built-in Wild West categories, in menu order.
// -----------------------------------------------------------------------------

pub const EASY_WORDS: &[&str] = &["Guns", "Gold", "Saddle", "Horse", "Saloon", "Cowboy"];

pub const NORMAL_WORDS: &[&str] = &["Pistol", "Sheriff", "Outlaw", "Desert", "Marshal", "Wanted"];

pub const HARD_WORDS: &[&str] = &[
    "Revolver", "Stagecoach", "Prospector", "Cowpoke", "Winchester", "TumbleWeed",
];

pub const WILD_WEST_WORDS: &[&str] = &[
    "Vigilante", "Bandolier", "Maverick", "Desperado", "Bounty", "Gunsmoke",
];

pub const WILD_WEST_CATEGORIES: &[(&str, &[&str])] = &[
    ("Easy", EASY_WORDS),
    ("Normal", NORMAL_WORDS),
    ("Hard", HARD_WORDS),
    ("WildWest", WILD_WEST_WORDS),
];

#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct Category {
    pub name: String,
    pub words: Vec<String>,
}

impl Category {
    pub fn new(name: impl Into<String>, words: &[&str]) -> Category {
        Category {
            name: name.into(),
            words: words.iter().map(|w| w.to_string()).collect(),
        }
    }
}

/// Immutable mapping from category name to candidate words.
///
/// Category names are matched case-insensitively. Words keep the spelling they
/// were configured with and are uppercased when drawn.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WordBank {
    categories: Vec<Category>,
}

impl WordBank {
    /// Build and validate a bank. Rejects empty banks, duplicate or blank
    /// category names, empty categories and words that are not letters and
    /// spaces. Duplicate words (ignoring case) are dropped, first one wins.
    pub fn new(categories: Vec<Category>) -> Result<WordBank, GameError> {
        if categories.is_empty() {
            return Err(GameError::InvalidWordBank("no categories".into()));
        }
        let mut cleaned: Vec<Category> = Vec::with_capacity(categories.len());
        for cat in categories {
            let name = cat.name.trim().to_string();
            if name.is_empty() {
                return Err(GameError::InvalidWordBank("blank category name".into()));
            }
            if cleaned.iter().any(|c| c.name.eq_ignore_ascii_case(&name)) {
                return Err(GameError::InvalidWordBank(format!(
                    "duplicate category '{name}'"
                )));
            }
            let mut words: Vec<String> = Vec::with_capacity(cat.words.len());
            for word in cat.words {
                normalize_word(&word)?;
                if !words.iter().any(|w| w.eq_ignore_ascii_case(&word)) {
                    words.push(word);
                }
            }
            if words.is_empty() {
                return Err(GameError::InvalidWordBank(format!(
                    "category '{name}' has no words"
                )));
            }
            cleaned.push(Category { name, words });
        }
        Ok(WordBank {
            categories: cleaned,
        })
    }

    /// The built-in four-category bank.
    pub fn wild_west() -> &'static WordBank {
        static BANK: OnceLock<WordBank> = OnceLock::new();
        BANK.get_or_init(|| WordBank {
            categories: WILD_WEST_CATEGORIES
                .iter()
                .map(|(name, words)| Category::new(*name, words))
                .collect(),
        })
    }

    /// Load a bank from `[{"name": "...", "words": ["..."]}, ...]`.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<WordBank, GameError> {
        let categories: Vec<Category> = serde_json::from_str(json)?;
        WordBank::new(categories)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    pub fn category(&self, name: &str) -> Result<&Category, GameError> {
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| GameError::UnknownCategory(name.to_string()))
    }

    pub fn words_for(&self, name: &str) -> Result<&[String], GameError> {
        self.category(name).map(|c| c.words.as_slice())
    }

    /// Draw one word from `name`, uppercased. `pick(len)` chooses the index;
    /// out-of-range picks wrap around.
    pub fn draw(
        &self,
        name: &str,
        pick: impl FnOnce(usize) -> usize,
    ) -> Result<String, GameError> {
        let words = self.words_for(name)?;
        let idx = pick(words.len()) % words.len();
        normalize_word(&words[idx])
    }
}

/// Uniform index in `0..len` for word draws.
#[cfg(feature = "rng")]
pub fn random_index(len: usize) -> usize {
    if len <= 1 {
        return 0;
    }
    let len32 = len.min(u32::MAX as usize) as u32;
    // Rejection sampling keeps the draw uniform for any category size.
    let zone = u32::MAX - (u32::MAX % len32);
    let mut buf = [0u8; 4];
    loop {
        if let Err(err) = getrandom::getrandom(&mut buf) {
            log::warn!("getrandom unavailable ({err}); using clock-based draw");
            return clock_index(len);
        }
        let v = u32::from_le_bytes(buf);
        if v < zone {
            return (v % len32) as usize;
        }
    }
}

#[cfg(not(feature = "rng"))]
pub fn random_index(len: usize) -> usize {
    clock_index(len)
}

fn clock_index(len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let now = crate::performance_now();
    // Simple linear transform and modulus (not crypto secure)
    (now as u64 as usize)
        .wrapping_mul(1664525)
        .wrapping_add(1013904223)
        % len
}
