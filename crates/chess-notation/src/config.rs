//! Vocabulary for voice input.
//!
//! Every table has built-in defaults, so a configuration file only needs the
//! entries it changes:
//!
//! ```toml
//! captures = ["takes", "captures", "eats"]
//!
//! [pieces]
//! knight = ["knight", "night", "horse", "horsey"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading a voice configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    /// The file is not valid TOML for this configuration.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The file parsed but a table has the wrong shape.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Spoken words for each piece kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieceWords {
    pub pawn: Vec<String>,
    pub knight: Vec<String>,
    pub bishop: Vec<String>,
    pub rook: Vec<String>,
    pub queen: Vec<String>,
    pub king: Vec<String>,
}

impl Default for PieceWords {
    fn default() -> Self {
        PieceWords {
            pawn: words(&["pawn", "pond", "prawn"]),
            knight: words(&["knight", "night", "nite", "horse"]),
            bishop: words(&["bishop"]),
            rook: words(&["rook", "rock", "brook"]),
            queen: words(&["queen"]),
            king: words(&["king"]),
        }
    }
}

/// Homophone tables used by the voice grammar.
///
/// `files` holds eight lists, `a` through `h`; `ranks` holds eight lists,
/// `1` through `8`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    pub files: Vec<Vec<String>>,
    pub ranks: Vec<Vec<String>>,
    /// Words between the source and destination of a quiet move.
    pub moves: Vec<String>,
    pub captures: Vec<String>,
    /// Words introducing the promotion piece.
    pub promotions: Vec<String>,
    pub castles: Vec<String>,
    pub kingside: Vec<String>,
    pub queenside: Vec<String>,
    pub pieces: PieceWords,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        VoiceConfig {
            files: vec![
                words(&["a", "alpha", "ay", "eh", "hey"]),
                words(&["b", "bravo", "be", "bee"]),
                words(&["c", "charlie", "see", "sea"]),
                words(&["d", "delta", "dee"]),
                words(&["e", "echo", "ee"]),
                words(&["f", "foxtrot", "eff"]),
                words(&["g", "golf", "gee"]),
                words(&["h", "hotel", "aitch"]),
            ],
            ranks: vec![
                words(&["1", "one", "won"]),
                words(&["2", "two", "to", "too"]),
                words(&["3", "three", "tree"]),
                words(&["4", "four", "for", "fore"]),
                words(&["5", "five"]),
                words(&["6", "six"]),
                words(&["7", "seven"]),
                words(&["8", "eight", "ate"]),
            ],
            moves: words(&["to", "too", "moves to", "goes to"]),
            captures: words(&["takes", "take", "captures", "x"]),
            promotions: words(&["promote to", "promotes to", "promoting to", "promote", "equals"]),
            castles: words(&["castle", "castles", "castling"]),
            kingside: words(&["kingside", "king side", "short"]),
            queenside: words(&["queenside", "queen side", "long"]),
            pieces: PieceWords::default(),
        }
    }
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|word| word.to_string()).collect()
}

impl VoiceConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for invalid TOML and
    /// [`ConfigError::Invalid`] when `files` or `ranks` do not have eight
    /// entries.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: VoiceConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read, otherwise
    /// the errors of [`VoiceConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.files.len() != 8 {
            return Err(ConfigError::Invalid(format!(
                "expected 8 file entries, got {}",
                self.files.len()
            )));
        }
        if self.ranks.len() != 8 {
            return Err(ConfigError::Invalid(format!(
                "expected 8 rank entries, got {}",
                self.ranks.len()
            )));
        }
        Ok(())
    }
}
