// WHY: Dictionary-free analyzer driven by an explicit word list
// Used where no compiled system dictionary is available, and as a deterministic analyzer in tests

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{ensure_tokens, MorphologicalAnalyzer, PartOfSpeech, Token};
use crate::error::AnalysisError;
use crate::kana::{is_non_lexical, katakana_to_hiragana};

/// One lexicon line: a surface with its reading and MeCab-style labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconWord {
    pub surface: String,
    pub reading: String,
    /// Defaults to the surface
    #[serde(default)]
    pub dictionary_form: Option<String>,
    /// Labels in ipadic order: major, minor, _, _, conjugation type
    #[serde(default)]
    pub tags: Vec<String>,
}

impl LexiconWord {
    pub fn new(surface: &str, reading: &str, tags: &[&str]) -> Self {
        Self {
            surface: surface.to_string(),
            reading: reading.to_string(),
            dictionary_form: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn with_dictionary_form(mut self, dictionary_form: &str) -> Self {
        self.dictionary_form = Some(dictionary_form.to_string());
        self
    }

    fn to_token(&self) -> Token {
        let tag = |idx: usize| self.tags.get(idx).map(String::as_str).unwrap_or("");
        Token {
            surface: self.surface.clone(),
            dictionary_form: self
                .dictionary_form
                .clone()
                .unwrap_or_else(|| self.surface.clone()),
            reading: katakana_to_hiragana(&self.reading),
            pos: PartOfSpeech::from_labels(tag(0), tag(1), tag(4)),
            pos_tags: self.tags.clone(),
        }
    }
}

/// Greedy longest-match analyzer over a fixed lexicon.
///
/// Characters not covered by any entry become single-character tokens:
/// punctuation is tagged as such, anything else is `Other` read as itself.
#[derive(Debug, Default, Clone)]
pub struct LexiconAnalyzer {
    words: HashMap<String, LexiconWord>,
    longest_surface: usize,
}

impl LexiconAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_words<I: IntoIterator<Item = LexiconWord>>(words: I) -> Self {
        let mut analyzer = Self::new();
        for word in words {
            analyzer.insert(word);
        }
        analyzer
    }

    /// Load a JSON array of `LexiconWord`s
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, AnalysisError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let words: Vec<LexiconWord> = serde_json::from_str(&content)
            .map_err(|e| AnalysisError::Dictionary(format!("{}: {e}", path.display())))?;
        info!("Loaded {} lexicon words from {}", words.len(), path.display());
        Ok(Self::from_words(words))
    }

    pub fn insert(&mut self, word: LexiconWord) {
        self.longest_surface = self.longest_surface.max(word.surface.chars().count());
        self.words.insert(word.surface.clone(), word);
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn longest_match<'t>(&self, rest: &'t str) -> Option<(&'t str, &LexiconWord)> {
        let boundaries: Vec<usize> = rest
            .char_indices()
            .map(|(i, _)| i)
            .skip(1)
            .chain(std::iter::once(rest.len()))
            .take(self.longest_surface)
            .collect();

        boundaries.iter().rev().find_map(|&end| {
            let candidate = &rest[..end];
            self.words.get(candidate).map(|w| (candidate, w))
        })
    }
}

fn unknown_token(surface: &str) -> Token {
    let pos = if is_non_lexical(surface) {
        PartOfSpeech::Punctuation
    } else {
        PartOfSpeech::Other
    };
    Token {
        surface: surface.to_string(),
        dictionary_form: surface.to_string(),
        reading: katakana_to_hiragana(surface),
        pos,
        pos_tags: Vec::new(),
    }
}

impl MorphologicalAnalyzer for LexiconAnalyzer {
    fn analyze(&self, text: &str) -> Result<Vec<Token>, AnalysisError> {
        let mut tokens = Vec::new();
        let mut pos = 0;

        while pos < text.len() {
            let rest = &text[pos..];
            let Some(first) = rest.chars().next() else {
                break;
            };

            if first.is_whitespace() {
                pos += first.len_utf8();
                continue;
            }

            match self.longest_match(rest) {
                Some((surface, word)) => {
                    tokens.push(word.to_token());
                    pos += surface.len();
                }
                None => {
                    let surface = &rest[..first.len_utf8()];
                    tokens.push(unknown_token(surface));
                    pos += surface.len();
                }
            }
        }

        debug!("lexicon produced {} tokens for {:?}", tokens.len(), text);
        ensure_tokens(text, tokens)
    }

    fn name(&self) -> &'static str {
        "lexicon"
    }
}
