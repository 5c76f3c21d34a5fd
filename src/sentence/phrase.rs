// WHY: Phrase segmentation and cross-word pitch splicing
// Inside a phrase each word's first mora is re-levelled against what precedes it

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::merge::LogicalToken;
use super::WordContour;
use crate::analyzer::PartOfSpeech;
use crate::kana::count_morae;
use crate::pattern::{drop_pos_to_type, get_accent_flags, get_pattern, Level, PitchType};
use crate::pitch_db::PitchEntry;

/// Surfaces that open a new accent phrase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhraseRules {
    pub boundary_particles: Vec<String>,
    pub punctuation: Vec<String>,
}

impl Default for PhraseRules {
    fn default() -> Self {
        Self {
            boundary_particles: ["は", "も"].map(String::from).to_vec(),
            punctuation: ["、", "。", "！", "？", "，", "．"].map(String::from).to_vec(),
        }
    }
}

impl PhraseRules {
    pub fn is_punctuation(&self, token: &LogicalToken) -> bool {
        token.pos == PartOfSpeech::Punctuation || self.punctuation.iter().any(|p| *p == token.surface)
    }

    /// True when `token` opens a new phrase
    pub fn starts_phrase(&self, token: &LogicalToken) -> bool {
        self.is_punctuation(token) || self.boundary_particles.iter().any(|p| *p == token.surface)
    }

    /// Split `words` before every phrase-opening token; never yields an empty group
    pub fn segment<'w>(&self, words: &'w [ResolvedWord]) -> Vec<&'w [ResolvedWord]> {
        let mut groups = Vec::new();
        let mut start = 0;

        for (idx, word) in words.iter().enumerate() {
            if idx > start && self.starts_phrase(&word.token) {
                groups.push(&words[start..idx]);
                start = idx;
            }
        }
        if start < words.len() {
            groups.push(&words[start..]);
        }

        debug!("Detected {} phrase groups", groups.len());
        groups
    }
}

/// A logical token paired with the entry it resolved to
#[derive(Debug, Clone)]
pub struct ResolvedWord {
    pub token: LogicalToken,
    pub entry: PitchEntry,
}

/// Contour of one phrase group
#[derive(Debug, Clone, Default)]
pub struct SplicedPhrase {
    pub reading: String,
    pub levels: Vec<Level>,
    pub accent_flags: Vec<bool>,
    pub words: Vec<WordContour>,
}

/// Stitch the word contours of one phrase.
///
/// The first word with morae keeps its own contour. Every later word has its
/// first mora forced high when Atamadaka and otherwise copied from the mora
/// before it; its remaining morae and all of its flags are left alone.
/// `mora_offset` is where this phrase starts within the sentence.
pub fn splice_phrase(words: &[ResolvedWord], mora_offset: usize) -> SplicedPhrase {
    let mut phrase = SplicedPhrase::default();

    for word in words {
        let reading = &word.token.reading;
        let morae = count_morae(reading);
        let drop_position = word.entry.drop_position;
        let pitch_type = drop_pos_to_type(drop_position, morae);

        let mut levels = get_pattern(morae, drop_position);
        let flags = get_accent_flags(morae, drop_position);

        if let (Some(first), Some(&previous)) = (levels.first_mut(), phrase.levels.last()) {
            *first = if pitch_type == PitchType::Atamadaka {
                Level::High
            } else {
                previous
            };
        }

        let mora_start = mora_offset + phrase.levels.len();
        phrase.words.push(WordContour {
            surface: word.token.surface.clone(),
            dictionary_form: word.token.dictionary_form.clone(),
            reading: reading.clone(),
            drop_position,
            pitch_type,
            mora_start,
            mora_end: mora_start + morae,
            merged: word.token.merged,
            provisional: word.entry.provisional,
        });

        phrase.reading.push_str(reading);
        phrase.levels.extend(levels);
        phrase.accent_flags.extend(flags);
    }

    phrase
}
