// WHY: Sentence-level orchestration of analysis, merging, resolution and splicing
// Every failure is absorbed here; callers always receive a well-formed contour

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::analyzer::MorphologicalAnalyzer;
use crate::pattern::{render_flags, render_levels, Level, PitchType};
use crate::pitch_db::{PitchDatabase, PitchEntry};

pub mod merge;
pub mod phrase;

pub use merge::{merge_conjugations, LogicalToken};
pub use phrase::{splice_phrase, PhraseRules, ResolvedWord};

/// Placement of one logical word inside the sentence contour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordContour {
    pub surface: String,
    pub dictionary_form: String,
    pub reading: String,
    pub drop_position: usize,
    /// Accent type against the reading actually spoken
    pub pitch_type: PitchType,
    /// First mora of the word within the sentence
    pub mora_start: usize,
    /// One past the last mora
    pub mora_end: usize,
    pub merged: bool,
    pub provisional: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseContour {
    pub reading: String,
    pub words: Vec<WordContour>,
}

/// Stitched contour of a whole sentence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceContour {
    pub text: String,
    pub reading: String,
    /// One level per mora of `reading`
    pub levels: Vec<Level>,
    /// One flag per mora, true on accent nuclei
    pub accent_flags: Vec<bool>,
    pub phrases: Vec<PhraseContour>,
}

impl SentenceContour {
    pub fn empty(text: &str) -> Self {
        Self {
            text: text.to_string(),
            reading: String::new(),
            levels: Vec::new(),
            accent_flags: Vec::new(),
            phrases: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn mora_count(&self) -> usize {
        self.levels.len()
    }

    /// `LHHH` style rendering
    pub fn render_levels(&self) -> String {
        render_levels(&self.levels)
    }

    /// ●/○ rendering of the accent flags
    pub fn render_flags(&self) -> String {
        render_flags(&self.accent_flags)
    }
}

/// Turns sentences into stitched pitch contours.
///
/// Sentences are tokenized with the database's own analyzer, so cache keys and
/// sentence tokens always come from the same segmentation.
pub struct SentencePitchProcessor<'a> {
    db: &'a mut PitchDatabase,
    analyzer: Rc<dyn MorphologicalAnalyzer>,
    rules: PhraseRules,
}

impl<'a> SentencePitchProcessor<'a> {
    pub fn new(db: &'a mut PitchDatabase, rules: PhraseRules) -> Self {
        let analyzer = db.analyzer();
        Self { db, analyzer, rules }
    }

    /// Compute the contour of `text`. Never fails: an unanalyzable sentence
    /// yields an empty contour.
    pub fn process_sentence(&mut self, text: &str) -> SentenceContour {
        let tokens = match self.analyzer.analyze(text) {
            Ok(tokens) => tokens,
            Err(e) => {
                warn!("{} could not analyze {:?}: {}", self.analyzer.name(), text, e);
                return SentenceContour::empty(text);
            }
        };
        debug!("{} produced {} tokens", self.analyzer.name(), tokens.len());

        let words: Vec<ResolvedWord> = merge_conjugations(&tokens)
            .into_iter()
            .map(|token| self.resolve(token))
            .collect();

        let mut contour = SentenceContour::empty(text);
        for group in self.rules.segment(&words) {
            let spliced = splice_phrase(group, contour.levels.len());
            contour.reading.push_str(&spliced.reading);
            contour.levels.extend(spliced.levels);
            contour.accent_flags.extend(spliced.accent_flags);
            contour.phrases.push(PhraseContour {
                reading: spliced.reading,
                words: spliced.words,
            });
        }
        contour.accent_flags.resize(contour.levels.len(), false);

        info!(
            "Processed {:?}: {} phrases, {} morae",
            text,
            contour.phrases.len(),
            contour.mora_count()
        );
        contour
    }

    fn resolve(&mut self, token: LogicalToken) -> ResolvedWord {
        if self.rules.is_punctuation(&token) {
            let entry = PitchEntry::new(&token.reading, 0);
            return ResolvedWord { token, entry };
        }

        let resolved = if token.merged {
            self.db
                .lookup_conjugated_form(&token.surface, &token.reading, &token.dictionary_form)
        } else {
            self.db.lookup_or_fetch(&token.surface)
        };

        let entry = resolved.unwrap_or_else(|e| {
            warn!("No pitch entry for {:?} ({}), treating as flat", token.surface, e);
            PitchEntry::provisional(&token.reading)
        });
        ResolvedWord { token, entry }
    }
}
