// WHY: Resolution cache for word accents
// Cache first, reference second, provisional Heiban last; only the analyzer can make it fail

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::analyzer::MorphologicalAnalyzer;
use crate::error::AnalysisError;
use crate::kana::{count_morae, katakana_to_hiragana};
use crate::pattern::{drop_pos_to_type, PitchType};
use crate::reference::{self, ReferenceSource};

pub mod store;

pub use store::PitchStore;

/// Resolved accent of one word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredEntry")]
pub struct PitchEntry {
    pub reading: String,
    #[serde(rename = "drop_pos")]
    pub drop_position: usize,
    #[serde(rename = "num_mora")]
    pub mora_count: usize,
    pub pitch_type: PitchType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
    /// Synthesized because no source knew the word
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub provisional: bool,
}

impl PitchEntry {
    /// Entry for `reading` dropping after `drop_position`, clamped to the mora count
    pub fn new(reading: &str, drop_position: usize) -> Self {
        let mora_count = count_morae(reading);
        let drop_position = drop_position.min(mora_count);
        Self {
            reading: reading.to_string(),
            drop_position,
            mora_count,
            pitch_type: drop_pos_to_type(drop_position, mora_count),
            meaning: None,
            provisional: false,
        }
    }

    /// Flat entry used when neither cache nor reference can resolve a word
    pub fn provisional(reading: &str) -> Self {
        Self {
            provisional: true,
            ..Self::new(reading, 0)
        }
    }

    pub fn with_meaning(mut self, meaning: impl Into<String>) -> Self {
        self.meaning = Some(meaning.into());
        self
    }

    fn normalized(mut self) -> Self {
        self.reading = katakana_to_hiragana(&self.reading);
        self
    }
}

/// Record shape accepted on load.
///
/// `pitch_type` is not read: older stores write it as a 0-3 code next to a
/// `pitch_type_label`, and it is a function of the other two numbers anyway.
#[derive(Deserialize)]
struct StoredEntry {
    reading: String,
    drop_pos: usize,
    #[serde(default)]
    num_mora: Option<usize>,
    #[serde(default)]
    meaning: Option<String>,
    #[serde(default)]
    provisional: bool,
}

impl From<StoredEntry> for PitchEntry {
    fn from(stored: StoredEntry) -> Self {
        let mora_count = stored
            .num_mora
            .unwrap_or_else(|| count_morae(&stored.reading));
        let drop_position = stored.drop_pos.min(mora_count);
        Self {
            reading: stored.reading,
            drop_position,
            mora_count,
            pitch_type: drop_pos_to_type(drop_position, mora_count),
            meaning: stored.meaning,
            provisional: stored.provisional,
        }
    }
}

/// Persistent cache of pitch entries with reference fallback
pub struct PitchDatabase {
    store: PitchStore,
    analyzer: Rc<dyn MorphologicalAnalyzer>,
    reference: Box<dyn ReferenceSource>,
}

impl PitchDatabase {
    pub fn new(
        store: PitchStore,
        analyzer: Rc<dyn MorphologicalAnalyzer>,
        reference: Box<dyn ReferenceSource>,
    ) -> Self {
        Self {
            store,
            analyzer,
            reference,
        }
    }

    /// Cached entry for `key`, reading in hiragana
    pub fn lookup(&self, key: &str) -> Option<PitchEntry> {
        self.store.get(key).cloned().map(PitchEntry::normalized)
    }

    /// Resolve `word` through cache, analyzer normalization and the reference.
    ///
    /// Fails only when the analyzer rejects nonempty input.
    pub fn lookup_or_fetch(&mut self, word: &str) -> Result<PitchEntry, AnalysisError> {
        if let Some(entry) = self.lookup(word) {
            debug!("Cache hit for {:?}", word);
            return Ok(entry);
        }
        if word.trim().is_empty() {
            return Ok(PitchEntry::provisional(""));
        }

        let (dictionary_form, reading) = self.normalize(word)?;
        if let Some(entry) = self.lookup(&dictionary_form) {
            debug!("Cache hit for {:?} via dictionary form {:?}", word, dictionary_form);
            return Ok(entry);
        }

        Ok(self.fetch_and_store(&dictionary_form, &dictionary_form, &reading))
    }

    /// Resolve a merged conjugated form, keyed by its full surface.
    ///
    /// `reading` is the reading of the whole conjugated surface and serves as the hint.
    pub fn lookup_conjugated_form(
        &mut self,
        surface: &str,
        reading: &str,
        dictionary_form: &str,
    ) -> Result<PitchEntry, AnalysisError> {
        if let Some(entry) = self.lookup(surface) {
            debug!("Cache hit for conjugated form {:?}", surface);
            return Ok(entry);
        }
        if surface.trim().is_empty() {
            return Ok(PitchEntry::provisional(""));
        }

        // The dictionary form is analyzed so an unanalyzable head still fails like lookup_or_fetch
        let (normalized_form, _) = self.normalize(dictionary_form)?;
        let reading = katakana_to_hiragana(reading);
        Ok(self.fetch_and_store(surface, &normalized_form, &reading))
    }

    /// Overwrite `key` and rewrite the backing file
    pub fn add_entry(&mut self, key: &str, entry: PitchEntry) {
        if let Err(e) = self.store.insert(key, entry) {
            warn!("Failed to persist pitch entry for {:?}: {}", key, e);
        }
    }

    /// Dictionary form and hiragana reading of `word` according to the analyzer
    fn normalize(&self, word: &str) -> Result<(String, String), AnalysisError> {
        let tokens = self.analyzer.analyze(word)?;
        let reading: String = tokens.iter().map(|t| t.reading.as_str()).collect();
        let dictionary_form = match tokens.as_slice() {
            [single] => single.dictionary_form.clone(),
            _ => word.to_string(),
        };
        Ok((dictionary_form, katakana_to_hiragana(&reading)))
    }

    fn fetch_and_store(&mut self, key: &str, dictionary_form: &str, hint: &str) -> PitchEntry {
        let hint = Some(hint).filter(|h| !h.is_empty());
        let entry = match reference::resolve(self.reference.as_ref(), dictionary_form, hint) {
            Ok(accent) => {
                info!(
                    "Reference resolved {:?} as {:?} drop {}",
                    dictionary_form, accent.reading, accent.drop_position
                );
                PitchEntry::new(&accent.reading, accent.drop_position)
            }
            Err(e) => {
                warn!("Reference lookup for {:?} failed ({}), using flat fallback", dictionary_form, e);
                PitchEntry::provisional(hint.unwrap_or(""))
            }
        };

        self.add_entry(key, entry.clone());
        entry
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.store.keys()
    }

    /// Number of full store rewrites since opening
    pub fn writes(&self) -> u64 {
        self.store.writes()
    }

    /// Handle to the analyzer used for normalization
    pub fn analyzer(&self) -> Rc<dyn MorphologicalAnalyzer> {
        Rc::clone(&self.analyzer)
    }
}
