pub mod analyzer;
pub mod config;
pub mod error;
pub mod kana;
pub mod pattern;
pub mod pitch_db;
pub mod reference;
pub mod sentence;

// Re-export main types for convenient access
pub use analyzer::{
    FeatureLayout, LexiconAnalyzer, LexiconWord, MorphologicalAnalyzer,
    PartOfSpeech, Token, VibratoAnalyzer
};

pub use config::PitchConfig;
pub use error::{AnalysisError, FetchError, StoreError};

// Re-export the pattern engine
pub use pattern::{
    drop_pos_to_type, get_accent_flags, get_pattern,
    render_flags, render_levels, Level, PitchType
};

pub use pitch_db::{PitchDatabase, PitchEntry, PitchStore};
pub use reference::{NullReference, OjadClient, ReferenceCandidate, ReferenceSource};
pub use sentence::{
    PhraseContour, PhraseRules, SentenceContour,
    SentencePitchProcessor, WordContour
};
