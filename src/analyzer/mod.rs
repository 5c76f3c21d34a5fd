// WHY: Boundary between raw morphological analysis and the pitch engine
// Part-of-speech labels are mapped once here; downstream rules only see `PartOfSpeech`

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

pub mod features;
pub mod lexicon;
pub mod vibrato_adapter;

pub use features::FeatureLayout;
pub use lexicon::{LexiconAnalyzer, LexiconWord};
pub use vibrato_adapter::VibratoAnalyzer;

/// Particle subcategories relevant to merging and phrase boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticleKind {
    /// 格助詞: が, を, に, で ...
    Case,
    /// 係助詞: は, も ...
    Binding,
    /// 接続助詞: て, ば, から ...
    Conjunctive,
    /// 副助詞: まで, ばかり ...
    Adverbial,
    /// 終助詞: ね, よ, か ...
    SentenceFinal,
    Other,
}

/// Inflectional auxiliary verbs that attach to a verb or adjective stem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuxiliaryKind {
    /// ます
    Polite,
    /// た, including the voiced だ of 泳いだ (still 特殊・タ)
    Past,
    /// ない
    Negative,
    Other,
}

/// Closed part-of-speech enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    /// 形容動詞語幹 / 形状詞
    AdjectivalNoun,
    Adverb,
    Prefix,
    Suffix,
    Particle(ParticleKind),
    Auxiliary(AuxiliaryKind),
    Punctuation,
    Other,
}

impl PartOfSpeech {
    /// Map MeCab/Sudachi style labels (major category, subcategory, conjugation type)
    pub fn from_labels(major: &str, minor: &str, conjugation_type: &str) -> Self {
        match major {
            "名詞" | "代名詞" => match minor {
                "形容動詞語幹" => PartOfSpeech::AdjectivalNoun,
                "接尾" => PartOfSpeech::Suffix,
                _ => PartOfSpeech::Noun,
            },
            "動詞" => PartOfSpeech::Verb,
            "形容詞" => PartOfSpeech::Adjective,
            "形状詞" => PartOfSpeech::AdjectivalNoun,
            "副詞" => PartOfSpeech::Adverb,
            "接頭詞" | "接頭辞" => PartOfSpeech::Prefix,
            "接尾辞" => PartOfSpeech::Suffix,
            "助詞" => PartOfSpeech::Particle(match minor {
                "格助詞" => ParticleKind::Case,
                "係助詞" => ParticleKind::Binding,
                "接続助詞" => ParticleKind::Conjunctive,
                "副助詞" => ParticleKind::Adverbial,
                "終助詞" => ParticleKind::SentenceFinal,
                _ => ParticleKind::Other,
            }),
            "助動詞" => PartOfSpeech::Auxiliary(auxiliary_kind(conjugation_type)),
            "記号" | "補助記号" => PartOfSpeech::Punctuation,
            _ => PartOfSpeech::Other,
        }
    }

    /// Heads that can absorb a following inflection
    pub fn is_inflectable_stem(self) -> bool {
        matches!(self, PartOfSpeech::Verb | PartOfSpeech::Adjective)
    }

    /// Auxiliaries and particles recognized as inflectional endings
    pub fn is_inflection(self) -> bool {
        matches!(
            self,
            PartOfSpeech::Auxiliary(
                AuxiliaryKind::Polite | AuxiliaryKind::Past | AuxiliaryKind::Negative
            ) | PartOfSpeech::Particle(ParticleKind::Conjunctive)
        )
    }

    pub fn is_particle(self) -> bool {
        matches!(self, PartOfSpeech::Particle(_))
    }
}

fn auxiliary_kind(conjugation_type: &str) -> AuxiliaryKind {
    // ipadic spells these 特殊・マス, UniDic and Sudachi 助動詞-マス
    if conjugation_type.ends_with("マス") {
        AuxiliaryKind::Polite
    } else if conjugation_type.ends_with("タ") {
        AuxiliaryKind::Past
    } else if conjugation_type.ends_with("ナイ") {
        AuxiliaryKind::Negative
    } else {
        AuxiliaryKind::Other
    }
}

/// One analyzed morpheme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Form as written in the input
    pub surface: String,
    /// Uninflected form, the primary cache key
    pub dictionary_form: String,
    /// Reading in hiragana
    pub reading: String,
    pub pos: PartOfSpeech,
    /// Raw labels as reported by the analyzer, kept for diagnostics
    pub pos_tags: Vec<String>,
}

/// Segments raw text into tokens
pub trait MorphologicalAnalyzer {
    /// Analyze `text`. Nonempty input that yields no tokens is an error.
    fn analyze(&self, text: &str) -> Result<Vec<Token>, AnalysisError>;

    fn name(&self) -> &'static str;
}

/// Enforce the "no tokens for nonempty input" contract shared by every analyzer
pub(crate) fn ensure_tokens(text: &str, tokens: Vec<Token>) -> Result<Vec<Token>, AnalysisError> {
    if tokens.is_empty() && !text.trim().is_empty() {
        return Err(AnalysisError::NoTokens {
            input: text.to_string(),
        });
    }
    Ok(tokens)
}
