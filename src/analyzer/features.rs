// WHY: Dictionaries disagree on where fields live in the comma-separated feature string
// A layout names the columns once so the adapter stays dictionary-agnostic

use std::str::FromStr;

use super::{PartOfSpeech, Token};
use crate::kana::katakana_to_hiragana;

/// Column positions inside a MeCab-style feature string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureLayout {
    pub major_pos: usize,
    pub minor_pos: usize,
    pub conjugation_type: usize,
    pub base_form: usize,
    pub reading: usize,
    /// Column read when `reading` is absent, e.g. short UniDic rows without `kana`
    pub reading_fallback: Option<usize>,
    /// Number of leading columns reported as raw POS tags
    pub pos_columns: usize,
}

impl FeatureLayout {
    /// mecab-ipadic: pos1..pos4, conj type, conj form, base, reading, pronunciation
    pub const IPADIC: FeatureLayout = FeatureLayout {
        major_pos: 0,
        minor_pos: 1,
        conjugation_type: 4,
        base_form: 6,
        reading: 7,
        reading_fallback: None,
        pos_columns: 6,
    };

    /// unidic-mecab: pos1..pos4, cType, cForm, lForm, lemma, orth, pron, orthBase,
    /// pronBase, ... kana (20).
    ///
    /// `pron` is phonetic (センセー, ワ for は) and would not match reference
    /// readings, so the orthographic `kana` column is preferred and `pron` is
    /// only used for dictionaries that stop before it.
    pub const UNIDIC: FeatureLayout = FeatureLayout {
        major_pos: 0,
        minor_pos: 1,
        conjugation_type: 4,
        base_form: 10,
        reading: 20,
        reading_fallback: Some(9),
        pos_columns: 6,
    };

    /// Build a token from a surface and its raw feature string.
    ///
    /// Missing or `*` columns fall back to the surface (dictionary form) or the
    /// hiragana-converted surface (reading), which is what unknown words carry.
    pub fn token_from_feature(&self, surface: &str, feature: &str) -> Token {
        let columns: Vec<&str> = feature.split(',').collect();
        let column = |idx: usize| column_value(&columns, idx);

        let pos = PartOfSpeech::from_labels(
            column(self.major_pos).unwrap_or(""),
            column(self.minor_pos).unwrap_or(""),
            column(self.conjugation_type).unwrap_or(""),
        );
        let dictionary_form = column(self.base_form).unwrap_or(surface).to_string();
        let reading = column(self.reading)
            .or_else(|| self.reading_fallback.and_then(column))
            .unwrap_or(surface);
        let reading = katakana_to_hiragana(reading);
        let pos_tags = columns
            .iter()
            .take(self.pos_columns)
            .map(|c| c.to_string())
            .collect();

        Token {
            surface: surface.to_string(),
            dictionary_form,
            reading,
            pos,
            pos_tags,
        }
    }
}

fn column_value<'a>(columns: &[&'a str], idx: usize) -> Option<&'a str> {
    columns
        .get(idx)
        .map(|c| c.trim())
        .filter(|c| !c.is_empty() && *c != "*")
}

impl Default for FeatureLayout {
    fn default() -> Self {
        Self::IPADIC
    }
}

impl FromStr for FeatureLayout {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "ipadic" => Ok(Self::IPADIC),
            "unidic" => Ok(Self::UNIDIC),
            other => Err(format!("unknown feature layout '{other}' (expected ipadic or unidic)")),
        }
    }
}
