// WHY: Contract with the external accent reference
// Sources return raw candidates; choosing one and deriving the drop position is done here, purely

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FetchError;
use crate::kana::katakana_to_hiragana;

pub mod ojad;

pub use ojad::{parse_reference_page, OjadClient, DEFAULT_ENDPOINT};

/// One accent-annotated reading listed by the reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceCandidate {
    /// Reading in kana, one entry of `morae` per mora
    pub reading: String,
    /// Text of each mora
    pub morae: Vec<String>,
    /// True where the mora carries the accent nucleus
    pub nucleus: Vec<bool>,
}

impl ReferenceCandidate {
    /// Build a candidate from (mora text, nucleus marker) pairs
    pub fn from_morae<I, S>(morae: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        let (morae, nucleus): (Vec<String>, Vec<bool>) =
            morae.into_iter().map(|(m, n)| (m.into(), n)).unzip();
        Self {
            reading: morae.concat(),
            morae,
            nucleus,
        }
    }

    /// 1-based index of the first mora carrying the nucleus, 0 when none does
    pub fn drop_position(&self) -> usize {
        self.nucleus
            .iter()
            .position(|&n| n)
            .map_or(0, |idx| idx + 1)
    }

    pub fn mora_count(&self) -> usize {
        self.morae.len()
    }
}

/// Accent resolved from the reference for one word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAccent {
    /// Hiragana reading of the chosen candidate
    pub reading: String,
    pub drop_position: usize,
    pub mora_count: usize,
}

/// An external source of accent candidates
pub trait ReferenceSource {
    /// All candidates listed for `dictionary_form`; an empty list is a valid answer
    fn candidates(&self, dictionary_form: &str) -> Result<Vec<ReferenceCandidate>, FetchError>;
}

/// Source used when reference lookups are disabled
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReference;

impl ReferenceSource for NullReference {
    fn candidates(&self, _dictionary_form: &str) -> Result<Vec<ReferenceCandidate>, FetchError> {
        Err(FetchError::Disabled)
    }
}

/// Pick the candidate matching `hint`.
///
/// Tiers, first non-empty wins: exact reading, reading is a suffix of the hint,
/// any shared character, first candidate. Without a hint the first candidate wins.
pub fn select_candidate<'c>(
    candidates: &'c [ReferenceCandidate],
    hint: Option<&str>,
) -> Option<&'c ReferenceCandidate> {
    let first = candidates.first()?;
    let Some(hint) = hint.filter(|h| !h.is_empty()) else {
        return Some(first);
    };
    let hint = katakana_to_hiragana(hint);
    let normalized: Vec<String> = candidates
        .iter()
        .map(|c| katakana_to_hiragana(&c.reading))
        .collect();

    let tier = |pred: &dyn Fn(&str) -> bool| {
        normalized
            .iter()
            .position(|r| pred(r.as_str()))
            .map(|idx| &candidates[idx])
    };

    tier(&|r: &str| r == hint)
        .or_else(|| tier(&|r: &str| !r.is_empty() && hint.ends_with(r)))
        .or_else(|| tier(&|r: &str| r.chars().any(|c| hint.contains(c))))
        .or(Some(first))
}

/// Query `source` and resolve a single accent for `dictionary_form`
pub fn resolve(
    source: &dyn ReferenceSource,
    dictionary_form: &str,
    hint: Option<&str>,
) -> Result<ResolvedAccent, FetchError> {
    let candidates = source.candidates(dictionary_form)?;
    let chosen = select_candidate(&candidates, hint)
        .ok_or_else(|| FetchError::NotFound(dictionary_form.to_string()))?;

    if chosen.morae.is_empty() {
        return Err(FetchError::Malformed(format!(
            "candidate for {dictionary_form:?} has no morae"
        )));
    }

    debug!(
        "reference chose {:?} out of {} candidates for {:?}",
        chosen.reading,
        candidates.len(),
        dictionary_form
    );

    Ok(ResolvedAccent {
        reading: katakana_to_hiragana(&chosen.reading),
        drop_position: chosen.drop_position(),
        mora_count: chosen.mora_count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(reading: &str, drop: usize) -> ReferenceCandidate {
        let morae: Vec<(String, bool)> = crate::kana::morae(reading)
            .into_iter()
            .enumerate()
            .map(|(i, m)| (m.to_string(), i + 1 == drop))
            .collect();
        ReferenceCandidate::from_morae(morae)
    }

    #[test]
    fn test_drop_position_from_markers() {
        assert_eq!(candidate("だいがく", 0).drop_position(), 0);
        assert_eq!(candidate("き", 1).drop_position(), 1);
        assert_eq!(candidate("おかし", 2).drop_position(), 2);
        assert_eq!(candidate("きょう", 1).mora_count(), 2);
    }

    #[test]
    fn test_first_marked_mora_wins() {
        let c = ReferenceCandidate::from_morae([("た", false), ("べ", true), ("る", true)]);
        assert_eq!(c.drop_position(), 2);
    }

    #[test]
    fn test_select_exact_match() {
        let candidates = vec![candidate("たべる", 2), candidate("たべます", 3)];
        let chosen = select_candidate(&candidates, Some("たべます")).unwrap();
        assert_eq!(chosen.reading, "たべます");
    }

    #[test]
    fn test_select_suffix_of_hint() {
        let candidates = vec![candidate("いく", 0), candidate("きます", 2)];
        let chosen = select_candidate(&candidates, Some("いきます")).unwrap();
        assert_eq!(chosen.reading, "きます");
    }

    #[test]
    fn test_select_shared_character() {
        let candidates = vec![candidate("ほん", 1), candidate("かう", 0)];
        let chosen = select_candidate(&candidates, Some("かいました")).unwrap();
        assert_eq!(chosen.reading, "かう");
    }

    #[test]
    fn test_select_falls_back_to_first() {
        let candidates = vec![candidate("ほん", 1), candidate("みず", 0)];
        assert_eq!(select_candidate(&candidates, Some("てすと")).unwrap().reading, "ほん");
        assert_eq!(select_candidate(&candidates, None).unwrap().reading, "ほん");
        assert!(select_candidate(&[], Some("ほん")).is_none());
    }

    #[test]
    fn test_select_normalizes_katakana_hint() {
        let candidates = vec![candidate("みず", 0), candidate("だいがく", 0)];
        assert_eq!(select_candidate(&candidates, Some("ダイガク")).unwrap().reading, "だいがく");
    }

    #[test]
    fn test_null_reference_is_disabled() {
        assert!(matches!(resolve(&NullReference, "大学", None), Err(FetchError::Disabled)));
    }
}
