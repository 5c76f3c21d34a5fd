// WHY: Script handling shared by the analyzer adapter, the reference extractor and the database
// Readings are compared and stored in hiragana; morae are the unit of every contour

/// Prolonged sound mark, kept as-is by transliteration
pub const PROLONGED_SOUND_MARK: char = 'ー';

const KATAKANA_BLOCK_START: u32 = 0x30A1; // ァ
const KATAKANA_BLOCK_END: u32 = 0x30F6; // ヶ
const KATAKANA_TO_HIRAGANA_OFFSET: u32 = 0x60;

/// Map a single katakana character to hiragana, leaving anything else untouched.
///
/// Covers ァ..ヶ plus the iteration marks ヽ/ヾ. ヷ..ヺ have no single hiragana
/// counterpart and pass through, as does the prolonged sound mark.
pub fn katakana_char_to_hiragana(ch: char) -> char {
    let code = ch as u32;
    let mapped = match code {
        KATAKANA_BLOCK_START..=KATAKANA_BLOCK_END => code - KATAKANA_TO_HIRAGANA_OFFSET,
        0x30FD | 0x30FE => code - KATAKANA_TO_HIRAGANA_OFFSET, // ヽ ヾ -> ゝ ゞ
        _ => return ch,
    };
    char::from_u32(mapped).unwrap_or(ch)
}

/// Transliterate every katakana character in `text` to hiragana
pub fn katakana_to_hiragana(text: &str) -> String {
    text.chars().map(katakana_char_to_hiragana).collect()
}

pub fn is_hiragana(ch: char) -> bool {
    ('\u{3040}'..='\u{309F}').contains(&ch)
}

pub fn is_katakana(ch: char) -> bool {
    ('\u{30A0}'..='\u{30FF}').contains(&ch)
}

pub fn is_kana(ch: char) -> bool {
    is_hiragana(ch) || is_katakana(ch)
}

/// CJK unified ideographs plus the iteration mark 々
pub fn is_kanji(ch: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&ch) || ch == '々'
}

/// Small kana that fuse with the preceding character into one mora
pub fn is_combining_small_kana(ch: char) -> bool {
    matches!(
        ch,
        'ゃ' | 'ゅ' | 'ょ' | 'ぁ' | 'ぃ' | 'ぅ' | 'ぇ' | 'ぉ' | 'ゎ' | 'ゕ' | 'ゖ'
            | 'ャ' | 'ュ' | 'ョ' | 'ァ' | 'ィ' | 'ゥ' | 'ェ' | 'ォ' | 'ヮ' | 'ヵ' | 'ヶ'
    )
}

/// True when `text` holds no kana or kanji at all (punctuation, symbols, whitespace)
pub fn is_non_lexical(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| !is_kana(c) && !is_kanji(c) && !c.is_alphanumeric())
}

/// Split a reading into morae.
///
/// Small glide/vowel kana attach to the previous mora; っ, ん and ー are morae
/// of their own. A leading small kana stands alone.
pub fn morae(reading: &str) -> Vec<&str> {
    let mut result: Vec<&str> = Vec::with_capacity(reading.len() / 3);
    let mut start: Option<usize> = None;

    for (idx, ch) in reading.char_indices() {
        if is_combining_small_kana(ch) && start.is_some() {
            continue;
        }
        if let Some(s) = start {
            result.push(&reading[s..idx]);
        }
        start = Some(idx);
    }
    if let Some(s) = start {
        result.push(&reading[s..]);
    }
    result
}

pub fn count_morae(reading: &str) -> usize {
    morae(reading).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_katakana_to_hiragana_basic() {
        assert_eq!(katakana_to_hiragana("ダイガク"), "だいがく");
        assert_eq!(katakana_to_hiragana("タベル"), "たべる");
        assert_eq!(katakana_to_hiragana("ヴァイオリン"), "ゔぁいおりん");
    }

    #[test]
    fn test_katakana_to_hiragana_passthrough() {
        assert_eq!(katakana_to_hiragana("シャーベット"), "しゃーべっと");
        assert_eq!(katakana_to_hiragana("ヷ"), "ヷ");
        assert_eq!(katakana_to_hiragana("大学、ABC"), "大学、ABC");
        assert_eq!(katakana_to_hiragana("すでにひらがな"), "すでにひらがな");
    }

    #[test]
    fn test_full_block_maps_into_hiragana() {
        for code in KATAKANA_BLOCK_START..=KATAKANA_BLOCK_END {
            let ch = char::from_u32(code).unwrap();
            assert!(is_hiragana(katakana_char_to_hiragana(ch)), "{ch} did not map to hiragana");
        }
    }

    #[test]
    fn test_morae_segmentation() {
        assert_eq!(morae("だいがく"), vec!["だ", "い", "が", "く"]);
        assert_eq!(morae("きょう"), vec!["きょ", "う"]);
        assert_eq!(morae("しゃーべっと"), vec!["しゃ", "ー", "べ", "っ", "と"]);
        assert_eq!(morae("べんきょう"), vec!["べ", "ん", "きょ", "う"]);
        assert_eq!(morae("ゃあ"), vec!["ゃ", "あ"]);
        assert!(morae("").is_empty());
    }

    #[test]
    fn test_count_morae_punctuation_is_one_mora() {
        assert_eq!(count_morae("。"), 1);
        assert_eq!(count_morae("いきます。"), 5);
    }

    #[test]
    fn test_script_predicates() {
        assert!(is_kanji('学'));
        assert!(is_kana('が'));
        assert!(is_kana('ガ'));
        assert!(!is_kana('A'));
        assert!(is_non_lexical("。"));
        assert!(is_non_lexical("、"));
        assert!(!is_non_lexical("は"));
        assert!(!is_non_lexical(""));
    }
}
