// Canned analyzer vocabulary and reference pages
// WHY: Deterministic inputs let the pipeline run without a system dictionary or network

use pitchsmith::LexiconWord;

/// Vocabulary covering every sentence used by the integration tests
pub fn lexicon_words() -> Vec<LexiconWord> {
    vec![
        LexiconWord::new("大学", "ダイガク", &["名詞", "一般"]),
        LexiconWord::new("木", "キ", &["名詞", "一般"]),
        LexiconWord::new("箸", "ハシ", &["名詞", "一般"]),
        LexiconWord::new("私", "ワタシ", &["名詞", "代名詞"]),
        LexiconWord::new("学生", "ガクセイ", &["名詞", "一般"]),
        LexiconWord::new("に", "ニ", &["助詞", "格助詞"]),
        LexiconWord::new("を", "ヲ", &["助詞", "格助詞"]),
        LexiconWord::new("は", "ハ", &["助詞", "係助詞"]),
        LexiconWord::new("も", "モ", &["助詞", "係助詞"]),
        LexiconWord::new("です", "デス", &["助動詞", "*", "*", "*", "特殊・デス"]),
        LexiconWord::new("行き", "イキ", &["動詞", "自立", "*", "*", "五段・カ行促音便"])
            .with_dictionary_form("行く"),
        LexiconWord::new("ます", "マス", &["助動詞", "*", "*", "*", "特殊・マス"]),
        LexiconWord::new("使っ", "ツカッ", &["動詞", "自立", "*", "*", "五段・ワ行促音便"])
            .with_dictionary_form("使う"),
        LexiconWord::new("た", "タ", &["助動詞", "*", "*", "*", "特殊・タ"]),
    ]
}

/// Lexicon file body equivalent to `lexicon_words`
pub fn lexicon_json() -> String {
    serde_json::to_string_pretty(&lexicon_words()).unwrap_or_default()
}

fn mora(text: &str, nucleus: bool, idx: usize) -> String {
    let class = if nucleus {
        format!(" accent_top mola_-{idx}")
    } else {
        format!("accent_plain mola_-{idx}")
    };
    format!(r#"<span class="{class}"><span class="inner"><span class="char">{text}</span></span></span>"#)
}

/// One `accented_word` element with the nucleus after `drop` morae (0 for none)
pub fn accented_word(morae: &[&str], drop: usize) -> String {
    let body: String = morae
        .iter()
        .enumerate()
        .map(|(i, m)| mora(m, i + 1 == drop, morae.len() - i))
        .collect();
    format!(r#"<span class=" accented_word">{body}</span>"#)
}

/// Search result page with one word row holding the given readings
pub fn reference_page(readings: &[String]) -> String {
    format!(
        r#"<html><body><table id="word_table"><tbody>
<tr id="word_1042"><td class="midashi"><p class="midashi_wrapper">見出し</p></td>
<td class="katsuyo katsuyo_jisho_js"><div class="katsuyo_proc">{}</div></td></tr>
</tbody></table></body></html>"#,
        readings.concat()
    )
}

/// Page the reference serves for an unknown word
pub const EMPTY_RESULT_PAGE: &str =
    r#"<html><body><div id="search_result">該当する単語がありません</div></body></html>"#;
