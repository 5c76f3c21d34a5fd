// WHY: Fold a verb/adjective and its inflectional ending into one logical word
// Conjugated forms carry their own accent, so they are resolved as a unit

use crate::analyzer::{PartOfSpeech, Token};

/// A token after the merge step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalToken {
    pub surface: String,
    pub dictionary_form: String,
    pub reading: String,
    /// Part of speech of the head token
    pub pos: PartOfSpeech,
    /// True when built from a stem plus an inflection
    pub merged: bool,
}

impl From<&Token> for LogicalToken {
    fn from(token: &Token) -> Self {
        Self {
            surface: token.surface.clone(),
            dictionary_form: token.dictionary_form.clone(),
            reading: token.reading.clone(),
            pos: token.pos,
            merged: false,
        }
    }
}

fn can_merge(head: &Token, next: &Token) -> bool {
    head.pos.is_inflectable_stem() && next.pos.is_inflection()
}

/// Merge stem + inflection pairs, looking at most one token ahead.
///
/// 食べ + ます becomes 食べます with dictionary form 食べる. A chain such as
/// 食べ + ませ + ん only merges its first pair.
pub fn merge_conjugations(tokens: &[Token]) -> Vec<LogicalToken> {
    let mut merged = Vec::with_capacity(tokens.len());
    let mut i = 0;

    while i < tokens.len() {
        let head = &tokens[i];
        match tokens.get(i + 1) {
            Some(next) if can_merge(head, next) => {
                merged.push(LogicalToken {
                    surface: format!("{}{}", head.surface, next.surface),
                    dictionary_form: head.dictionary_form.clone(),
                    reading: format!("{}{}", head.reading, next.reading),
                    pos: head.pos,
                    merged: true,
                });
                i += 2;
            }
            _ => {
                merged.push(LogicalToken::from(head));
                i += 1;
            }
        }
    }

    merged
}
