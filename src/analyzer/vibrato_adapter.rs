// WHY: Production analyzer backed by a compiled vibrato system dictionary
// Raw feature strings become fixed-shape `Token`s here and nowhere else

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::{debug, info};
use vibrato::{Dictionary, Tokenizer};

use super::{ensure_tokens, FeatureLayout, MorphologicalAnalyzer, Token};
use crate::error::AnalysisError;

pub struct VibratoAnalyzer {
    tokenizer: Tokenizer,
    layout: FeatureLayout,
}

impl VibratoAnalyzer {
    /// Load a system dictionary, zstd-compressed when the file ends in `.zst`
    pub fn from_path<P: AsRef<Path>>(path: P, layout: FeatureLayout) -> Result<Self, AnalysisError> {
        let path = path.as_ref();
        info!("Loading vibrato dictionary from {}", path.display());

        let file = File::open(path)?;
        let is_zstd = path.extension().is_some_and(|ext| ext == "zst");
        let dict = if is_zstd {
            Dictionary::read(zstd::Decoder::new(file)?)
        } else {
            Dictionary::read(BufReader::new(file))
        }
        .map_err(|e| AnalysisError::Dictionary(format!("{}: {e}", path.display())))?;

        Ok(Self::from_dictionary(dict, layout))
    }

    pub fn from_dictionary(dict: Dictionary, layout: FeatureLayout) -> Self {
        Self {
            tokenizer: Tokenizer::new(dict),
            layout,
        }
    }
}

impl MorphologicalAnalyzer for VibratoAnalyzer {
    fn analyze(&self, text: &str) -> Result<Vec<Token>, AnalysisError> {
        let mut worker = self.tokenizer.new_worker();
        worker.reset_sentence(text);
        worker.tokenize();

        let mut tokens = Vec::with_capacity(worker.num_tokens());
        for i in 0..worker.num_tokens() {
            let t = worker.token(i);
            if t.surface().trim().is_empty() {
                continue;
            }
            tokens.push(self.layout.token_from_feature(t.surface(), t.feature()));
        }

        debug!("vibrato produced {} tokens for {:?}", tokens.len(), text);
        ensure_tokens(text, tokens)
    }

    fn name(&self) -> &'static str {
        "vibrato"
    }
}
