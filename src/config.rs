// WHY: One JSON document describes the store, the analyzer and the reference source
// Every field has a default so an empty `{}` file is a valid configuration

use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analyzer::{FeatureLayout, LexiconAnalyzer, MorphologicalAnalyzer, VibratoAnalyzer};
use crate::pitch_db::{PitchDatabase, PitchStore};
use crate::reference::{NullReference, OjadClient, ReferenceSource, DEFAULT_ENDPOINT};
use crate::sentence::PhraseRules;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub timeout_ms: u64,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Compiled vibrato system dictionary, optionally zstd compressed
    pub dictionary: Option<PathBuf>,
    /// JSON word list for the lexicon analyzer, used when no dictionary is set
    pub lexicon: Option<PathBuf>,
    /// Feature column layout of the dictionary: "ipadic" or "unidic"
    pub layout: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            dictionary: None,
            lexicon: None,
            layout: "ipadic".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchConfig {
    pub store_path: PathBuf,
    pub reference: ReferenceConfig,
    pub analyzer: AnalyzerConfig,
    pub phrase: PhraseRules,
}

impl Default for PitchConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("pitch_db.json"),
            reference: ReferenceConfig::default(),
            analyzer: AnalyzerConfig::default(),
            phrase: PhraseRules::default(),
        }
    }
}

impl PitchConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: PitchConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn reference_timeout(&self) -> Duration {
        Duration::from_millis(self.reference.timeout_ms)
    }

    /// Vibrato when a dictionary is configured, otherwise the lexicon analyzer
    pub fn build_analyzer(&self) -> Result<Rc<dyn MorphologicalAnalyzer>> {
        if let Some(dictionary) = &self.analyzer.dictionary {
            let layout: FeatureLayout = self
                .analyzer
                .layout
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))?;
            let analyzer = VibratoAnalyzer::from_path(dictionary, layout)
                .with_context(|| format!("Failed to load dictionary: {}", dictionary.display()))?;
            return Ok(Rc::new(analyzer));
        }

        if let Some(lexicon) = &self.analyzer.lexicon {
            let analyzer = LexiconAnalyzer::from_json_path(lexicon)
                .with_context(|| format!("Failed to load lexicon: {}", lexicon.display()))?;
            return Ok(Rc::new(analyzer));
        }

        bail!("No analyzer configured: set analyzer.dictionary or analyzer.lexicon");
    }

    pub fn build_reference(&self) -> Result<Box<dyn ReferenceSource>> {
        if !self.reference.enabled {
            info!("Reference lookups disabled");
            return Ok(Box::new(NullReference));
        }
        let client = OjadClient::new(&self.reference.endpoint, self.reference_timeout())
            .context("Failed to configure reference client")?;
        Ok(Box::new(client))
    }

    pub fn open_database(&self, analyzer: Rc<dyn MorphologicalAnalyzer>) -> Result<PitchDatabase> {
        let store = PitchStore::open(&self.store_path)
            .with_context(|| format!("Failed to open pitch store: {}", self.store_path.display()))?;
        Ok(PitchDatabase::new(store, analyzer, self.build_reference()?))
    }
}
