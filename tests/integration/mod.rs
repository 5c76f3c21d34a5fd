// Integration test utilities and common code
// WHY: Centralized utilities avoid duplication across integration tests

#![allow(dead_code)]

pub mod fixtures;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use pitchsmith::reference::parse_reference_page;
use pitchsmith::{
    FetchError, LexiconAnalyzer, MorphologicalAnalyzer, PitchDatabase, PitchStore,
    ReferenceCandidate, ReferenceSource,
};
use tempfile::TempDir;

/// Reference source serving canned pages and counting queries
#[derive(Clone, Default)]
pub struct StubReference {
    pages: Rc<RefCell<HashMap<String, String>>>,
    calls: Rc<Cell<usize>>,
    queried: Rc<RefCell<Vec<String>>>,
}

impl StubReference {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `readings` for `dictionary_form`
    pub fn with_word(self, dictionary_form: &str, readings: &[String]) -> Self {
        self.pages
            .borrow_mut()
            .insert(dictionary_form.to_string(), fixtures::reference_page(readings));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn queried(&self) -> Vec<String> {
        self.queried.borrow().clone()
    }
}

impl ReferenceSource for StubReference {
    fn candidates(&self, dictionary_form: &str) -> Result<Vec<ReferenceCandidate>, FetchError> {
        self.calls.set(self.calls.get() + 1);
        self.queried.borrow_mut().push(dictionary_form.to_string());
        let pages = self.pages.borrow();
        let page = pages
            .get(dictionary_form)
            .map(String::as_str)
            .unwrap_or(fixtures::EMPTY_RESULT_PAGE);
        parse_reference_page(page)
    }
}

/// Test fixture with a temporary store directory and a lexicon analyzer
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
    pub analyzer: Rc<LexiconAnalyzer>,
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            root_path,
            analyzer: Rc::new(LexiconAnalyzer::from_words(fixtures::lexicon_words())),
        }
    }

    pub fn store_path(&self) -> PathBuf {
        self.root_path.join("pitch_db.json")
    }

    /// Write the fixture lexicon to disk for CLI and config tests
    pub fn write_lexicon(&self) -> PathBuf {
        let path = self.root_path.join("lexicon.json");
        fs::write(&path, fixtures::lexicon_json()).expect("Failed to write lexicon");
        path
    }

    /// Open the on-disk store with the given reference source
    pub fn database(&self, reference: StubReference) -> PitchDatabase {
        self.database_with(self.analyzer.clone(), reference)
    }

    /// Open the on-disk store with a caller-supplied analyzer
    pub fn database_with(
        &self,
        analyzer: Rc<dyn MorphologicalAnalyzer>,
        reference: StubReference,
    ) -> PitchDatabase {
        let store = PitchStore::open(self.store_path()).expect("Failed to open pitch store");
        PitchDatabase::new(store, analyzer, Box::new(reference))
    }

    pub fn read_store(&self) -> serde_json::Value {
        let content = fs::read_to_string(self.store_path()).expect("Failed to read pitch store");
        serde_json::from_str(&content).expect("Pitch store is not valid JSON")
    }
}
