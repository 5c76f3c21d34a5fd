// WHY: HTTP-backed reference source plus the markup extraction contract
// Only the row / candidate / mora structure is relied on; everything else in the page is ignored

use std::sync::OnceLock;
use std::time::Duration;

use regex_automata::meta::Regex;
use tracing::{debug, warn};
use url::Url;

use super::{ReferenceCandidate, ReferenceSource};
use crate::error::FetchError;

pub const DEFAULT_ENDPOINT: &str = "http://www.gavo.t.u-tokyo.ac.jp/ojad/search/index";

/// Default bound on connect + request time
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocking client for the online accent dictionary
pub struct OjadClient {
    endpoint: Url,
    agent: ureq::Agent,
}

impl OjadClient {
    /// Client for `endpoint`, which must be an absolute http(s) URL
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, FetchError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| FetchError::InvalidEndpoint(format!("{endpoint}: {e}")))?;
        if endpoint.cannot_be_a_base() || !matches!(endpoint.scheme(), "http" | "https") {
            return Err(FetchError::InvalidEndpoint(format!(
                "{endpoint}: expected an http or https URL"
            )));
        }

        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout(timeout)
            .build();
        Ok(Self { endpoint, agent })
    }

    /// Search URL for a dictionary form, one `word:<form>` path segment under the endpoint
    pub fn word_url(&self, dictionary_form: &str) -> Result<Url, FetchError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidEndpoint(self.endpoint.to_string()))?
            .pop_if_empty()
            .push(&format!("word:{dictionary_form}"));
        Ok(url)
    }
}

impl ReferenceSource for OjadClient {
    fn candidates(&self, dictionary_form: &str) -> Result<Vec<ReferenceCandidate>, FetchError> {
        let url = self.word_url(dictionary_form)?;
        debug!("Fetching reference page {}", url);

        let response = self.agent.request_url("GET", &url).call().map_err(|e| match e {
            ureq::Error::Status(code, _) => FetchError::Status(code),
            ureq::Error::Transport(transport) => FetchError::Transport(transport.to_string()),
        })?;
        let body = response
            .into_string()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        parse_reference_page(&body)
    }
}

struct MarkupPatterns {
    /// Opening tag of a word row
    row: Regex,
    /// Element that starts one accent-annotated reading
    candidate: Regex,
    /// Either a character span (group 1) or any other span's class list (group 2)
    event: Regex,
}

impl MarkupPatterns {
    fn compile() -> Result<Self, String> {
        let build = |pattern: &str| Regex::new(pattern).map_err(|e| e.to_string());
        Ok(Self {
            row: build(r#"<tr[^>]*id="word_[^"]*"[^>]*>"#)?,
            candidate: build(r#"class="[^"]*accented_word[^"]*""#)?,
            event: build(r#"<span class="char">([^<]*)</span>|<span class="([^"]*)""#)?,
        })
    }
}

static PATTERNS: OnceLock<Result<MarkupPatterns, String>> = OnceLock::new();

fn patterns() -> Result<&'static MarkupPatterns, FetchError> {
    PATTERNS
        .get_or_init(MarkupPatterns::compile)
        .as_ref()
        .map_err(|e| FetchError::Malformed(format!("markup patterns failed to compile: {e}")))
}

/// Extract every candidate from a reference search page.
///
/// A page without word rows is a valid "nothing listed" answer. Rows that
/// yield no mora at all mean the markup changed and are reported as malformed.
pub fn parse_reference_page(html: &str) -> Result<Vec<ReferenceCandidate>, FetchError> {
    let patterns = patterns()?;
    let mut candidates = Vec::new();
    let mut rows = 0usize;

    for row_match in patterns.row.find_iter(html) {
        rows += 1;
        let body_start = row_match.end();
        let row_end = html[body_start..]
            .find("</tr>")
            .map_or(html.len(), |offset| body_start + offset);
        let row = &html[body_start..row_end];

        let starts: Vec<usize> = patterns.candidate.find_iter(row).map(|m| m.start()).collect();
        for (i, &start) in starts.iter().enumerate() {
            let end = starts.get(i + 1).copied().unwrap_or(row.len());
            if let Some(candidate) = parse_candidate(patterns, &row[start..end]) {
                candidates.push(candidate);
            }
        }
    }

    if rows > 0 && candidates.is_empty() {
        warn!("Reference page had {} word rows but no readable candidates", rows);
        return Err(FetchError::Malformed(format!(
            "{rows} word rows without accent-annotated readings"
        )));
    }

    debug!("Extracted {} candidates from {} rows", candidates.len(), rows);
    Ok(candidates)
}

fn parse_candidate(patterns: &MarkupPatterns, segment: &str) -> Option<ReferenceCandidate> {
    let mut morae: Vec<(String, bool)> = Vec::new();

    for caps in patterns.event.captures_iter(segment) {
        if let Some(span) = caps.get_group(1) {
            if let Some((text, _)) = morae.last_mut() {
                text.push_str(&segment[span.start..span.end]);
            }
        } else if let Some(span) = caps.get_group(2) {
            let class = &segment[span.start..span.end];
            if class.contains("mola_") {
                morae.push((String::new(), class.contains("accent_top")));
            }
        }
    }

    morae.retain(|(text, _)| !text.is_empty());
    if morae.is_empty() {
        return None;
    }
    Some(ReferenceCandidate::from_morae(morae))
}
