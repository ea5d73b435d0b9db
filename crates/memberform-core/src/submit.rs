//! Submission plumbing: the payload built from live fields, the
//! transport the flow hands it to, and extraction of the inline error
//! fragment from a failure response.

use crate::naming;
use crate::roster::Roster;
use async_trait::async_trait;
use parking_lot::Mutex;
use regex::Regex;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Ordered name/value pairs as the form would post them. Fields appear
/// first, in index order, under the naming contract; the host may append
/// extra pairs (ticket type, captcha response).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubmitPayload {
    pairs: Vec<(String, String)>,
}

impl SubmitPayload {
    pub fn from_roster(roster: &Roster) -> Self {
        let pairs = roster
            .live_values()
            .map(|(index, value)| (naming::field_name(index), value.to_string()))
            .collect();
        Self { pairs }
    }

    pub fn push_pair(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// First value posted under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Successful submission: the server tells the page where to go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitSuccess {
    pub redirect_url: String,
}

/// Failed submission: HTTP status and the response body, which may carry
/// an inline error fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitFailure {
    pub status: u16,
    pub body: String,
}

/// The externally-owned submission mechanism. The page delegates to the
/// browser's form post; tests and the CLI use [`CannedTransport`].
#[async_trait]
pub trait SubmitTransport: Send + Sync {
    async fn submit(&self, payload: &SubmitPayload) -> Result<SubmitSuccess, SubmitFailure>;
}

/// One scripted transport outcome.
#[derive(Debug, Clone)]
pub enum CannedOutcome {
    Accept { redirect_url: String },
    Reject { status: u16, body: String },
}

/// Transport double that plays back a script of outcomes, then settles
/// on a fallback for every later call. Counts calls so tests can assert
/// that a blocked gate dispatched nothing.
#[derive(Debug)]
pub struct CannedTransport {
    script: Mutex<VecDeque<CannedOutcome>>,
    fallback: CannedOutcome,
    calls: AtomicUsize,
}

impl CannedTransport {
    pub fn accepting(redirect_url: impl Into<String>) -> Self {
        Self::scripted(
            Vec::new(),
            CannedOutcome::Accept {
                redirect_url: redirect_url.into(),
            },
        )
    }

    pub fn rejecting(status: u16, body: impl Into<String>) -> Self {
        Self::scripted(
            Vec::new(),
            CannedOutcome::Reject {
                status,
                body: body.into(),
            },
        )
    }

    pub fn scripted(script: Vec<CannedOutcome>, fallback: CannedOutcome) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SubmitTransport for CannedTransport {
    async fn submit(&self, _payload: &SubmitPayload) -> Result<SubmitSuccess, SubmitFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let outcome = self
            .script
            .lock()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        match outcome {
            CannedOutcome::Accept { redirect_url } => Ok(SubmitSuccess { redirect_url }),
            CannedOutcome::Reject { status, body } => Err(SubmitFailure { status, body }),
        }
    }
}

/// Element id the failure pages render their error block under.
pub const ERRORS_FRAGMENT_ID: &str = "errors_form";

fn id_attr_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"id\s*=\s*["']errors_form["']"#).expect("static pattern compiles")
    })
}

/// Pull the inline error markup out of a failure response body: the
/// contents of the element with id `errors_form`. The pages render two
/// such elements (one per layout) and show the second, so prefer the
/// second occurrence and fall back to the first.
pub fn extract_error_fragment(body: &str) -> Option<String> {
    let matches: Vec<_> = id_attr_regex().find_iter(body).collect();
    let m = matches.get(1).or_else(|| matches.first())?;
    element_contents(body, m.start())
}

/// Inner markup of the element whose start tag contains the id attribute
/// at `attr_start`. Walks nested elements of the same tag name.
fn element_contents(body: &str, attr_start: usize) -> Option<String> {
    let open = body[..attr_start].rfind('<')?;
    let tag: String = body[open + 1..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    if tag.is_empty() {
        return None;
    }

    // end of the start tag, skipping '>' inside quoted attribute values
    let mut in_quote: Option<char> = None;
    let mut content_start = None;
    for (i, c) in body[attr_start..].char_indices() {
        if let Some(q) = in_quote {
            if c == q {
                in_quote = None;
            }
        } else if c == '"' || c == '\'' {
            in_quote = Some(c);
        } else if c == '>' {
            if body[..attr_start + i].ends_with('/') {
                return Some(String::new());
            }
            content_start = Some(attr_start + i + 1);
            break;
        }
    }
    let content_start = content_start?;

    let open_probe = format!("<{tag}");
    let close_probe = format!("</{tag}");
    let mut depth = 1usize;
    let mut pos = content_start;
    loop {
        let rest = &body[pos..];
        let next_open = find_tag(rest, &open_probe);
        let next_close = find_tag(rest, &close_probe)?;
        match next_open {
            Some(o) if o < next_close => {
                depth += 1;
                pos += o + open_probe.len();
            }
            _ => {
                depth -= 1;
                if depth == 0 {
                    return Some(body[content_start..pos + next_close].to_string());
                }
                pos += next_close + close_probe.len();
            }
        }
    }
}

/// Find `probe` at a tag-name boundary, so `<div` does not match `<divx`.
fn find_tag(haystack: &str, probe: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(i) = haystack[from..].find(probe) {
        let at = from + i;
        let boundary = match haystack.as_bytes().get(at + probe.len()) {
            Some(b) => !b.is_ascii_alphanumeric(),
            None => true,
        };
        if boundary {
            return Some(at);
        }
        from = at + probe.len();
    }
    None
}
