//! Match analysis for the debug panel
//!
//! Runs the linearized pattern over a test string with the `regex` crate and
//! records every match together with its numbered capture groups. Offsets
//! and lengths are byte offsets into the test string.

use crate::error::PatternError;
use regex::Regex;

/// One capture group of a match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugGroup {
    /// 1-based group number
    pub index: usize,
    /// Byte offset of the capture, `None` when the group did not participate
    pub start: Option<usize>,
    pub length: usize,
    pub text: String,
}

impl DebugGroup {
    pub fn matched(&self) -> bool {
        self.start.is_some()
    }
}

/// One match of the pattern in the test string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugMatch {
    pub start: usize,
    pub length: usize,
    pub text: String,
    pub groups: Vec<DebugGroup>,
}

impl DebugMatch {
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// Get a capture group by number (1-based)
    pub fn group(&self, index: usize) -> Option<&DebugGroup> {
        self.groups.iter().find(|g| g.index == index)
    }
}

/// Find every match, or report why the pattern could not be compiled
///
/// An empty pattern yields no matches rather than an empty match at every
/// position.
pub fn try_analyze(pattern: &str, text: &str) -> Result<Vec<DebugMatch>, PatternError> {
    if pattern.is_empty() {
        return Ok(Vec::new());
    }
    let regex = Regex::new(pattern)?;
    Ok(collect_matches(&regex, text))
}

/// Find every match; an invalid pattern is logged and yields no matches
pub fn analyze(pattern: &str, text: &str) -> Vec<DebugMatch> {
    match try_analyze(pattern, text) {
        Ok(matches) => matches,
        Err(err) => {
            tracing::warn!("cannot analyze pattern {:?}: {}", pattern, err);
            Vec::new()
        }
    }
}

fn collect_matches(regex: &Regex, text: &str) -> Vec<DebugMatch> {
    regex
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let groups = (1..caps.len())
                .map(|index| match caps.get(index) {
                    Some(m) => DebugGroup {
                        index,
                        start: Some(m.start()),
                        length: m.len(),
                        text: m.as_str().to_string(),
                    },
                    None => DebugGroup {
                        index,
                        start: None,
                        length: 0,
                        text: String::new(),
                    },
                })
                .collect();
            Some(DebugMatch {
                start: whole.start(),
                length: whole.len(),
                text: whole.as_str().to_string(),
                groups,
            })
        })
        .collect()
}

/// Cached analysis of one (pattern, text) pair with a cursor over it
#[derive(Debug, Clone, Default)]
pub struct MatchNavigator {
    pattern: String,
    text: String,
    matches: Vec<DebugMatch>,
    current: usize,
    error: Option<PatternError>,
}

impl MatchNavigator {
    pub fn new() -> Self {
        MatchNavigator::default()
    }

    /// Recompute matches if either input changed
    ///
    /// Returns `true` when the analysis was redone; the cursor then goes
    /// back to the first match.
    pub fn refresh(&mut self, pattern: &str, text: &str) -> bool {
        if self.pattern == pattern && self.text == text {
            return false;
        }
        self.pattern = pattern.to_string();
        self.text = text.to_string();
        self.current = 0;
        match try_analyze(pattern, text) {
            Ok(matches) => {
                self.matches = matches;
                self.error = None;
            }
            Err(err) => {
                tracing::warn!("cannot analyze pattern {:?}: {}", pattern, err);
                self.matches = Vec::new();
                self.error = Some(err);
            }
        }
        true
    }

    /// Drop the cache so the next refresh recomputes
    pub fn invalidate(&mut self) {
        *self = MatchNavigator::default();
    }

    pub fn matches(&self) -> &[DebugMatch] {
        &self.matches
    }

    /// Why the last pattern produced no analysis, if it failed to compile
    pub fn error(&self) -> Option<&PatternError> {
        self.error.as_ref()
    }

    /// Index of the focused match, `None` when there are no matches
    pub fn current_index(&self) -> Option<usize> {
        (!self.matches.is_empty()).then_some(self.current)
    }

    pub fn current(&self) -> Option<&DebugMatch> {
        self.matches.get(self.current)
    }

    /// Move to the next match, wrapping to the first
    pub fn next(&mut self) -> Option<&DebugMatch> {
        if self.matches.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.matches.len();
        self.current()
    }

    /// Move to the previous match, wrapping to the last
    pub fn previous(&mut self) -> Option<&DebugMatch> {
        if self.matches.is_empty() {
            return None;
        }
        self.current = match self.current {
            0 => self.matches.len() - 1,
            n => n - 1,
        };
        self.current()
    }
}
