//! Debug records and log entries (spec §3, §4.4.2).

use crate::term::Term;

/// A human-readable tag attached to a constraint, surfaced in
/// `SynthesisError::UnsatisfiedConstraint` so a caller can tell which
/// builder operation produced the failing constraint without having to
/// count constraint indices by hand.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct DebugInfo {
    pub tag: String,
}

impl DebugInfo {
    pub fn new(tag: impl Into<String>) -> Self {
        DebugInfo { tag: tag.into() }
    }
}

/// A circuit-authored log line (`api.Println`-equivalent): a format string
/// plus an ordered list of resolvables. A resolvable is either a single
/// term to print, or a delimited span of terms to sum and print as one
/// value (spec §4.4.2's `TermDelimitor` sentinel).
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct LogEntry {
    pub format: String,
    pub resolvables: Vec<Resolvable>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub enum Resolvable {
    Term(Term),
    /// A delimited span of terms to be summed and rendered as one value.
    Eval(Vec<Term>),
}

pub const UNSOLVED_PLACEHOLDER: &str = "<unsolved>";
