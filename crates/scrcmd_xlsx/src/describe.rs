//! Parameter-name highlighting inside free-text descriptions.
//!
//! Descriptions are walked word by word. At every position the longest known
//! parameter name matching the upcoming words wins, so `item index` is
//! emphasized as one span instead of `item` alone.

use crate::spec::{SpecCellContent, SpecFormattedRun};
use crate::util::trim_trailing_punctuation;

/// One match candidate: a parameter name and its word count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecNameCandidate {
    /// Full name as registered.
    pub name: String,
    /// Number of whitespace-delimited words in `name`.
    pub n_words: usize,
}

/// Order names into match priority: most words first, discovery order on ties.
pub fn plan_name_candidates(names: &[String]) -> Vec<SpecNameCandidate> {
    let mut l_candidates: Vec<SpecNameCandidate> = names
        .iter()
        .map(|name| SpecNameCandidate {
            name: name.clone(),
            n_words: name.split_whitespace().count(),
        })
        .filter(|candidate| candidate.n_words > 0)
        .collect();
    // Stable sort keeps discovery order among equal word counts.
    l_candidates.sort_by(|a, b| b.n_words.cmp(&a.n_words));
    l_candidates
}

/// Word count of the first candidate matching the words starting at `words[0]`.
fn match_candidate(words: &[&str], candidates: &[SpecNameCandidate]) -> Option<usize> {
    candidates.iter().find_map(|candidate| {
        let l_span = words.get(..candidate.n_words)?;
        let c_span = l_span.join(" ");
        (trim_trailing_punctuation(&c_span) == candidate.name).then_some(candidate.n_words)
    })
}

/// Render `description` with every parameter-name occurrence emphasized.
///
/// Each emitted word or matched span is followed by a base `" "` run, the last
/// one included. Empty or whitespace-only text gives a plain empty cell.
pub fn highlight_description(description: &str, names: &[String]) -> SpecCellContent {
    let l_words: Vec<&str> = description.split_whitespace().collect();
    if l_words.is_empty() {
        return SpecCellContent::plain("");
    }

    let l_candidates = plan_name_candidates(names);
    let mut l_runs = Vec::with_capacity(l_words.len() * 2);
    let mut n_cursor = 0;

    while n_cursor < l_words.len() {
        let l_rest = &l_words[n_cursor..];
        match match_candidate(l_rest, &l_candidates) {
            Some(n_words) => {
                l_runs.push(SpecFormattedRun::emphasized(l_rest[..n_words].join(" ")));
                n_cursor += n_words;
            }
            None => {
                l_runs.push(SpecFormattedRun::base(l_rest[0]));
                n_cursor += 1;
            }
        }
        l_runs.push(SpecFormattedRun::base(" "));
    }

    SpecCellContent::Rich(l_runs)
}
