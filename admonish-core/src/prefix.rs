//! Prefix matching for keyword lines

/// Return the index of the first candidate that `text` starts with
pub fn matches_any<S: AsRef<str>>(text: &str, candidates: &[S]) -> Option<usize> {
    candidates
        .iter()
        .position(|candidate| text.starts_with(candidate.as_ref()))
}
