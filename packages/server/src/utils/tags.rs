use std::collections::HashSet;

/// Maximum length of a tag name, in characters.
pub const MAX_TAG_LENGTH: usize = 64;

/// Reason a submitted tag name was rejected.
#[derive(Debug, PartialEq, Eq)]
pub enum TagNameError {
    /// Tag name is empty or whitespace-only.
    Empty,
    /// Tag name is longer than [`MAX_TAG_LENGTH`] characters.
    TooLong(String),
    /// Tag name contains control characters.
    ControlCharacter(String),
}

impl TagNameError {
    /// Returns a human-readable error message.
    pub fn message(&self) -> String {
        match self {
            Self::Empty => "Tag names cannot be empty".to_string(),
            Self::TooLong(name) => {
                format!("Tag '{name}' is longer than {MAX_TAG_LENGTH} characters")
            }
            Self::ControlCharacter(name) => {
                format!("Tag '{}' contains control characters", name.escape_debug())
            }
        }
    }
}

/// Trim each submitted name, reject invalid ones and drop repeats.
///
/// Order of first occurrence is preserved. Matching is exact and
/// case-sensitive: `Rust` and `rust` are different tags.
pub fn normalize_tag_names<I, S>(names: I) -> Result<Vec<String>, TagNameError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();

    for name in names {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(TagNameError::Empty);
        }
        if name.chars().any(char::is_control) {
            return Err(TagNameError::ControlCharacter(name.to_string()));
        }
        if name.chars().count() > MAX_TAG_LENGTH {
            return Err(TagNameError::TooLong(name.to_string()));
        }
        if seen.insert(name.to_string()) {
            out.push(name.to_string());
        }
    }

    Ok(out)
}

/// Submitted tags that are not yet in the vocabulary, sorted by name.
///
/// `submitted` must already be normalized, so the result has no repeats.
/// Inserting in this order makes concurrent writers take the tag-name
/// index locks in the same order, so they wait on each other instead of
/// deadlocking.
pub fn missing_tags<'a>(submitted: &'a [String], existing: &HashSet<String>) -> Vec<&'a str> {
    let mut missing: Vec<&str> = submitted
        .iter()
        .filter(|name| !existing.contains(name.as_str()))
        .map(String::as_str)
        .collect();
    missing.sort_unstable();
    missing
}
