// Closed vocabulary of valid words.
//
// Entries are stored upper-cased. Membership uses a hash set; the entry list
// keeps file order because nearest-entry search breaks ties in favour of the
// earliest entry.

use std::path::{Path, PathBuf};

use hashbrown::HashSet;
use sceneword_core::case::to_upper_word;
use tracing::debug;

/// Error type for vocabulary loading.
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    /// The vocabulary file could not be read.
    #[error("failed to read vocabulary {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// An immutable set of upper-case words.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    entries: Vec<String>,
    members: HashSet<String>,
}

impl Vocabulary {
    /// An empty vocabulary (reconciliation is skipped).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a vocabulary from tokens, upper-casing each one.
    ///
    /// Empty tokens and repeats are dropped; the first occurrence keeps its
    /// position.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocabulary = Self::new();
        for token in tokens {
            let token = token.as_ref();
            if token.is_empty() {
                continue;
            }
            let word = to_upper_word(token);
            if vocabulary.members.insert(word.clone()) {
                vocabulary.entries.push(word);
            }
        }
        vocabulary
    }

    /// Parse whitespace-separated tokens (the ICDAR lexicon file format).
    pub fn parse(text: &str) -> Self {
        Self::from_tokens(text.split_whitespace())
    }

    /// Read and parse a vocabulary file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let vocabulary = Self::parse(&text);
        debug!(path = %path.display(), entries = vocabulary.len(), "loaded vocabulary");
        Ok(vocabulary)
    }

    /// Exact membership test. `word` must already be upper-cased.
    pub fn contains(&self, word: &str) -> bool {
        self.members.contains(word)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in their original order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_tokens(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_on_any_whitespace() {
        let v = Vocabulary::parse("hello  World\nEXIT\t\tstop\r\n");
        assert_eq!(v.iter().collect::<Vec<_>>(), ["HELLO", "WORLD", "EXIT", "STOP"]);
    }

    #[test]
    fn entries_are_upper_cased_and_deduplicated() {
        let v: Vocabulary = ["exit", "EXIT", "Exit", "open"].into_iter().collect();
        assert_eq!(v.len(), 2);
        assert!(v.contains("EXIT"));
        assert!(v.contains("OPEN"));
        assert!(!v.contains("exit"));
    }

    #[test]
    fn empty_input_gives_empty_vocabulary() {
        assert!(Vocabulary::parse("  \n\t ").is_empty());
        assert!(Vocabulary::new().is_empty());
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = Vocabulary::load("/nonexistent/sceneword/lexicon.txt").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/sceneword/lexicon.txt"));
    }
}
