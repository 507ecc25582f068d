use std::collections::HashMap;
use std::path::Path;

use crate::normalize::{Normalizer, TextNormalizer};

/// Word list compiled into the binary, used when no dictionary path is configured.
const EMBEDDED_DICTIONARY: &str = include_str!("../data/dictionary.txt");

/// Single `source=target` pair, both sides normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryEntry {
    pub source: String,
    pub target: String,
}

/// Source-to-target mapping. Entries keep the order they were first seen in.
#[derive(Debug, Default, Clone)]
pub struct Dictionary {
    entries: Vec<DictionaryEntry>,
    index: HashMap<String, usize>,
    duplicates: Vec<String>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse dictionary text.
    ///
    /// Blank lines and `#` comments are skipped, every other line is split on
    /// its first `=`. Both halves are normalized before insertion.
    pub fn parse(text: &str) -> Self {
        let normalizer = TextNormalizer;
        let mut dict = Self::new();
        let mut line_count = 0usize;

        for (line_no, line) in text.lines().enumerate() {
            line_count += 1;

            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let Some((source, target)) = line.split_once('=') else {
                tracing::debug!("Skipping line {}: no '=' separator", line_no + 1);
                continue;
            };

            let source = normalizer.normalize(source);
            if source.is_empty() {
                tracing::debug!("Skipping line {}: empty source term", line_no + 1);
                continue;
            }

            dict.insert(source, normalizer.normalize(target));
        }

        tracing::info!(
            "Dictionary parsed: {} lines, {} entries",
            line_count,
            dict.len()
        );

        dict
    }

    /// Insert an entry, replacing the target of an existing key.
    ///
    /// Returns the previous target when the key was already present.
    pub fn insert(&mut self, source: String, target: String) -> Option<String> {
        if let Some(&idx) = self.index.get(&source) {
            tracing::warn!("Duplicate key found: {}", source);
            self.duplicates.push(source);
            let entry = &mut self.entries[idx];
            return Some(std::mem::replace(&mut entry.target, target));
        }

        self.index.insert(source.clone(), self.entries.len());
        self.entries.push(DictionaryEntry { source, target });
        None
    }

    pub fn get(&self, source: &str) -> Option<&str> {
        self.get_entry(source).map(|e| e.target.as_str())
    }

    pub fn get_entry(&self, source: &str) -> Option<&DictionaryEntry> {
        self.index.get(source).and_then(|&idx| self.entries.get(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &DictionaryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys that were overwritten while loading, in the order seen
    pub fn duplicate_keys(&self) -> &[String] {
        &self.duplicates
    }
}

impl<S: Into<String>, T: Into<String>> FromIterator<(S, T)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        let mut dict = Self::new();
        for (source, target) in iter {
            dict.insert(source.into(), target.into());
        }
        dict
    }
}

pub struct DictionaryLoader;

impl DictionaryLoader {
    /// Load the dictionary compiled into the binary
    pub fn load_embedded() -> Dictionary {
        tracing::info!("Loading embedded dictionary...");
        Dictionary::parse(EMBEDDED_DICTIONARY)
    }

    /// Load dictionary from file path
    pub fn load_from_file(path: &Path) -> Result<Dictionary, LoadError> {
        tracing::info!("Loading dictionary from file: {}", path.display());
        let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|_| LoadError::NotUtf8 {
            path: path.display().to_string(),
        })?;
        Ok(Dictionary::parse(&text))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read dictionary {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Dictionary {path} is not valid UTF-8")]
    NotUtf8 { path: String },
}
