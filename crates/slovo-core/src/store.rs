use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::dictionary::{Dictionary, DictionaryLoader};

/// Where the dictionary text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionarySource {
    Embedded,
    File(PathBuf),
}

impl DictionarySource {
    pub fn from_path(path: Option<&str>) -> Self {
        match path {
            Some(p) if !p.trim().is_empty() => Self::File(PathBuf::from(p)),
            _ => Self::Embedded,
        }
    }
}

/// When the store re-reads its source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReloadPolicy {
    /// Keep the start-up snapshot
    Never,
    /// Re-read a file source when its modification time changes
    #[default]
    OnChange,
    /// Parse a fresh dictionary for every lookup
    EveryRequest,
}

impl std::str::FromStr for ReloadPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "never" => Ok(Self::Never),
            "on_change" => Ok(Self::OnChange),
            "every_request" => Ok(Self::EveryRequest),
            other => Err(format!("unknown reload policy: {other}")),
        }
    }
}

struct Snapshot {
    dictionary: Arc<Dictionary>,
    modified: Option<SystemTime>,
}

/// Owns the current dictionary snapshot and decides when to refresh it.
///
/// Blocking: may read the file system. Call from a blocking context.
pub struct DictionaryStore {
    source: DictionarySource,
    policy: ReloadPolicy,
    current: RwLock<Snapshot>,
}

impl DictionaryStore {
    pub fn open(source: DictionarySource, policy: ReloadPolicy) -> Self {
        let modified = modified_time(&source);
        let dictionary = Arc::new(load(&source));

        Self {
            source,
            policy,
            current: RwLock::new(Snapshot {
                dictionary,
                modified,
            }),
        }
    }

    /// Dictionary to use for one lookup
    pub fn snapshot(&self) -> Arc<Dictionary> {
        match self.policy {
            ReloadPolicy::Never => self.current(),
            ReloadPolicy::EveryRequest => Arc::new(load(&self.source)),
            ReloadPolicy::OnChange => {
                let modified = modified_time(&self.source);
                let stale = {
                    let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
                    current.modified != modified
                };

                if stale {
                    tracing::info!("Dictionary source changed, reloading");
                    self.reload()
                } else {
                    self.current()
                }
            }
        }
    }

    /// Re-read the source unconditionally and swap in the result
    pub fn reload(&self) -> Arc<Dictionary> {
        let modified = modified_time(&self.source);
        let dictionary = Arc::new(load(&self.source));

        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Snapshot {
            dictionary: Arc::clone(&dictionary),
            modified,
        };

        dictionary
    }

    fn current(&self) -> Arc<Dictionary> {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&current.dictionary)
    }
}

/// Load a dictionary, falling back to an empty one if the source is unreadable
pub fn load(source: &DictionarySource) -> Dictionary {
    match source {
        DictionarySource::Embedded => DictionaryLoader::load_embedded(),
        DictionarySource::File(path) => {
            DictionaryLoader::load_from_file(path).unwrap_or_else(|e| {
                tracing::error!("Failed to load dictionary: {}", e);
                tracing::warn!("Using empty dictionary");
                Dictionary::new()
            })
        }
    }
}

fn modified_time(source: &DictionarySource) -> Option<SystemTime> {
    match source {
        DictionarySource::Embedded => None,
        DictionarySource::File(path) => file_modified(path),
    }
}

fn file_modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn dictionary_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn rewrite(file: &tempfile::NamedTempFile, contents: &str) {
        std::fs::write(file.path(), contents).unwrap();
    }

    #[test]
    fn missing_file_yields_empty_dictionary() {
        let store = DictionaryStore::open(
            DictionarySource::File(PathBuf::from("/nonexistent/slovo.txt")),
            ReloadPolicy::Never,
        );
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn never_policy_keeps_first_snapshot() {
        let file = dictionary_file("кот=cat\n");
        let store = DictionaryStore::open(
            DictionarySource::File(file.path().to_path_buf()),
            ReloadPolicy::Never,
        );

        rewrite(&file, "кот=tomcat\n");
        assert_eq!(store.snapshot().get("кот"), Some("cat"));

        let reloaded = store.reload();
        assert_eq!(reloaded.get("кот"), Some("tomcat"));
        assert_eq!(store.snapshot().get("кот"), Some("tomcat"));
    }

    #[test]
    fn every_request_policy_rereads() {
        let file = dictionary_file("кот=cat\n");
        let store = DictionaryStore::open(
            DictionarySource::File(file.path().to_path_buf()),
            ReloadPolicy::EveryRequest,
        );

        rewrite(&file, "кот=tomcat\nдом=house\n");
        let dict = store.snapshot();
        assert_eq!(dict.get("кот"), Some("tomcat"));
        assert_eq!(dict.len(), 2);
    }

    #[test]
    fn on_change_policy_reloads_when_file_disappears() {
        let file = dictionary_file("кот=cat\n");
        let path = file.path().to_path_buf();
        let store = DictionaryStore::open(DictionarySource::File(path), ReloadPolicy::OnChange);
        assert_eq!(store.snapshot().len(), 1);

        drop(file);
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn unchanged_file_reuses_snapshot() {
        let file = dictionary_file("кот=cat\n");
        let store = DictionaryStore::open(
            DictionarySource::File(file.path().to_path_buf()),
            ReloadPolicy::OnChange,
        );

        let first = store.snapshot();
        let second = store.snapshot();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn source_from_path() {
        assert_eq!(DictionarySource::from_path(None), DictionarySource::Embedded);
        assert_eq!(DictionarySource::from_path(Some("  ")), DictionarySource::Embedded);
        assert_eq!(
            DictionarySource::from_path(Some("dict.txt")),
            DictionarySource::File(PathBuf::from("dict.txt"))
        );
    }

    #[test]
    fn parses_reload_policy() {
        assert_eq!("on-change".parse::<ReloadPolicy>(), Ok(ReloadPolicy::OnChange));
        assert_eq!(
            "EVERY_REQUEST".parse::<ReloadPolicy>(),
            Ok(ReloadPolicy::EveryRequest)
        );
        assert!("sometimes".parse::<ReloadPolicy>().is_err());
    }
}
