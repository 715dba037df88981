// On-disk cache of segmented documents, one JSON file per document id
// Each entry carries a stamp of the source file and extraction settings it was built from

use crate::config::ExtractionConfig;
use crate::segment::TokenizedDocument;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Hex digits of the path hash appended to a document id
const ID_HASH_LEN: usize = 12;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("cache I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not serialize tokens: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid document id: {0:?}")]
    InvalidId(String),
}

fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn compute_hash(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}

fn canonical_path(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Derives a cache id from a document path.
///
/// The sanitized file stem (characters outside `[A-Za-z0-9_-]` become `_`)
/// is suffixed with a hash of the canonical path, so files sharing a name in
/// different directories never share an entry.
pub fn document_id(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut id: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if id.is_empty() {
        id.push_str("document");
    }

    let path_hash = compute_hash(canonical_path(path).to_string_lossy().as_bytes());
    format!("{id}-{}", &path_hash[..ID_HASH_LEN])
}

/// What a cache entry was built from. An entry whose stamp differs from the
/// current one is stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStamp {
    /// Canonical path of the source document
    pub source: String,
    pub words_per_page: usize,
    /// SHA-256 of the source file contents
    pub content_hash: String,
}

impl CacheStamp {
    pub fn for_file(path: &Path, config: &ExtractionConfig) -> Result<Self, CacheError> {
        let content = fs::read(path).map_err(|source| CacheError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            source: canonical_path(path).display().to_string(),
            words_per_page: config.words_per_page,
            content_hash: compute_hash(&content),
        })
    }
}

#[derive(Serialize)]
struct EntryRef<'a> {
    #[serde(flatten)]
    document: &'a TokenizedDocument,
    #[serde(flatten)]
    stamp: &'a CacheStamp,
}

#[derive(Deserialize)]
struct Entry {
    #[serde(flatten)]
    document: TokenizedDocument,
    #[serde(flatten)]
    stamp: CacheStamp,
}

pub struct TokenCache {
    dir: PathBuf,
}

impl TokenCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, id: &str) -> Result<PathBuf, CacheError> {
        if !is_valid_id(id) {
            return Err(CacheError::InvalidId(id.to_string()));
        }
        Ok(self.dir.join(format!("{id}.json")))
    }

    /// Writes `<dir>/<id>.json`, creating the directory if needed.
    pub fn save(
        &self,
        id: &str,
        stamp: &CacheStamp,
        document: &TokenizedDocument,
    ) -> Result<PathBuf, CacheError> {
        let path = self.entry_path(id)?;
        fs::create_dir_all(&self.dir).map_err(|source| CacheError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let payload = serde_json::to_string(&EntryRef { document, stamp })?;
        fs::write(&path, payload).map_err(|source| CacheError::Io {
            path: path.clone(),
            source,
        })?;

        info!(id, path = %path.display(), tokens = document.len(), "saved token cache");
        Ok(path)
    }

    /// Reads a cached document built from `stamp`.
    ///
    /// A missing entry is `Ok(None)`. So is an entry that fails to parse,
    /// whose parallel arrays disagree in length, or whose stamp differs;
    /// those are logged and ignored.
    pub fn load(
        &self,
        id: &str,
        stamp: &CacheStamp,
    ) -> Result<Option<TokenizedDocument>, CacheError> {
        let path = self.entry_path(id)?;
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(CacheError::Io { path, source }),
        };

        let entry: Entry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(id, error = %e, "discarding unreadable token cache entry");
                return Ok(None);
            }
        };

        if entry.stamp != *stamp {
            info!(id, cached_from = %entry.stamp.source, "token cache entry is stale");
            return Ok(None);
        }

        if !entry.document.stream.is_consistent() {
            warn!(id, "discarding token cache entry with mismatched arrays");
            return Ok(None);
        }

        Ok(Some(entry.document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::TokenStream;

    fn sample_document() -> TokenizedDocument {
        let mut stream = TokenStream::new();
        stream.push("A vida".to_string(), 2, 2);
        stream.push("é boa,".to_string(), 2, 2);
        stream.push("certo?".to_string(), 3, 1);
        TokenizedDocument::new(stream, 3)
    }

    fn sample_stamp() -> CacheStamp {
        CacheStamp {
            source: "/livros/conto.txt".to_string(),
            words_per_page: 300,
            content_hash: compute_hash(b"A vida \xc3\xa9 boa, certo?"),
        }
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let cache = TokenCache::new(dir.path().join("tokens"));

        let path = cache.save("livro-1", &sample_stamp(), &sample_document()).unwrap();
        assert!(path.ends_with("livro-1.json"));

        let loaded = cache.load("livro-1", &sample_stamp()).unwrap();
        assert_eq!(loaded, Some(sample_document()));
    }

    #[test]
    fn test_payload_keeps_non_ascii_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let cache = TokenCache::new(dir.path());
        let path = cache.save("doc", &sample_stamp(), &sample_document()).unwrap();

        let raw = fs::read_to_string(path).unwrap();
        assert!(raw.contains("é boa,"));
        assert!(raw.contains("\"page_count\":3"));
        assert!(raw.contains("\"words_per_page\":300"));
    }

    #[test]
    fn test_missing_entry_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let cache = TokenCache::new(dir.path());
        assert_eq!(cache.load("ausente", &sample_stamp()).unwrap(), None);
    }

    #[test]
    fn test_corrupt_entry_is_none() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ruim.json"), "{not json").unwrap();
        let cache = TokenCache::new(dir.path());
        assert_eq!(cache.load("ruim", &sample_stamp()).unwrap(), None);
    }

    #[test]
    fn test_entry_without_stamp_is_none() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("antigo.json"),
            r#"{"tokens":["a"],"pages":[1],"weights":[1],"page_count":1}"#,
        )
        .unwrap();
        let cache = TokenCache::new(dir.path());
        assert_eq!(cache.load("antigo", &sample_stamp()).unwrap(), None);
    }

    #[test]
    fn test_mismatched_arrays_are_none() {
        let dir = tempfile::tempdir().unwrap();
        let stamp = sample_stamp();
        fs::write(
            dir.path().join("torto.json"),
            format!(
                r#"{{"tokens":["a","b"],"pages":[1],"weights":[1,1],"page_count":1,"source":"{}","words_per_page":300,"content_hash":"{}"}}"#,
                stamp.source, stamp.content_hash
            ),
        )
        .unwrap();
        let cache = TokenCache::new(dir.path());
        assert_eq!(cache.load("torto", &stamp).unwrap(), None);
    }

    #[test]
    fn test_stale_stamp_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let cache = TokenCache::new(dir.path());
        cache.save("conto", &sample_stamp(), &sample_document()).unwrap();

        let repaginated = CacheStamp {
            words_per_page: 100,
            ..sample_stamp()
        };
        assert_eq!(cache.load("conto", &repaginated).unwrap(), None);

        let edited = CacheStamp {
            content_hash: compute_hash(b"outro texto"),
            ..sample_stamp()
        };
        assert_eq!(cache.load("conto", &edited).unwrap(), None);
    }

    #[test]
    fn test_stamp_tracks_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conto.txt");
        let config = ExtractionConfig::default();

        fs::write(&path, "Era uma vez.").unwrap();
        let before = CacheStamp::for_file(&path, &config).unwrap();
        assert_eq!(before, CacheStamp::for_file(&path, &config).unwrap());

        fs::write(&path, "Era uma vez outra vez.").unwrap();
        let after = CacheStamp::for_file(&path, &config).unwrap();
        assert_ne!(before.content_hash, after.content_hash);
        assert_eq!(before.source, after.source);
    }

    #[test]
    fn test_stamp_for_missing_file_is_io_error() {
        let result = CacheStamp::for_file(Path::new("/nao/existe.txt"), &ExtractionConfig::default());
        assert!(matches!(result, Err(CacheError::Io { .. })));
    }

    #[test]
    fn test_rejects_path_traversal_ids() {
        let dir = tempfile::tempdir().unwrap();
        let cache = TokenCache::new(dir.path());
        assert!(matches!(
            cache.save("../fora", &sample_stamp(), &sample_document()),
            Err(CacheError::InvalidId(_))
        ));
        assert!(matches!(
            cache.load("", &sample_stamp()),
            Err(CacheError::InvalidId(_))
        ));
    }

    #[test]
    fn test_document_id_from_path() {
        let id = document_id(Path::new("/tmp/Meu Livro.pdf"));
        assert!(id.starts_with("Meu_Livro-"));
        assert_eq!(id.len(), "Meu_Livro-".len() + ID_HASH_LEN);
        assert!(is_valid_id(&id));

        assert!(document_id(Path::new("relatório-2024.md")).starts_with("relat_rio-2024-"));
        assert!(document_id(Path::new("/")).starts_with("document-"));
    }

    #[test]
    fn test_document_id_is_stable() {
        let path = Path::new("/livros/a/conto.pdf");
        assert_eq!(document_id(path), document_id(path));
    }

    #[test]
    fn test_same_stem_in_different_directories_gets_different_ids() {
        let a = document_id(Path::new("/livros/a/conto.pdf"));
        let b = document_id(Path::new("/livros/b/conto.epub"));
        assert!(a.starts_with("conto-"));
        assert!(b.starts_with("conto-"));
        assert_ne!(a, b);
    }
}
