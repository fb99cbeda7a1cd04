//! FORGE kernel reference data loader.
//!
//! Implements [`pipeline::ReferenceCatalog`] over a local JSON document of the
//! form:
//!
//! ```json
//! {
//!   "public": {
//!     "meta": { "version": 1 },
//!     "entries": [{ "id": "FI-001", "encoded": "..." }]
//!   }
//! }
//! ```
//!
//! Only the `public` section is read; other top-level sections (e.g.
//! `internal`) are ignored.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** File access and JSON parsing live here. The data is
//! loaded once at start-up and is read-only afterwards, so a single
//! [`ReferenceData`] can be shared across threads without locking.
//!
//! ## Missing data
//!
//! A missing file is not an error: [`ReferenceData::load`] logs a warning and
//! returns an empty catalog. A file that exists but cannot be read or parsed
//! is an error and prevents start-up.

use std::path::{Path, PathBuf};

use pipeline::{ForgeError, ReferenceCatalog};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default file name of the reference data document.
pub const DEFAULT_REFERENCE_FILE: &str = "ipsum.json";

/// Errors raised while loading reference data.
#[derive(Debug, Error)]
pub enum ReferenceDataError {
    /// The file exists but could not be read.
    #[error("failed to read reference data from {}: {source}", path.display())]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid reference data document.
    #[error("failed to parse reference data from {}: {source}", path.display())]
    Parse {
        /// Path that was parsed.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl From<ReferenceDataError> for ForgeError {
    fn from(err: ReferenceDataError) -> Self {
        ForgeError::ReferenceData {
            message: err.to_string(),
        }
    }
}

/// One public reference line.
///
/// Both fields may be missing or `null` in the document; such an entry stays
/// in the table but never resolves to text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    /// Entry identifier as written in the document.
    #[serde(default)]
    pub id: Option<String>,
    /// Text payload as written in the document.
    #[serde(default)]
    pub encoded: Option<String>,
}

impl ReferenceEntry {
    /// The entry id, `None` when missing or empty.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// The text payload, `None` when missing or empty.
    pub fn text(&self) -> Option<&str> {
        self.encoded.as_deref().filter(|text| !text.is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
struct ReferenceDocument {
    #[serde(default)]
    public: PublicSection,
}

#[derive(Debug, Default, Deserialize)]
struct PublicSection {
    #[serde(default)]
    meta: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    entries: Vec<ReferenceEntry>,
}

/// Immutable table of public reference entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    meta: serde_json::Map<String, serde_json::Value>,
    entries: Vec<ReferenceEntry>,
}

impl ReferenceData {
    /// A catalog with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads reference data from `path`.
    ///
    /// Returns an empty catalog when the file does not exist.
    ///
    /// # Errors
    ///
    /// [`ReferenceDataError::Io`] if the file exists but cannot be read,
    /// [`ReferenceDataError::Parse`] if its content is not a valid document.
    pub fn load(path: &Path) -> Result<Self, ReferenceDataError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(?path, "reference data file not found, using empty catalog");
                return Ok(Self::empty());
            }
            Err(source) => {
                return Err(ReferenceDataError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let data = Self::from_json_str(&content).map_err(|source| ReferenceDataError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(?path, entries = data.len(), "reference data loaded");
        Ok(data)
    }

    /// Parses a reference data document from a JSON string.
    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        let document: ReferenceDocument = serde_json::from_str(content)?;
        Ok(Self {
            meta: document.public.meta,
            entries: document.public.entries,
        })
    }

    /// Public entries in document order.
    pub fn entries(&self) -> &[ReferenceEntry] {
        &self.entries
    }

    /// The `public.meta` object, empty when absent.
    pub fn meta(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.meta
    }

    /// First entry whose id equals `id`. Entries without an id never match.
    pub fn lookup(&self, id: &str) -> Option<&ReferenceEntry> {
        self.entries
            .iter()
            .find(|entry| entry.id().is_some_and(|entry_id| entry_id == id))
    }

    /// Number of public entries, including incomplete ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no public entries were loaded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ReferenceCatalog for ReferenceData {
    fn first_public_id(&self) -> Option<&str> {
        self.entries.first().and_then(ReferenceEntry::id)
    }

    fn public_text(&self, id: &str) -> Option<&str> {
        self.lookup(id).and_then(ReferenceEntry::text)
    }
}
