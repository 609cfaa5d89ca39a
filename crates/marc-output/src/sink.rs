//! Destinations for serialized record documents.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use marc_model::Record;

use crate::common::{ensure_output_dir, file_name_for};
use crate::document::render_record_document;

/// Receives one document per accepted record.
pub trait RecordSink {
    /// Store `document` under `identifier` and return the path it maps to.
    fn write_document(&mut self, identifier: &str, document: &[u8]) -> Result<PathBuf>;

    /// Where a document for `identifier` would go, if the sink can tell.
    fn location(&self, _identifier: &str) -> Option<PathBuf> {
        None
    }
}

/// Serialize `record` and hand it to `sink`.
pub fn emit_record<S: RecordSink + ?Sized>(
    sink: &mut S,
    identifier: &str,
    record: &Record,
) -> Result<PathBuf> {
    let document = render_record_document(record)
        .with_context(|| format!("serialize record {identifier}"))?;
    sink.write_document(identifier, &document)
}

/// Writes `<identifier>.xml` files into a directory, replacing existing ones.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Create the sink, creating `dir` if it does not exist.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = ensure_output_dir(dir.as_ref())?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, identifier: &str) -> Result<PathBuf> {
        Ok(self.dir.join(file_name_for(identifier)?))
    }
}

impl RecordSink for DirectorySink {
    fn write_document(&mut self, identifier: &str, document: &[u8]) -> Result<PathBuf> {
        let path = self.path_for(identifier)?;
        fs::write(&path, document).with_context(|| format!("write {}", path.display()))?;
        debug!(path = %path.display(), bytes = document.len(), "wrote record document");
        Ok(path)
    }

    fn location(&self, identifier: &str) -> Option<PathBuf> {
        self.path_for(identifier).ok()
    }
}

/// Keeps documents in memory. Used for dry runs and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    dir: PathBuf,
    documents: Vec<(PathBuf, Vec<u8>)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report paths as if documents were written under `dir`.
    pub fn rooted_at(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            documents: Vec::new(),
        }
    }

    pub fn documents(&self) -> &[(PathBuf, Vec<u8>)] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Document text stored at `path`, if any.
    pub fn document(&self, path: &Path) -> Option<String> {
        self.documents
            .iter()
            .rev()
            .find(|(stored, _)| stored == path)
            .map(|(_, bytes)| String::from_utf8_lossy(bytes).into_owned())
    }
}

impl RecordSink for MemorySink {
    fn write_document(&mut self, identifier: &str, document: &[u8]) -> Result<PathBuf> {
        let path = self.dir.join(file_name_for(identifier)?);
        self.documents.push((path.clone(), document.to_vec()));
        Ok(path)
    }
}
