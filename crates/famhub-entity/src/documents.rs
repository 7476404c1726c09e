use std::sync::Arc;

use anyhow::Result;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::Utc;
use famhub_core::{
    model::{Document, DocumentKind},
    store::KvStore,
};
use thiserror::Error;
use tracing::instrument;
use uuid::Uuid;

use crate::{EntityKind, JsonArrayStore};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    /// Upload attempted without a selected file.
    #[error("no file selected")]
    MissingFile,
}

/// The file being uploaded: its original name and raw bytes.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct DocumentUpload {
    /// Display name; defaults to the file name when absent.
    pub name: Option<String>,
    pub kind: DocumentKind,
    pub uploaded_by: String,
    pub file: Option<SourceFile>,
}

/// Document repository. File content is stored inline in the record as
/// base64, so a document round-trips through the same keyed-array store as
/// every other entity.
pub struct DocumentRepo<S: KvStore> {
    inner: JsonArrayStore<Document, S>,
}

impl<S: KvStore> DocumentRepo<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            inner: JsonArrayStore::new(store, EntityKind::Documents),
        }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Vec<Document> {
        self.inner.load().await
    }

    #[instrument(skip(self, upload), fields(kind = ?upload.kind))]
    pub async fn upload(&self, upload: DocumentUpload) -> Result<Document> {
        let file = upload.file.ok_or(DocumentError::MissingFile)?;
        let name = upload
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| file.name.clone());

        let document = Document {
            id: Uuid::new_v4(),
            name,
            kind: upload.kind,
            uploaded_by: upload.uploaded_by,
            uploaded_at: Utc::now(),
            file_data: BASE64.encode(&file.bytes),
        };
        self.inner.append(document.clone()).await?;
        Ok(document)
    }

    /// Decode a stored document's inline payload back to raw bytes.
    pub fn decode(document: &Document) -> Result<Vec<u8>> {
        Ok(BASE64.decode(&document.file_data)?)
    }
}
