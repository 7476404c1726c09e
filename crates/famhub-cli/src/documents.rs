use color_eyre::Result;
use famhub_core::model::DocumentKind;
use famhub_entity::documents::{DocumentRepo, DocumentUpload, SourceFile};

use crate::{cli::DocCommand, config, session, storage};

pub async fn handle(cmd: DocCommand, config: &config::Config) -> Result<()> {
    let store = storage::store_from_config(config)?;
    let repo = DocumentRepo::new(store.clone());

    match cmd {
        DocCommand::Add { file, name, kind } => {
            // File bytes are read up front; the record stores them inline.
            let source = match file {
                Some(path) => {
                    let bytes = tokio::fs::read(&path).await?;
                    let file_name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    Some(SourceFile {
                        name: file_name,
                        bytes,
                    })
                }
                None => None,
            };
            let uploaded_by = session::current_member_name(store).await;
            let document = repo
                .upload(DocumentUpload {
                    name,
                    kind: kind.into(),
                    uploaded_by,
                    file: source,
                })
                .await
                .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
            println!("Stored document {}: {}", document.id, document.name);
        }
        DocCommand::List { kind } => {
            let filter = kind.map(DocumentKind::from);
            let documents: Vec<_> = repo
                .list()
                .await
                .into_iter()
                .filter(|d| filter.map_or(true, |k| d.kind == k))
                .collect();
            if documents.is_empty() {
                println!("No documents stored yet.");
                return Ok(());
            }
            for document in documents {
                println!(
                    "{} [{}] {} (uploaded by {} at {})",
                    document.id,
                    kind_label(document.kind),
                    document.name,
                    document.uploaded_by,
                    document.uploaded_at
                );
            }
        }
    }

    Ok(())
}

fn kind_label(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::Medical => "medical",
        DocumentKind::Insurance => "insurance",
        DocumentKind::School => "school",
        DocumentKind::Identification => "identification",
        DocumentKind::Other => "other",
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use famhub_core::store::InMemoryKvStore;
    use famhub_entity::documents::{DocumentError, DocumentRepo, DocumentUpload};

    use super::*;

    #[tokio::test]
    async fn upload_without_file_surfaces_missing_file() {
        let repo = DocumentRepo::new(Arc::new(InMemoryKvStore::new()));
        let err = repo
            .upload(DocumentUpload {
                name: None,
                kind: DocumentKind::Other,
                uploaded_by: String::new(),
                file: None,
            })
            .await
            .expect_err("no file supplied");
        assert_eq!(
            err.downcast_ref::<DocumentError>(),
            Some(&DocumentError::MissingFile)
        );
    }
}
