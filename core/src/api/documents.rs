//! Document CRUD call sites.

use serde::Deserialize;
use uuid::Uuid;

use crate::dispatch::Dispatcher;
use crate::envelope::{Envelope, RawEnvelope};
use crate::error::ApiError;
use crate::types::{Document, DocumentInput};

#[derive(Debug, Deserialize)]
struct DocumentsData {
    documents: Vec<Document>,
}

#[derive(Debug, Deserialize)]
struct DocumentData {
    document: Document,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedData {
    document_id: Uuid,
}

pub struct DocumentsApi<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> DocumentsApi<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// All documents owned by the current user.
    pub fn get_all(&self) -> Result<Vec<Document>, ApiError> {
        let envelope: Envelope<DocumentsData> = self.dispatcher.get("/documents")?;
        Ok(envelope.require_data()?.documents)
    }

    pub fn get_one(&self, document_id: Uuid) -> Result<Document, ApiError> {
        let envelope: Envelope<DocumentData> =
            self.dispatcher.get(&format!("/documents/{document_id}"))?;
        Ok(envelope.require_data()?.document)
    }

    /// Create a document; returns the server-assigned id.
    pub fn create(&self, input: &DocumentInput) -> Result<Uuid, ApiError> {
        let envelope: Envelope<CreatedData> = self.dispatcher.post("/documents/create", input)?;
        Ok(envelope.require_data()?.document_id)
    }

    /// Replace the stored fields of an existing document.
    pub fn edit(&self, document: &Document) -> Result<(), ApiError> {
        let envelope: RawEnvelope = self.dispatcher.patch("/documents/edit", document)?;
        envelope.ack()
    }

    /// Delete a document and all its notifications.
    pub fn delete(&self, document_id: Uuid) -> Result<(), ApiError> {
        let envelope: RawEnvelope = self
            .dispatcher
            .delete(&format!("/documents/{document_id}/delete"))?;
        envelope.ack()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_data_unwraps_the_list() {
        let data: DocumentsData = serde_json::from_str(
            r#"{"documents":[{"id":"00000000-0000-0000-0000-000000000001","title":"Visa","documentType":12,"expiresAt":"2026-01-01T00:00:00Z"}]}"#,
        )
        .unwrap();
        assert_eq!(data.documents.len(), 1);
        assert_eq!(data.documents[0].title, "Visa");
    }

    #[test]
    fn created_data_reads_camel_case_id() {
        let data: CreatedData =
            serde_json::from_str(r#"{"documentId":"00000000-0000-0000-0000-000000000002"}"#).unwrap();
        assert_eq!(
            data.document_id.to_string(),
            "00000000-0000-0000-0000-000000000002"
        );
    }
}
