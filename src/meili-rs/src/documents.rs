use meili_core::{DocumentsQuery, Page, TaskInfo};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ClientError, Result};
use crate::indexes::{Index, IndexScoped};
use crate::request::{ContentType, Request, RequestBuilder};

impl Index {
    /// GET /indexes/{uid}/documents/{id}
    pub async fn get_document<T: DeserializeOwned>(
        &self,
        document_id: &str,
        fields: &[&str],
    ) -> Result<T> {
        let mut request = Request::get(self.endpoint(&format!("/documents/{document_id}")))
            .accept(&[200])
            .named("Documents", "get_document");
        if !fields.is_empty() {
            request = request.query_param("fields", fields.join(","));
        }
        self.client().execute(request.build()?).await
    }

    /// GET /indexes/{uid}/documents
    pub async fn get_documents<T: DeserializeOwned>(&self, query: &DocumentsQuery) -> Result<Page<T>> {
        self.client()
            .execute(
                Request::get(self.endpoint("/documents"))
                    .accept(&[200])
                    .named("Documents", "get_documents")
                    .query(query.query_pairs())
                    .build()?,
            )
            .await
    }

    /// POST /indexes/{uid}/documents, replacing documents with the same id
    pub async fn add_documents<T: Serialize>(
        &self,
        documents: &[T],
        primary_key: Option<&str>,
    ) -> Result<TaskInfo> {
        let request = documents_request(Request::post(self.endpoint("/documents")), primary_key)
            .named("Documents", "add_documents")
            .json(documents);
        self.client().execute(request.build()?).await
    }

    /// Send `documents` in chunks of `batch_size`, one task per chunk
    pub async fn add_documents_in_batches<T: Serialize>(
        &self,
        documents: &[T],
        batch_size: usize,
        primary_key: Option<&str>,
    ) -> Result<Vec<TaskInfo>> {
        if batch_size == 0 {
            return Err(ClientError::config("batch size must be greater than zero"));
        }
        let mut tasks = Vec::with_capacity(documents.len().div_ceil(batch_size));
        for batch in documents.chunks(batch_size) {
            tasks.push(self.add_documents(batch, primary_key).await?);
        }
        Ok(tasks)
    }

    /// PUT /indexes/{uid}/documents, merging fields into existing documents
    pub async fn update_documents<T: Serialize>(
        &self,
        documents: &[T],
        primary_key: Option<&str>,
    ) -> Result<TaskInfo> {
        let request = documents_request(Request::put(self.endpoint("/documents")), primary_key)
            .named("Documents", "update_documents")
            .json(documents);
        self.client().execute(request.build()?).await
    }

    /// POST a CSV payload, header row first
    pub async fn add_documents_csv(
        &self,
        csv: impl Into<Vec<u8>>,
        primary_key: Option<&str>,
    ) -> Result<TaskInfo> {
        let request = documents_request(Request::post(self.endpoint("/documents")), primary_key)
            .named("Documents", "add_documents_csv")
            .raw(csv, ContentType::Csv);
        self.client().execute(request.build()?).await
    }

    /// POST newline-delimited JSON, one document per line
    pub async fn add_documents_ndjson(
        &self,
        ndjson: impl Into<Vec<u8>>,
        primary_key: Option<&str>,
    ) -> Result<TaskInfo> {
        let request = documents_request(Request::post(self.endpoint("/documents")), primary_key)
            .named("Documents", "add_documents_ndjson")
            .raw(ndjson, ContentType::Ndjson);
        self.client().execute(request.build()?).await
    }

    pub async fn update_documents_csv(
        &self,
        csv: impl Into<Vec<u8>>,
        primary_key: Option<&str>,
    ) -> Result<TaskInfo> {
        let request = documents_request(Request::put(self.endpoint("/documents")), primary_key)
            .named("Documents", "update_documents_csv")
            .raw(csv, ContentType::Csv);
        self.client().execute(request.build()?).await
    }

    pub async fn update_documents_ndjson(
        &self,
        ndjson: impl Into<Vec<u8>>,
        primary_key: Option<&str>,
    ) -> Result<TaskInfo> {
        let request = documents_request(Request::put(self.endpoint("/documents")), primary_key)
            .named("Documents", "update_documents_ndjson")
            .raw(ndjson, ContentType::Ndjson);
        self.client().execute(request.build()?).await
    }

    /// DELETE /indexes/{uid}/documents/{id}
    pub async fn delete_document(&self, document_id: &str) -> Result<TaskInfo> {
        self.client()
            .execute(
                Request::delete(self.endpoint(&format!("/documents/{document_id}")))
                    .accept(&[202])
                    .named("Documents", "delete_document")
                    .build()?,
            )
            .await
    }

    /// POST /indexes/{uid}/documents/delete-batch
    pub async fn delete_documents(&self, document_ids: &[&str]) -> Result<TaskInfo> {
        self.client()
            .execute(
                Request::post(self.endpoint("/documents/delete-batch"))
                    .accept(&[202])
                    .named("Documents", "delete_documents")
                    .json(document_ids)
                    .build()?,
            )
            .await
    }

    /// DELETE /indexes/{uid}/documents
    pub async fn delete_all_documents(&self) -> Result<TaskInfo> {
        self.client()
            .execute(
                Request::delete(self.endpoint("/documents"))
                    .accept(&[202])
                    .named("Documents", "delete_all_documents")
                    .build()?,
            )
            .await
    }
}

fn documents_request(builder: RequestBuilder, primary_key: Option<&str>) -> RequestBuilder {
    let builder = builder.accept(&[202]);
    match primary_key {
        Some(key) => builder.query_param("primaryKey", key),
        None => builder,
    }
}
