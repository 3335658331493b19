use meili_core::{SearchRequest, SearchResponse};
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::indexes::{Index, IndexScoped};
use crate::request::Request;

impl Index {
    /// POST /indexes/{uid}/search
    ///
    /// Hits are decoded as `T`; use `serde_json::Value` when the document
    /// shape is not known.
    pub async fn search<T: DeserializeOwned>(&self, query: &SearchRequest) -> Result<SearchResponse<T>> {
        self.client()
            .execute(
                Request::post(self.endpoint("/search"))
                    .accept(&[200])
                    .named("Search", "search")
                    .json(query)
                    .build()?,
            )
            .await
    }
}
