use meili_core::{
    CreateIndexRequest, IndexInfo, IndexesQuery, Page, SwapIndexes, Task, TaskInfo,
    UpdateIndexRequest,
};

use crate::client::Client;
use crate::error::Result;
use crate::request::Request;
use crate::tasks::WaitParams;

/// Capability shared by every index-bound facade: which index, through
/// which client.
pub trait IndexScoped {
    fn uid(&self) -> &str;
    fn client(&self) -> &Client;

    /// Path under `/indexes/{uid}`; `suffix` starts with `/` or is empty.
    fn endpoint(&self, suffix: &str) -> String {
        format!("/indexes/{}{}", self.uid(), suffix)
    }
}

/// Local handle to an index. Creating one issues no request.
#[derive(Debug, Clone)]
pub struct Index {
    uid: String,
    client: Client,
}

impl IndexScoped for Index {
    fn uid(&self) -> &str {
        &self.uid
    }

    fn client(&self) -> &Client {
        &self.client
    }
}

impl Client {
    pub fn index(&self, uid: impl Into<String>) -> Index {
        Index {
            uid: uid.into(),
            client: self.clone(),
        }
    }

    /// Fetch an index and return a handle to it
    pub async fn get_index(&self, uid: &str) -> Result<Index> {
        let info = self.get_raw_index(uid).await?;
        Ok(self.index(info.uid))
    }

    /// GET /indexes/{uid}
    pub async fn get_raw_index(&self, uid: &str) -> Result<IndexInfo> {
        self.index(uid).fetch_info().await
    }

    /// GET /indexes
    pub async fn list_indexes(&self, query: &IndexesQuery) -> Result<Page<IndexInfo>> {
        self.execute(
            Request::get("/indexes")
                .accept(&[200])
                .named("Indexes", "list_indexes")
                .query(query.query_pairs())
                .build()?,
        )
        .await
    }

    /// POST /indexes
    pub async fn create_index(&self, uid: &str, primary_key: Option<&str>) -> Result<TaskInfo> {
        let body = CreateIndexRequest {
            uid: uid.to_string(),
            primary_key: primary_key.map(str::to_string),
        };
        self.execute(
            Request::post("/indexes")
                .accept(&[202])
                .named("Indexes", "create_index")
                .json(&body)
                .build()?,
        )
        .await
    }

    /// DELETE /indexes/{uid}
    pub async fn delete_index(&self, uid: &str) -> Result<TaskInfo> {
        self.index(uid).delete().await
    }

    /// POST /swap-indexes
    pub async fn swap_indexes(&self, swaps: &[SwapIndexes]) -> Result<TaskInfo> {
        self.execute(
            Request::post("/swap-indexes")
                .accept(&[202])
                .named("Indexes", "swap_indexes")
                .json(swaps)
                .build()?,
        )
        .await
    }
}

impl Index {
    /// GET /indexes/{uid}
    pub async fn fetch_info(&self) -> Result<IndexInfo> {
        self.client
            .execute(
                Request::get(self.endpoint(""))
                    .accept(&[200])
                    .named("Index", "fetch_info")
                    .build()?,
            )
            .await
    }

    /// PATCH /indexes/{uid}, changing the primary key
    pub async fn update(&self, primary_key: &str) -> Result<TaskInfo> {
        let body = UpdateIndexRequest {
            primary_key: primary_key.to_string(),
        };
        self.client
            .execute(
                Request::patch(self.endpoint(""))
                    .accept(&[202])
                    .named("Index", "update")
                    .json(&body)
                    .build()?,
            )
            .await
    }

    /// DELETE /indexes/{uid}
    pub async fn delete(&self) -> Result<TaskInfo> {
        self.client
            .execute(
                Request::delete(self.endpoint(""))
                    .accept(&[202])
                    .named("Index", "delete")
                    .build()?,
            )
            .await
    }

    /// Primary key as currently stored on the server
    pub async fn get_primary_key(&self) -> Result<Option<String>> {
        Ok(self.fetch_info().await?.primary_key)
    }

    /// GET /indexes/{uid}/tasks/{task_uid}
    pub async fn get_task(&self, task_uid: u64) -> Result<Task> {
        self.client
            .execute(
                Request::get(self.endpoint(&format!("/tasks/{task_uid}")))
                    .accept(&[200])
                    .named("Index", "get_task")
                    .build()?,
            )
            .await
    }

    /// Poll the index-scoped task endpoint until the task is terminal
    #[tracing::instrument(skip(self, params), fields(index = %self.uid))]
    pub async fn wait_for_task(&self, task_uid: u64, params: WaitParams) -> Result<Task> {
        self.client
            .poll_task(self.endpoint(&format!("/tasks/{task_uid}")), task_uid, &params)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_endpoint() {
        let client = Client::new("http://localhost:7700", None).unwrap();
        let index = client.index("books");
        assert_eq!(index.uid(), "books");
        assert_eq!(index.endpoint(""), "/indexes/books");
        assert_eq!(index.endpoint("/settings/stop-words"), "/indexes/books/settings/stop-words");
    }
}
