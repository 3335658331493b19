use meili_core::{Key, KeyRequest, KeyUpdate, KeysQuery, Page};

use crate::client::Client;
use crate::error::Result;
use crate::request::Request;

impl Client {
    /// GET /keys
    pub async fn get_keys(&self, query: &KeysQuery) -> Result<Page<Key>> {
        self.execute(
            Request::get("/keys")
                .accept(&[200])
                .named("Keys", "get_keys")
                .query(query.query_pairs())
                .build()?,
        )
        .await
    }

    /// GET /keys/{key}, where `key` is either the key itself or its uid
    pub async fn get_key(&self, key: &str) -> Result<Key> {
        self.execute(
            Request::get(format!("/keys/{key}"))
                .accept(&[200])
                .named("Keys", "get_key")
                .build()?,
        )
        .await
    }

    pub async fn create_key(&self, request: &KeyRequest) -> Result<Key> {
        self.execute(
            Request::post("/keys")
                .accept(&[201])
                .named("Keys", "create_key")
                .json(request)
                .build()?,
        )
        .await
    }

    /// Only name and description can change after creation
    pub async fn update_key(&self, key: &str, update: &KeyUpdate) -> Result<Key> {
        self.execute(
            Request::patch(format!("/keys/{key}"))
                .accept(&[200])
                .named("Keys", "update_key")
                .json(update)
                .build()?,
        )
        .await
    }

    pub async fn delete_key(&self, key: &str) -> Result<()> {
        self.execute(
            Request::delete(format!("/keys/{key}"))
                .accept(&[204])
                .named("Keys", "delete_key")
                .build()?,
        )
        .await
    }
}
