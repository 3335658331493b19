use meili_core::{IndexStats, Stats};

use crate::client::Client;
use crate::error::Result;
use crate::indexes::{Index, IndexScoped};
use crate::request::Request;

impl Client {
    /// GET /stats, covering every index
    pub async fn get_stats(&self) -> Result<Stats> {
        self.execute(
            Request::get("/stats")
                .accept(&[200])
                .named("Stats", "get_stats")
                .build()?,
        )
        .await
    }
}

impl Index {
    /// GET /indexes/{uid}/stats
    pub async fn get_stats(&self) -> Result<IndexStats> {
        self.client()
            .execute(
                Request::get(self.endpoint("/stats"))
                    .accept(&[200])
                    .named("Stats", "get_index_stats")
                    .build()?,
            )
            .await
    }
}
