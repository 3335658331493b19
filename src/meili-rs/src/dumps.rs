use meili_core::TaskInfo;

use crate::client::Client;
use crate::error::Result;
use crate::request::Request;

impl Client {
    /// POST /dumps. The dump is written by an asynchronous task.
    pub async fn create_dump(&self) -> Result<TaskInfo> {
        self.execute(
            Request::post("/dumps")
                .accept(&[202])
                .named("Dumps", "create_dump")
                .build()?,
        )
        .await
    }
}
