//! Task endpoints and the task poller.

use async_trait::async_trait;
use meili_core::{Task, TaskInfo, TaskStatus, TasksQuery, TasksResults};
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;

use crate::client::Client;
use crate::error::{ClientError, RequestContext, Result};
use crate::request::Request;
use crate::transport::HttpMethod;

/// Poll interval used when none (or zero) is given
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How long and how often to poll a task
#[derive(Debug, Clone, Default)]
pub struct WaitParams {
    /// Pause between two fetches. Zero means [`DEFAULT_POLL_INTERVAL`].
    pub poll_interval: Duration,
    /// Overall deadline; `None` waits until the task is terminal.
    pub timeout: Option<Duration>,
    pub cancel: Option<CancellationToken>,
}

impl WaitParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn interval(&self) -> Duration {
        if self.poll_interval.is_zero() {
            DEFAULT_POLL_INTERVAL
        } else {
            self.poll_interval
        }
    }

    fn is_canceled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
    }
}

impl Client {
    /// GET /tasks/{uid}
    pub async fn get_task(&self, task_uid: u64) -> Result<Task> {
        self.execute(
            Request::get(format!("/tasks/{task_uid}"))
                .accept(&[200])
                .named("Tasks", "get_task")
                .build()?,
        )
        .await
    }

    /// GET /tasks
    pub async fn get_tasks(&self, query: &TasksQuery) -> Result<TasksResults> {
        self.execute(
            Request::get("/tasks")
                .accept(&[200])
                .named("Tasks", "get_tasks")
                .query(query.query_pairs())
                .build()?,
        )
        .await
    }

    /// POST /tasks/cancel, cancelling every task matched by `filter`
    pub async fn cancel_tasks(&self, filter: &TasksQuery) -> Result<TaskInfo> {
        self.execute(
            Request::post("/tasks/cancel")
                .accept(&[200])
                .named("Tasks", "cancel_tasks")
                .query(filter.query_pairs())
                .build()?,
        )
        .await
    }

    /// DELETE /tasks, removing every finished task matched by `filter`
    pub async fn delete_tasks(&self, filter: &TasksQuery) -> Result<TaskInfo> {
        self.execute(
            Request::delete("/tasks")
                .accept(&[200])
                .named("Tasks", "delete_tasks")
                .query(filter.query_pairs())
                .build()?,
        )
        .await
    }

    /// Poll `/tasks/{uid}` until the task is terminal.
    ///
    /// `succeeded` and `canceled` tasks are returned; a `failed` task is
    /// returned inside [`ClientError::TaskFailed`].
    #[tracing::instrument(skip(self, params))]
    pub async fn wait_for_task(&self, task_uid: u64, params: WaitParams) -> Result<Task> {
        self.poll_task(format!("/tasks/{task_uid}"), task_uid, &params)
            .await
    }

    pub(crate) async fn poll_task(
        &self,
        endpoint: String,
        task_uid: u64,
        params: &WaitParams,
    ) -> Result<Task> {
        let interval = params.interval();
        let started = Instant::now();
        let deadline = params.timeout.map(|timeout| started + timeout);
        let context = RequestContext {
            method: HttpMethod::Get,
            endpoint: endpoint.clone(),
            function: "wait_for_task",
            api: "Tasks",
        };
        let mut last_status: Option<TaskStatus> = None;

        loop {
            if params.is_canceled() {
                tracing::debug!(task_uid, "wait canceled");
                return Err(ClientError::Canceled { context, task_uid });
            }
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                return Err(ClientError::Timeout {
                    context,
                    task_uid,
                    waited: started.elapsed(),
                });
            }

            let request = Request::get(endpoint.clone())
                .accept(&[200])
                .named("Tasks", "wait_for_task")
                .build()?;
            let task: Task = match self.execute(request).await {
                Ok(task) => task,
                Err(ClientError::UnexpectedStatus {
                    context,
                    status: 404,
                    response,
                    ..
                }) => {
                    return Err(ClientError::TaskNotFound {
                        context,
                        task_uid,
                        response,
                    })
                }
                Err(err) => return Err(err),
            };

            match last_status {
                Some(previous) if task.status.rank() < previous.rank() => {
                    tracing::warn!(
                        task_uid,
                        previous = %previous,
                        reported = %task.status,
                        "task status moved backwards, ignoring"
                    );
                }
                _ => last_status = Some(task.status),
            }

            match task.status {
                TaskStatus::Succeeded | TaskStatus::Canceled => {
                    tracing::debug!(task_uid, status = %task.status, "task finished");
                    return Ok(task);
                }
                TaskStatus::Failed => {
                    return Err(ClientError::TaskFailed {
                        context,
                        task: Box::new(task),
                    })
                }
                TaskStatus::Enqueued | TaskStatus::Processing => {}
            }

            let pause = match deadline {
                Some(deadline) => interval.min(deadline.saturating_duration_since(Instant::now())),
                None => interval,
            };
            match &params.cancel {
                Some(token) => {
                    tokio::select! {
                        _ = token.cancelled() => {
                            tracing::debug!(task_uid, "wait canceled");
                            return Err(ClientError::Canceled { context, task_uid });
                        }
                        _ = sleep(pause) => {}
                    }
                }
                None => sleep(pause).await,
            }
        }
    }
}

/// Waiting directly on the summary returned by an enqueueing call
#[async_trait]
pub trait TaskInfoExt {
    async fn wait_for_completion(&self, client: &Client, params: WaitParams) -> Result<Task>;
}

#[async_trait]
impl TaskInfoExt for TaskInfo {
    async fn wait_for_completion(&self, client: &Client, params: WaitParams) -> Result<Task> {
        client.wait_for_task(self.task_uid, params).await
    }
}
