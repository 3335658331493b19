//! Waiting on Tasks Example
//!
//! Enqueues a dump and polls it with a deadline, stopping early on Ctrl-C.
//!
//! Run with: cargo run --example wait_for_task

use meili_rs::*;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("meili_rs=debug"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let host = std::env::var("MEILI_HOST").unwrap_or_else(|_| "http://localhost:7700".to_string());
    let key = std::env::var("MEILI_MASTER_KEY").ok();
    let client = Client::new(host, key.as_deref())?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let info = client.create_dump().await?;
    println!("Dump enqueued as task {}", info.task_uid);

    let params = WaitParams::new()
        .with_interval(Duration::from_millis(250))
        .with_timeout(Duration::from_secs(60))
        .with_cancel(cancel);

    match client.wait_for_task(info.task_uid, params).await {
        Ok(task) => {
            let dump = task.details.and_then(|d| d.dump_uid).unwrap_or_default();
            println!("Dump {} finished: {}", dump, task.status);
        }
        Err(err @ ClientError::TaskFailed { .. }) => {
            println!("Dump failed: {}", err);
        }
        Err(err) if matches!(err.code(), ErrorCode::Timeout | ErrorCode::Canceled) => {
            println!("Stopped waiting: {}", err);
            let task = client.get_task(info.task_uid).await?;
            println!("Task {} is still {}", task.uid, task.status);
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
