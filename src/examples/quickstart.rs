//! Quickstart Example
//!
//! Creates an index, loads a few documents and searches them against a
//! running instance.
//!
//! Run with: cargo run --example quickstart
//! Env: MEILI_HOST (default http://localhost:7700), MEILI_MASTER_KEY

use meili_rs::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Serialize, Deserialize)]
struct Book {
    id: u32,
    title: String,
    genre: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("meili_rs=debug"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let host = std::env::var("MEILI_HOST").unwrap_or_else(|_| "http://localhost:7700".to_string());
    let key = std::env::var("MEILI_MASTER_KEY").ok();
    let client = Client::new(host, key.as_deref())?;

    if !client.is_healthy().await {
        anyhow::bail!("instance at {} is not available", client.host());
    }
    println!("Connected to {} (v{})\n", client.host(), client.get_version().await?.pkg_version);

    let wait = WaitParams::new().with_timeout(Duration::from_secs(10));

    client
        .create_index("books", Some("id"))
        .await?
        .wait_for_completion(&client, wait.clone())
        .await?;
    let books = client.get_index("books").await?;

    let documents = vec![
        Book { id: 1, title: "Le Petit Prince".into(), genre: "fable".into() },
        Book { id: 2, title: "Dune".into(), genre: "science fiction".into() },
        Book { id: 3, title: "Neuromancer".into(), genre: "science fiction".into() },
        Book { id: 4, title: "Emma".into(), genre: "romance".into() },
    ];
    let info = books.add_documents(&documents, None).await?;
    books.wait_for_task(info.task_uid, wait.clone()).await?;
    println!("Indexed {} documents", documents.len());

    let info = books.update_filterable_attributes(&["genre"]).await?;
    books.wait_for_task(info.task_uid, wait).await?;

    let query = SearchRequest::new("prince").with_limit(3);
    let results = books.search::<Book>(&query).await?;
    println!("Search results for 'prince' ({} ms):", results.processing_time_ms);
    for (i, hit) in results.hits.iter().enumerate() {
        println!("   {}. {} [{}]", i + 1, hit.title, hit.genre);
    }

    let query = SearchRequest::new("").with_filter("genre = 'science fiction'");
    let results = books.search::<Book>(&query).await?;
    println!("\nScience fiction: {}", results.hits.len());

    Ok(())
}
