mod common;

use common::{fixture, index_info, task, task_info, ENQUEUED_AT};
use meili_rs::{
    DocumentsQuery, IndexScoped, IndexesQuery, KeyRequest, KeyUpdate, SearchRequest, Settings,
    SwapIndexes, TaskStatus, TaskType, TypoTolerance, WaitParams,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Book {
    id: u32,
    title: String,
}

fn books() -> Vec<Book> {
    [
        (1, "Le Petit Prince"),
        (2, "Dune"),
        (3, "Emma"),
        (4, "The Hobbit"),
        (5, "Neuromancer"),
    ]
    .into_iter()
    .map(|(id, title)| Book {
        id,
        title: title.to_string(),
    })
    .collect()
}

#[tokio::test]
async fn test_create_index_then_fetch() {
    let fx = fixture().await;
    Mock::given(method("POST"))
        .and(path("/indexes"))
        .and(body_json(json!({"uid": "books", "primaryKey": "id"})))
        .respond_with(ResponseTemplate::new(202).set_body_json(task_info(0, "books", "indexCreation")))
        .expect(1)
        .mount(&fx.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tasks/0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(task(0, "succeeded")))
        .mount(&fx.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/indexes/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(index_info("books")))
        .mount(&fx.server)
        .await;

    let info = fx.client.create_index("books", Some("id")).await.unwrap();
    assert_eq!(info.task_type, TaskType::IndexCreation);
    assert_eq!(info.status, TaskStatus::Enqueued);

    let done = fx
        .client
        .wait_for_task(info.task_uid, WaitParams::new())
        .await
        .unwrap();
    assert_eq!(done.status, TaskStatus::Succeeded);

    let index = fx.client.get_index("books").await.unwrap();
    assert_eq!(index.uid(), "books");
    assert_eq!(index.get_primary_key().await.unwrap().as_deref(), Some("id"));
}

#[tokio::test]
async fn test_create_index_without_primary_key_omits_field() {
    let fx = fixture().await;
    Mock::given(method("POST"))
        .and(path("/indexes"))
        .and(body_json(json!({"uid": "movies"})))
        .respond_with(ResponseTemplate::new(202).set_body_json(task_info(1, "movies", "indexCreation")))
        .expect(1)
        .mount(&fx.server)
        .await;

    fx.client.create_index("movies", None).await.unwrap();
}

#[tokio::test]
async fn test_list_update_swap_and_delete_indexes() {
    let fx = fixture().await;
    Mock::given(method("GET"))
        .and(path("/indexes"))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [index_info("books"), index_info("movies")],
            "offset": 0,
            "limit": 2,
            "total": 3
        })))
        .mount(&fx.server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/indexes/books"))
        .and(body_json(json!({"primaryKey": "isbn"})))
        .respond_with(ResponseTemplate::new(202).set_body_json(task_info(2, "books", "indexUpdate")))
        .expect(1)
        .mount(&fx.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/swap-indexes"))
        .and(body_json(json!([{"indexes": ["books", "books_new"]}])))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "taskUid": 3,
            "indexUid": null,
            "status": "enqueued",
            "type": "indexSwap",
            "enqueuedAt": ENQUEUED_AT
        })))
        .expect(1)
        .mount(&fx.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/indexes/movies"))
        .respond_with(ResponseTemplate::new(202).set_body_json(task_info(4, "movies", "indexDeletion")))
        .expect(1)
        .mount(&fx.server)
        .await;

    let page = fx
        .client
        .list_indexes(&IndexesQuery::new(0, 2))
        .await
        .unwrap();
    assert_eq!(page.results.len(), 2);
    assert_eq!(page.total, 3);

    let update = fx.client.index("books").update("isbn").await.unwrap();
    assert_eq!(update.task_type, TaskType::IndexUpdate);

    let swap = fx
        .client
        .swap_indexes(&[SwapIndexes {
            indexes: ["books".to_string(), "books_new".to_string()],
        }])
        .await
        .unwrap();
    assert!(swap.index_uid.is_none());

    let deleted = fx.client.delete_index("movies").await.unwrap();
    assert_eq!(deleted.task_type, TaskType::IndexDeletion);
}

#[tokio::test]
async fn test_documents_round_trip_through_index() {
    let fx = fixture().await;
    let documents = books();
    Mock::given(method("POST"))
        .and(path("/indexes/books/documents"))
        .and(query_param("primaryKey", "id"))
        .and(body_json(&documents))
        .respond_with(
            ResponseTemplate::new(202).set_body_json(task_info(5, "books", "documentAdditionOrUpdate")),
        )
        .expect(1)
        .mount(&fx.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/indexes/books/documents/2"))
        .and(query_param("fields", "id,title"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 2, "title": "Dune"})))
        .mount(&fx.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/indexes/books/documents"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": 1, "title": "Le Petit Prince"}, {"id": 2, "title": "Dune"}],
            "offset": 0,
            "limit": 2,
            "total": 5
        })))
        .mount(&fx.server)
        .await;

    let index = fx.client.index("books");
    let info = index.add_documents(&documents, Some("id")).await.unwrap();
    assert_eq!(info.task_type, TaskType::DocumentAdditionOrUpdate);

    let dune: Book = index.get_document("2", &["id", "title"]).await.unwrap();
    assert_eq!(dune, documents[1]);

    let page = index
        .get_documents::<Book>(&DocumentsQuery {
            limit: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.results, documents[..2].to_vec());
    assert_eq!(page.total, 5);
}

#[tokio::test]
async fn test_batches_send_one_request_each() {
    let fx = fixture().await;
    Mock::given(method("POST"))
        .and(path("/indexes/books/documents"))
        .respond_with(
            ResponseTemplate::new(202).set_body_json(task_info(6, "books", "documentAdditionOrUpdate")),
        )
        .expect(3)
        .mount(&fx.server)
        .await;

    let tasks = fx
        .client
        .index("books")
        .add_documents_in_batches(&books(), 2, None)
        .await
        .unwrap();
    assert_eq!(tasks.len(), 3);

    let requests = fx.server.received_requests().await.unwrap();
    let sizes: Vec<usize> = requests
        .iter()
        .map(|r| serde_json::from_slice::<Vec<Book>>(&r.body).unwrap().len())
        .collect();
    assert_eq!(sizes, vec![2, 2, 1]);
}

#[tokio::test]
async fn test_zero_batch_size_rejected() {
    let fx = fixture().await;
    let err = fx
        .client
        .index("books")
        .add_documents_in_batches(&books(), 0, None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), meili_rs::ErrorCode::Config);
    assert!(fx.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_document_deletions() {
    let fx = fixture().await;
    Mock::given(method("DELETE"))
        .and(path("/indexes/books/documents/3"))
        .respond_with(ResponseTemplate::new(202).set_body_json(task_info(7, "books", "documentDeletion")))
        .expect(1)
        .mount(&fx.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/indexes/books/documents/delete-batch"))
        .and(body_json(json!(["1", "2"])))
        .respond_with(ResponseTemplate::new(202).set_body_json(task_info(8, "books", "documentDeletion")))
        .expect(1)
        .mount(&fx.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/indexes/books/documents"))
        .respond_with(ResponseTemplate::new(202).set_body_json(task_info(9, "books", "documentDeletion")))
        .expect(1)
        .mount(&fx.server)
        .await;

    let index = fx.client.index("books");
    assert_eq!(index.delete_document("3").await.unwrap().task_uid, 7);
    assert_eq!(index.delete_documents(&["1", "2"]).await.unwrap().task_uid, 8);
    assert_eq!(index.delete_all_documents().await.unwrap().task_uid, 9);
}

#[tokio::test]
async fn test_search_with_limit() {
    let fx = fixture().await;
    Mock::given(method("POST"))
        .and(path("/indexes/books/search"))
        .and(body_json(json!({"q": "prince", "limit": 1})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": [{"id": 1, "title": "Le Petit Prince"}],
            "offset": 0,
            "limit": 1,
            "estimatedTotalHits": 1,
            "processingTimeMs": 0,
            "query": "prince"
        })))
        .expect(1)
        .mount(&fx.server)
        .await;

    let response = fx
        .client
        .index("books")
        .search::<Book>(&SearchRequest::new("prince").with_limit(1))
        .await
        .unwrap();
    assert_eq!(response.hits.len(), 1);
    assert_eq!(response.hits[0].title, "Le Petit Prince");
    assert_eq!(response.query, "prince");
    assert_eq!(response.estimated_total_hits, Some(1));
}

#[tokio::test]
async fn test_stop_words_set_then_read() {
    let fx = fixture().await;
    Mock::given(method("PUT"))
        .and(path("/indexes/books/settings/stop-words"))
        .and(body_json(json!(["a", "the"])))
        .respond_with(ResponseTemplate::new(202).set_body_json(task_info(10, "books", "settingsUpdate")))
        .expect(1)
        .mount(&fx.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tasks/10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(task(10, "succeeded")))
        .mount(&fx.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/indexes/books/settings/stop-words"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["a", "the"])))
        .mount(&fx.server)
        .await;

    let index = fx.client.index("books");
    let info = index.update_stop_words(&["a", "the"]).await.unwrap();
    fx.client
        .wait_for_task(
            info.task_uid,
            WaitParams::new().with_timeout(Duration::from_secs(5)),
        )
        .await
        .unwrap();

    let words = index.get_stop_words().await.unwrap();
    assert_eq!(words, vec!["a".to_string(), "the".to_string()]);
}

#[tokio::test]
async fn test_settings_methods_and_paths() {
    let fx = fixture().await;
    Mock::given(method("PATCH"))
        .and(path("/indexes/books/settings"))
        .and(body_json(json!({"filterableAttributes": ["genre"], "pagination": {"maxTotalHits": 500}})))
        .respond_with(ResponseTemplate::new(202).set_body_json(task_info(11, "books", "settingsUpdate")))
        .expect(1)
        .mount(&fx.server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/indexes/books/settings/typo-tolerance"))
        .and(body_json(json!({"enabled": false})))
        .respond_with(ResponseTemplate::new(202).set_body_json(task_info(12, "books", "settingsUpdate")))
        .expect(1)
        .mount(&fx.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/indexes/books/settings/ranking-rules"))
        .respond_with(ResponseTemplate::new(202).set_body_json(task_info(13, "books", "settingsUpdate")))
        .expect(1)
        .mount(&fx.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/indexes/books/settings/distinct-attribute"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(null)))
        .mount(&fx.server)
        .await;

    let index = fx.client.index("books");
    let settings = Settings::new()
        .with_filterable_attributes(["genre"])
        .with_pagination(500);
    assert_eq!(index.update_settings(&settings).await.unwrap().task_uid, 11);

    let typo = TypoTolerance {
        enabled: Some(false),
        ..Default::default()
    };
    assert_eq!(index.update_typo_tolerance(&typo).await.unwrap().task_uid, 12);
    assert_eq!(index.reset_ranking_rules().await.unwrap().task_uid, 13);
    assert_eq!(index.get_distinct_attribute().await.unwrap(), None);
}

#[tokio::test]
async fn test_keys_lifecycle() {
    let fx = fixture().await;
    let key = json!({
        "name": "search",
        "description": "Search key",
        "key": "d0552b41536279a0ad88bd595327b96f01176a60c2243e906c52ac02375f9bc4",
        "uid": "6062abda-a5aa-4414-ac91-ecd7944c0f8d",
        "actions": ["search"],
        "indexes": ["books"],
        "expiresAt": null,
        "createdAt": ENQUEUED_AT,
        "updatedAt": ENQUEUED_AT
    });
    Mock::given(method("POST"))
        .and(path("/keys"))
        .and(body_json(json!({
            "name": "search",
            "actions": ["search"],
            "indexes": ["books"],
            "expiresAt": null
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(key.clone()))
        .expect(1)
        .mount(&fx.server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/keys/6062abda-a5aa-4414-ac91-ecd7944c0f8d"))
        .and(body_json(json!({"description": "Search key"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(key.clone()))
        .expect(1)
        .mount(&fx.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/keys"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [key.clone()],
            "offset": 0,
            "limit": 20,
            "total": 1
        })))
        .mount(&fx.server)
        .await;

    let created = fx
        .client
        .create_key(&KeyRequest {
            name: Some("search".to_string()),
            description: None,
            uid: None,
            actions: vec!["search".to_string()],
            indexes: vec!["books".to_string()],
            expires_at: None,
        })
        .await
        .unwrap();
    assert_eq!(created.actions, vec!["search".to_string()]);

    let updated = fx
        .client
        .update_key(
            &created.uid.to_string(),
            &KeyUpdate {
                name: None,
                description: Some("Search key".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.description.as_deref(), Some("Search key"));

    let keys = fx.client.get_keys(&Default::default()).await.unwrap();
    assert_eq!(keys.results[0].uid, created.uid);
}

#[tokio::test]
async fn test_dump_and_stats() {
    let fx = fixture().await;
    Mock::given(method("POST"))
        .and(path("/dumps"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "taskUid": 30,
            "indexUid": null,
            "status": "enqueued",
            "type": "dumpCreation",
            "enqueuedAt": ENQUEUED_AT
        })))
        .expect(1)
        .mount(&fx.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "databaseSize": 447819776,
            "lastUpdate": ENQUEUED_AT,
            "indexes": {
                "books": {
                    "numberOfDocuments": 5,
                    "isIndexing": false,
                    "fieldDistribution": {"id": 5, "title": 5}
                }
            }
        })))
        .mount(&fx.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/indexes/books/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "numberOfDocuments": 5,
            "isIndexing": false,
            "fieldDistribution": {"id": 5, "title": 5}
        })))
        .mount(&fx.server)
        .await;

    let dump = fx.client.create_dump().await.unwrap();
    assert_eq!(dump.task_type, TaskType::DumpCreation);

    let stats = fx.client.get_stats().await.unwrap();
    assert_eq!(stats.indexes["books"].number_of_documents, 5);

    let index_stats = fx.client.index("books").get_stats().await.unwrap();
    assert!(!index_stats.is_indexing);
    assert_eq!(index_stats.field_distribution["title"], 5);
}
