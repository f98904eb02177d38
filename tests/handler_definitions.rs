mod common;

use cloud_dictionary::api::dto::pagination::CONTINUATION_HEADER;
use cloud_dictionary::domain::entities::{Definition, UpdatePolicy};
use serde_json::json;
use std::collections::HashSet;

#[tokio::test]
async fn test_create_definition_success() {
    let (state, _store) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server
        .post("/api/definitions")
        .json(&json!({
            "word": "  latency ",
            "content": "Time between a request and its response.",
            "tag": "networking",
            "author_name": "Ada",
            "author_link": "https://example.com/ada"
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    assert!(!json["id"].as_str().unwrap().is_empty());
    assert_eq!(json["word"], "latency");
    assert_eq!(json["tag"], "networking");
    assert_eq!(json["author"]["name"], "Ada");
    assert_eq!(json["author"]["link"], "https://example.com/ada");
    assert!(json["abbreviation"].is_null());
}

#[tokio::test]
async fn test_create_definition_missing_content() {
    let (state, _store) = common::create_test_state();
    let server = common::create_test_server(state.clone());

    let response = server
        .post("/api/definitions")
        .json(&json!({ "word": "latency", "content": "   " }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(json["error"]["details"]["fields"], json!(["content"]));

    assert_eq!(state.dictionary.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_definition_invalid_url() {
    let (state, _store) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server
        .post("/api/definitions")
        .json(&json!({
            "word": "latency",
            "content": "body",
            "learn_more_url": "not a url"
        }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["details"]["fields"], json!(["learn_more_url"]));
}

#[tokio::test]
async fn test_get_definition_by_id() {
    let (state, _store) = common::create_test_state();
    let created = common::seed_definition(&state, "cache", None).await;
    let server = common::create_test_server(state);

    let response = server.get(&format!("/api/definitions/{}", created.id)).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Definition>(), created);
}

#[tokio::test]
async fn test_get_definition_not_found() {
    let (state, _store) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server.get("/api/definitions/missing").await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
    assert_eq!(json["error"]["details"]["id"], "missing");
}

#[tokio::test]
async fn test_random_definition_empty_collection() {
    let (state, _store) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server.get("/api/definitions/random").await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "empty_collection");
}

#[tokio::test]
async fn test_random_definition_returns_stored_entry() {
    let (state, _store) = common::create_test_state();
    let a = common::seed_definition(&state, "alpha", None).await;
    let b = common::seed_definition(&state, "beta", None).await;
    let server = common::create_test_server(state);

    let response = server.get("/api/definitions/random").await;

    response.assert_status_ok();
    let picked = response.json::<Definition>();
    assert!(picked == a || picked == b);
}

#[tokio::test]
async fn test_list_definitions_follows_continuation_header() {
    let (state, _store) = common::create_test_state_with(2, UpdatePolicy::Replace);
    for word in ["a", "b", "c", "d", "e"] {
        common::seed_definition(&state, word, None).await;
    }
    let server = common::create_test_server(state);

    let mut seen = HashSet::new();
    let mut continuation: Option<String> = None;
    let mut pages = 0;

    loop {
        let mut request = server.get("/api/definitions");
        if let Some(token) = &continuation {
            request = request.add_query_param("continuation", token);
        }
        let response = request.await;
        response.assert_status_ok();
        pages += 1;

        for definition in response.json::<Vec<Definition>>() {
            assert!(seen.insert(definition.id), "entry returned twice");
        }

        continuation = response
            .headers()
            .get(&CONTINUATION_HEADER)
            .map(|v| v.to_str().unwrap().to_string());
        if continuation.is_none() {
            break;
        }
    }

    assert_eq!(seen.len(), 5);
    assert_eq!(pages, 3);
}

#[tokio::test]
async fn test_list_definitions_filters_by_tag() {
    let (state, _store) = common::create_test_state();
    common::seed_definition(&state, "tcp", Some("networking")).await;
    common::seed_definition(&state, "btree", Some("storage")).await;
    common::seed_definition(&state, "udp", Some("networking")).await;
    let server = common::create_test_server(state);

    let response = server
        .get("/api/definitions")
        .add_query_param("tag", "networking")
        .await;

    response.assert_status_ok();
    let mut words: Vec<String> = response
        .json::<Vec<Definition>>()
        .into_iter()
        .map(|d| d.word)
        .collect();
    words.sort();
    assert_eq!(words, ["tcp", "udp"]);
    assert!(response.headers().get(&CONTINUATION_HEADER).is_none());
}

#[tokio::test]
async fn test_list_definitions_invalid_continuation() {
    let (state, _store) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server
        .get("/api/definitions")
        .add_query_param("continuation", "%%%not-a-token")
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_update_definition_replace_keeps_id() {
    let (state, _store) = common::create_test_state();
    let created = common::seed_definition(&state, "rpc", Some("networking")).await;
    let server = common::create_test_server(state);

    let response = server
        .put(&format!("/api/definitions/{}", created.id))
        .json(&json!({ "word": "RPC", "content": "Remote procedure call." }))
        .await;

    response.assert_status_ok();
    let updated = response.json::<Definition>();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.word, "RPC");
    assert!(updated.tag.is_none());
}

#[tokio::test]
async fn test_update_definition_merge_mode() {
    let (state, _store) = common::create_test_state();
    let created = common::seed_definition(&state, "rpc", Some("networking")).await;
    let server = common::create_test_server(state);

    let response = server
        .put(&format!("/api/definitions/{}", created.id))
        .add_query_param("mode", "merge")
        .json(&json!({ "content": "Remote procedure call." }))
        .await;

    response.assert_status_ok();
    let updated = response.json::<Definition>();
    assert_eq!(updated.word, "rpc");
    assert_eq!(updated.content, "Remote procedure call.");
    assert_eq!(updated.tag.as_deref(), Some("networking"));
}

#[tokio::test]
async fn test_update_definition_uses_configured_policy() {
    let (state, _store) = common::create_test_state_with(100, UpdatePolicy::Merge);
    let created = common::seed_definition(&state, "rpc", Some("networking")).await;
    let server = common::create_test_server(state);

    let response = server
        .put(&format!("/api/definitions/{}", created.id))
        .json(&json!({ "abbreviation": "RPC" }))
        .await;

    response.assert_status_ok();
    let updated = response.json::<Definition>();
    assert_eq!(updated.abbreviation.as_deref(), Some("RPC"));
    assert_eq!(updated.content, created.content);
}

#[tokio::test]
async fn test_update_definition_never_creates() {
    let (state, _store) = common::create_test_state();
    let server = common::create_test_server(state.clone());

    let response = server
        .put("/api/definitions/ghost")
        .json(&json!({ "word": "ghost", "content": "boo" }))
        .await;

    response.assert_status_not_found();
    assert_eq!(state.dictionary.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_update_definition_rejects_blank_result() {
    let (state, _store) = common::create_test_state();
    let created = common::seed_definition(&state, "rpc", None).await;
    let server = common::create_test_server(state.clone());

    let response = server
        .put(&format!("/api/definitions/{}", created.id))
        .json(&json!({ "word": "rpc" }))
        .await;

    response.assert_status_bad_request();
    let stored = state.dictionary.get_definition(&created.id).await.unwrap();
    assert_eq!(stored, created);
}

#[tokio::test]
async fn test_store_failure_is_internal_error() {
    let (state, store) = common::create_test_state();
    store.set_simulate_failure(true);
    let server = common::create_test_server(state);

    let response = server.get("/api/definitions").await;

    response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "store_error");
}

#[tokio::test]
async fn test_trailing_slash_is_normalized() {
    let (state, _store) = common::create_test_state();
    common::seed_definition(&state, "alpha", None).await;
    let server = common::create_test_server(state);

    let response = server.get("/api/definitions/").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Vec<Definition>>().len(), 1);
}

#[tokio::test]
async fn test_update_missing_id_with_invalid_body_is_not_found() {
    let (state, _store) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server
        .put("/api/definitions/ghost")
        .json(&json!({
            "word": "ghost",
            "content": "boo",
            "learn_more_url": "not a url"
        }))
        .await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_update_existing_id_with_invalid_body_is_bad_request() {
    let (state, _store) = common::create_test_state();
    let created = common::seed_definition(&state, "rpc", None).await;
    let server = common::create_test_server(state);

    let response = server
        .put(&format!("/api/definitions/{}", created.id))
        .json(&json!({
            "word": "rpc",
            "content": "body",
            "author_link": "not a url"
        }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["details"]["fields"], json!(["author_link"]));
}

#[tokio::test]
async fn test_list_definitions_tag_filter_is_trimmed() {
    let (state, _store) = common::create_test_state();
    common::seed_definition(&state, "btree", Some("db")).await;
    let server = common::create_test_server(state);

    let response = server
        .get("/api/definitions")
        .add_query_param("tag", " db ")
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Vec<Definition>>().len(), 1);
}
