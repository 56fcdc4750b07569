//! REST client against a mocked search service.

use eventsearch::query::{build_query, RuntimeInputs, UseCase};
use eventsearch::scoring::{build_profile, ProfileKind, ProfileParams};
use eventsearch::types::{IndexAction, IndexBatch, Record};
use eventsearch::{index_definition, RestSearchClient, SearchService, ServiceConfig, ServiceError};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use crate::common::clock;

fn client(server: &MockServer) -> RestSearchClient {
    RestSearchClient::new(&ServiceConfig::new(server.uri(), "secret").with_batch_size(2)).unwrap()
}

fn body_json(request: &Request) -> Value {
    serde_json::from_slice(&request.body).unwrap()
}

/// Accepts every document except the key `bad`, like the indexing endpoint.
struct IndexingResponder;

impl Respond for IndexingResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body = body_json(request);
        let results: Vec<Value> = body["value"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| {
                let key = a["key"].as_str().unwrap();
                if key == "bad" {
                    json!({"key": key, "status": false, "errorMessage": "Document is not valid.", "statusCode": 400})
                } else {
                    json!({"key": key, "status": true, "errorMessage": null, "statusCode": 201})
                }
            })
            .collect();
        let partial = results.iter().any(|r| r["status"] == false);
        ResponseTemplate::new(if partial { 207 } else { 200 }).set_body_json(json!({"value": results}))
    }
}

#[tokio::test]
async fn test_create_index_sends_schema_with_key_and_version() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/indexes"))
        .and(header("api-key", "secret"))
        .and(query_param("api-version", "2020-06-30"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"name": "events"})))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .create_index(&index_definition("events"))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body = body_json(&requests[0]);
    assert_eq!(body["name"], "events");
    assert_eq!(body["fields"].as_array().unwrap().len(), 10);
    assert_eq!(body["fields"][0]["type"], "Edm.String");
    assert_eq!(body["fields"][0]["key"], true);
    assert_eq!(body["suggesters"][0]["name"], "sg");
    assert_eq!(body["suggesters"][0]["searchMode"], "analyzingInfixMatching");
    assert!(body.get("scoringProfiles").is_none());
}

#[tokio::test]
async fn test_create_existing_index_is_already_exists() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/indexes"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": {"code": "", "message": "Cannot create index 'events' because it already exists."}
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .create_index(&index_definition("events"))
        .await
        .unwrap_err();
    match err {
        ServiceError::AlreadyExists(msg) => assert!(msg.contains("already exists")),
        other => panic!("expected AlreadyExists, got {other:?}"),
    }
}

#[tokio::test]
async fn test_list_indexes_with_counts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/indexes"))
        .and(query_param("$select", "name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{"name": "events"}, {"name": "archive"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/indexes/events/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"documentCount": 1000, "storageSize": 2048})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/indexes/archive/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"documentCount": 0, "storageSize": 0})))
        .mount(&server)
        .await;

    let indexes = client(&server).list_indexes().await.unwrap();
    let summary: Vec<(&str, u64)> = indexes
        .iter()
        .map(|i| (i.name.as_str(), i.document_count))
        .collect();
    assert_eq!(summary, vec![("events", 1000), ("archive", 0)]);
}

#[tokio::test]
async fn test_submit_documents_is_chunked_by_batch_size() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/indexes/events/docs/index"))
        .respond_with(IndexingResponder)
        .expect(3)
        .mount(&server)
        .await;

    let batch = IndexBatch::new(
        (0..5)
            .map(|i| IndexAction::upload(Record::with_key(format!("k{i}"))))
            .collect(),
    );
    let outcome = client(&server).submit_documents("events", &batch).await.unwrap();
    assert_eq!(outcome.succeeded, 5);
    assert!(outcome.is_complete());

    let requests = server.received_requests().await.unwrap();
    let first = body_json(&requests[0]);
    assert_eq!(first["value"][0]["@search.action"], "upload");
    assert_eq!(first["value"][0]["key"], "k0");
    assert_eq!(first["value"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_partial_batch_reports_failed_keys() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/indexes/events/docs/index"))
        .respond_with(IndexingResponder)
        .mount(&server)
        .await;

    let batch = IndexBatch::new(vec![
        IndexAction::upload(Record::with_key("good")),
        IndexAction::upload(Record::with_key("bad")),
        IndexAction::delete("gone"),
    ]);
    let outcome = client(&server).submit_documents("events", &batch).await.unwrap();
    assert_eq!(outcome.succeeded, 2);
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].key, "bad");
    assert_eq!(outcome.failed[0].message, "Document is not valid.");
}

#[tokio::test]
async fn test_failed_chunk_keeps_earlier_chunks() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/indexes/events/docs/index"))
        .respond_with(IndexingResponder)
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/indexes/events/docs/index"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let batch = IndexBatch::new(
        (0..4)
            .map(|i| IndexAction::upload(Record::with_key(format!("k{i}"))))
            .collect(),
    );
    let err = client(&server).submit_documents("events", &batch).await.unwrap_err();
    assert!(matches!(err, ServiceError::Server(_)));
    // No delete requests were issued to undo the first chunk.
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn test_delete_missing_index_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/indexes/nope"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client(&server).delete_index("nope").await.unwrap_err();
    match err {
        ServiceError::NotFound(msg) => assert!(msg.contains("nope")),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_document_decodes_geojson() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/indexes/events/docs/k1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "@odata.context": "https://demo/indexes('events')/$metadata#docs/$entity",
            "key": "k1",
            "name": "Packers vs Bears",
            "geolocation": {"type": "Point", "coordinates": [-88.062208, 44.501341]},
            "tags": ["packers", "green bay"],
            "rating": 7
        })))
        .mount(&server)
        .await;

    let record = client(&server).get_document("events", "k1").await.unwrap();
    assert_eq!(record.name.as_deref(), Some("Packers vs Bears"));
    let geo = record.geolocation.unwrap();
    assert_eq!(geo.latitude, 44.501341);
    assert_eq!(geo.longitude, -88.062208);
    assert_eq!(record.rating, Some(7));
    assert_eq!(record.tags.len(), 2);
}

#[tokio::test]
async fn test_update_profiles_merges_into_existing_definition() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/indexes/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "@odata.context": "https://demo/$metadata#indexes/$entity",
            "@odata.etag": "\"0x8D\"",
            "name": "events",
            "fields": [{"name": "key", "type": "Edm.String", "key": true}],
            "scoringProfiles": [
                {"name": "defaultgeo", "functionAggregation": "sum", "functions": []}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/indexes/events"))
        .and(header("api-key", "secret"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let profile = build_profile(
        ProfileKind::Freshness,
        &ProfileParams::for_kind(ProfileKind::Freshness),
    )
    .unwrap();
    client(&server)
        .update_scoring_profiles("events", &[profile])
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let put = requests.iter().find(|r| r.method.as_str() == "PUT").unwrap();
    let body = body_json(put);
    assert!(body.get("@odata.context").is_none());
    assert_eq!(body["fields"][0]["name"], "key");
    let profiles = body["scoringProfiles"].as_array().unwrap();
    assert_eq!(profiles.len(), 2);
    assert_eq!(profiles[1]["name"], "default");
    assert_eq!(profiles[1]["functions"][0]["type"], "freshness");
    assert_eq!(profiles[1]["functions"][0]["fieldName"], "dateadded");
    assert_eq!(profiles[1]["functions"][0]["freshness"]["boostingDuration"], "PT5M");
}

#[tokio::test]
async fn test_search_sends_built_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/indexes/events/docs/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "@odata.count": 1,
            "@search.facets": {"rating": [{"value": 7, "count": 1}]},
            "value": [{"@search.score": 2.5, "key": "k1", "name": "Packers vs Bears"}]
        })))
        .mount(&server)
        .await;

    let inputs = RuntimeInputs::new("packers").with_favorite_tag("packers");
    let request = build_query(UseCase::TagRanked, &inputs, &clock()).unwrap();
    let results = client(&server).search("events", &request).await.unwrap();
    assert_eq!(results.total_count, Some(1));
    assert_eq!(results.results[0].score, 2.5);

    let requests = server.received_requests().await.unwrap();
    let body = body_json(&requests[0]);
    assert_eq!(body["search"], "packers");
    assert_eq!(body["scoringProfile"], "default");
    assert_eq!(body["scoringParameters"], json!(["tagsParameter-packers"]));
    assert_eq!(body["top"], 10);
}

#[tokio::test]
async fn test_status_mapping() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/indexes/locked/stats"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/indexes/events/docs/search"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"code": "", "message": "Unknown scoring profile 'default'."}
        })))
        .mount(&server)
        .await;

    let c = client(&server);
    assert!(matches!(
        c.document_count("locked").await,
        Err(ServiceError::Unauthorized(_))
    ));

    let request = build_query(UseCase::FreshnessRanked, &RuntimeInputs::new("x"), &clock()).unwrap();
    match c.search("events", &request).await {
        Err(ServiceError::InvalidRequest(msg)) => assert_eq!(msg, "Unknown scoring profile 'default'."),
        other => panic!("expected InvalidRequest, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_service_is_network_error() {
    let c = RestSearchClient::new(&ServiceConfig::new("http://127.0.0.1:1", "secret")).unwrap();
    assert!(matches!(
        c.document_count("events").await,
        Err(ServiceError::Network(_))
    ));
}
