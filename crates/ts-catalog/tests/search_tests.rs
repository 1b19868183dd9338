//! Catalog search scenarios against a mock API

use ts_catalog::CatalogClient;
use ts_types::AppError;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn search_sends_bearer_token_and_flattens_tracks() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(header("authorization", "Bearer live_token"))
        .and(query_param("q", "daft punk"))
        .and(query_param("type", "track"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "tracks": {
                "items": [
                    {
                        "id": "t1",
                        "name": "One More Time",
                        "artists": [{"name": "Daft Punk"}],
                        "album": {"images": [{"url": "https://img/t1"}]}
                    },
                    {
                        "id": "t2",
                        "name": "Harder Better",
                        "artists": [{"name": "Daft Punk"}],
                        "album": {"images": []}
                    }
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = CatalogClient::new(server.uri());
    let tracks = client
        .search_tracks("live_token", "daft punk", 10)
        .await
        .unwrap();

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].name, "One More Time");
    assert_eq!(tracks[0].artists, vec!["Daft Punk"]);
    assert_eq!(tracks[0].album_artwork_url.as_deref(), Some("https://img/t1"));
    assert_eq!(tracks[1].album_artwork_url, None);
}

#[tokio::test]
async fn blank_query_short_circuits_without_a_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = CatalogClient::new(server.uri());
    let tracks = client.search_tracks("live_token", "   ", 10).await.unwrap();

    assert!(tracks.is_empty());
}

#[tokio::test]
async fn rejected_token_surfaces_a_catalog_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(401).set_body_string(
            r#"{"error":{"status":401,"message":"The access token expired"}}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = CatalogClient::new(server.uri());
    let err = client
        .search_tracks("stale_token", "query", 10)
        .await
        .unwrap_err();

    match err {
        AppError::Catalog(message) => {
            assert!(message.contains("401"));
        }
        other => panic!("Expected Catalog error, got {:?}", other),
    }
}

#[tokio::test]
async fn empty_result_page_is_an_empty_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"tracks": {"items": []}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = CatalogClient::new(server.uri());
    let tracks = client
        .search_tracks("live_token", "nothing matches", 10)
        .await
        .unwrap();

    assert!(tracks.is_empty());
}
