use std::io::Write;
use std::sync::Arc;

use axum_test::TestServer;
use serde_json::json;
use tempfile::NamedTempFile;

use bookmatch_api::api::{create_router, AppState};
use bookmatch_api::config::Config;
use bookmatch_api::services::CsvSource;

const BOOKS_CSV: &str = "\
,Book,Author,Description,Genres,Avg_Rating,Num_Ratings,URL
0,Fast Fantasy,Ann Author,A thrilling quest.,\"['Fantasy']\",3.90,100,https://example.org/a
1,Slow Romance,Bea Author,A slow burn love story.,\"['Romance']\",3.90,100,https://example.org/b
2,Middle Mix (Mix Saga #1),Cy Author,Dragons and courtship.,\"['Fantasy', 'Romance']\",3.90,100,https://example.org/c
3,Broken Row,Di Author,No genres here.,not-a-list,n/a,lots,https://example.org/d
";

fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

async fn create_test_server(csv: &NamedTempFile) -> TestServer {
    let source = Arc::new(CsvSource::new(csv.path()));
    let state = AppState::load(Config::default(), source).await.unwrap();
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let csv = write_csv(BOOKS_CSV);
    let server = create_test_server(&csv).await;

    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_recommend_ranks_by_quiz_answers() {
    let csv = write_csv(BOOKS_CSV);
    let server = create_test_server(&csv).await;

    let response = server
        .post("/api/recommend")
        .json(&json!({
            "seedBooks": ["Z"],
            "quizAnswers": {
                "genres": ["Fantasy"],
                "pacing": "fast",
                "length": "short"
            }
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let recommendations = body["recommendations"].as_array().unwrap();

    assert_eq!(recommendations.len(), 2);
    assert_eq!(recommendations[0]["title"], "Fast Fantasy");
    assert_eq!(recommendations[0]["id"], 0);
    assert_eq!(recommendations[0]["matchScore"], 82);
    assert_eq!(
        recommendations[0]["matchReason"],
        "Matched on shared genre: fantasy."
    );
    assert_eq!(recommendations[1]["title"], "Middle Mix (Mix Saga #1)");
    assert_eq!(recommendations[1]["author"], "Cy Author");
}

#[tokio::test]
async fn test_recommend_excludes_seed_books() {
    let csv = write_csv(BOOKS_CSV);
    let server = create_test_server(&csv).await;

    let response = server
        .post("/api/recommend")
        .json(&json!({ "seedBooks": [" fast fantasy ", "Slow Romance"] }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let titles: Vec<&str> = body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Middle Mix (Mix Saga #1)", "Broken Row"]);
}

#[tokio::test]
async fn test_recommend_respects_top_n() {
    let csv = write_csv(BOOKS_CSV);
    let server = create_test_server(&csv).await;

    let response = server
        .post("/api/recommend")
        .json(&json!({ "seedBooks": ["Z"], "topN": 1 }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 1);

    let response = server
        .post("/api/recommend")
        .json(&json!({ "seedBooks": ["Z"], "topN": -3 }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body["recommendations"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_recommend_without_seed_books_is_bad_request() {
    let csv = write_csv(BOOKS_CSV);
    let server = create_test_server(&csv).await;

    let response = server
        .post("/api/recommend")
        .json(&json!({ "seedBooks": [], "quizAnswers": { "genres": ["Fantasy"] } }))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("seed book"));
}

#[tokio::test]
async fn test_response_carries_request_id() {
    let csv = write_csv(BOOKS_CSV);
    let server = create_test_server(&csv).await;

    let response = server.get("/health").await;
    let header = response.headers().get("x-request-id").unwrap();
    assert!(uuid::Uuid::parse_str(header.to_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_search_books() {
    let csv = write_csv(BOOKS_CSV);
    let server = create_test_server(&csv).await;

    let response = server.get("/api/books/search?q=ROMANCE").await;
    response.assert_status_ok();
    let results: Vec<serde_json::Value> = response.json();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["id"], 1);
    assert_eq!(results[0]["author"], "Bea Author");

    let response = server.get("/api/books/search?q=").await;
    response.assert_status_ok();
    let results: Vec<serde_json::Value> = response.json();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_get_book_detail() {
    let csv = write_csv(BOOKS_CSV);
    let server = create_test_server(&csv).await;

    let response = server.get("/api/books/2").await;
    response.assert_status_ok();
    let book: serde_json::Value = response.json();
    assert_eq!(book["id"], 2);
    assert_eq!(book["series"], "Mix Saga #1");
    assert_eq!(book["genres"], json!(["fantasy", "romance"]));
    assert_eq!(book["lengthBucket"], "short");

    let response = server.get("/api/books/3").await;
    let broken: serde_json::Value = response.json();
    assert_eq!(broken["averageRating"], 0.0);
    assert_eq!(broken["numberOfRatings"], 0);
    assert_eq!(broken["genres"], json!([]));

    let response = server.get("/api/books/99").await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_catalog_reload_swaps_version() {
    let mut csv = write_csv(BOOKS_CSV);
    let server = create_test_server(&csv).await;

    let response = server.get("/api/catalog").await;
    response.assert_status_ok();
    let info: serde_json::Value = response.json();
    assert_eq!(info["version"], 1);
    assert_eq!(info["size"], 4);

    csv.write_all(
        b"4,Late Addition,Ed Author,A contemplative novel.,\"['Literary Fiction']\",4.5,\"200,000\",https://example.org/e\n",
    )
    .unwrap();

    let response = server.post("/api/catalog/reload").await;
    response.assert_status_ok();
    let info: serde_json::Value = response.json();
    assert_eq!(info["version"], 2);
    assert_eq!(info["size"], 5);

    let response = server.get("/api/books/4").await;
    response.assert_status_ok();
    let book: serde_json::Value = response.json();
    assert_eq!(book["pacing"], "slow");
    assert_eq!(book["numberOfRatings"], 200_000);
}
