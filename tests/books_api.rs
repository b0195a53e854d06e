use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use bookshelf_kernel::{settings::Settings, InitCtx};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn app_with(settings: Settings) -> Router {
    let registry = bookshelf_app::build_registry();
    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_modules(&ctx).await.unwrap();
    registry.start_modules(&ctx).await.unwrap();
    bookshelf_http::build_router(&registry, &settings)
        .await
        .unwrap()
}

async fn app() -> Router {
    app_with(Settings::default()).await
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn dicoding_scenario() {
    let app = app().await;

    let (status, body) = call(
        &app,
        "POST",
        "/books",
        Some(json!({
            "name": "Dicoding",
            "year": 2010,
            "author": "John Doe",
            "summary": "Lorem ipsum dolor sit amet",
            "publisher": "Dicoding Indonesia",
            "pageCount": 100,
            "readPage": 100,
            "reading": false
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let book_id = body["data"]["bookId"].as_str().unwrap().to_string();
    assert!(!book_id.is_empty());

    let (status, body) = call(&app, "GET", &format!("/books/{book_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["book"]["finished"], true);
    assert_eq!(body["data"]["book"]["publisher"], "Dicoding Indonesia");

    let (status, _) = call(
        &app,
        "POST",
        "/books",
        Some(json!({"name": "X", "pageCount": 100, "readPage": 200})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = call(&app, "GET", "/books", None).await;
    assert_eq!(body["data"]["books"].as_array().unwrap().len(), 1);

    let (status, _) = call(
        &app,
        "PUT",
        "/books/does-not-exist",
        Some(json!({"name": "Y", "pageCount": 1, "readPage": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, "DELETE", &format!("/books/{book_id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(&app, "GET", &format!("/books/{book_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "fail");
}

#[tokio::test]
async fn list_filters_over_http() {
    let app = app().await;
    for (name, reading, read_page) in [
        ("War and Peace", true, 10),
        ("Dune", false, 80),
        ("Warbreaker", false, 5),
    ] {
        let (status, _) = call(
            &app,
            "POST",
            "/books",
            Some(json!({
                "name": name,
                "publisher": "Shelf",
                "pageCount": 80,
                "readPage": read_page,
                "reading": reading
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let names = |body: &Value| -> Vec<String> {
        body["data"]["books"]
            .as_array()
            .unwrap()
            .iter()
            .map(|book| book["name"].as_str().unwrap().to_string())
            .collect()
    };

    let (_, body) = call(&app, "GET", "/books?name=war", None).await;
    assert_eq!(names(&body), vec!["War and Peace", "Warbreaker"]);

    let (_, body) = call(&app, "GET", "/books?reading=1", None).await;
    assert_eq!(names(&body), vec!["War and Peace"]);

    let (_, body) = call(&app, "GET", "/books?finished=1", None).await;
    assert_eq!(names(&body), vec!["Dune"]);

    let (_, body) = call(&app, "GET", "/books?name=war&finished=0&reading=anything", None).await;
    assert_eq!(names(&body), vec!["Warbreaker"]);
}

#[tokio::test]
async fn update_keeps_identity_over_http() {
    let app = app().await;
    let (_, body) = call(
        &app,
        "POST",
        "/books",
        Some(json!({"name": "Draft", "pageCount": 50, "readPage": 1, "reading": true})),
    )
    .await;
    let uri = format!("/books/{}", body["data"]["bookId"].as_str().unwrap());
    let (_, before) = call(&app, "GET", &uri, None).await;

    let (status, _) = call(
        &app,
        "PUT",
        &uri,
        Some(json!({
            "name": "Final",
            "year": 2022,
            "author": "Jane",
            "summary": "Done",
            "publisher": "House",
            "pageCount": 60,
            "readPage": 60,
            "reading": false
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, after) = call(&app, "GET", &uri, None).await;
    let (before, after) = (&before["data"]["book"], &after["data"]["book"]);
    assert_eq!(after["id"], before["id"]);
    assert_eq!(after["insertedAt"], before["insertedAt"]);
    assert_eq!(after["name"], "Final");
    assert_eq!(after["author"], "Jane");
    assert_eq!(after["pageCount"], 60);
    assert_eq!(after["finished"], true);
    assert_eq!(after["reading"], false);
}

#[tokio::test]
async fn ambient_routes_and_headers() {
    let app = app().await;

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let (status, document) = call(&app, "GET", "/docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(document["paths"]["/books"]["post"].is_object());
    assert!(document["paths"]["/books/{bookId}"]["delete"].is_object());
}

#[tokio::test]
async fn base_path_prefixes_module_routes() {
    let mut settings = Settings::default();
    settings.server.base_path = "/api".to_string();
    let app = app_with(settings).await;

    let (status, body) = call(&app, "GET", "/api/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "success", "data": {"books": []}}));

    let (status, _) = call(&app, "GET", "/books", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
