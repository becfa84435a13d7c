//! Integration tests for revu-server API endpoints
//!
//! Each test runs the full router against a fresh SQLite database in a
//! temporary folder, driven through `tower::ServiceExt::oneshot`.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use revu_server::db::{self, users};
use revu_server::{build_router, AppState};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot` method

const ADMIN_EMAIL: &str = "admin@example.com";
const ADMIN_PASSWORD: &str = "admin12345";

/// Test harness: router plus the folder holding its database
struct TestApp {
    _dir: TempDir,
    app: Router,
}

impl TestApp {
    async fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let pool = db::init_database_pool(&dir.path().join("revu.db"))
            .await
            .expect("Should create test database");
        users::upsert_admin(&pool, ADMIN_EMAIL, ADMIN_PASSWORD)
            .await
            .unwrap();
        Self {
            _dir: dir,
            app: setup_app(pool),
        }
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.app.clone().oneshot(request).await.unwrap()
    }

    async fn login(&self) -> String {
        let response = self
            .send(json_request(
                "POST",
                "/api/admin/login",
                None,
                json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = extract_json(response.into_body()).await;
        body["token"].as_str().unwrap().to_string()
    }

    /// Create a product and return its id
    async fn create_product(&self, token: &str, payload: Value) -> String {
        let response = self
            .send(json_request("POST", "/api/admin/products", Some(token), payload))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["ok"], true);
        body["id"].as_str().unwrap().to_string()
    }

    /// Option ids of the public review form, grouped by category
    async fn form_option_ids(&self, slug: &str) -> Vec<Vec<String>> {
        let response = self
            .send(test_request("GET", &format!("/api/products/{}", slug), None))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = extract_json(response.into_body()).await;
        body["categories"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| {
                c["options"]
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|o| o["id"].as_str().unwrap().to_string())
                    .collect()
            })
            .collect()
    }

    async fn submit_review(&self, product_id: &str, rating: u8, option_ids: &[&String]) -> Response {
        self.send(json_request(
            "POST",
            "/api/reviews",
            None,
            json!({
                "productId": product_id,
                "starRating": rating,
                "selectedOptionIds": option_ids,
            }),
        ))
        .await
    }
}

fn setup_app(db: SqlitePool) -> Router {
    build_router(AppState::new(db, 12))
}

fn test_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

async fn extract_text(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    String::from_utf8(bytes.to_vec()).expect("Should be UTF-8")
}

fn beignets_payload() -> Value {
    json!({
        "name": "Beignets",
        "slug": "beignets",
        "description": "Classic beignets",
        "category": "BEIGNETS",
        "categories": [{
            "name": "Quality Indicators",
            "displayOrder": 0,
            "options": [
                { "label": "A", "displayOrder": 0 },
                { "label": "B", "displayOrder": 1 },
                { "label": "C", "displayOrder": 2 }
            ]
        }]
    })
}

fn juice_payload(slug: &str) -> Value {
    json!({
        "name": "Orange Juice",
        "slug": slug,
        "description": "Fresh squeezed",
        "image": "https://cdn.example.com/oj.png",
        "category": "JUICES",
        "isActive": true,
        "categories": [
            {
                "name": "Value for Money",
                "displayOrder": 1,
                "options": [{ "label": "Fair price", "displayOrder": 0 }]
            },
            {
                "name": "Taste & Flavour",
                "displayOrder": 0,
                "options": [
                    { "label": "Sweet", "displayOrder": 1 },
                    { "label": "Fresh", "displayOrder": 0 }
                ]
            }
        ]
    })
}

// =============================================================================
// Health and authentication
// =============================================================================

#[tokio::test]
async fn test_health_endpoint_no_auth_required() {
    let t = TestApp::new().await;

    let response = t.send(test_request("GET", "/health", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "revu-server");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_admin_routes_require_session() {
    let t = TestApp::new().await;

    let response = t.send(test_request("GET", "/api/admin/products", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Unauthorized");

    let response = t
        .send(test_request("GET", "/api/admin/products", Some("not-a-token")))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let t = TestApp::new().await;

    for (email, password) in [(ADMIN_EMAIL, "wrong"), ("nobody@example.com", ADMIN_PASSWORD)] {
        let response = t
            .send(json_request(
                "POST",
                "/api/admin/login",
                None,
                json!({ "email": email, "password": password }),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["error"], "Invalid credentials");
    }
}

#[tokio::test]
async fn test_login_then_logout_revokes_token() {
    let t = TestApp::new().await;
    let token = t.login().await;

    let response = t
        .send(test_request("GET", "/api/admin/products", Some(&token)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = t
        .send(test_request("POST", "/api/admin/logout", Some(&token)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = t
        .send(test_request("GET", "/api/admin/products", Some(&token)))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Product management
// =============================================================================

#[tokio::test]
async fn test_create_product_and_read_back_ordered_tree() {
    let t = TestApp::new().await;
    let token = t.login().await;
    let id = t.create_product(&token, juice_payload("orange-juice")).await;

    let response = t
        .send(test_request("GET", &format!("/api/admin/products/{}", id), Some(&token)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;

    assert_eq!(body["slug"], "orange-juice");
    assert_eq!(body["isActive"], true);
    assert_eq!(body["reviewCount"], 0);
    assert_eq!(body["structureLocked"], false);
    assert_eq!(body["categories"][0]["name"], "Taste & Flavour");
    assert_eq!(body["categories"][0]["options"][0]["label"], "Fresh");
    assert_eq!(body["categories"][0]["options"][1]["label"], "Sweet");
    assert_eq!(body["categories"][1]["name"], "Value for Money");
}

#[tokio::test]
async fn test_duplicate_slug_conflicts() {
    let t = TestApp::new().await;
    let token = t.login().await;
    t.create_product(&token, juice_payload("orange-juice")).await;

    let response = t
        .send(json_request(
            "POST",
            "/api/admin/products",
            Some(&token),
            juice_payload("orange-juice"),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Slug already exists");
}

#[tokio::test]
async fn test_invalid_product_reports_all_issues() {
    let t = TestApp::new().await;
    let token = t.login().await;

    let response = t
        .send(json_request(
            "POST",
            "/api/admin/products",
            Some(&token),
            json!({
                "name": "",
                "slug": "ok-slug",
                "description": "d",
                "category": "X",
                "categories": [{ "name": "Taste", "displayOrder": -1, "options": [] }]
            }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Invalid payload");
    assert_eq!(body["issues"]["name"][0], "Product name is required");
    assert!(body["issues"]["categories.0.displayOrder"].is_array());
    assert_eq!(
        body["issues"]["categories.0.options"][0],
        "At least one option is required"
    );
}

#[tokio::test]
async fn test_non_json_body_is_bad_request() {
    let t = TestApp::new().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/reviews")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = t.send(request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_update_with_mismatched_id_rejected() {
    let t = TestApp::new().await;
    let token = t.login().await;
    let id = t.create_product(&token, juice_payload("orange-juice")).await;

    let mut payload = juice_payload("orange-juice");
    payload["id"] = json!("some-other-id");

    let response = t
        .send(json_request(
            "PUT",
            &format!("/api/admin/products/{}", id),
            Some(&token),
            payload,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Mismatched product id");
}

#[tokio::test]
async fn test_update_missing_product_not_found() {
    let t = TestApp::new().await;
    let token = t.login().await;

    let mut payload = juice_payload("orange-juice");
    payload["id"] = json!("missing");

    let response = t
        .send(json_request("PUT", "/api/admin/products/missing", Some(&token), payload))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_without_reviews_replaces_structure() {
    let t = TestApp::new().await;
    let token = t.login().await;
    let id = t.create_product(&token, beignets_payload()).await;

    let mut payload = beignets_payload();
    payload["id"] = json!(id);
    payload["categories"] = json!([{
        "name": "Texture",
        "displayOrder": 0,
        "options": [{ "label": "Airy", "displayOrder": 0 }]
    }]);

    let response = t
        .send(json_request(
            "PUT",
            &format!("/api/admin/products/{}", id),
            Some(&token),
            payload,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["ok"], true);
    assert!(body.get("warning").is_none());

    let options = t.form_option_ids("beignets").await;
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].len(), 1);
}

#[tokio::test]
async fn test_update_after_review_keeps_structure_with_warning() {
    let t = TestApp::new().await;
    let token = t.login().await;
    let id = t.create_product(&token, beignets_payload()).await;
    let options = t.form_option_ids("beignets").await;

    let response = t.submit_review(&id, 4, &[&options[0][0]]).await;
    assert_eq!(response.status(), StatusCode::OK);

    let mut payload = beignets_payload();
    payload["id"] = json!(id);
    payload["name"] = json!("Beignets Deluxe");
    payload["categories"] = json!([{
        "name": "Texture",
        "displayOrder": 0,
        "options": [{ "label": "Airy", "displayOrder": 0 }]
    }]);

    let response = t
        .send(json_request(
            "PUT",
            &format!("/api/admin/products/{}", id),
            Some(&token),
            payload,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["ok"], true);
    assert_eq!(
        body["warning"],
        "Product details updated. Categories/options were kept because reviews already exist."
    );

    let response = t
        .send(test_request("GET", &format!("/api/admin/products/{}", id), Some(&token)))
        .await;
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["name"], "Beignets Deluxe");
    assert_eq!(body["structureLocked"], true);
    assert_eq!(body["categories"][0]["name"], "Quality Indicators");
    assert_eq!(body["categories"][0]["options"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_toggle_hides_product_from_public() {
    let t = TestApp::new().await;
    let token = t.login().await;
    let id = t.create_product(&token, beignets_payload()).await;
    let options = t.form_option_ids("beignets").await;

    let response = t
        .send(json_request(
            "PATCH",
            &format!("/api/admin/products/{}/toggle", id),
            Some(&token),
            json!({ "isActive": false }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = t.send(test_request("GET", "/api/products/beignets", None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Product not available");

    let response = t.submit_review(&id, 5, &[&options[0][0]]).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = t.send(test_request("GET", "/api/products", None)).await;
    let body = extract_json(response.into_body()).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_toggle_missing_product_not_found() {
    let t = TestApp::new().await;
    let token = t.login().await;

    let response = t
        .send(json_request(
            "PATCH",
            "/api/admin/products/missing/toggle",
            Some(&token),
            json!({ "isActive": true }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Review submission
// =============================================================================

#[tokio::test]
async fn test_beignets_scenario() {
    let t = TestApp::new().await;
    let token = t.login().await;
    let id = t.create_product(&token, beignets_payload()).await;
    let options = t.form_option_ids("beignets").await;
    let (a, c) = (&options[0][0], &options[0][2]);

    // [A, C] with rating 5 succeeds
    let response = t.submit_review(&id, 5, &[a, c]).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["ok"], true);
    assert!(body["reviewId"].is_string());

    // empty selection is rejected by schema validation
    let response = t.submit_review(&id, 5, &[]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Invalid payload");
    assert_eq!(body["issues"]["selectedOptionIds"][0], "Select at least one option");

    // unknown option id
    let unknown = "not-an-option".to_string();
    let response = t.submit_review(&id, 5, &[a, &unknown]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Invalid options selected");
}

#[tokio::test]
async fn test_review_must_cover_every_category() {
    let t = TestApp::new().await;
    let token = t.login().await;
    let id = t.create_product(&token, juice_payload("orange-juice")).await;
    let options = t.form_option_ids("orange-juice").await;

    // only "Taste & Flavour" covered
    let response = t.submit_review(&id, 3, &[&options[0][0]]).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Select at least one option for Value for Money");
}

#[tokio::test]
async fn test_option_from_other_product_rejected() {
    let t = TestApp::new().await;
    let token = t.login().await;
    let beignets = t.create_product(&token, beignets_payload()).await;
    t.create_product(&token, juice_payload("orange-juice")).await;
    let beignet_options = t.form_option_ids("beignets").await;
    let juice_options = t.form_option_ids("orange-juice").await;

    let response = t
        .submit_review(&beignets, 4, &[&beignet_options[0][0], &juice_options[0][0]])
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Invalid options selected");
}

#[tokio::test]
async fn test_invalid_review_payload_lists_issues() {
    let t = TestApp::new().await;

    let response = t
        .send(json_request(
            "POST",
            "/api/reviews",
            None,
            json!({ "productId": "", "starRating": 7, "selectedOptionIds": [""] }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["issues"]["productId"][0], "Product is required");
    assert_eq!(body["issues"]["starRating"][0], "Star rating must be between 1 and 5");
    assert_eq!(body["issues"]["selectedOptionIds.0"][0], "Option id must not be empty");
}

// =============================================================================
// Results and export
// =============================================================================

#[tokio::test]
async fn test_results_aggregate_reviews() {
    let t = TestApp::new().await;
    let token = t.login().await;
    let id = t.create_product(&token, beignets_payload()).await;
    let options = t.form_option_ids("beignets").await;
    let (a, b, c) = (&options[0][0], &options[0][1], &options[0][2]);

    for (rating, picks) in [(5, vec![a, c]), (3, vec![a]), (4, vec![a, b])] {
        let response = t.submit_review(&id, rating, &picks).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = t
        .send(test_request(
            "GET",
            &format!("/api/admin/products/{}/results", id),
            Some(&token),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;

    assert_eq!(body["product"]["slug"], "beignets");
    assert_eq!(body["reviewCount"], 3);
    assert_eq!(body["averageRating"], 4.0);

    let tally = &body["categories"][0];
    assert_eq!(tally["totalSelections"], 5);
    assert_eq!(tally["options"][0]["count"], 3);
    assert_eq!(tally["options"][0]["percentage"], 60);
    assert_eq!(tally["options"][1]["percentage"], 20);
    assert_eq!(tally["options"][2]["percentage"], 20);

    let reviews = body["reviews"].as_array().unwrap();
    assert_eq!(reviews.len(), 3);
    assert_eq!(reviews[0]["reviewerName"], "Anonymous");
    assert_eq!(reviews[0]["starRating"], 4);
    assert_eq!(reviews[0]["groups"][0]["category"], "Quality Indicators");
    assert_eq!(reviews[0]["groups"][0]["labels"], json!(["A", "B"]));
}

#[tokio::test]
async fn test_dashboard_lists_review_statistics() {
    let t = TestApp::new().await;
    let token = t.login().await;
    let id = t.create_product(&token, beignets_payload()).await;
    let options = t.form_option_ids("beignets").await;
    t.submit_review(&id, 5, &[&options[0][0]]).await;
    t.submit_review(&id, 4, &[&options[0][1]]).await;

    let response = t
        .send(test_request("GET", "/api/admin/products", Some(&token)))
        .await;
    let body = extract_json(response.into_body()).await;

    assert_eq!(body[0]["id"], id.as_str());
    assert_eq!(body[0]["reviewCount"], 2);
    assert_eq!(body[0]["averageRating"], 4.5);
}

#[tokio::test]
async fn test_summary_by_slug() {
    let t = TestApp::new().await;
    let token = t.login().await;
    let id = t.create_product(&token, beignets_payload()).await;
    let options = t.form_option_ids("beignets").await;
    t.submit_review(&id, 2, &[&options[0][2]]).await;

    let response = t
        .send(test_request("GET", "/api/admin/summaries/beignets", Some(&token)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["reviewCount"], 1);
    assert_eq!(body["categories"][0]["options"][2]["percentage"], 100);
    assert!(body.get("reviews").is_none());

    let response = t
        .send(test_request("GET", "/api/admin/summaries/unknown", Some(&token)))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_csv_export() {
    let t = TestApp::new().await;
    let token = t.login().await;
    let id = t.create_product(&token, beignets_payload()).await;
    let options = t.form_option_ids("beignets").await;

    let response = t
        .send(json_request(
            "POST",
            "/api/reviews",
            None,
            json!({
                "productId": id,
                "reviewerName": "Smith, J",
                "starRating": 5,
                "selectedOptionIds": [options[0][2], options[0][0]],
            }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = t
        .send(test_request(
            "GET",
            &format!("/api/admin/products/{}/export", id),
            Some(&token),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        format!("attachment; filename=product-{}-reviews.csv", id).as_str()
    );

    let csv = extract_text(response.into_body()).await;
    let lines: Vec<&str> = csv.split('\n').collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "reviewer name,star rating,selected options,date");
    // selections keep submission order
    assert!(lines[1].starts_with(
        "\"Smith, J\",5,Quality Indicators: C | Quality Indicators: A,"
    ));
}

#[tokio::test]
async fn test_csv_export_without_reviews_is_header_only() {
    let t = TestApp::new().await;
    let token = t.login().await;
    let id = t.create_product(&token, beignets_payload()).await;

    let response = t
        .send(test_request(
            "GET",
            &format!("/api/admin/products/{}/export", id),
            Some(&token),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let csv = extract_text(response.into_body()).await;
    assert_eq!(csv, "reviewer name,star rating,selected options,date");
}

// =============================================================================
// Public catalog
// =============================================================================

#[tokio::test]
async fn test_catalog_lists_active_products_newest_first() {
    let t = TestApp::new().await;
    let token = t.login().await;
    t.create_product(&token, beignets_payload()).await;
    t.create_product(&token, juice_payload("orange-juice")).await;

    let response = t.send(test_request("GET", "/api/products", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;

    let slugs: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["orange-juice", "beignets"]);
}

#[tokio::test]
async fn test_review_form_hides_selection_counts() {
    let t = TestApp::new().await;
    let token = t.login().await;
    t.create_product(&token, beignets_payload()).await;

    let response = t.send(test_request("GET", "/api/products/beignets", None)).await;
    let body = extract_json(response.into_body()).await;

    let option = &body["categories"][0]["options"][0];
    assert_eq!(option["label"], "A");
    assert!(option.get("selectionCount").is_none());
}
