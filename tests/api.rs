// tests/api.rs
// DOCUMENTATION: HTTP-level tests against the full route table
// PURPOSE: Envelopes and status codes; store-backed flows run only when
// TEST_DATABASE_URL points at a disposable PostgreSQL database

use actix_web::{http::StatusCode, test, web, App};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use sqlx::postgres::{PgPool, PgPoolOptions};
use taxfarm_api::config::db::run_migrations;
use taxfarm_api::handlers;

const WALLET: &str = "0xAbC0000000000000000000000000000000000DeF";

/// Pool that never connects; requests rejected before the store stay testable
fn unreachable_pool() -> PgPool {
    PgPoolOptions::new()
        .connect_lazy("postgres://taxfarm@127.0.0.1:1/unused")
        .unwrap()
}

macro_rules! app {
    ($pool:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($pool))
                .configure(handlers::configure)
                .default_service(web::route().to(handlers::not_found)),
        )
        .await
    };
}

#[actix_web::test]
async fn test_health_check() {
    let app = app!(unreachable_pool());
    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "OK");
    assert_eq!(body["service"], "taxfarm-api");
    assert!(body["timestamp"].is_string());
}

#[actix_web::test]
async fn test_index_lists_endpoints() {
    let app = app!(unreachable_pool());
    let req = test::TestRequest::get().uri("/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["endpoints"]["crops"], "/api/crops");
}

#[actix_web::test]
async fn test_unknown_route_returns_404_envelope() {
    let app = app!(unreachable_pool());
    let req = test::TestRequest::get().uri("/api/tractors").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "success": false, "message": "Route not found" }));
}

#[actix_web::test]
async fn test_invalid_crop_status_is_400() {
    let app = app!(unreachable_pool());
    let req = test::TestRequest::put()
        .uri("/api/crops/SPOTATO/status")
        .set_json(json!({ "status": "Harvesting" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(
        body["error"],
        "Valid status is required (Active, Coming Soon, Completed, Paused)"
    );
}

#[actix_web::test]
async fn test_crop_field_rules_checked_before_store() {
    let app = app!(unreachable_pool());
    let req = test::TestRequest::post()
        .uri("/api/crops")
        .set_json(json!({
            "name": "$BEET",
            "symbol": "sbeet",
            "crop": "Sugar Beets",
            "image": "/assets/beet.jpg",
            "landArea": "40 acres",
            "yieldSeason": "Oct 2024",
            "tvl": "TBD",
            "apy": "9%",
            "yieldLogic": "short",
            "bgColor": "bg-peach",
            "statusColor": "bg-yellow-500"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_malformed_json_body_is_400() {
    let app = app!(unreachable_pool());
    let req = test::TestRequest::post()
        .uri("/api/crops")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"name\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn test_balance_required() {
    let app = app!(unreachable_pool());
    let req = test::TestRequest::put()
        .uri(&format!("/api/users/{}/balance", WALLET))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Validation error: Balance is required");
    assert_eq!(body["error"], "Balance is required");
}

#[actix_web::test]
async fn test_auth_requires_wallet_address() {
    let app = app!(unreachable_pool());

    let req = test::TestRequest::post()
        .uri("/api/users/auth")
        .set_json(json!({ "chainId": 1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/users/auth")
        .set_json(json!({ "walletAddress": "0x1234" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_malformed_gallery_path_params_are_400() {
    let app = app!(unreachable_pool());

    let req = test::TestRequest::get().uri("/api/gallery/not-a-uuid").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get().uri("/api/gallery/plot/abc").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/gallery/filter?plotId=three")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

async fn test_pool() -> Option<PgPool> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("TEST_DATABASE_URL is not reachable");
    run_migrations(&pool).await.unwrap();
    sqlx::query("TRUNCATE crops, gallery_images, users")
        .execute(&pool)
        .await
        .unwrap();
    Some(pool)
}

fn is_sorted_by_count_desc(buckets: &Value) -> bool {
    let counts: Vec<i64> = buckets
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["count"].as_i64().unwrap())
        .collect();
    counts.windows(2).all(|pair| pair[0] >= pair[1])
}

fn strings(values: &Value) -> Vec<String> {
    values
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}

/// One sequential scenario so the shared tables are never raced
#[actix_web::test]
async fn test_store_backed_flows() {
    let Some(pool) = test_pool().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping store-backed flows");
        return;
    };
    let app = app!(pool);
    let mixed_case_wallet = WALLET.to_uppercase().replace("0X", "0x");

    // Crops: seeding only fills an empty collection
    let req = test::TestRequest::post().uri("/api/crops/seed").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["count"], 4);

    let req = test::TestRequest::post().uri("/api/crops/seed").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get().uri("/api/crops").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 4);

    let req = test::TestRequest::get().uri("/api/crops/spotato").to_request();
    let lower: Value = test::call_and_read_body_json(&app, req).await;
    let req = test::TestRequest::get().uri("/api/crops/SPOTATO").to_request();
    let upper: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(lower["data"]["symbol"], "SPOTATO");
    assert_eq!(lower["data"]["id"], upper["data"]["id"]);
    assert_eq!(lower["data"]["isActive"], true);

    let req = test::TestRequest::post()
        .uri("/api/crops")
        .set_json(json!({
            "name": "$POTATO",
            "symbol": "SPOTATO2",
            "crop": "More Potatoes",
            "image": "/assets/potato-crop.jpg",
            "landArea": "10 acres",
            "yieldSeason": "Sep 2025",
            "tvl": "TBD",
            "apy": "5%",
            "yieldLogic": "Harvest revenue shared with holders",
            "bgColor": "bg-bright-green",
            "statusColor": "bg-green-500"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Crop with this name or symbol already exists");

    let req = test::TestRequest::put()
        .uri("/api/crops/scorn/status")
        .set_json(json!({ "status": "Active" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["status"], "Active");
    assert_eq!(body["data"]["isActive"], true);

    let req = test::TestRequest::get().uri("/api/crops/active").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 3);

    // A client-supplied isActive never wins over the status
    let req = test::TestRequest::put()
        .uri("/api/crops/swheat")
        .set_json(json!({ "status": "Paused", "isActive": true }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "Paused");
    assert_eq!(body["data"]["isActive"], false);
    assert_eq!(body["data"]["name"], "$WHEAT");

    let req = test::TestRequest::delete().uri("/api/crops/swheat").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::delete().uri("/api/crops/SWHEAT").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Crop not found");

    let req = test::TestRequest::get().uri("/api/crops").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 3);

    // Gallery: seed, then stats and options over the six launch photos
    let req = test::TestRequest::post().uri("/api/gallery/seed").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get().uri("/api/gallery/stats").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let stats = &body["data"];
    assert_eq!(stats["totalImages"], 6);
    assert_eq!(stats["breakdown"]["byRegion"][0], json!({ "_id": "Midwest", "count": 3 }));
    for group in ["byStatus", "byRegion", "byLabel"] {
        assert!(is_sorted_by_count_desc(&stats["breakdown"][group]), "{} unsorted", group);
    }
    let recent = stats["recentImages"].as_array().unwrap();
    assert_eq!(recent.len(), 5);
    assert_eq!(recent[0]["plotName"], "Golden Plains");

    let req = test::TestRequest::get().uri("/api/gallery/options").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        strings(&body["data"]["crops"]),
        vec!["Avocados", "Corn", "Potatoes", "Soybeans", "Wheat"]
    );
    assert_eq!(
        strings(&body["data"]["regions"]),
        vec!["Midwest", "Northwest", "Southeast", "Southwest"]
    );
    assert_eq!(
        strings(&body["data"]["statuses"]),
        vec!["Acquired", "Cultivation", "Harvested", "Planned", "Maintenance"]
    );

    // Soft delete hides from listings only
    let req = test::TestRequest::get().uri("/api/gallery").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 6);
    let newest = body["data"][0]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"][0]["plotName"], "Golden Plains");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/gallery/{}", newest))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/gallery").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 5);

    let req = test::TestRequest::get()
        .uri("/api/gallery/filter?crop=CORN&region=all")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 1);
    assert_ne!(body["data"][0]["id"], newest.as_str());

    let req = test::TestRequest::get()
        .uri(&format!("/api/gallery/{}", newest))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["isActive"], false);

    // Plot listing, update and hard delete of an extra, older photo on plot 1
    let req = test::TestRequest::post()
        .uri("/api/gallery")
        .set_json(json!({
            "plotName": "Green Valley Farm",
            "plotId": 1,
            "status": "Acquired",
            "crop": "Potatoes",
            "region": "Midwest",
            "label": "Before",
            "caption": "Green Valley Farm on the day the plot was acquired.",
            "date": "2024-01-05",
            "image": "/assets/gallery/before-3.jpg"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let extra = body["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get().uri("/api/gallery/plot/1").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["plotId"], 1);
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["label"], "Drone");
    assert_eq!(body["data"][1]["id"], extra.as_str());

    let req = test::TestRequest::put()
        .uri(&format!("/api/gallery/{}", extra))
        .set_json(json!({ "status": "Cultivation", "caption": "Green Valley Farm after the first planting." }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "Cultivation");
    assert_eq!(body["data"]["statusColor"], "bg-green-500 text-white");
    assert_eq!(body["data"]["caption"], "Green Valley Farm after the first planting.");
    assert_eq!(body["data"]["plotName"], "Green Valley Farm");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/gallery/{}/hard", extra))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/gallery/{}", extra))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Users: authenticate-or-create keyed on the lowercase address
    let req = test::TestRequest::post()
        .uri("/api/users/auth")
        .set_json(json!({ "walletAddress": WALLET }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let first: Value = test::read_body_json(resp).await;
    assert_eq!(first["user"]["isNewUser"], true);
    assert_eq!(first["user"]["walletAddress"], WALLET.to_lowercase());
    assert_eq!(first["user"]["chainId"], 1);
    assert_eq!(first["user"]["balance"], "0");

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    let req = test::TestRequest::post()
        .uri("/api/users/auth")
        .set_json(json!({ "walletAddress": mixed_case_wallet, "balance": "12.5" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let second: Value = test::read_body_json(resp).await;
    assert_eq!(second["user"]["isNewUser"], false);
    assert_eq!(second["user"]["id"], first["user"]["id"]);
    assert_eq!(second["user"]["balance"], "12.5");

    let login = |v: &Value| {
        v["user"]["lastLogin"]
            .as_str()
            .unwrap()
            .parse::<DateTime<Utc>>()
            .unwrap()
    };
    assert!(login(&second) > login(&first));

    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}", mixed_case_wallet))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["user"]["balance"], "12.5");

    let req = test::TestRequest::put()
        .uri(&format!("/api/users/{}", mixed_case_wallet))
        .set_json(json!({ "chainId": 137, "isActive": false }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["chainId"], 137);
    assert_eq!(body["user"]["isActive"], false);
    assert_eq!(body["user"]["balance"], "12.5");
    assert!(body["user"].get("isNewUser").is_none());

    let req = test::TestRequest::delete()
        .uri(&format!("/api/users/{}", WALLET))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}", WALLET))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "User not found");
}
