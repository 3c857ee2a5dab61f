use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use shopdesk::config::Config;
use tower::ServiceExt;

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.general.max_db_connections = 1;
    config.general.min_db_connections = 1;

    let state = shopdesk::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    shopdesk::api::router(state)
}

async fn send_json(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }

    let response = app
        .clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn get(app: &Router, uri: &str, token: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .header("Authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn register_and_login(app: &Router) -> String {
    let (_, _) = send_json(
        app,
        "POST",
        "/api/users/register",
        None,
        json!({
            "name": "Asha",
            "gmail": "asha@example.com",
            "password": "super-secret-1",
            "mobile_no": "9000000001",
            "whatsapp_no": "9000000001",
            "user_type": "customer",
            "address_city": "Hyderabad",
            "address_state": "Telangana",
        }),
    )
    .await;

    let (_, body) = send_json(
        app,
        "POST",
        "/api/auth/login",
        None,
        json!({ "userid": "asha@example.com", "password": "super-secret-1" }),
    )
    .await;
    body["data"]["token"].as_str().unwrap().to_string()
}

async fn create_business(app: &Router, token: &str, body: Value) -> String {
    let (status, body) = send_json(app, "POST", "/api/businesses", Some(token), body).await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["business_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn search_matches_are_case_insensitive() {
    let app = spawn_app().await;
    let token = register_and_login(&app).await;

    create_business(
        &app,
        &token,
        json!({
            "client_name": "The Cafe Shop",
            "shop_name": "Cafe Corner",
            "domain_name": "cafe.example",
            "shop_desc": "Coffee and snacks",
            "shop_locations": ["CAFE ROAD"],
            "addresses": [],
        }),
    )
    .await;

    let (status, body) = get(&app, "/api/search?queryString=cafe", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], json!(1));

    let (_, body) = get(&app, "/api/search?location=cafe%20road", &token).await;
    assert_eq!(body["data"]["total"], json!(1));

    let (_, body) = get(&app, "/api/search?queryString=CAFE", &token).await;
    assert_eq!(body["data"]["total"], json!(1));

    let (_, body) = get(&app, "/api/search?queryString=bakery", &token).await;
    assert_eq!(body["data"]["total"], json!(0));
}

#[tokio::test]
async fn location_matches_structured_address_fields() {
    let app = spawn_app().await;
    let token = register_and_login(&app).await;

    create_business(
        &app,
        &token,
        json!({
            "client_name": "Glow Spa",
            "shop_name": "Glow",
            "domain_name": "glow.example",
            "shop_desc": "Wellness studio",
            "shop_locations": [],
            "addresses": [{
                "street": "Park Road",
                "city": "Hyderabad",
                "district": "Rangareddy",
                "state": "Telangana",
                "pincode": "500081",
            }],
        }),
    )
    .await;

    for location in ["park", "hyderabad", "rangareddy", "telangana", "500081"] {
        let (_, body) = get(&app, &format!("/api/search?location={location}"), &token).await;
        assert_eq!(body["data"]["total"], json!(1), "location filter: {location}");
    }

    let (_, body) = get(&app, "/api/search?location=mumbai", &token).await;
    assert_eq!(body["data"]["total"], json!(0));
}

#[tokio::test]
async fn filters_combine_with_logical_and() {
    let app = spawn_app().await;
    let token = register_and_login(&app).await;

    create_business(
        &app,
        &token,
        json!({
            "client_name": "Glow Spa",
            "shop_name": "Glow",
            "domain_name": "glow-spa.example",
            "shop_desc": "Wellness",
            "shop_locations": ["Madhapur"],
            "addresses": [],
        }),
    )
    .await;
    create_business(
        &app,
        &token,
        json!({
            "client_name": "Glow Mart",
            "shop_name": "Glow Mart",
            "domain_name": "glow-mart.example",
            "shop_desc": "Retail",
            "shop_locations": ["Kukatpally"],
            "addresses": [],
        }),
    )
    .await;

    let (_, body) = get(&app, "/api/search?queryString=glow", &token).await;
    assert_eq!(body["data"]["total"], json!(2));

    let (_, body) = get(
        &app,
        "/api/search?queryString=glow&location=madhapur",
        &token,
    )
    .await;
    assert_eq!(body["data"]["total"], json!(1));
    assert_eq!(body["data"]["data"][0]["client_name"], json!("Glow Spa"));
}

#[tokio::test]
async fn empty_filters_return_the_unfiltered_listing() {
    let app = spawn_app().await;
    let token = register_and_login(&app).await;

    for i in 0..3 {
        create_business(
            &app,
            &token,
            json!({
                "client_name": format!("Shop {i}"),
                "shop_name": format!("Shop {i}"),
                "domain_name": format!("shop{i}.example"),
                "shop_desc": "",
                "shop_locations": [],
                "addresses": [],
            }),
        )
        .await;
    }

    let (status, body) = get(&app, "/api/search", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], json!(3));
    assert_eq!(body["data"]["page"], json!(1));
    assert_eq!(body["data"]["limit"], json!(10));
}

#[tokio::test]
async fn pagination_returns_the_requested_slice_and_full_total() {
    let app = spawn_app().await;
    let token = register_and_login(&app).await;

    for i in 1..=25 {
        create_business(
            &app,
            &token,
            json!({
                "client_name": format!("Bulkmart {i:02}"),
                "shop_name": "Bulkmart",
                "domain_name": format!("bulkmart{i:02}.example"),
                "shop_desc": "wholesale goods",
                "shop_locations": [],
                "addresses": [],
            }),
        )
        .await;
    }

    let (status, body) = get(
        &app,
        "/api/search?queryString=bulkmart&page=2&limit=10",
        &token,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], json!(25));
    assert_eq!(body["data"]["page"], json!(2));
    assert_eq!(body["data"]["limit"], json!(10));

    let names: Vec<&str> = body["data"]["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["client_name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 10);
    // Rows are ordered by client name, so page 2 holds rows 11-20.
    assert_eq!(names.first(), Some(&"Bulkmart 11"));
    assert_eq!(names.last(), Some(&"Bulkmart 20"));
}

#[tokio::test]
async fn page_below_one_is_clamped_to_the_first_page() {
    let app = spawn_app().await;
    let token = register_and_login(&app).await;

    create_business(
        &app,
        &token,
        json!({
            "client_name": "Solo Shop",
            "shop_name": "Solo",
            "domain_name": "solo.example",
            "shop_desc": "",
            "shop_locations": [],
            "addresses": [],
        }),
    )
    .await;

    let (status, body) = get(&app, "/api/search?page=0", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["page"], json!(1));
    assert_eq!(body["data"]["total"], json!(1));
}

#[tokio::test]
async fn identical_searches_hit_the_cache_until_reset() {
    let app = spawn_app().await;
    let token = register_and_login(&app).await;

    let business_id = create_business(
        &app,
        &token,
        json!({
            "client_name": "Zeta Salon",
            "shop_name": "Zeta",
            "domain_name": "zeta.example",
            "shop_desc": "",
            "shop_locations": [],
            "addresses": [],
        }),
    )
    .await;

    let (_, first) = get(&app, "/api/search?queryString=zeta", &token).await;
    assert_eq!(first["data"]["total"], json!(1));

    // Mutate the read model behind the cache's back.
    let (status, _) = send_json(
        &app,
        "DELETE",
        &format!("/api/businesses/{business_id}"),
        Some(&token),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Identical filters are served from the cache: byte-identical page,
    // no data query.
    let (_, second) = get(&app, "/api/search?queryString=zeta", &token).await;
    assert_eq!(second, first);

    let (status, _) = send_json(&app, "POST", "/api/search/cache/clear", Some(&token), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);

    // After the reset the next identical search re-queries the store.
    let (_, third) = get(&app, "/api/search?queryString=zeta", &token).await;
    assert_eq!(third["data"]["total"], json!(0));
}

#[tokio::test]
async fn searches_are_recorded_in_history() {
    let app = spawn_app().await;
    let token = register_and_login(&app).await;

    let (_, _) = get(&app, "/api/search?queryString=cafe&location=park", &token).await;
    let (_, _) = get(&app, "/api/search?queryString=salon", &token).await;

    let (status, body) = get(&app, "/api/search/history", &token).await;
    assert_eq!(status, StatusCode::OK);

    let entries = body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    // Most recent first.
    assert_eq!(entries[0]["query"], json!("salon"));
    assert_eq!(entries[1]["query"], json!("cafe"));
    assert_eq!(entries[1]["location"], json!("park"));
}
