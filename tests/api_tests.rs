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
    // A single pooled connection keeps the in-memory database alive and
    // shared across requests.
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
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn get(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }

    let response = app
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn register_payload(email: &str, mobile: &str) -> Value {
    json!({
        "name": "Asha",
        "gmail": email,
        "password": "super-secret-1",
        "mobile_no": mobile,
        "whatsapp_no": mobile,
        "user_type": "business",
        "address_city": "Hyderabad",
        "address_state": "Telangana",
    })
}

async fn register_and_login(app: &Router) -> String {
    let (status, _) = send_json(
        app,
        "POST",
        "/api/users/register",
        None,
        register_payload("asha@example.com", "9000000001"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send_json(
        app,
        "POST",
        "/api/auth/login",
        None,
        json!({ "userid": "asha@example.com", "password": "super-secret-1" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    body["data"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn protected_routes_require_a_bearer_token() {
    let app = spawn_app().await;

    let (status, _) = get(&app, "/api/businesses", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = get(&app, "/api/businesses", Some("not-a-real-token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_login_and_access_flow() {
    let app = spawn_app().await;
    let token = register_and_login(&app).await;

    // Duplicate registration conflicts on email/mobile within user type.
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/users/register",
        None,
        register_payload("asha@example.com", "9000000001"),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], json!(false));

    let (status, body) = get(&app, "/api/users", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert!(body["data"][0]["password_hash"].is_null());
}

#[tokio::test]
async fn login_by_mobile_number_also_works() {
    let app = spawn_app().await;
    let _ = register_and_login(&app).await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        None,
        json!({ "userid": "9000000001", "password": "super-secret-1" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["token"].is_string());
    assert!(body["data"]["rtoken"].is_string());
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let app = spawn_app().await;
    let _ = register_and_login(&app).await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        None,
        json!({ "userid": "asha@example.com", "password": "wrong" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_token_issues_new_access_token_until_logout() {
    let app = spawn_app().await;

    let (_, _) = send_json(
        &app,
        "POST",
        "/api/users/register",
        None,
        register_payload("ravi@example.com", "9000000002"),
    )
    .await;
    let (_, body) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        None,
        json!({ "userid": "ravi@example.com", "password": "super-secret-1" }),
    )
    .await;
    let token = body["data"]["token"].as_str().unwrap().to_string();
    let rtoken = body["data"]["rtoken"].as_str().unwrap().to_string();

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/auth/refresh",
        None,
        json!({ "refresh_token": rtoken }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["token"].is_string());

    let (status, _) = send_json(&app, "POST", "/api/auth/logout", Some(&token), json!({})).await;
    assert_eq!(status, StatusCode::OK);

    // The refresh token was revoked by logout.
    let (status, _) = send_json(
        &app,
        "POST",
        "/api/auth/refresh",
        None,
        json!({ "refresh_token": rtoken }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn business_crud_round_trip() {
    let app = spawn_app().await;
    let token = register_and_login(&app).await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/businesses",
        Some(&token),
        json!({
            "client_name": "Glow Spa",
            "shop_name": "Glow",
            "domain_name": "glow.example",
            "shop_desc": "Wellness studio",
            "shop_locations": ["Madhapur"],
            "addresses": [{ "street": "Park Road", "city": "Hyderabad", "state": "Telangana" }],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let business_id = body["data"]["business_id"].as_str().unwrap().to_string();

    let (status, body) = get(&app, &format!("/api/businesses/{business_id}"), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["client_name"], json!("Glow Spa"));
    assert_eq!(body["data"]["shop_locations"], json!(["Madhapur"]));

    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/businesses/{business_id}"),
        Some(&token),
        json!({ "shop_desc": "Wellness & beauty studio" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["shop_desc"], json!("Wellness & beauty studio"));

    let (status, _) = send_json(
        &app,
        "DELETE",
        &format!("/api/businesses/{business_id}"),
        Some(&token),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(&app, &format!("/api/businesses/{business_id}"), Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn order_crud_round_trip() {
    let app = spawn_app().await;
    let token = register_and_login(&app).await;
    let business_id = "biz-1";

    let (status, body) = send_json(
        &app,
        "POST",
        &format!("/api/bs/{business_id}/customers"),
        Some(&token),
        json!({ "name": "Kiran" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let cust_id = body["data"]["cust_id"].as_str().unwrap().to_string();

    // An order for an unknown customer is rejected.
    let (status, _) = send_json(
        &app,
        "POST",
        &format!("/api/bs/{business_id}/orders"),
        Some(&token),
        json!({ "custid": "nobody", "services": [], "products": [] }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send_json(
        &app,
        "POST",
        &format!("/api/bs/{business_id}/orders"),
        Some(&token),
        json!({
            "custid": cust_id,
            "services": [{ "name": "haircut", "cost": 100.0, "quantity": 2.0 }],
            "products": [{ "name": "shampoo", "cost": 50.0, "quantity": 1.0 }],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let oid = body["data"]["oid"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["services"][0]["name"], json!("haircut"));

    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/bs/{business_id}/orders/{oid}"),
        Some(&token),
        json!({ "services": [{ "name": "beard trim", "cost": 60.0, "quantity": 1.0 }] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["services"][0]["name"], json!("beard trim"));
    // Absent product list is left untouched.
    assert_eq!(body["data"]["products"][0]["name"], json!("shampoo"));

    let (status, body) = get(&app, &format!("/api/bs/{business_id}/orders"), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, _) = send_json(
        &app,
        "DELETE",
        &format!("/api/bs/{business_id}/orders/{oid}"),
        Some(&token),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(
        &app,
        &format!("/api/bs/{business_id}/orders/{oid}"),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn post_like_comment_and_archive_flow() {
    let app = spawn_app().await;
    let token = register_and_login(&app).await;
    let business_id = "biz-1";

    let (status, body) = send_json(
        &app,
        "POST",
        &format!("/api/bs/{business_id}/posts"),
        Some(&token),
        json!({ "title": "Grand opening", "content": "We are live!" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let post_id = body["data"]["post_id"].as_str().unwrap().to_string();

    let (status, body) = send_json(
        &app,
        "POST",
        &format!("/api/posts/{post_id}/like"),
        Some(&token),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["likes"], json!(1));

    // Liking twice does not double-count.
    let (_, body) = send_json(
        &app,
        "POST",
        &format!("/api/posts/{post_id}/like"),
        Some(&token),
        json!({}),
    )
    .await;
    assert_eq!(body["data"]["likes"], json!(1));

    let (_, body) = send_json(
        &app,
        "POST",
        &format!("/api/posts/{post_id}/comment"),
        Some(&token),
        json!({ "comment": "Congrats!" }),
    )
    .await;
    assert_eq!(body["data"]["comments"][0]["comment"], json!("Congrats!"));

    let (_, body) = send_json(
        &app,
        "POST",
        &format!("/api/posts/{post_id}/uncomment"),
        Some(&token),
        json!({}),
    )
    .await;
    assert_eq!(body["data"]["comments"].as_array().unwrap().len(), 0);

    let (_, body) = send_json(
        &app,
        "POST",
        &format!("/api/posts/{post_id}/unlike"),
        Some(&token),
        json!({}),
    )
    .await;
    assert_eq!(body["data"]["likes"], json!(0));

    let (status, _) = send_json(
        &app,
        "POST",
        &format!("/api/bs/{business_id}/posts/{post_id}/archive"),
        Some(&token),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(
        &app,
        &format!("/api/bs/{business_id}/posts/visible"),
        Some(&token),
    )
    .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    let (_, body) = get(&app, &format!("/api/bs/{business_id}/posts"), Some(&token)).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn catalog_crud_round_trip() {
    let app = spawn_app().await;
    let token = register_and_login(&app).await;
    let business_id = "biz-1";

    // Products require a name and a positive price.
    let (status, _) = send_json(
        &app,
        "POST",
        &format!("/api/bs/{business_id}/products"),
        Some(&token),
        json!({ "name": "", "price": 10.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send_json(
        &app,
        "POST",
        &format!("/api/bs/{business_id}/products"),
        Some(&token),
        json!({ "name": "Shampoo", "price": 120.0, "quantity": 10.0, "units": "bottle" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let pid = body["data"]["pid"].as_str().unwrap().to_string();

    let (status, _) = send_json(
        &app,
        "POST",
        &format!("/api/bs/{business_id}/products/{pid}/retire"),
        Some(&token),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(
        &app,
        &format!("/api/bs/{business_id}/products?live_only=true"),
        Some(&token),
    )
    .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    let (status, body) = send_json(
        &app,
        "POST",
        &format!("/api/bs/{business_id}/services"),
        Some(&token),
        json!({ "name": "Haircut", "description": "Classic cut", "price": 250.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let sid = body["data"]["sid"].as_str().unwrap().to_string();

    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/bs/{business_id}/services/{sid}"),
        Some(&token),
        json!({ "price": 300.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["cost"], json!(300.0));
}

#[tokio::test]
async fn system_status_reports_database_health() {
    let app = spawn_app().await;
    let token = register_and_login(&app).await;

    let (status, body) = get(&app, "/api/system/status", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["database_ok"], json!(true));
    assert!(body["data"]["version"].is_string());
}
