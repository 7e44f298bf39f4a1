use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, Error, http::StatusCode, test, web};
use db::{memory::InMemoryAccountStore, store::AccountStore};
use serde_json::{Value, json};

fn test_store() -> web::Data<dyn AccountStore> {
    let store: Arc<dyn AccountStore> = Arc::new(InMemoryAccountStore::new());
    web::Data::from(store)
}

fn test_app(
    store: web::Data<dyn AccountStore>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(store)
        .service(api_accounts::routes::health::get_health)
        .service(api_accounts::mount_auth())
        .service(api_accounts::mount_accounts())
}

fn create_body(email: &str, days: i64) -> Value {
    json!({
        "email": email,
        "password": "Abcdef1!",
        "total_subscription_days": days,
    })
}

#[actix_web::test]
async fn health_reports_ok() {
    let app = test::init_service(test_app(test_store())).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "OK");
}

#[actix_web::test]
async fn create_returns_the_view_without_the_password_hash() {
    let app = test::init_service(test_app(test_store())).await;

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(create_body("user@example.com", 30))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], "user@example.com");
    assert_eq!(body["total_subscription_days"], 30);
    assert!(body.get("password_hash").is_none());
    assert!(body.get("password").is_none());
    assert!(body.get("id").is_some());
}

#[actix_web::test]
async fn create_rejects_weak_passwords_with_400() {
    let app = test::init_service(test_app(test_store())).await;

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({ "email": "user@example.com", "password": "abcdefg1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn create_rejects_malformed_emails_with_400() {
    let app = test::init_service(test_app(test_store())).await;

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({ "email": "not-an-email", "password": "Abcdef1!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn duplicate_email_maps_to_500() {
    let app = test::init_service(test_app(test_store())).await;

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(create_body("user@example.com", 30))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(create_body("user@example.com", 30))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn login_succeeds_and_reports_the_remaining_time() {
    let app = test::init_service(test_app(test_store())).await;

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(create_body("user@example.com", 30))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": "user@example.com", "password": "Abcdef1!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .starts_with("Login successful - ")
    );
    assert_eq!(body["account"]["email"], "user@example.com");
    assert!(body["account"].get("password_hash").is_none());
    assert_eq!(body["time_left"]["is_expired"], false);
    assert!(body["time_left"]["total_minutes_left"].as_i64().unwrap() > 0);
}

#[actix_web::test]
async fn wrong_password_and_unknown_email_are_the_same_401() {
    let app = test::init_service(test_app(test_store())).await;

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(create_body("user@example.com", 30))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": "user@example.com", "password": "Wrong-pw1!" }))
        .to_request();
    let wrong_password = test::call_service(&app, req).await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password: Value = test::read_body_json(wrong_password).await;

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": "nobody@example.com", "password": "Abcdef1!" }))
        .to_request();
    let unknown_email = test::call_service(&app, req).await;
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    let unknown_email: Value = test::read_body_json(unknown_email).await;

    // Identical bodies: the caller cannot tell which case it hit.
    assert_eq!(wrong_password, unknown_email);
    assert_eq!(wrong_password["error"], "Invalid email or password");
}

#[actix_web::test]
async fn expired_subscription_logs_in_to_a_403() {
    let app = test::init_service(test_app(test_store())).await;

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(create_body("user@example.com", 0))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": "user@example.com", "password": "Abcdef1!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Subscription expired");
}

#[actix_web::test]
async fn fetch_by_email_returns_404_for_unknown_accounts() {
    let app = test::init_service(test_app(test_store())).await;

    let req = test::TestRequest::get()
        .uri("/users?email=nobody@example.com")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn change_password_applies_the_policy_then_takes_effect() {
    let app = test::init_service(test_app(test_store())).await;

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(create_body("user@example.com", 30))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::put()
        .uri("/users/change-password")
        .set_json(json!({ "email": "user@example.com", "new_password": "weak" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri("/users/change-password")
        .set_json(json!({ "email": "user@example.com", "new_password": "Newpass2$" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": "user@example.com", "password": "Newpass2$" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn change_email_moves_the_account() {
    let app = test::init_service(test_app(test_store())).await;

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(create_body("old@example.com", 30))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::put()
        .uri("/users/change-email")
        .set_json(json!({ "email": "old@example.com", "new_email": "new@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/users?email=new@example.com")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/users?email=old@example.com")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn extend_subscription_unlocks_an_expired_login() {
    let app = test::init_service(test_app(test_store())).await;

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(create_body("user@example.com", 0))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::put()
        .uri("/users/extend-subscription")
        .set_json(json!({ "email": "user@example.com", "additional_days": -3 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri("/users/extend-subscription")
        .set_json(json!({ "email": "user@example.com", "additional_days": 10 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total_subscription_days"], 10);

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": "user@example.com", "password": "Abcdef1!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn generic_update_hashes_a_password_field() {
    let app = test::init_service(test_app(test_store())).await;

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(create_body("user@example.com", 30))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::put()
        .uri("/users")
        .set_json(json!({
            "email": "user@example.com",
            "password": "Newpass2$",
            "total_subscription_days": 45,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total_subscription_days"], 45);
    assert!(body.get("password_hash").is_none());

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": "user@example.com", "password": "Newpass2$" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn delete_removes_the_account_and_returns_its_view() {
    let app = test::init_service(test_app(test_store())).await;

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(create_body("user@example.com", 30))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::delete()
        .uri("/users")
        .set_json(json!({ "email": "user@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], "user@example.com");

    let req = test::TestRequest::get()
        .uri("/users?email=user@example.com")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
