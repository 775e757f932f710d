//! Wire-shape construction tests for the SMS transport

use serde_json::json;
use uuid::Uuid;

use shepherd_core::domain::entities::provider::{AuthMethod, RequestMethod, SmsProvider};

use crate::sms::transport::{build_get_params, build_post_body};

fn provider(auth_method: AuthMethod, request_method: RequestMethod) -> SmsProvider {
    SmsProvider {
        id: Uuid::new_v4(),
        name: "Test Gateway".to_string(),
        api_endpoint: "https://gateway.example.com/api/".to_string(),
        auth_method,
        api_key: Some("key-123".to_string()),
        username: Some("church".to_string()),
        password: Some("secret".to_string()),
        request_method,
        sender: Some("Church".to_string()),
        is_active: true,
        balance: None,
        last_balance_check: None,
    }
}

#[test]
fn post_body_contains_to_and_body() {
    let p = provider(AuthMethod::ApiKey, RequestMethod::Post);
    let body = build_post_body(&p, "+2348012345678", "Hello");

    assert_eq!(body["to"], json!("+2348012345678"));
    assert_eq!(body["body"], json!("Hello"));
    assert_eq!(body["from"], json!("Church"));
    assert_eq!(body["api_key"], json!("key-123"));
    assert!(body.get("username").is_none());
}

#[test]
fn post_body_merges_username_password() {
    let p = provider(AuthMethod::UsernamePassword, RequestMethod::Post);
    let body = build_post_body(&p, "+2348012345678", "Hello");

    assert_eq!(body["username"], json!("church"));
    assert_eq!(body["password"], json!("secret"));
    assert!(body.get("api_key").is_none());
}

#[test]
fn post_body_omits_from_when_sender_unset() {
    let mut p = provider(AuthMethod::ApiKey, RequestMethod::Post);
    p.sender = None;
    let body = build_post_body(&p, "+2348012345678", "Hello");
    assert!(body.get("from").is_none());
}

#[test]
fn get_params_contain_mobiles_and_message() {
    let p = provider(AuthMethod::UsernamePassword, RequestMethod::Get);
    let params = build_get_params(&p, "+2348012345678", "Hello there");

    assert!(params.contains(&("mobiles".to_string(), "+2348012345678".to_string())));
    assert!(params.contains(&("message".to_string(), "Hello there".to_string())));
    assert!(params.contains(&("sender".to_string(), "Church".to_string())));
    assert!(params.contains(&("username".to_string(), "church".to_string())));
    assert!(params.contains(&("password".to_string(), "secret".to_string())));
}

#[test]
fn get_params_use_api_key_for_api_key_auth() {
    let p = provider(AuthMethod::ApiKey, RequestMethod::Get);
    let params = build_get_params(&p, "+2348012345678", "Hello");

    assert!(params.contains(&("api_key".to_string(), "key-123".to_string())));
    assert!(!params.iter().any(|(k, _)| k == "username"));
    assert!(!params.iter().any(|(k, _)| k == "password"));
}
