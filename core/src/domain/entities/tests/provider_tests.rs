//! Tests for the SmsProvider entity

use uuid::Uuid;

use crate::domain::entities::provider::{AuthMethod, RequestMethod, SmsProvider};

fn provider(username: Option<&str>, password: Option<&str>) -> SmsProvider {
    SmsProvider {
        id: Uuid::new_v4(),
        name: "Test Provider".to_string(),
        api_endpoint: "https://sms.example.com/api".to_string(),
        auth_method: AuthMethod::UsernamePassword,
        api_key: None,
        username: username.map(str::to_string),
        password: password.map(str::to_string),
        request_method: RequestMethod::Get,
        sender: None,
        is_active: true,
        balance: None,
        last_balance_check: None,
    }
}

#[test]
fn auth_method_round_trips_through_strings() {
    assert_eq!("api_key".parse::<AuthMethod>(), Ok(AuthMethod::ApiKey));
    assert_eq!(
        "username_password".parse::<AuthMethod>(),
        Ok(AuthMethod::UsernamePassword)
    );
    assert_eq!(AuthMethod::ApiKey.as_str(), "api_key");
    assert!("bearer".parse::<AuthMethod>().is_err());
}

#[test]
fn request_method_round_trips_through_strings() {
    assert_eq!("GET".parse::<RequestMethod>(), Ok(RequestMethod::Get));
    assert_eq!("POST".parse::<RequestMethod>(), Ok(RequestMethod::Post));
    assert_eq!(RequestMethod::Post.as_str(), "POST");
    assert!("PUT".parse::<RequestMethod>().is_err());
}

#[test]
fn has_credentials_requires_both_fields_non_empty() {
    assert!(provider(Some("user"), Some("pass")).has_credentials());
    assert!(!provider(Some("user"), None).has_credentials());
    assert!(!provider(None, Some("pass")).has_credentials());
    assert!(!provider(Some(""), Some("pass")).has_credentials());
    assert!(!provider(None, None).has_credentials());
}
