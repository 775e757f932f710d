//! HTTP transport for outbound SMS
//!
//! Speaks the two wire shapes providers actually use: JSON POST with
//! api-key or username/password merged into the body (bearer header for
//! api-key auth), and query-string GET. Transport problems never escape as
//! errors; every path folds into an `SmsOutcome`.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

use shepherd_core::domain::entities::member::Member;
use shepherd_core::domain::entities::provider::{AuthMethod, RequestMethod, SmsProvider};
use shepherd_core::services::sms_sender::{SmsOutcome, SmsSender};
use shepherd_core::services::template;
use shepherd_shared::utils::phone::mask_url_password;

use crate::InfraResult;

use super::classify;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Sends SMS over HTTP per the provider's configured wire shape
pub struct HttpSmsSender {
    client: reqwest::Client,
}

impl HttpSmsSender {
    /// Build a sender with a 30 second request timeout
    pub fn new() -> InfraResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }

    async fn send_post(
        &self,
        provider: &SmsProvider,
        phone: &str,
        message: &str,
    ) -> Result<SmsOutcome, reqwest::Error> {
        let body = build_post_body(provider, phone, message);

        let mut request = self
            .client
            .post(&provider.api_endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(&body);

        if provider.auth_method == AuthMethod::ApiKey {
            if let Some(api_key) = provider.api_key.as_deref().filter(|k| !k.is_empty()) {
                request = request.bearer_auth(api_key);
            }
        }

        let response = request.send().await?;
        classify_response(response, message).await
    }

    async fn send_get(
        &self,
        provider: &SmsProvider,
        phone: &str,
        message: &str,
    ) -> Result<SmsOutcome, reqwest::Error> {
        let params = build_get_params(provider, phone, message);

        let request = self.client.get(&provider.api_endpoint).query(&params);
        if let Some(url) = request.try_clone().and_then(|r| r.build().ok()) {
            debug!(url = %mask_url_password(url.url().as_str()), "SMS API request");
        }

        let response = request.send().await?;
        classify_response(response, message).await
    }
}

/// JSON body for the POST wire shape
pub(crate) fn build_post_body(provider: &SmsProvider, phone: &str, message: &str) -> Value {
    let mut body = json!({
        "to": phone,
        "body": message,
    });

    if let Some(sender) = provider.sender.as_deref().filter(|s| !s.is_empty()) {
        body["from"] = json!(sender);
    }

    match provider.auth_method {
        AuthMethod::ApiKey => {
            if let Some(api_key) = provider.api_key.as_deref().filter(|k| !k.is_empty()) {
                body["api_key"] = json!(api_key);
            }
        }
        AuthMethod::UsernamePassword => {
            body["username"] = json!(provider.username.as_deref().unwrap_or(""));
            body["password"] = json!(provider.password.as_deref().unwrap_or(""));
        }
    }

    body
}

/// Query parameters for the GET wire shape
pub(crate) fn build_get_params(
    provider: &SmsProvider,
    phone: &str,
    message: &str,
) -> Vec<(String, String)> {
    let mut params = vec![
        ("mobiles".to_string(), phone.to_string()),
        ("message".to_string(), message.to_string()),
    ];

    if let Some(sender) = provider.sender.as_deref().filter(|s| !s.is_empty()) {
        params.push(("sender".to_string(), sender.to_string()));
    }

    match provider.auth_method {
        AuthMethod::ApiKey => {
            if let Some(api_key) = provider.api_key.as_deref().filter(|k| !k.is_empty()) {
                params.push(("api_key".to_string(), api_key.to_string()));
            }
        }
        AuthMethod::UsernamePassword => {
            if let Some(username) = provider.username.as_deref() {
                params.push(("username".to_string(), username.to_string()));
            }
            if let Some(password) = provider.password.as_deref() {
                params.push(("password".to_string(), password.to_string()));
            }
        }
    }

    params
}

/// Fold an HTTP response into a send outcome.
///
/// The body is captured as text and parsed as JSON on a best-effort
/// basis; classification works off both views. A non-2xx status
/// short-circuits classification entirely.
async fn classify_response(
    response: reqwest::Response,
    message: &str,
) -> Result<SmsOutcome, reqwest::Error> {
    let status = response.status();
    let raw = response.text().await?;
    let parsed: Option<Value> = serde_json::from_str(&raw).ok();

    if !status.is_success() {
        let error = classify::http_error_message(status.as_u16(), &raw, parsed.as_ref());
        return Ok(SmsOutcome::failed(message, error));
    }

    if classify::is_success_response(&raw, parsed.as_ref()) {
        let id = classify::external_id(&raw, parsed.as_ref());
        Ok(SmsOutcome::sent(message, id))
    } else {
        let error = classify::extract_error_message(&raw, parsed.as_ref());
        Ok(SmsOutcome::failed(message, error))
    }
}

#[async_trait]
impl SmsSender for HttpSmsSender {
    async fn send_sms(
        &self,
        provider: &SmsProvider,
        recipient: &Member,
        message: &str,
    ) -> SmsOutcome {
        let processed = template::render(message, recipient);

        let result = match provider.request_method {
            RequestMethod::Post => {
                self.send_post(provider, &recipient.phone, &processed).await
            }
            RequestMethod::Get => self.send_get(provider, &recipient.phone, &processed).await,
        };

        match result {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(provider = %provider.name, error = %err, "SMS transport error");
                SmsOutcome::failed(processed, err.to_string())
            }
        }
    }
}
