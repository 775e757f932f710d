//! Heuristic classification of SMS gateway responses
//!
//! Gateways in the field return wildly inconsistent bodies: JSON with a
//! status field, bare "OK|12345" strings, HTML error pages, or free-form
//! prose. Classification is an ordered list of text rules tested
//! top-to-bottom; anything unmatched is treated as a failure, never as an
//! unknown success. The rule order matters because the phrase sets overlap
//! (an auth failure body may also contain "ERROR").

use serde_json::Value;

/// Phrases indicating the account has run out of credit
pub const CREDIT_PHRASES: [&str; 4] = [
    "INSUFFICIENT CREDIT",
    "INSUFFICIENT BALANCE",
    "LOW BALANCE",
    "NO CREDIT",
];

/// Phrases indicating rejected credentials
pub const AUTH_PHRASES: [&str; 4] = [
    "INVALID USERNAME",
    "INVALID PASSWORD",
    "AUTHENTICATION FAILED",
    "UNAUTHORIZED",
];

/// Phrases indicating a bad recipient number
pub const RECIPIENT_PHRASES: [&str; 3] = ["INVALID NUMBER", "INVALID PHONE", "INVALID RECIPIENT"];

/// Canned error for HTML responses (endpoint misconfiguration)
pub const HTML_ERROR_MESSAGE: &str = "API configuration error: Received HTML response instead \
     of API data. Please check your API endpoint, username, and password in Settings.";

/// Canned error for credit exhaustion
pub const CREDIT_ERROR_MESSAGE: &str = "Insufficient SMS credits. Please recharge your account.";

/// Canned error for rejected credentials
pub const AUTH_ERROR_MESSAGE: &str = "Invalid authentication credentials.";

/// Canned error for a bad recipient number
pub const PHONE_ERROR_MESSAGE: &str = "Invalid phone number.";

/// Canned error for oversized unclassifiable bodies
pub const TOO_LONG_ERROR_MESSAGE: &str =
    "Invalid API response (too long). Please verify your API configuration.";

/// Bodies longer than this are not echoed back verbatim as errors
const MAX_VERBATIM_ERROR_LEN: usize = 200;

fn contains_any(haystack_upper: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| haystack_upper.contains(p))
}

fn is_html(upper: &str) -> bool {
    upper.contains("<!DOCTYPE") || upper.contains("<HTML")
}

/// Classify a raw response body as success or failure.
///
/// `parsed` is the best-effort JSON parse of the body, when one exists.
/// Rules are applied in priority order; the default for an unmatched body
/// is failure.
pub fn is_success_response(response_text: &str, parsed: Option<&Value>) -> bool {
    let upper = response_text.to_uppercase();

    // An HTML page means the endpoint is misconfigured, whatever it says.
    if is_html(&upper) {
        return false;
    }

    if let Some(data) = parsed {
        let status_ok = data
            .get("status")
            .and_then(Value::as_str)
            .map(|s| s == "OK" || s == "success")
            .unwrap_or(false);
        let success_flag = data.get("success").and_then(Value::as_bool) == Some(true);
        if status_ok || success_flag {
            return true;
        }
    }

    if contains_any(&upper, &CREDIT_PHRASES) {
        return false;
    }

    if contains_any(&upper, &AUTH_PHRASES) {
        return false;
    }

    if contains_any(&upper, &RECIPIENT_PHRASES) {
        return false;
    }

    if upper.starts_with("OK") || upper.contains("SUCCESS") {
        return true;
    }

    if upper.contains("ERROR") || upper.contains("FAILED") {
        return false;
    }

    false
}

/// Pull the message id out of a pipe-delimited body such as `OK|12345`
pub fn extract_pipe_message_id(response_text: &str) -> Option<String> {
    if !response_text.contains('|') {
        return None;
    }
    let mut parts = response_text.split('|');
    let head = parts.next()?;
    let id = parts.next()?;
    if head.to_uppercase().contains("OK") {
        Some(id.trim().to_string())
    } else {
        None
    }
}

fn json_id_field(data: &Value) -> Option<String> {
    ["message_id", "id", "messageId"].iter().find_map(|key| {
        match data.get(*key) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    })
}

/// Extract the external message id from a successful response.
///
/// Priority: structured JSON id field, then a pipe-delimited `OK|<id>`
/// body, then the literal `"sent"` - never empty on success.
pub fn external_id(response_text: &str, parsed: Option<&Value>) -> String {
    parsed
        .and_then(json_id_field)
        .or_else(|| extract_pipe_message_id(response_text))
        .unwrap_or_else(|| "sent".to_string())
}

fn json_error_field(data: &Value) -> Option<String> {
    ["message", "error"].iter().find_map(|key| {
        data.get(*key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

/// Extract a user-presentable error from a failed response.
///
/// Prefers a structured JSON message, then maps the same phrase sets used
/// for classification onto canned messages, and only echoes the body
/// verbatim when it is short enough to be readable.
pub fn extract_error_message(response_text: &str, parsed: Option<&Value>) -> String {
    if let Some(message) = parsed.and_then(json_error_field) {
        return message;
    }

    let upper = response_text.to_uppercase();

    if is_html(&upper) {
        return HTML_ERROR_MESSAGE.to_string();
    }

    if contains_any(&upper, &CREDIT_PHRASES) {
        return CREDIT_ERROR_MESSAGE.to_string();
    }

    if contains_any(&upper, &AUTH_PHRASES) {
        return AUTH_ERROR_MESSAGE.to_string();
    }

    if contains_any(&upper, &RECIPIENT_PHRASES) {
        return PHONE_ERROR_MESSAGE.to_string();
    }

    if response_text.len() > MAX_VERBATIM_ERROR_LEN {
        return TOO_LONG_ERROR_MESSAGE.to_string();
    }

    if response_text.is_empty() {
        "Failed to send SMS".to_string()
    } else {
        response_text.to_string()
    }
}

/// Error for a non-2xx HTTP response, short-circuiting classification
pub fn http_error_message(status: u16, response_text: &str, parsed: Option<&Value>) -> String {
    if let Some(message) = parsed.and_then(json_error_field) {
        return message;
    }
    if !response_text.is_empty() {
        return response_text.to_string();
    }
    format!("HTTP {status}: Failed to send SMS")
}
