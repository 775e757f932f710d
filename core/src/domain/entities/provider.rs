//! SMS provider configuration entity

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a provider authenticates API calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    /// Single API key, sent in the payload and as a bearer token
    ApiKey,
    /// Username and password pair, sent in the payload
    UsernamePassword,
}

impl AuthMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMethod::ApiKey => "api_key",
            AuthMethod::UsernamePassword => "username_password",
        }
    }
}

impl FromStr for AuthMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "api_key" => Ok(AuthMethod::ApiKey),
            "username_password" => Ok(AuthMethod::UsernamePassword),
            other => Err(format!("Unknown auth method: {other}")),
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP verb the provider's send endpoint expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestMethod {
    #[serde(rename = "GET")]
    Get,
    #[serde(rename = "POST")]
    Post,
}

impl RequestMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Post => "POST",
        }
    }
}

impl FromStr for RequestMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(RequestMethod::Get),
            "POST" => Ok(RequestMethod::Post),
            other => Err(format!("Unknown request method: {other}")),
        }
    }
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configured third-party SMS gateway
///
/// The SMS core does not enforce "exactly one active provider" - it selects
/// the first record with `is_active` set; the settings CRUD surface is
/// responsible for keeping the flag a singleton. Only the balance fields are
/// ever written by the core (see the balance fetcher).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmsProvider {
    pub id: Uuid,
    pub name: String,
    pub api_endpoint: String,
    pub auth_method: AuthMethod,
    pub api_key: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub request_method: RequestMethod,
    pub sender: Option<String>,
    pub is_active: bool,
    pub balance: Option<String>,
    pub last_balance_check: Option<DateTime<Utc>>,
}

impl SmsProvider {
    /// Whether username and password are both configured and non-empty
    pub fn has_credentials(&self) -> bool {
        self.username.as_deref().map(|u| !u.is_empty()).unwrap_or(false)
            && self.password.as_deref().map(|p| !p.is_empty()).unwrap_or(false)
    }
}
