// Root credentials and Basic-Auth header construction.
//
// The management API authenticates every call with HTTP Basic. The header
// value is computed once per client and installed as a default header.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Login and password of the server's root account.
#[derive(Debug, Clone)]
pub struct RootCredentials {
    pub login: String,
    pub password: SecretString,
}

impl RootCredentials {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// `Basic base64(login:password)`, marked sensitive so it never shows
    /// up in debug output.
    pub fn authorization(&self) -> Result<HeaderValue, Error> {
        let raw = format!("{}:{}", self.login, self.password.expose_secret());
        let mut value = HeaderValue::from_str(&format!("Basic {}", STANDARD.encode(raw)))
            .map_err(|e| Error::InvalidCredentials(e.to_string()))?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Default header map carrying the `Authorization` header.
    pub fn headers(&self) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.authorization()?);
        Ok(headers)
    }
}

impl Default for RootCredentials {
    fn default() -> Self {
        Self::new("root", "root")
    }
}
