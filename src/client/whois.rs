//! Tailscale `/_proxy/whois` client

use std::fmt;

use serde_json::Value;

use super::fetch_text;
use crate::errors::{AstrolabError, Result};

/// Identity of the caller as reported by the tailnet proxy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Whois {
    pub node: String,
    pub user: String,
}

impl Whois {
    pub fn from_json(json: &Value) -> Result<Self> {
        Ok(Self {
            node: string_at(json, &["Node", "ComputedName"])?,
            user: string_at(json, &["UserProfile", "DisplayName"])?,
        })
    }

    pub fn parse(body: &str) -> Result<Self> {
        let json: Value = serde_json::from_str(body)?;
        Self::from_json(&json)
    }
}

impl fmt::Display for Whois {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Hello {}! You're running this from {}.",
            self.user, self.node
        )
    }
}

fn string_at(json: &Value, path: &[&str]) -> Result<String> {
    let mut current = json;
    for key in path {
        current = current.get(key).ok_or_else(|| missing_key(path))?;
    }
    current
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| missing_key(path))
}

fn missing_key(path: &[&str]) -> AstrolabError {
    AstrolabError::serialization(format!("missing string key {}", path.join(".")))
}

pub async fn fetch_whois(url: &str) -> Result<Whois> {
    let body = fetch_text(url).await?;
    Whois::parse(&body)
}
