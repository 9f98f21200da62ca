// API client module: a small blocking HTTP client used by the "Test API
// endpoint" action. It only issues a GET and hands back the status and
// body; interpreting the reply is left to the caller.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::Url;
use std::time::Duration;

/// Holds a reqwest blocking client configured with the request timeout.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
}

/// Status code and raw body of a finished request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiReply {
    pub status: u16,
    pub body: String,
}

impl ApiReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body re-indented when it is JSON, otherwise as received.
    pub fn pretty_body(&self) -> String {
        match serde_json::from_str::<serde_json::Value>(&self.body) {
            Ok(value) if value.is_object() || value.is_array() => {
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| self.body.clone())
            }
            _ => self.body.clone(),
        }
    }
}

impl ApiClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient { client })
    }

    /// GET `url` and return whatever the server answered, including
    /// non-2xx replies. Only transport failures are errors.
    pub fn get(&self, url: &Url) -> Result<ApiReply> {
        let res = self
            .client
            .get(url.clone())
            .send()
            .with_context(|| format!("Failed to send request to {}", url))?;
        let status = res.status().as_u16();
        let body = res.text().context("Reading response body")?;
        Ok(ApiReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_bodies_are_pretty_printed() {
        let reply = ApiReply {
            status: 200,
            body: r#"{"answer":"hi"}"#.into(),
        };
        assert_eq!(reply.pretty_body(), "{\n  \"answer\": \"hi\"\n}");
    }

    #[test]
    fn plain_text_bodies_are_untouched() {
        let reply = ApiReply {
            status: 200,
            body: "Hello! How can I help?".into(),
        };
        assert_eq!(reply.pretty_body(), "Hello! How can I help?");
    }

    #[test]
    fn success_is_2xx_only() {
        let reply = |status| ApiReply {
            status,
            body: String::new(),
        };
        assert!(reply(200).is_success());
        assert!(reply(204).is_success());
        assert!(!reply(404).is_success());
        assert!(!reply(500).is_success());
    }
}
