//! Auth token resolution for saves.
//!
//! Order: the live session token, then `PAGECRAFT_TOKEN`, then the token
//! cached on disk by a previous login. Blank values count as absent.

use std::path::Path;

pub const TOKEN_ENV: &str = "PAGECRAFT_TOKEN";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Credentials {
    session_token: Option<String>,
    cached_token: Option<String>,
}

impl Credentials {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_session(token: impl Into<String>) -> Self {
        Self {
            session_token: non_blank(token.into()),
            cached_token: None,
        }
    }

    /// Fallback token from the environment or `token_file`
    pub fn load_cached(mut self, token_file: Option<&Path>) -> Self {
        let from_env = std::env::var(TOKEN_ENV).ok().and_then(non_blank);
        self.cached_token = from_env.or_else(|| {
            let path = token_file?;
            match std::fs::read_to_string(path) {
                Ok(contents) => non_blank(contents),
                Err(err) => {
                    tracing::debug!(path = %path.display(), error = %err, "no cached token");
                    None
                }
            }
        });
        self
    }

    pub fn with_cached(mut self, token: impl Into<String>) -> Self {
        self.cached_token = non_blank(token.into());
        self
    }

    pub fn set_session(&mut self, token: Option<String>) {
        self.session_token = token.and_then(non_blank);
    }

    /// Token to send, if any
    pub fn resolve(&self) -> Option<&str> {
        self.session_token
            .as_deref()
            .or(self.cached_token.as_deref())
    }

    pub fn is_logged_in(&self) -> bool {
        self.resolve().is_some()
    }
}

fn non_blank(token: String) -> Option<String> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
