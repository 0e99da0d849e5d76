use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::RequestFailure;
use crate::models::{Quiz, QuizQuestions};

/// Characters escaped when a value is placed in a single path segment.
pub const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Clone)]
pub struct ApiClient {
    base: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: Url) -> Self {
        ApiClient {
            base: base_url.as_str().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Absolute URL for `path` under the base address. The base is
    /// concatenated, not joined, so a path prefix on it survives.
    pub fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, RequestFailure> {
        let mut url = Url::parse(&format!("{}{}", self.base, path))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Single uncached GET; no retry and no timeout.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, RequestFailure> {
        let url = self.endpoint(path, query)?;
        log::debug!("GET {}", url);

        let response = self
            .http
            .get(url.clone())
            .header(CACHE_CONTROL, "no-store")
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                log::warn!("Request to {} failed: {}", url, e);
                RequestFailure::Transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Backend responded {} for {}", status, url);
            return Err(RequestFailure::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response.json::<T>().await.map_err(|e| {
            log::warn!("Undecodable body from {}: {}", url, e);
            RequestFailure::Transport(e)
        })
    }

    pub async fn categories(&self) -> Result<Vec<String>, RequestFailure> {
        self.fetch_json("/api/categories", &[]).await
    }

    pub async fn quizzes_in(&self, category: &str) -> Result<Vec<Quiz>, RequestFailure> {
        self.fetch_json("/api/quizzes", &[("category", category)]).await
    }

    pub async fn quiz_questions(&self, id: &str) -> Result<QuizQuestions, RequestFailure> {
        let path = format!("/api/quizzes/{}/questions", utf8_percent_encode(id, SEGMENT));
        self.fetch_json(&path, &[]).await
    }
}
