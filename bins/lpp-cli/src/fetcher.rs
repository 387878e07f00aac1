// Blocking client for the problem API
use anyhow::{anyhow, bail, Context, Result};
use lpp_common::types::{Difficulty, ProblemData};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

/// Filters for the `/problems` listing
#[derive(Debug, Clone, Default)]
pub struct ProblemQuery {
    pub limit: usize,
    pub skip: usize,
    pub difficulty: Option<Difficulty>,
    pub tags: Vec<String>,
}

impl ProblemQuery {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("limit", self.limit.to_string()), ("skip", self.skip.to_string())];
        if let Some(difficulty) = self.difficulty {
            params.push(("difficulty", difficulty.as_str().to_uppercase()));
        }
        if !self.tags.is_empty() {
            params.push(("tags", self.tags.join("+")));
        }
        params
    }
}

pub struct ApiClient {
    base_url: String,
    agent: ureq::Agent,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent: ureq::AgentBuilder::new()
                .timeout(timeout)
                .timeout_connect(timeout)
                .build(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Any HTTP response, even an error status, means the server is up
    pub fn is_available(&self) -> bool {
        match self.agent.get(&self.base_url).call() {
            Ok(_) | Err(ureq::Error::Status(..)) => true,
            Err(e) => {
                debug!("API probe failed: {}", e);
                false
            }
        }
    }

    fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, ?query, "GET");

        let mut request = self.agent.get(&url);
        for (key, value) in query {
            request = request.query(key, value);
        }

        request
            .call()
            .map_err(|e| anyhow!("Request to {} failed: {}", url, e))?
            .into_json::<Value>()
            .with_context(|| format!("Failed to parse response from {}", url))
    }

    /// Full problem record by title slug
    pub fn fetch_problem(&self, slug: &str) -> Result<ProblemData> {
        let value = self.get_json("/select", &[("titleSlug", slug.to_string())])?;
        let problem: ProblemData = serde_json::from_value(value)
            .with_context(|| format!("Unexpected problem payload for '{}'", slug))?;

        if problem.id().is_none() && problem.title_slug.is_none() {
            bail!("Problem '{}' not found", slug);
        }
        Ok(problem)
    }

    /// Daily challenge; re-fetched by slug when the daily payload lacks code snippets
    pub fn fetch_daily(&self) -> Result<ProblemData> {
        let value = self.get_json("/daily", &[])?;
        let daily: ProblemData =
            serde_json::from_value(value).context("Unexpected daily challenge payload")?;

        match daily.title_slug.as_deref() {
            Some(slug) if daily.cpp_snippet().is_none() => {
                info!(slug = %slug, "Daily payload is partial, fetching full problem");
                self.fetch_problem(slug)
            }
            _ => Ok(daily),
        }
    }

    pub fn fetch_problems(&self, query: &ProblemQuery) -> Result<Vec<ProblemData>> {
        let value = self.get_json("/problems", &query.params())?;
        problems_from_value(value)
    }

    /// Page through the entire listing
    pub fn fetch_all_problems(&self, page_size: usize) -> Result<Vec<ProblemData>> {
        let mut all = Vec::new();
        let mut query = ProblemQuery {
            limit: page_size,
            ..Default::default()
        };

        loop {
            let page = self.fetch_problems(&query)?;
            let count = page.len();
            all.extend(page);
            debug!(fetched = all.len(), "Fetched problem page");

            if count == 0 || count < page_size {
                break;
            }
            query.skip += page_size;
        }

        info!(total = all.len(), "Fetched problem listing");
        Ok(all)
    }
}

/// Listing responses come either as a bare array or wrapped in `problemsetQuestionList`
pub fn problems_from_value(value: Value) -> Result<Vec<ProblemData>> {
    let list = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => map
            .remove("problemsetQuestionList")
            .filter(Value::is_array)
            .ok_or_else(|| anyhow!("Listing response has no problemsetQuestionList array"))?,
        other => bail!("Unexpected listing response: {}", other),
    };
    serde_json::from_value(list).context("Failed to parse problem listing")
}
