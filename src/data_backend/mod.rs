//! The fetch layer: one client, two upstream variants behind a tagged
//! request. Everything downstream of the HTTP round-trips is pure and lives
//! in the normalizer/assembler modules.

pub mod bonapp_fetcher;
pub mod github_fetcher;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;

use crate::config::MenuConfig;
use crate::data_types::{MenuRequest, MenuResponse};
use crate::errors::MenuError;
use crate::reporting::{AnalyticsSink, ErrorReporter, LogReporter, NullAnalytics};

/// Owns the HTTP client, configuration and reporting sinks. One instance per
/// app is plenty; fetches borrow it freely.
pub struct MenuClient {
    http: reqwest::Client,
    config: MenuConfig,
    reporter: Arc<dyn ErrorReporter>,
    analytics: Arc<dyn AnalyticsSink>,
}

impl MenuClient {
    pub fn new(config: MenuConfig) -> Self {
        MenuClient::with_sinks(config, Arc::new(LogReporter), Arc::new(NullAnalytics))
    }

    pub fn with_sinks(
        config: MenuConfig,
        reporter: Arc<dyn ErrorReporter>,
        analytics: Arc<dyn AnalyticsSink>,
    ) -> Self {
        MenuClient {
            http: reqwest::Client::new(),
            config,
            reporter,
            analytics,
        }
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// Fetch, normalize and assemble one menu. `now` is the caller's moment
    /// in the provider's reference timezone; it decides the calendar day and
    /// nothing else here.
    pub async fn fetch(
        &self,
        request: &MenuRequest,
        now: NaiveDateTime,
    ) -> Result<MenuResponse, MenuError> {
        match request {
            MenuRequest::BonApp {
                cafe_id,
                ignore_provided_menus,
            } => bonapp_fetcher::fetch(self, cafe_id, *ignore_provided_menus, now).await,
            MenuRequest::Github { menu_url } => github_fetcher::fetch(self, menu_url).await,
        }
    }
}

pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &MenuClient,
    url: &str,
) -> Result<T, MenuError> {
    let body = client
        .http
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    decode_json(&body)
}

/// Decode a JSON body, recognizing the classic failure where the server
/// hands back an HTML error page instead. That case surfaces as the fixed
/// friendly message, not the raw parser error.
pub(crate) fn decode_json<T: DeserializeOwned>(body: &str) -> Result<T, MenuError> {
    match serde_json::from_str(body) {
        Ok(value) => Ok(value),
        Err(_) if body.trim_start().starts_with('<') => Err(MenuError::UpstreamGarbled),
        Err(err) => Err(err.into()),
    }
}

/// Run `op` until it succeeds or the retry budget is spent: one initial
/// attempt plus `retries` more, with a fixed delay in between. The budget is
/// per call site; concurrent requests never share it.
pub(crate) async fn with_retries<T, F, Fut>(
    retries: u32,
    delay: Duration,
    mut op: F,
) -> Result<T, MenuError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, MenuError>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < retries => {
                attempt += 1;
                log::debug!("request failed (attempt {attempt}/{retries}): {err}");
                tokio::time::sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}
