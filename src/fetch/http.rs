// src/fetch/http.rs

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};
use url::Url;

use super::{PageSnapshot, PageSource};
use crate::config::CalendarConfig;
use crate::months::MonthToken;

const MAX_RETRIES: usize = 3;
const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Fetches calendar pages over plain HTTP with one shared client.
pub struct HttpPageSource {
    client: Client,
    base: Url,
}

impl HttpPageSource {
    pub fn new(cfg: &CalendarConfig) -> Result<Self> {
        let base = Url::parse(&cfg.base_url)
            .with_context(|| format!("parsing calendar URL {}", cfg.base_url))?;
        let client = Client::builder()
            .user_agent(&cfg.user_agent)
            .cookie_store(true)
            .gzip(true)
            .build()
            .context("building HTTP client")?;
        Ok(Self { client, base })
    }

    /// `<base>?month=jan.2007`
    pub fn month_url(&self, month: MonthToken) -> Url {
        let mut url = self.base.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("month", &format!("{}.{}", month.abbrev(), month.year()));
        url
    }
}

impl PageSource for HttpPageSource {
    async fn navigate(&mut self, month: MonthToken) -> Result<PageSnapshot> {
        let url = self.month_url(month);
        info!(%url, "navigating");

        let mut attempt = 0;
        let html = loop {
            attempt += 1;

            let resp = self
                .client
                .get(url.clone())
                .send()
                .await
                .and_then(|r| r.error_for_status());
            let body = match resp {
                Ok(resp) => resp.text().await,
                Err(e) => Err(e),
            };

            match body {
                Ok(html) => break html,
                Err(e) if attempt < MAX_RETRIES => {
                    warn!(%url, attempt, error = %e, "page load failed; retrying");
                    sleep(RETRY_DELAY).await;
                }
                Err(e) => return Err(e).with_context(|| format!("GET {}", url)),
            }
        };

        Ok(PageSnapshot { month, html })
    }
}
