//! Signed-in session against the service.
//!
//! The session owns the transport and the cookie; it fetches a page, decodes
//! and parses it, and hands the tree to the page extractors. After `close`
//! every call fails with `ClientError::SessionClosed` before any I/O.

use std::sync::atomic::{AtomicBool, Ordering};

use engine_logging::{engine_info, engine_warn};
use scraper::Html;
use tokio::sync::Mutex;
use url::Url;

use crate::config::{SessionConfig, REQUESTED_WITH};
use crate::decode::parse_page;
use crate::error::{ClientError, ExtractError};
use crate::fetch::{Fetcher, ReqwestFetcher};
use crate::page::{extract_feed, extract_single_post};
use crate::types::{ActivityResponse, PageRequest, PostResponse};

pub struct MiiverseSession<F = ReqwestFetcher> {
    config: SessionConfig,
    fetcher: F,
    enabled: AtomicBool,
    // Held for the duration of a request so only one is in flight.
    in_flight: Mutex<()>,
}

impl MiiverseSession<ReqwestFetcher> {
    pub fn new(config: SessionConfig) -> Self {
        let fetcher = ReqwestFetcher::new(config.fetch.clone());
        Self::with_fetcher(config, fetcher)
    }
}

impl<F: Fetcher> MiiverseSession<F> {
    pub fn with_fetcher(config: SessionConfig, fetcher: F) -> Self {
        Self {
            config,
            fetcher,
            enabled: AtomicBool::new(true),
            in_flight: Mutex::new(()),
        }
    }

    pub fn user_name(&self) -> &str {
        &self.config.user_name
    }

    pub fn client_id(&self) -> &str {
        &self.config.client_id
    }

    pub fn is_open(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Marks the session as torn down. Idempotent.
    pub fn close(&self) {
        if self.enabled.swap(false, Ordering::AcqRel) {
            engine_info!("session for {} closed", self.config.user_name);
        }
    }

    pub async fn get_post(&self, id: &str) -> Result<PostResponse, ClientError> {
        self.access_check()?;
        let url = self.config.post_url(id)?;
        engine_info!("fetching post {id}");
        let post = self.load(url, extract_single_post).await?;
        Ok(PostResponse { post })
    }

    pub async fn get_activity(&self) -> Result<ActivityResponse, ClientError> {
        self.access_check()?;
        let url = self.config.activity_url()?;
        engine_info!("fetching activity feed for {}", self.config.user_name);
        let posts = self.load(url, extract_feed).await?;
        Ok(ActivityResponse { posts })
    }

    /// Invalidates the session cookie on the service side. The session itself
    /// stays open; call `close` to tear it down.
    pub async fn sign_out(&self) -> Result<(), ClientError> {
        self.access_check()?;
        let url = self.config.sign_out_url()?;
        let _guard = self.in_flight.lock().await;
        self.access_check()?;
        let request = PageRequest::head(url.as_str())
            .header("Cookie", self.config.cookie_header());
        self.fetcher.fetch(&request).await?;
        engine_info!("signed out {}", self.config.user_name);
        Ok(())
    }

    async fn load<T>(
        &self,
        url: Url,
        extract: impl FnOnce(&Html) -> Result<T, ExtractError>,
    ) -> Result<T, ClientError> {
        let _guard = self.in_flight.lock().await;
        self.access_check()?;
        let request = PageRequest::get(url.as_str())
            .header(REQUESTED_WITH.0, REQUESTED_WITH.1)
            .header("Cookie", self.config.cookie_header());
        let output = self.fetcher.fetch(&request).await.inspect_err(|err| {
            engine_warn!("request to {url} failed: {err}");
        })?;

        let page = parse_page(&output.bytes, output.metadata.content_type.as_deref())?;
        extract(&page).map_err(|err| {
            engine_warn!("could not extract {url}: {err}");
            ClientError::from(err)
        })
    }

    fn access_check(&self) -> Result<(), ClientError> {
        if self.is_open() {
            Ok(())
        } else {
            Err(ClientError::SessionClosed)
        }
    }
}
