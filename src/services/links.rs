//! Shortening and resolution of links on top of a [`KvStore`].

use crate::error::{AppError, AppResult};
use crate::models::ShortLink;
use crate::services::short_code::ShortCodeGenerator;
use crate::store::KvStore;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

/// How a link is written under its code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordLayout {
    /// The whole [`ShortLink`] as JSON, click counter included
    Descriptor,
    /// Only the original URL string; no counter
    BareUrl,
}

/// Knobs for [`LinkService`]
#[derive(Debug, Clone)]
pub struct LinkSettings {
    pub code_length: usize,
    pub max_attempts: u32,
    pub layout: RecordLayout,
}

/// Totals over everything in the store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkStats {
    pub total_links: usize,
    pub tracked_links: usize,
    pub total_clicks: u64,
}

/// A value read back from the store. Either layout may appear under any key.
enum StoredLink {
    Descriptor(ShortLink),
    Bare(String),
}

impl StoredLink {
    fn decode(raw: String) -> Self {
        match serde_json::from_str::<ShortLink>(&raw) {
            Ok(link) => StoredLink::Descriptor(link),
            Err(_) => StoredLink::Bare(raw),
        }
    }
}

/// Check that `input` is an absolute `http`/`https` URL.
///
/// The caller keeps the original string; the parsed form is only returned for
/// inspection.
pub fn parse_web_url(input: &str) -> AppResult<Url> {
    if input.trim().is_empty() {
        return Err(AppError::InvalidInput("URL is required".to_string()));
    }

    let parsed = Url::parse(input)
        .map_err(|_| AppError::InvalidInput("Invalid URL format".to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        _ => Err(AppError::InvalidInput("Invalid URL protocol".to_string())),
    }
}

/// Shortener and resolver shared by both deployments.
#[derive(Clone)]
pub struct LinkService {
    store: Arc<dyn KvStore>,
    codes: ShortCodeGenerator,
    max_attempts: u32,
    layout: RecordLayout,
}

impl LinkService {
    pub fn new(store: Arc<dyn KvStore>, settings: LinkSettings) -> Self {
        Self {
            store,
            codes: ShortCodeGenerator::new(settings.code_length),
            max_attempts: settings.max_attempts,
            layout: settings.layout,
        }
    }

    /// Replace the code generator, e.g. to shrink the code space.
    pub fn with_generator(mut self, codes: ShortCodeGenerator) -> Self {
        self.codes = codes;
        self
    }

    /// Validate `url`, mint a code no other link uses, and persist the mapping.
    ///
    /// `base_url` is the public origin the short URL is built from.
    ///
    /// # Errors
    ///
    /// - `AppError::InvalidInput` if `url` is blank, unparsable or not http(s)
    /// - `AppError::ExhaustedRetries` if every attempt collided
    /// - store errors as they occur
    pub async fn shorten(&self, url: &str, base_url: &str) -> AppResult<ShortLink> {
        parse_web_url(url)?;
        let base_url = base_url.trim_end_matches('/');

        for attempt in 1..=self.max_attempts {
            let short_code = self.codes.generate();
            let link = ShortLink {
                id: Uuid::new_v4(),
                short_url: format!("{}/{}", base_url, short_code),
                short_code,
                original_url: url.to_string(),
                clicks: 0,
                created_at: Utc::now(),
            };

            let value = match self.layout {
                RecordLayout::Descriptor => serde_json::to_string(&link)?,
                RecordLayout::BareUrl => link.original_url.clone(),
            };

            if self.store.put_if_absent(&link.short_code, &value).await? {
                info!(short_code = %link.short_code, "Created short link");
                return Ok(link);
            }

            warn!(attempt, short_code = %link.short_code, "Generated short code already taken");
        }

        Err(AppError::ExhaustedRetries(self.max_attempts))
    }

    /// Look up `code` and count the visit if the record tracks clicks.
    pub async fn resolve(&self, code: &str) -> AppResult<String> {
        let raw = self
            .store
            .get(code)
            .await?
            .ok_or_else(|| AppError::NotFound(code.to_string()))?;

        match StoredLink::decode(raw) {
            StoredLink::Descriptor(mut link) => {
                link.clicks = link.clicks.saturating_add(1);
                // A lost count must not block the visitor
                match serde_json::to_string(&link) {
                    Ok(value) => {
                        if let Err(e) = self.store.put(code, &value).await {
                            warn!(short_code = %code, error = %e, "Failed to record click");
                        }
                    }
                    Err(e) => warn!(short_code = %code, error = %e, "Failed to encode link"),
                }
                Ok(link.original_url)
            }
            StoredLink::Bare(original_url) => Ok(original_url),
        }
    }

    /// All descriptor records, oldest first. Bare entries carry no metadata
    /// and are left out.
    pub async fn list(&self) -> AppResult<Vec<ShortLink>> {
        let mut links: Vec<ShortLink> = self
            .store
            .entries()
            .await?
            .into_iter()
            .filter_map(|(code, raw)| match StoredLink::decode(raw) {
                StoredLink::Descriptor(link) => Some(link),
                StoredLink::Bare(_) => {
                    debug!(short_code = %code, "Skipping bare entry in listing");
                    None
                }
            })
            .collect();

        links.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(links)
    }

    pub async fn stats(&self) -> AppResult<LinkStats> {
        let mut stats = LinkStats::default();

        for (_, raw) in self.store.entries().await? {
            stats.total_links += 1;
            if let StoredLink::Descriptor(link) = StoredLink::decode(raw) {
                stats.tracked_links += 1;
                stats.total_clicks = stats.total_clicks.saturating_add(link.clicks);
            }
        }

        Ok(stats)
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
