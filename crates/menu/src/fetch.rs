//! Upstream client: one request per school week, cached by that week's
//! Monday.

use std::time::Duration;

use time::Date;
use tokio::sync::Mutex;

use crate::cache::TtlCache;
use crate::dates::{format_date, week_start};
use crate::error::MenuError;
use crate::model::WeekMenu;
use crate::parse::{parse_week, RawWeek};

/// Fetches and normalizes weekly menus.
///
/// The provider returns the whole week when queried with that week's Monday,
/// so every request is keyed and cached by Monday. The cache lock is held
/// only for the lookup and the store, never across the network call; two
/// concurrent misses for the same week may both fetch, and the last store
/// wins.
#[derive(Debug)]
pub struct MenuFetcher {
    http: reqwest::Client,
    root_url: String,
    cache: Mutex<TtlCache<WeekMenu>>,
}

impl MenuFetcher {
    /// `root_url` is normalized to exactly one trailing slash. `timeout`
    /// bounds each upstream request.
    pub fn new(root_url: &str, cache_ttl: Duration, timeout: Duration) -> Result<Self, MenuError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            root_url: format!("{}/", root_url.trim_end_matches('/')),
            cache: Mutex::new(TtlCache::new(cache_ttl)),
        })
    }

    /// Returns the normalized menu for the week containing `any_day`.
    #[tracing::instrument(skip(self), fields(week = %format_date(week_start(any_day))))]
    pub async fn get_week(&self, any_day: Date) -> Result<WeekMenu, MenuError> {
        let monday = week_start(any_day);
        let cache_key = format!("week:{}", format_date(monday));

        if let Some(cached) = self.cache.lock().await.get(&cache_key) {
            tracing::debug!("cache hit");
            return Ok(cached);
        }

        let url = self.build_url(monday);
        tracing::debug!(%url, "fetching week from upstream");
        let body = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let raw: RawWeek = serde_json::from_str(&body)?;
        let parsed = parse_week(&raw);

        self.cache.lock().await.set(cache_key, parsed.clone());
        Ok(parsed)
    }

    /// The provider expects `/year/month/day/` with unpadded month and day.
    fn build_url(&self, d: Date) -> String {
        format!("{}{}/{}/{}/", self.root_url, d.year(), u8::from(d.month()), d.day())
    }
}
