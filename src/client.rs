// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! SageDining menu client
//!
//! Fetches a school's weekly menu grid from the SageDining endpoint and
//! resolves calendar dates into grid slots.

use crate::types::{Day, Meal, MenuCategory, MenuItem, RawMenuItem};
use chrono::{DateTime, FixedOffset, Local, NaiveDate, Utc};
use reqwest::Client as HttpClient;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// SageDining client errors.
#[derive(Error, Debug)]
pub enum SageError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("failed to decode menu response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("menu endpoint returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("no published menu found for this school")]
    NoMenusFound,

    #[error("menu response missing expected field: {0}")]
    MalformedResponse(&'static str),

    #[error("menu cache not present; call refresh() first")]
    MenuCacheNotPresent,

    #[error("date is outside the cached menu horizon")]
    DateNotValid,

    #[error("meal slot ordinal is outside the valid range")]
    MealNotValid,

    #[error("category index {0} has no section for this slot")]
    CategoryNotValid(usize),
}

/// Result type for SageDining operations.
pub type Result<T> = std::result::Result<T, SageError>;

/// Default SageDining menu endpoint.
pub const DEFAULT_BASE_URL: &str =
    "https://www.sagedining.com/intranet/apps/mb/pubasynchhandler.php";

/// Build the query URL for a school's menu.
///
/// The `_` parameter carries the current Unix timestamp and is regenerated
/// on every call so repeated requests bypass intermediary caches.
pub fn query_url(base: &str, school_id: &str, cardinality: u32) -> String {
    format!(
        "{}?unitId={}&mbMenuCardinality={}&_={}",
        base,
        school_id,
        cardinality,
        Utc::now().timestamp()
    )
}

/// Timezone used to interpret the provider's anchor timestamp.
///
/// `menuFirstDate` arrives as a bare Unix timestamp; which calendar date it
/// lands on depends on the timezone it is read in, and that date drives all
/// week and day-of-week arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnchorTimezone {
    /// The host's local timezone.
    #[default]
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl AnchorTimezone {
    fn date_of(&self, timestamp: i64) -> Option<NaiveDate> {
        let utc = DateTime::<Utc>::from_timestamp(timestamp, 0)?;
        Some(match self {
            AnchorTimezone::Local => utc.with_timezone(&Local).date_naive(),
            AnchorTimezone::Utc => utc.date_naive(),
            AnchorTimezone::Fixed(offset) => utc.with_timezone(offset).date_naive(),
        })
    }
}

/// SageDining client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Menu endpoint base URL.
    pub base_url: String,
    /// Identifier of the school whose menu to fetch.
    pub school_id: String,
    /// Provider-specific cardinality parameter, passed through verbatim
    /// (default: 0).
    pub cardinality: u32,
    /// Request timeout (default: 30 seconds).
    pub timeout: Duration,
    /// Timezone for interpreting the anchor timestamp (default: local).
    pub anchor_timezone: AnchorTimezone,
}

impl ClientConfig {
    /// Create a new client configuration.
    pub fn new(school_id: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            school_id: school_id.into(),
            cardinality: 0,
            timeout: Duration::from_secs(30),
            anchor_timezone: AnchorTimezone::Local,
        }
    }

    /// Override the menu endpoint base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the cardinality parameter.
    pub fn with_cardinality(mut self, cardinality: u32) -> Self {
        self.cardinality = cardinality;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the timezone used to interpret the anchor timestamp.
    pub fn with_anchor_timezone(mut self, tz: AnchorTimezone) -> Self {
        self.anchor_timezone = tz;
        self
    }
}

// Wire format of the provider response. Fields the library does not consume
// are ignored; fields it does consume are optional here so a structurally
// broken response surfaces as a named error instead of a decode failure.

#[derive(Debug, Deserialize)]
struct MenuResponse {
    menu: Option<MenuEnvelope>,
    unit: Option<Unit>,
    #[serde(rename = "menuList", default)]
    menu_list: Vec<MenuListEntry>,
}

#[derive(Debug, Deserialize)]
struct MenuEnvelope {
    config: Option<MenuConfig>,
    menu: Option<MenuBody>,
}

#[derive(Debug, Deserialize)]
struct MenuConfig {
    grid: Option<GridConfig>,
}

#[derive(Debug, Deserialize)]
struct GridConfig {
    #[serde(rename = "mealsServed")]
    meals_served: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct MenuBody {
    items: Option<MenuGrid>,
}

#[derive(Debug, Deserialize)]
struct Unit {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MenuListEntry {
    #[serde(rename = "menuFirstDate")]
    menu_first_date: Option<String>,
}

/// Grid indexed by week, day of week, meal slot, category section, item.
type MenuGrid = Vec<Vec<Vec<Vec<Vec<RawMenuItem>>>>>;

/// Cached state from one successful refresh. Grouping the four fields in one
/// struct behind an `Option` keeps them all set or all unset, never partial.
#[derive(Debug)]
struct MenuCache {
    grid: MenuGrid,
    menu_name: String,
    meals_served: serde_json::Value,
    anchor_date: NaiveDate,
}

impl MenuCache {
    /// Validate the whole response shape up front and build the cache, so a
    /// broken response never overwrites previously cached state.
    fn from_response(body: MenuResponse, tz: AnchorTimezone) -> Result<Self> {
        let envelope = body.menu.ok_or(SageError::NoMenusFound)?;

        let menu_name = body
            .unit
            .and_then(|u| u.name)
            .ok_or(SageError::MalformedResponse("unit.name"))?;

        let first_date = body
            .menu_list
            .into_iter()
            .next()
            .and_then(|e| e.menu_first_date)
            .ok_or(SageError::MalformedResponse("menuList[0].menuFirstDate"))?;
        let timestamp: i64 = first_date
            .trim()
            .parse()
            .map_err(|_| SageError::MalformedResponse("menuList[0].menuFirstDate"))?;
        let anchor_date = tz
            .date_of(timestamp)
            .ok_or(SageError::MalformedResponse("menuList[0].menuFirstDate"))?;

        let meals_served = envelope
            .config
            .and_then(|c| c.grid)
            .and_then(|g| g.meals_served)
            .ok_or(SageError::MalformedResponse("menu.config.grid.mealsServed"))?;

        let grid = envelope
            .menu
            .and_then(|m| m.items)
            .ok_or(SageError::MalformedResponse("menu.menu.items"))?;

        Ok(Self {
            grid,
            menu_name,
            meals_served,
            anchor_date,
        })
    }
}

/// Client for one school's SageDining menu.
///
/// # Example
///
/// ```no_run
/// use sagedining::{ClientConfig, Meal, MenuCategory, SageClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut client = SageClient::new(ClientConfig::new("SAGE_SCHOOL_ID"));
///     client.refresh().await?;
///
///     let today = chrono::Local::now().date_naive();
///     let lunch = client.categories_for_date(
///         today,
///         Meal::Lunch,
///         &[MenuCategory::StockExchange],
///     )?;
///     for item in &lunch[0] {
///         println!("{} ({})", item.name, item.health_rating);
///     }
///     Ok(())
/// }
/// ```
///
/// Lookups take `&self` and `refresh` takes `&mut self`; a client instance is
/// single-owner state and callers wanting shared access must serialize it.
pub struct SageClient {
    config: ClientConfig,
    http_client: HttpClient,
    cache: Option<MenuCache>,
}

impl SageClient {
    /// Create a new client for one school. No network traffic happens until
    /// [`refresh`](Self::refresh) is called.
    pub fn new(config: ClientConfig) -> Self {
        let http_client = HttpClient::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            http_client,
            cache: None,
        }
    }

    /// Fetch the menu from the provider and replace the cached state.
    ///
    /// Fails with [`SageError::NoMenusFound`] when the provider has no
    /// published menu for this school (invalid id or off-season). On any
    /// failure the previously cached state is left untouched.
    pub async fn refresh(&mut self) -> Result<()> {
        let url = query_url(
            &self.config.base_url,
            &self.config.school_id,
            self.config.cardinality,
        );
        debug!("refreshing menu cache for school {}", self.config.school_id);

        let response = self.http_client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SageError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed: MenuResponse = serde_json::from_str(&body)?;
        let cache = MenuCache::from_response(parsed, self.config.anchor_timezone)?;
        debug!(
            "cached menu '{}' with {} week(s) anchored at {}",
            cache.menu_name,
            cache.grid.len(),
            cache.anchor_date
        );
        self.cache = Some(cache);
        Ok(())
    }

    /// Name of the menu, from `unit.name`.
    pub fn menu_name(&self) -> Result<&str> {
        let cache = self.cache.as_ref().ok_or(SageError::MenuCacheNotPresent)?;
        Ok(&cache.menu_name)
    }

    /// The provider's meals-served grid configuration, kept opaque.
    pub fn meals_served(&self) -> Result<&serde_json::Value> {
        let cache = self.cache.as_ref().ok_or(SageError::MenuCacheNotPresent)?;
        Ok(&cache.meals_served)
    }

    /// The calendar date the grid's week 0 starts from.
    pub fn anchor_date(&self) -> Result<NaiveDate> {
        let cache = self.cache.as_ref().ok_or(SageError::MenuCacheNotPresent)?;
        Ok(cache.anchor_date)
    }

    /// Get the raw menu slot for a given date and meal.
    ///
    /// Returns the slot's category sections as stored in the grid, each a
    /// list of raw records. Dates before the anchor or past the cached grid's
    /// horizon fail with [`SageError::DateNotValid`].
    pub fn menu_for_date(&self, date: NaiveDate, meal: Meal) -> Result<&[Vec<RawMenuItem>]> {
        let cache = self.cache.as_ref().ok_or(SageError::MenuCacheNotPresent)?;

        if date < cache.anchor_date {
            return Err(SageError::DateNotValid);
        }
        // The +1 reproduces the provider's observed week-numbering: the
        // seventh day after the anchor already counts into the next week.
        let days_from_anchor = (date - cache.anchor_date).num_days() + 1;
        let week = (days_from_anchor / 7) as usize;
        if week >= cache.grid.len() {
            return Err(SageError::DateNotValid);
        }

        let day = Day::from_date(date);
        let slot = cache.grid[week]
            .get(day.index())
            .and_then(|row| row.get(meal.index()))
            .ok_or(SageError::MalformedResponse("menu.menu.items"))?;
        Ok(slot)
    }

    /// Get menu items for the requested categories on a given date and meal.
    ///
    /// The output is parallel to `categories`: requested order is preserved
    /// and duplicates are allowed. Any category with no section in the slot's
    /// data fails the whole lookup with [`SageError::CategoryNotValid`].
    pub fn categories_for_date(
        &self,
        date: NaiveDate,
        meal: Meal,
        categories: &[MenuCategory],
    ) -> Result<Vec<Vec<MenuItem>>> {
        let slot = self.menu_for_date(date, meal)?;
        let mut result = Vec::with_capacity(categories.len());
        for category in categories {
            let section = slot
                .get(category.index())
                .ok_or(SageError::CategoryNotValid(category.index()))?;
            result.push(section.iter().map(MenuItem::from).collect());
        }
        Ok(result)
    }
}
