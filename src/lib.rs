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

//! # SageDining client for Rust
//!
//! Client library for the SageDining weekly menu endpoint: fetch a school's
//! menu grid and look up dishes by date, meal slot, and category.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sagedining::{ClientConfig, Meal, MenuCategory, SageClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create a client for one school and pull the published menu.
//!     let mut client = SageClient::new(ClientConfig::new("SAGE_SCHOOL_ID"));
//!     client.refresh().await?;
//!
//!     println!("Menu: {}", client.menu_name()?);
//!
//!     // Look up today's lunch in a couple of sections.
//!     let today = chrono::Local::now().date_naive();
//!     let sections = client.categories_for_date(
//!         today,
//!         Meal::Lunch,
//!         &[MenuCategory::StockExchange, MenuCategory::ClassicCuts],
//!     )?;
//!     for section in &sections {
//!         for item in section {
//!             println!("{} ({})", item.name, item.health_rating);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! All lookups resolve against the cached grid relative to the provider's
//! anchor date; every failure mode is a distinct [`SageError`] variant so
//! callers can branch on the taxonomy.

mod client;
mod types;

pub use client::{
    query_url, AnchorTimezone, ClientConfig, Result, SageClient, SageError, DEFAULT_BASE_URL,
};
pub use types::*;
