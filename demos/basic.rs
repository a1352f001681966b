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

//! SageDining Client Basic Example
//!
//! Fetches a school's menu and prints today's lunch.

use sagedining::{ClientConfig, Meal, MenuCategory, SageClient, SageError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let school_id = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "SAGE_SCHOOL_ID".to_string());

    println!("SageDining Client Example\n");

    // 1. Create a client and pull the published menu
    println!("1. Refreshing menu for school {}...", school_id);
    let mut client = SageClient::new(ClientConfig::new(school_id));
    match client.refresh().await {
        Ok(()) => println!("   Menu: {}\n", client.menu_name()?),
        Err(SageError::NoMenusFound) => {
            println!("   No published menu for this school\n");
            return Ok(());
        }
        Err(e) => {
            println!("   Warning: {}\n", e);
            return Ok(());
        }
    }

    println!("   Week 0 starts on {}\n", client.anchor_date()?);

    // 2. Look up today's lunch in a couple of sections
    let today = chrono::Local::now().date_naive();
    println!("2. Lunch for {}...", today);
    match client.categories_for_date(
        today,
        Meal::Lunch,
        &[MenuCategory::StockExchange, MenuCategory::ClassicCuts],
    ) {
        Ok(sections) => {
            for section in &sections {
                for item in section {
                    println!("   {} ({})", item.name, item.health_rating);
                }
            }
        }
        Err(SageError::DateNotValid) => {
            println!("   Today is outside the published menu horizon")
        }
        Err(e) => println!("   Warning: {}", e),
    }

    println!("\nExample complete!");
    Ok(())
}
