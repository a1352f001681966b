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

//! End-to-end tests against a mock SageDining endpoint.

use chrono::NaiveDate;
use mockito::Matcher;
use sagedining::{
    AnchorTimezone, ClientConfig, HealthDot, Meal, MenuCategory, MenuItem, SageClient, SageError,
};

// 2024-01-07 00:00:00 UTC, a Sunday.
const ANCHOR_TS: &str = "1704585600";

/// One-week grid with a single Pizza item at Sunday / Lunch / section 0.
fn sample_response() -> serde_json::Value {
    let empty_slot: Vec<serde_json::Value> = vec![];
    let mut week = vec![];
    for day in 0..7 {
        let mut meals = vec![];
        for meal in 0..4 {
            if day == 0 && meal == 1 {
                meals.push(serde_json::json!([[{"t": "Pizza", "d": 3}]]));
            } else {
                meals.push(serde_json::json!([empty_slot]));
            }
        }
        week.push(serde_json::Value::Array(meals));
    }

    serde_json::json!({
        "menu": {
            "config": {"grid": {"mealsServed": ["breakfast", "lunch"]}},
            "menu": {"items": [week]}
        },
        "unit": {"name": "Example School"},
        "menuList": [{"menuFirstDate": ANCHOR_TS}]
    })
}

fn client_for(server: &mockito::Server) -> SageClient {
    let config = ClientConfig::new("SAGE01")
        .with_base_url(server.url())
        .with_anchor_timezone(AnchorTimezone::Utc);
    SageClient::new(config)
}

#[tokio::test]
async fn refresh_and_lookup_round_trip() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("unitId".into(), "SAGE01".into()),
            Matcher::UrlEncoded("mbMenuCardinality".into(), "0".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(sample_response().to_string())
        .create_async()
        .await;

    let mut client = client_for(&server);
    client.refresh().await.unwrap();
    mock.assert_async().await;

    assert_eq!(client.menu_name().unwrap(), "Example School");
    assert_eq!(
        client.anchor_date().unwrap(),
        NaiveDate::from_ymd_opt(2024, 1, 7).unwrap()
    );
    assert!(client.meals_served().unwrap().is_array());

    let sunday = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
    let sections = client
        .categories_for_date(sunday, Meal::Lunch, &[MenuCategory::StockExchange])
        .unwrap();
    assert_eq!(
        sections,
        vec![vec![MenuItem {
            name: "Pizza".into(),
            health_rating: HealthDot::Green,
        }]]
    );
}

#[tokio::test]
async fn refresh_without_menu_field_is_no_menus_found() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"unit": {"name": "Example School"}}"#)
        .create_async()
        .await;

    let mut client = client_for(&server);
    let result = client.refresh().await;
    assert!(matches!(result, Err(SageError::NoMenusFound)));

    // A failed refresh must leave the client without usable state.
    assert!(matches!(
        client.menu_name(),
        Err(SageError::MenuCacheNotPresent)
    ));
}

#[tokio::test]
async fn refresh_surfaces_http_errors() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("service unavailable")
        .create_async()
        .await;

    let mut client = client_for(&server);
    let result = client.refresh().await;
    match result {
        Err(SageError::Api { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "service unavailable");
        }
        other => panic!("expected Api error, got {:?}", other.err()),
    }
}

#[tokio::test]
async fn failed_refresh_keeps_previous_cache() {
    let mut server = mockito::Server::new_async().await;
    let good = server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(sample_response().to_string())
        .create_async()
        .await;

    let mut client = client_for(&server);
    client.refresh().await.unwrap();
    good.remove_async().await;

    server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"unit": {"name": "Example School"}}"#)
        .create_async()
        .await;

    let result = client.refresh().await;
    assert!(matches!(result, Err(SageError::NoMenusFound)));
    // Cached state from the earlier successful refresh survives.
    assert_eq!(client.menu_name().unwrap(), "Example School");
    let sunday = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
    assert!(client.menu_for_date(sunday, Meal::Lunch).is_ok());
}
