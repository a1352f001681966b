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

//! SageDining domain types
//!
//! Closed enumerations for the provider's fixed symbolic domains (meal slot,
//! day of week, menu section, health dot) and the `MenuItem` DTO built from
//! raw provider records.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::client::SageError;

/// Meal serving time within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum Meal {
    #[default]
    Breakfast = 0,
    Lunch = 1,
    Snack = 2,
    Dinner = 3,
}

impl Meal {
    /// Get the string representation of the meal slot.
    pub fn as_str(&self) -> &'static str {
        match self {
            Meal::Breakfast => "breakfast",
            Meal::Lunch => "lunch",
            Meal::Snack => "snack",
            Meal::Dinner => "dinner",
        }
    }

    /// Index of this meal within a day's grid row.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Meal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<i64> for Meal {
    type Error = SageError;

    /// Validate a raw meal ordinal; anything outside [0, 4) is rejected.
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Meal::Breakfast),
            1 => Ok(Meal::Lunch),
            2 => Ok(Meal::Snack),
            3 => Ok(Meal::Dinner),
            _ => Err(SageError::MealNotValid),
        }
    }
}

/// Day of the week in the grid's Sunday-first numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Day {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl Day {
    /// Day of week for a calendar date, remapped so Sunday is 0.
    ///
    /// chrono numbers Monday as 0; the grid wants `(weekday + 1) % 7`, which
    /// is exactly days-from-Sunday.
    pub fn from_date(date: NaiveDate) -> Self {
        match date.weekday().num_days_from_sunday() {
            0 => Day::Sunday,
            1 => Day::Monday,
            2 => Day::Tuesday,
            3 => Day::Wednesday,
            4 => Day::Thursday,
            5 => Day::Friday,
            _ => Day::Saturday,
        }
    }

    /// Index of this day within a week's grid row.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Sections of a Sage menu, in the provider's fixed ordering.
///
/// The labels are the provider's own; the ordinal doubles as the section
/// index within a meal slot's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum MenuCategory {
    StockExchange = 0,
    Improvisations = 1,
    ClassicCuts = 2,
    MainIngredient = 3,
    Seasonings = 4,
    Crossroads = 5,
    MangiaMangia = 6,
    TransitFare = 7,
    Ps = 8,
    Splashes = 9,
    Variable = 10,
    Paquitos = 11,
    PachificThyme = 12,
    Vegitas = 13,
}

impl MenuCategory {
    /// Section index within a meal slot's data.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl TryFrom<i64> for MenuCategory {
    type Error = SageError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(MenuCategory::StockExchange),
            1 => Ok(MenuCategory::Improvisations),
            2 => Ok(MenuCategory::ClassicCuts),
            3 => Ok(MenuCategory::MainIngredient),
            4 => Ok(MenuCategory::Seasonings),
            5 => Ok(MenuCategory::Crossroads),
            6 => Ok(MenuCategory::MangiaMangia),
            7 => Ok(MenuCategory::TransitFare),
            8 => Ok(MenuCategory::Ps),
            9 => Ok(MenuCategory::Splashes),
            10 => Ok(MenuCategory::Variable),
            11 => Ok(MenuCategory::Paquitos),
            12 => Ok(MenuCategory::PachificThyme),
            13 => Ok(MenuCategory::Vegitas),
            other => Err(SageError::CategoryNotValid(other.max(0) as usize)),
        }
    }
}

/// Sage nutrition dot rating attached to each menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum HealthDot {
    /// No rating published for the item.
    #[default]
    Nil = 0,
    Red = 1,
    Yellow = 2,
    Green = 3,
    /// Sentinel the provider uses for "all ratings".
    All = 6,
}

impl HealthDot {
    /// Map a raw rating code from the Sage JSON to a health dot.
    ///
    /// Codes 1, 2, 3 are red, yellow, green; 6 is the "all" sentinel; every
    /// other code collapses to [`HealthDot::Nil`].
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => HealthDot::Red,
            2 => HealthDot::Yellow,
            3 => HealthDot::Green,
            6 => HealthDot::All,
            _ => HealthDot::Nil,
        }
    }

    /// Raw code as stored in the Sage JSON.
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Human-readable name of the rating.
    pub fn readable_name(&self) -> &'static str {
        match self {
            HealthDot::Red => "red",
            HealthDot::Yellow => "yellow",
            HealthDot::Green => "green",
            HealthDot::All => "all",
            HealthDot::Nil => "nil",
        }
    }
}

impl std::fmt::Display for HealthDot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.readable_name())
    }
}

/// One raw menu record as stored in the provider grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMenuItem {
    /// Item title.
    #[serde(rename = "t")]
    pub title: String,
    /// Raw health dot code.
    #[serde(rename = "d", default)]
    pub dot: i64,
}

/// One dish on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub health_rating: HealthDot,
}

impl From<&RawMenuItem> for MenuItem {
    fn from(raw: &RawMenuItem) -> Self {
        Self {
            name: raw.title.clone(),
            health_rating: HealthDot::from_code(raw.dot),
        }
    }
}

impl std::fmt::Display for MenuItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_codes_map_to_named_ratings() {
        assert_eq!(HealthDot::from_code(1), HealthDot::Red);
        assert_eq!(HealthDot::from_code(2), HealthDot::Yellow);
        assert_eq!(HealthDot::from_code(3), HealthDot::Green);
        assert_eq!(HealthDot::from_code(6), HealthDot::All);
    }

    #[test]
    fn unknown_dot_codes_collapse_to_nil() {
        for code in [0, 4, 5, 7, -1, 99] {
            assert_eq!(HealthDot::from_code(code), HealthDot::Nil);
        }
    }

    #[test]
    fn readable_names() {
        assert_eq!(HealthDot::Red.readable_name(), "red");
        assert_eq!(HealthDot::Yellow.readable_name(), "yellow");
        assert_eq!(HealthDot::Green.readable_name(), "green");
        assert_eq!(HealthDot::All.readable_name(), "all");
        assert_eq!(HealthDot::Nil.readable_name(), "nil");
    }

    #[test]
    fn dot_round_trips_through_raw_code() {
        for dot in [
            HealthDot::Red,
            HealthDot::Yellow,
            HealthDot::Green,
            HealthDot::All,
            HealthDot::Nil,
        ] {
            assert_eq!(HealthDot::from_code(dot.code() as i64), dot);
        }
    }

    #[test]
    fn meal_ordinals_validate() {
        assert_eq!(Meal::try_from(0).unwrap(), Meal::Breakfast);
        assert_eq!(Meal::try_from(3).unwrap(), Meal::Dinner);
        assert!(matches!(Meal::try_from(4), Err(SageError::MealNotValid)));
        assert!(matches!(Meal::try_from(-1), Err(SageError::MealNotValid)));
    }

    #[test]
    fn day_numbering_is_sunday_first() {
        // 2024-01-07 is a Sunday.
        let sunday = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        assert_eq!(Day::from_date(sunday), Day::Sunday);
        assert_eq!(Day::from_date(sunday).index(), 0);

        let monday = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        assert_eq!(Day::from_date(monday), Day::Monday);

        let saturday = NaiveDate::from_ymd_opt(2024, 1, 13).unwrap();
        assert_eq!(Day::from_date(saturday).index(), 6);
    }

    #[test]
    fn category_ordinals_cover_provider_sections() {
        assert_eq!(MenuCategory::StockExchange.index(), 0);
        assert_eq!(MenuCategory::Vegitas.index(), 13);
        assert_eq!(
            MenuCategory::try_from(6).unwrap(),
            MenuCategory::MangiaMangia
        );
        assert!(matches!(
            MenuCategory::try_from(14),
            Err(SageError::CategoryNotValid(14))
        ));
    }

    #[test]
    fn menu_item_wraps_raw_record() {
        let raw = RawMenuItem {
            title: "Pizza".into(),
            dot: 3,
        };
        let item = MenuItem::from(&raw);
        assert_eq!(item.name, "Pizza");
        assert_eq!(item.health_rating, HealthDot::Green);
        assert_eq!(item.to_string(), "Pizza");
    }
}
