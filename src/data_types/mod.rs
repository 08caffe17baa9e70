pub mod bonapp_data_types;
pub mod github_data_types;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Normalized food items keyed by id for O(log n) dereference. A `BTreeMap`
/// keeps iteration order stable across fetches of identical data.
pub type FoodItemMap = BTreeMap<String, FoodItem>;

/// Dietary/allergen badges keyed by the provider's short code. Lookup-only.
pub type CorIconMap = BTreeMap<String, CorIcon>;

/// One dish, fully normalized: label and station entity-decoded and
/// de-junked, description reduced to plain text. Immutable once built.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FoodItem {
    pub id: String,
    pub label: String,
    pub description: String,
    pub station: String,
    /// Badge keys into the response's [`CorIconMap`].
    #[serde(default)]
    pub cor_icon: Vec<String>,
    #[serde(default)]
    pub special: bool,
    /// Carried through untouched; the pipeline never dereferences it.
    #[serde(default)]
    pub nutrition_link: String,
}

/// A serving area within one meal. `items` holds [`FoodItem`] ids in display
/// order; ids that fail to resolve are dropped at grouping time, never an
/// error.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StationMenu {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub price: String,
    pub items: Vec<String>,
}

/// A daypart: one named, time-boxed slice of the cafeteria's day.
/// `starttime`/`endtime` keep the provider's `"H:MM"` strings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Meal {
    pub label: String,
    pub starttime: String,
    pub endtime: String,
    pub stations: Vec<StationMenu>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CorIcon {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
}

/// Which upstream to hit, and how. Hosts match exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuRequest {
    BonApp {
        cafe_id: String,
        /// Discard the provider's station grouping and regroup every item
        /// by its own `station` field.
        ignore_provided_menus: bool,
    },
    Github {
        menu_url: String,
    },
}

/// The assembled result of one fetch. Replaces prior state wholesale; there
/// is no incremental update.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct MenuResponse {
    /// Why there is no menu right now ("Closed for Christmas Break"), if
    /// the provider calendar says so.
    pub cafe_message: Option<String>,
    pub food_items: FoodItemMap,
    pub meals: Vec<Meal>,
    pub cor_icons: CorIconMap,
}
