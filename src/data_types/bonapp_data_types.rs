//! Raw wire types for the BonApp API. These mirror the provider's JSON as
//! faithfully as needed, quirks included; the normalizer turns them into the
//! shared schema.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

use crate::data_types::{CorIcon, CorIconMap};

/// Response of `/menus?cafe=<id>`.
#[derive(Deserialize, Debug, Default)]
pub struct BonAppMenu {
    #[serde(default)]
    pub days: Vec<MenuDay>,
    #[serde(default)]
    pub items: BTreeMap<String, RawMenuItem>,
    #[serde(default, deserialize_with = "de_cor_icon_map")]
    pub cor_icons: CorIconMap,
}

#[derive(Deserialize, Debug, Default)]
pub struct MenuDay {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub cafes: BTreeMap<String, MenuCafe>,
}

/// BonApp nests dayparts one level deeper than you'd expect: a list of
/// daypart lists, of which only the first ever carries data.
#[derive(Deserialize, Debug, Default)]
pub struct MenuCafe {
    #[serde(default)]
    pub dayparts: Vec<Vec<RawDaypart>>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct RawDaypart {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub starttime: String,
    #[serde(default)]
    pub endtime: String,
    #[serde(default)]
    pub abbreviation: String,
    #[serde(default)]
    pub stations: Vec<RawStation>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct RawStation {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct RawMenuItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub station: String,
    #[serde(default, deserialize_with = "de_loose_bool")]
    pub special: bool,
    #[serde(default, deserialize_with = "de_cor_icon_keys")]
    pub cor_icon: Vec<String>,
    #[serde(default)]
    pub nutrition_link: String,
}

/// Response of `/cafes?cafe=<id>`; carries the calendar with closure
/// messages.
#[derive(Deserialize, Debug, Default)]
pub struct BonAppCafeInfo {
    #[serde(default)]
    pub cafes: BTreeMap<String, CafeDetails>,
}

#[derive(Deserialize, Debug, Default)]
pub struct CafeDetails {
    #[serde(default)]
    pub days: Vec<CafeDay>,
}

#[derive(Deserialize, Debug, Default)]
pub struct CafeDay {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, deserialize_with = "de_message")]
    pub message: Option<String>,
}

// BonApp serializes empty maps as `[]` and non-empty ones as objects.
// The same shape shows up on `cor_icons` and per-item `cor_icon`.

fn de_cor_icon_map<'de, D>(deserializer: D) -> Result<CorIconMap, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MapOrList {
        Map(BTreeMap<String, CorIcon>),
        List(Vec<CorIcon>),
    }

    Ok(match MapOrList::deserialize(deserializer)? {
        MapOrList::Map(map) => map,
        MapOrList::List(_) => CorIconMap::new(),
    })
}

fn de_cor_icon_keys<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MapOrList {
        Map(BTreeMap<String, String>),
        List(Vec<String>),
    }

    Ok(match MapOrList::deserialize(deserializer)? {
        MapOrList::Map(map) => map.into_keys().collect(),
        MapOrList::List(list) => list,
    })
}

/// `special` arrives as `0`/`1`, `"0"`/`"1"` or an actual bool depending on
/// the endpoint's mood.
fn de_loose_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Bool(bool),
        Int(i64),
        Str(String),
    }

    Ok(match Loose::deserialize(deserializer)? {
        Loose::Bool(b) => b,
        Loose::Int(n) => n != 0,
        Loose::Str(s) => s == "1" || s == "true",
    })
}

/// A closed day's `message` is a string when set and literal `false` when
/// not.
fn de_message<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Str(String),
        Bool(bool),
        None,
    }

    Ok(match Loose::deserialize(deserializer)? {
        Loose::Str(s) if !s.is_empty() => Some(s),
        _ => None,
    })
}
