//! Raw wire types for the static GitHub-hosted feed. The feed is a
//! hand-maintained shorthand of the BonApp shape: items carry no ids, station
//! menus carry no item lists. The normalizer's upgrade functions fill the
//! gaps.

use serde::Deserialize;

use crate::data_types::CorIconMap;

/// The feed wraps its payload in a `data` envelope.
#[derive(Deserialize, Debug, Default)]
pub struct GithubMenu {
    #[serde(default)]
    pub data: GithubMenuData,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct GithubMenuData {
    pub food_items: Vec<GithubMenuItem>,
    pub station_menus: Vec<GithubStation>,
    pub cor_icons: CorIconMap,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct GithubMenuItem {
    pub label: String,
    pub description: String,
    pub station: String,
    pub special: bool,
    pub cor_icon: Vec<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct GithubStation {
    pub label: String,
    pub note: String,
    pub price: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorthand_feed_decodes_with_missing_fields() {
        let menu: GithubMenu = serde_json::from_str(
            r#"{
                "data": {
                    "foodItems": [{"label": "Pizza", "station": "Oven"}],
                    "stationMenus": [{"label": "Oven"}]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(menu.data.food_items.len(), 1);
        assert_eq!(menu.data.food_items[0].label, "Pizza");
        assert!(!menu.data.food_items[0].special);
        assert!(menu.data.cor_icons.is_empty());
    }
}
