//! The filter model and engine. Filters are caller-supplied configuration;
//! this module only executes them, it never decides what they mean.

use serde::{Deserialize, Serialize};

use crate::data_types::{FoodItem, FoodItemMap, MenuResponse, StationMenu};

/// The item fields a filter can address. `MealLabel` never constrains items
/// (items carry no meal); it exists so a list filter can drive
/// [`crate::assembler::choose_meal`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    Station,
    Label,
    Special,
    CorIcon,
    MealLabel,
}

impl FilterField {
    /// The item's values for this field, or `None` when the field does not
    /// apply to items at all.
    fn item_values(self, item: &FoodItem) -> Option<Vec<String>> {
        match self {
            FilterField::Station => Some(vec![item.station.clone()]),
            FilterField::Label => Some(vec![item.label.clone()]),
            FilterField::Special => {
                Some(vec![if item.special { "true" } else { "false" }.to_string()])
            }
            FilterField::CorIcon => Some(item.cor_icon.clone()),
            FilterField::MealLabel => None,
        }
    }
}

/// On/off: an enabled toggle keeps only items whose field equals the
/// configured true-equivalent value.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ToggleFilter {
    /// Stable identifier for the host UI.
    pub key: String,
    pub label: String,
    pub enabled: bool,
    pub field: FilterField,
    pub true_equivalent: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ListMode {
    Or,
    And,
}

/// Multi-select: membership of the selected values is combined per the
/// filter's own mode. An enabled OR list with nothing selected admits no
/// item; an enabled AND list with nothing selected admits every item
/// (vacuously).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ListFilter {
    pub key: String,
    pub title: String,
    pub enabled: bool,
    pub field: FilterField,
    pub mode: ListMode,
    pub options: Vec<String>,
    pub selected: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Filter {
    Toggle(ToggleFilter),
    List(ListFilter),
}

impl Filter {
    pub fn enabled(&self) -> bool {
        match self {
            Filter::Toggle(toggle) => toggle.enabled,
            Filter::List(list) => list.enabled,
        }
    }
}

/// An item passes iff it satisfies every enabled filter. Disabled filters
/// impose no constraint.
pub fn apply_filters_to_item(filters: &[Filter], item: &FoodItem) -> bool {
    filters.iter().all(|filter| filter_passes(filter, item))
}

fn filter_passes(filter: &Filter, item: &FoodItem) -> bool {
    match filter {
        Filter::Toggle(toggle) => {
            if !toggle.enabled {
                return true;
            }
            match toggle.field.item_values(item) {
                Some(values) => values.iter().any(|value| *value == toggle.true_equivalent),
                None => true,
            }
        }
        Filter::List(list) => {
            if !list.enabled {
                return true;
            }
            let Some(values) = list.field.item_values(item) else {
                return true;
            };
            match list.mode {
                ListMode::Or => list.selected.iter().any(|sel| values.contains(sel)),
                ListMode::And => list.selected.iter().all(|sel| values.contains(sel)),
            }
        }
    }
}

/// One display-ready section: a station label plus the items that survived
/// filtering, in the station's own order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MenuSection {
    pub title: String,
    pub items: Vec<FoodItem>,
}

/// Dereference each station's item ids (dropping ids that fail to resolve),
/// filter, and keep only stations with at least one surviving item. Station
/// and item order are preserved.
pub fn group_menu_data(
    filters: &[Filter],
    food_items: &FoodItemMap,
    stations: &[StationMenu],
) -> Vec<MenuSection> {
    stations
        .iter()
        .filter_map(|menu| {
            let items: Vec<FoodItem> = menu
                .items
                .iter()
                .filter_map(|id| food_items.get(id))
                .filter(|item| apply_filters_to_item(filters, item))
                .cloned()
                .collect();

            (!items.is_empty()).then(|| MenuSection {
                title: menu.label.clone(),
                items,
            })
        })
        .collect()
}

/// The filter set a host starts from, built out of the response itself:
/// a specials toggle, a dietary-restriction list over the response's cor
/// icons, a stations list, and a meal picker. Everything starts disabled,
/// so a fresh build filters nothing.
pub fn build_default_filters(response: &MenuResponse) -> Vec<Filter> {
    let mut stations: Vec<String> = Vec::new();
    for meal in &response.meals {
        for station in &meal.stations {
            if !stations.contains(&station.label) {
                stations.push(station.label.clone());
            }
        }
    }

    let icons: Vec<String> = response.cor_icons.keys().cloned().collect();
    let meal_labels: Vec<String> = response.meals.iter().map(|meal| meal.label.clone()).collect();

    vec![
        Filter::Toggle(ToggleFilter {
            key: "specials".to_string(),
            label: "Only Show Specials".to_string(),
            enabled: false,
            field: FilterField::Special,
            true_equivalent: "true".to_string(),
        }),
        Filter::List(ListFilter {
            key: "restrictions".to_string(),
            title: "Dietary Restrictions".to_string(),
            enabled: false,
            field: FilterField::CorIcon,
            mode: ListMode::And,
            options: icons,
            selected: Vec::new(),
        }),
        Filter::List(ListFilter {
            key: "stations".to_string(),
            title: "Stations".to_string(),
            enabled: false,
            field: FilterField::Station,
            mode: ListMode::Or,
            options: stations.clone(),
            selected: stations,
        }),
        Filter::List(ListFilter {
            key: "meals".to_string(),
            title: "Menus".to_string(),
            enabled: false,
            field: FilterField::MealLabel,
            mode: ListMode::Or,
            options: meal_labels,
            selected: Vec::new(),
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::{Meal, MenuResponse};

    fn item(id: &str, station: &str, special: bool, icons: &[&str]) -> FoodItem {
        FoodItem {
            id: id.to_string(),
            label: format!("item {id}"),
            description: String::new(),
            station: station.to_string(),
            cor_icon: icons.iter().map(|s| s.to_string()).collect(),
            special,
            nutrition_link: String::new(),
        }
    }

    fn toggle(enabled: bool) -> Filter {
        Filter::Toggle(ToggleFilter {
            key: "specials".to_string(),
            label: "Only Show Specials".to_string(),
            enabled,
            field: FilterField::Special,
            true_equivalent: "true".to_string(),
        })
    }

    fn list(enabled: bool, field: FilterField, mode: ListMode, selected: &[&str]) -> Filter {
        Filter::List(ListFilter {
            key: "list".to_string(),
            title: "List".to_string(),
            enabled,
            field,
            mode,
            options: Vec::new(),
            selected: selected.iter().map(|s| s.to_string()).collect(),
        })
    }

    #[test]
    fn all_filters_disabled_passes_every_item() {
        let filters = vec![
            toggle(false),
            list(false, FilterField::Station, ListMode::Or, &[]),
            list(false, FilterField::CorIcon, ListMode::And, &["4"]),
        ];

        for candidate in [
            item("1", "Grill", false, &[]),
            item("2", "Pasta", true, &["4", "9"]),
            item("3", "", false, &["1"]),
        ] {
            assert!(apply_filters_to_item(&filters, &candidate));
        }
    }

    #[test]
    fn enabled_toggle_keeps_only_matching_items() {
        let filters = vec![toggle(true)];
        assert!(apply_filters_to_item(&filters, &item("1", "Grill", true, &[])));
        assert!(!apply_filters_to_item(&filters, &item("2", "Grill", false, &[])));
    }

    #[test]
    fn or_list_passes_on_any_selected_value() {
        let filters = vec![list(
            true,
            FilterField::Station,
            ListMode::Or,
            &["Grill", "Pasta"],
        )];
        assert!(apply_filters_to_item(&filters, &item("1", "Grill", false, &[])));
        assert!(!apply_filters_to_item(&filters, &item("2", "Salad Bar", false, &[])));
    }

    #[test]
    fn and_list_requires_every_selected_value() {
        let filters = vec![list(true, FilterField::CorIcon, ListMode::And, &["4", "9"])];
        assert!(apply_filters_to_item(&filters, &item("1", "Grill", false, &["4", "9", "1"])));
        assert!(!apply_filters_to_item(&filters, &item("2", "Grill", false, &["4"])));
    }

    #[test]
    fn enabled_filters_are_anded_together() {
        let filters = vec![
            toggle(true),
            list(true, FilterField::Station, ListMode::Or, &["Grill"]),
        ];
        assert!(apply_filters_to_item(&filters, &item("1", "Grill", true, &[])));
        assert!(!apply_filters_to_item(&filters, &item("2", "Grill", false, &[])));
        assert!(!apply_filters_to_item(&filters, &item("3", "Pasta", true, &[])));
    }

    fn sample_map() -> FoodItemMap {
        [
            item("1", "Grill", true, &[]),
            item("2", "Grill", false, &[]),
            item("3", "Pasta", false, &["4"]),
        ]
        .into_iter()
        .map(|item| (item.id.clone(), item))
        .collect()
    }

    fn sample_stations() -> Vec<StationMenu> {
        vec![
            StationMenu {
                id: "0".to_string(),
                label: "Grill".to_string(),
                note: String::new(),
                price: String::new(),
                items: vec!["1".to_string(), "2".to_string(), "missing".to_string()],
            },
            StationMenu {
                id: "1".to_string(),
                label: "Pasta".to_string(),
                note: String::new(),
                price: String::new(),
                items: vec!["3".to_string()],
            },
        ]
    }

    #[test]
    fn grouping_drops_dangling_ids_silently() {
        let sections = group_menu_data(&[], &sample_map(), &sample_stations());
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].items.len(), 2);
    }

    #[test]
    fn grouping_never_emits_an_empty_section() {
        // specials-only filters Pasta down to nothing
        let sections = group_menu_data(&[toggle(true)], &sample_map(), &sample_stations());
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Grill");
        assert!(sections.iter().all(|section| !section.items.is_empty()));
    }

    #[test]
    fn grouping_preserves_station_and_item_order() {
        let sections = group_menu_data(&[], &sample_map(), &sample_stations());
        assert_eq!(sections[0].title, "Grill");
        assert_eq!(sections[1].title, "Pasta");
        let ids: Vec<&str> = sections[0].items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn default_filters_start_disabled_and_cover_the_response() {
        let response = MenuResponse {
            cafe_message: None,
            food_items: sample_map(),
            meals: vec![Meal {
                label: "Lunch".to_string(),
                starttime: "11:00".to_string(),
                endtime: "13:30".to_string(),
                stations: sample_stations(),
            }],
            cor_icons: [("4".to_string(), Default::default())].into_iter().collect(),
        };

        let filters = build_default_filters(&response);
        assert!(filters.iter().all(|filter| !filter.enabled()));

        // identity property holds on a fresh build
        for item in response.food_items.values() {
            assert!(apply_filters_to_item(&filters, item));
        }
    }

    #[test]
    fn filters_round_trip_through_their_wire_shape() {
        let json = serde_json::to_value(&toggle(true)).unwrap();
        assert_eq!(json["type"], "toggle");
        let back: Filter = serde_json::from_value(json).unwrap();
        assert_eq!(back, toggle(true));
    }
}
