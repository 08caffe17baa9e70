//! The static-feed variant: one request against a GitHub-hosted JSON file.
//!
//! A copy of the feed ships inside the crate. Local/dev mode serves it
//! without touching the network; hosts that prefer stale data over an error
//! can reach it through [`bundled_menu`] and fall back themselves. Remote
//! failures surface as errors, the same policy as the BonApp variant.

use std::time::Instant;

use super::{get_json, MenuClient};
use crate::config::TrimRules;
use crate::constants::{ALL_DAY_END, ALL_DAY_START, SYNTHETIC_MEAL_LABEL};
use crate::data_types::github_data_types::GithubMenu;
use crate::data_types::{FoodItemMap, Meal, MenuResponse, StationMenu};
use crate::errors::MenuError;
use crate::normalizer::{upgrade_menu_item, upgrade_station};

const FALLBACK_MENU_JSON: &str = include_str!("../data/fallback_menu.json");

pub(crate) async fn fetch(client: &MenuClient, menu_url: &str) -> Result<MenuResponse, MenuError> {
    if client.config.local_mode {
        log::debug!("local mode, serving the bundled menu");
        return Ok(assemble(&bundled_menu(), &client.config.trim_rules));
    }

    let started = Instant::now();
    match get_json::<GithubMenu>(client, menu_url).await {
        Ok(menu) => {
            log::debug!("static feed: {:.2?}", started.elapsed());
            Ok(assemble(&menu, &client.config.trim_rules))
        }
        Err(err) => {
            client.analytics.track_exception(&err.to_string());
            client.reporter.notify(&err);
            Err(err)
        }
    }
}

/// The menu baked into the crate at build time.
pub fn bundled_menu() -> GithubMenu {
    serde_json::from_str(FALLBACK_MENU_JSON).expect("bundled fallback menu is valid json")
}

/// Pure second half of the fetch: upgrade the shorthand items and stations,
/// attach items to stations by label, and wrap everything in one synthetic
/// all-day meal (the feed has no dayparts of its own).
pub(crate) fn assemble(menu: &GithubMenu, rules: &TrimRules) -> MenuResponse {
    let upgraded: Vec<_> = menu
        .data
        .food_items
        .iter()
        .enumerate()
        .map(|(index, raw)| upgrade_menu_item(raw, index, rules))
        .collect();

    let stations: Vec<StationMenu> = menu
        .data
        .station_menus
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            let mut station = upgrade_station(raw, index, rules);
            station.items = upgraded
                .iter()
                .filter(|item| item.station == station.label)
                .map(|item| item.id.clone())
                .collect();
            station
        })
        .collect();

    let food_items: FoodItemMap = upgraded
        .into_iter()
        .map(|item| (item.id.clone(), item))
        .collect();

    let meals = vec![Meal {
        label: SYNTHETIC_MEAL_LABEL.to_string(),
        starttime: ALL_DAY_START.to_string(),
        endtime: ALL_DAY_END.to_string(),
        stations,
    }];

    MenuResponse {
        cafe_message: None,
        food_items,
        meals,
        cor_icons: menu.data.cor_icons.clone(),
    }
}
