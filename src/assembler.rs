//! Meal and station assembly: picks the applicable calendar message,
//! reconstructs station groupings, and chooses the meal for "now".
//!
//! "now" is always an explicit argument, supplied by the caller in the
//! provider's reference timezone. Nothing here reads the device clock.

use chrono::{NaiveDateTime, NaiveTime};
use regex_lite::Regex;

use crate::constants::{
    ALL_DAY_END, ALL_DAY_START, CLOSED_TODAY_MSG, NO_MENU_MSG, SYNTHETIC_MEAL_LABEL,
};
use crate::data_types::bonapp_data_types::{BonAppCafeInfo, BonAppMenu, RawDaypart, RawStation};
use crate::data_types::{FoodItemMap, Meal, StationMenu};
use crate::filters::{Filter, FilterField};
use crate::normalizer::lax_title_case;

/// Look up today in the cafe calendar. Returns exactly one message class:
/// the no-menu message when the cafe is absent from the response, the
/// closed message (provider-supplied when present, verbatim) when today is
/// missing or marked closed, and `None` on an ordinary open day.
pub fn find_cafe_message(
    cafe_id: &str,
    cafe_info: &BonAppCafeInfo,
    now: NaiveDateTime,
) -> Option<String> {
    let cafe = match cafe_info.cafes.get(cafe_id) {
        Some(cafe) => cafe,
        None => return Some(NO_MENU_MSG.to_string()),
    };

    let today = now.date().format("%Y-%m-%d").to_string();
    match cafe.days.iter().find(|day| day.date == today) {
        None => Some(CLOSED_TODAY_MSG.to_string()),
        Some(day) if day.status == "closed" => Some(
            day.message
                .clone()
                .unwrap_or_else(|| CLOSED_TODAY_MSG.to_string()),
        ),
        Some(_) => None,
    }
}

/// Ignore whatever grouping the provider sent and partition all known items
/// by their own `station` field, in first-seen order, with synthetic
/// sequential ids.
pub fn build_custom_station_menu(food_items: &FoodItemMap) -> Vec<StationMenu> {
    let mut stations: Vec<StationMenu> = Vec::new();

    for item in food_items.values() {
        match stations.iter_mut().find(|menu| menu.label == item.station) {
            Some(menu) => menu.items.push(item.id.clone()),
            None => stations.push(StationMenu {
                id: stations.len().to_string(),
                label: item.station.clone(),
                note: String::new(),
                price: String::new(),
                items: vec![item.id.clone()],
            }),
        }
    }

    stations
}

/// Build the meal list for day 0 of the response (the pipeline only ever
/// requests a single day). Zero dayparts means the provider grouping cannot
/// be used at all: one synthetic all-day meal is substituted and regrouping
/// is forced on. A missing day or cafe degrades the same way instead of
/// erroring.
pub fn get_meals(
    cafe_menu: &BonAppMenu,
    cafe_id: &str,
    ignore_provided_menus: bool,
    food_items: &FoodItemMap,
) -> Vec<Meal> {
    let dayparts = cafe_menu
        .days
        .first()
        .and_then(|day| day.cafes.get(cafe_id))
        .and_then(|cafe| cafe.dayparts.first())
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    if dayparts.is_empty() {
        return vec![prepare_single_menu(&synthetic_all_day(), food_items, true)];
    }

    dayparts
        .iter()
        .map(|meal_info| prepare_single_menu(meal_info, food_items, ignore_provided_menus))
        .collect()
}

fn synthetic_all_day() -> RawDaypart {
    RawDaypart {
        id: "na".to_string(),
        label: SYNTHETIC_MEAL_LABEL.to_string(),
        starttime: ALL_DAY_START.to_string(),
        endtime: ALL_DAY_END.to_string(),
        abbreviation: "M".to_string(),
        stations: Vec::new(),
    }
}

fn prepare_single_menu(
    meal_info: &RawDaypart,
    food_items: &FoodItemMap,
    ignore_provided_menus: bool,
) -> Meal {
    let mut stations = if ignore_provided_menus {
        build_custom_station_menu(food_items)
    } else {
        meal_info.stations.iter().map(station_from_raw).collect()
    };

    // title-case here too so station sorting stays consistent with the
    // normalized item stations
    for station in &mut stations {
        station.label = lax_title_case(&station.label);
    }

    Meal {
        label: meal_info.label.clone(),
        starttime: or_default(&meal_info.starttime, ALL_DAY_START),
        endtime: or_default(&meal_info.endtime, ALL_DAY_END),
        stations,
    }
}

fn station_from_raw(raw: &RawStation) -> StationMenu {
    StationMenu {
        id: raw.id.clone(),
        label: raw.label.clone(),
        note: raw.note.clone(),
        price: raw.price.clone(),
        items: raw.items.clone(),
    }
}

fn or_default(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

/// Select the meal to display for `now`.
///
/// An enabled meal-picker filter (a list filter over meal labels) overrides
/// the clock. Otherwise the meal whose `[start, end)` window contains `now`
/// wins; in a gap between meals the next future meal is chosen, and after
/// the last window closes the last meal of the day stays up. Unparseable
/// time strings widen to all-day bounds rather than erroring.
pub fn choose_meal(meals: &[Meal], filters: &[Filter], now: NaiveDateTime) -> Option<Meal> {
    if meals.is_empty() {
        return None;
    }

    if let Some(selected) = meal_picker_selection(filters) {
        if let Some(meal) = meals.iter().find(|meal| selected.contains(&meal.label)) {
            return Some(meal.clone());
        }
    }

    let time = now.time();
    let open_start = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
    let open_end = NaiveTime::from_hms_opt(23, 59, 59).unwrap();

    if let Some(meal) = meals.iter().find(|meal| {
        let start = parse_time_of_day(&meal.starttime).unwrap_or(open_start);
        let end = parse_time_of_day(&meal.endtime).unwrap_or(open_end);
        start <= time && time < end
    }) {
        return Some(meal.clone());
    }

    meals
        .iter()
        .filter(|meal| parse_time_of_day(&meal.starttime).is_some_and(|start| start > time))
        .min_by_key(|meal| parse_time_of_day(&meal.starttime))
        .or_else(|| meals.last())
        .cloned()
}

fn meal_picker_selection(filters: &[Filter]) -> Option<&Vec<String>> {
    filters.iter().find_map(|filter| match filter {
        Filter::List(list)
            if list.enabled && list.field == FilterField::MealLabel && !list.selected.is_empty() =>
        {
            Some(&list.selected)
        }
        _ => None,
    })
}

fn parse_time_of_day(input: &str) -> Option<NaiveTime> {
    let re = Regex::new("^([01]?[0-9]|2[0-3]):([0-5][0-9])").unwrap();
    let caps = re.captures(input.trim())?;
    let hour = caps[1].parse().ok()?;
    let minute = caps[2].parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}
