//! The BonApp variant: two requests per fetch (menu + cafe info), fired
//! concurrently, each with its own retry budget. If either side fails the
//! whole fetch fails; no partial result leaks out.

use std::time::{Duration, Instant};

use chrono::NaiveDateTime;

use super::{get_json, with_retries, MenuClient};
use crate::assembler::{find_cafe_message, get_meals};
use crate::config::TrimRules;
use crate::data_types::bonapp_data_types::{BonAppCafeInfo, BonAppMenu};
use crate::data_types::MenuResponse;
use crate::errors::MenuError;
use crate::normalizer::prepare_food;

pub(crate) async fn fetch(
    client: &MenuClient,
    cafe_id: &str,
    ignore_provided_menus: bool,
    now: NaiveDateTime,
) -> Result<MenuResponse, MenuError> {
    let started = Instant::now();

    let (cafe_menu, cafe_info) = match request_pair(client, cafe_id).await {
        Ok(pair) => pair,
        Err(err @ MenuError::UpstreamGarbled) => {
            // already remapped to the friendly message, not worth a report
            return Err(err);
        }
        Err(err) => {
            client.analytics.track_exception(&err.to_string());
            client.reporter.notify(&err);
            return Err(err);
        }
    };
    log::debug!("bonapp pair for {cafe_id}: {:.2?}", started.elapsed());

    Ok(assemble(
        &cafe_menu,
        &cafe_info,
        cafe_id,
        ignore_provided_menus,
        now,
        &client.config.trim_rules,
    ))
}

async fn request_pair(
    client: &MenuClient,
    cafe_id: &str,
) -> Result<(BonAppMenu, BonAppCafeInfo), MenuError> {
    let menu_url = format!("{}?cafe={cafe_id}", client.config.bonapp_menu_base_url);
    let cafe_url = format!("{}?cafe={cafe_id}", client.config.bonapp_cafe_base_url);
    let retries = client.config.retries;
    let delay = Duration::from_millis(client.config.retry_delay_ms);

    tokio::try_join!(
        with_retries(retries, delay, || get_json::<BonAppMenu>(client, &menu_url)),
        with_retries(retries, delay, || get_json::<BonAppCafeInfo>(
            client, &cafe_url
        )),
    )
}

/// Pure second half of the fetch: raw payloads in, assembled response out.
pub(crate) fn assemble(
    cafe_menu: &BonAppMenu,
    cafe_info: &BonAppCafeInfo,
    cafe_id: &str,
    ignore_provided_menus: bool,
    now: NaiveDateTime,
    rules: &TrimRules,
) -> MenuResponse {
    // the cafe response carries special messages ("Closed for Christmas
    // Break"), so the calendar lookup comes from there
    let cafe_message = find_cafe_message(cafe_id, cafe_info, now);

    let food_items = prepare_food(&cafe_menu.items, rules);
    let meals = get_meals(cafe_menu, cafe_id, ignore_provided_menus, &food_items);

    MenuResponse {
        cafe_message,
        food_items,
        meals,
        cor_icons: cafe_menu.cor_icons.clone(),
    }
}
