//! The caller-owned state container. Each fetch replaces the assembled menu
//! wholesale; a request-generation counter fences out completions from
//! superseded fetches, so a slow response can never overwrite a newer one.

use chrono::NaiveDateTime;

use crate::assembler::choose_meal;
use crate::data_types::MenuResponse;
use crate::errors::MenuError;
use crate::filters::{build_default_filters, group_menu_data, Filter, MenuSection};

#[derive(Default)]
pub struct MenuState {
    generation: u64,
    pub loading: bool,
    pub menu: Option<MenuResponse>,
    pub error: Option<String>,
    pub filters: Vec<Filter>,
}

impl MenuState {
    pub fn new() -> Self {
        MenuState::default()
    }

    /// Mark a fetch as started and hand back its generation token. Pass the
    /// token to [`MenuState::apply`] with the result.
    pub fn begin_fetch(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.generation
    }

    /// Install a fetch result, unless a newer fetch has started since this
    /// one began; stale completions are discarded and `false` is returned.
    /// On success the previous menu is replaced wholesale; on failure the
    /// previous menu stays up next to the error message.
    pub fn apply(
        &mut self,
        generation: u64,
        result: Result<MenuResponse, MenuError>,
    ) -> bool {
        if generation != self.generation {
            log::debug!(
                "discarding stale fetch result (generation {generation}, current {})",
                self.generation
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(response) => {
                // keep user-adjusted filters; only seed them on first data
                if self.filters.is_empty() {
                    self.filters = build_default_filters(&response);
                }
                self.menu = Some(response);
                self.error = None;
            }
            Err(err) => {
                self.error = Some(err.to_string());
            }
        }
        true
    }

    /// The display-ready sections for `now`: the chosen meal's stations, run
    /// through the filter engine. Empty when nothing is loaded.
    pub fn grouped(&self, now: NaiveDateTime) -> Vec<MenuSection> {
        let Some(menu) = &self.menu else {
            return Vec::new();
        };
        let Some(meal) = choose_meal(&menu.meals, &self.filters, now) else {
            return Vec::new();
        };
        group_menu_data(&self.filters, &menu.food_items, &meal.stations)
    }
}
