//! Cafeteria menu pipeline: fetch, normalize, assemble, filter.
//!
//! Data flows strictly forward. The fetch layer retrieves raw payloads from
//! one of two upstream shapes (the BonApp dining API or a static
//! GitHub-hosted feed), the normalizer cleans them into one shared schema,
//! the assembler reconstructs meal/station groupings for "now", and the
//! filter engine turns them into display-ready sections.
//!
//! ```no_run
//! use cafe_menu_rs::{MenuClient, MenuConfig, MenuRequest, MenuState};
//!
//! # async fn run() -> Result<(), cafe_menu_rs::MenuError> {
//! let client = MenuClient::new(MenuConfig::default());
//! let mut state = MenuState::new();
//!
//! // `now` comes from the host, in the cafeteria's reference timezone
//! let now = chrono::NaiveDate::from_ymd_opt(2019, 4, 2)
//!     .unwrap()
//!     .and_hms_opt(11, 30, 0)
//!     .unwrap();
//!
//! let request = MenuRequest::BonApp {
//!     cafe_id: "261".to_string(),
//!     ignore_provided_menus: false,
//! };
//!
//! let generation = state.begin_fetch();
//! let result = client.fetch(&request, now).await;
//! state.apply(generation, result);
//!
//! for section in state.grouped(now) {
//!     println!("{}: {} items", section.title, section.items.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod assembler;
pub mod config;
pub mod constants;
pub mod data_backend;
pub mod data_types;
pub mod errors;
pub mod filters;
pub mod normalizer;
pub mod reporting;
pub mod state;

pub use config::{MenuConfig, TrimRules};
pub use data_backend::MenuClient;
pub use data_types::{
    CorIcon, CorIconMap, FoodItem, FoodItemMap, Meal, MenuRequest, MenuResponse, StationMenu,
};
pub use errors::MenuError;
pub use filters::{Filter, FilterField, ListFilter, ListMode, MenuSection, ToggleFilter};
pub use reporting::{AnalyticsSink, ErrorReporter, LogReporter, NullAnalytics};
pub use state::MenuState;

/// Logger setup for host binaries: info everywhere, debug for this crate
/// when `RUST_LOG=debug` is set.
pub fn logger_init(module: &str) {
    pretty_env_logger::formatted_timed_builder()
        .filter_level(log::LevelFilter::Info)
        .filter_module(
            module,
            if std::env::var(pretty_env_logger::env_logger::DEFAULT_FILTER_ENV).unwrap_or_default()
                == "debug"
            {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Info
            },
        )
        .init();
}
