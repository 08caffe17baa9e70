//! Fixed strings and defaults shared across the pipeline.

/// Default BonApp API endpoints. Overridable through [`crate::MenuConfig`]
/// since the legacy hostname has moved more than once.
pub const BONAPP_MENU_BASE_URL: &str = "https://legacy.cafebonappetit.com/api/2/menus";
pub const BONAPP_CAFE_BASE_URL: &str = "https://legacy.cafebonappetit.com/api/2/cafes";

/// Shown instead of a raw parse error when the API hands back an HTML error
/// page where JSON was expected.
pub const UPSTREAM_GARBLED_MSG: &str =
    "Something between you and BonApp is having problems. Try again in a minute or two?";

/// Cafe id missing entirely from the cafe-info response.
pub const NO_MENU_MSG: &str = "BonApp did not return a menu for that café";

/// Today is absent from the cafe calendar, or marked closed with no
/// provider message of its own.
pub const CLOSED_TODAY_MSG: &str = "Closed today";

pub const DEFAULT_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 250;

/// The synthetic all-day meal substituted when a feed provides no dayparts.
pub const SYNTHETIC_MEAL_LABEL: &str = "Menu";
pub const ALL_DAY_START: &str = "0:00";
pub const ALL_DAY_END: &str = "23:59";

/// Markup fragments BonApp occasionally embeds in station labels.
/// These are defaults; the effective list lives in [`crate::TrimRules`].
pub const STATION_JUNK: &[&str] = &["<strong>@</strong>", "<strong>", "</strong>", "@"];
