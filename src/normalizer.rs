//! Pure text and shape normalization. No I/O here; everything takes raw
//! provider data in and hands shared-schema values back.

use std::collections::BTreeMap;

use scraper::{ElementRef, Html};

use crate::config::TrimRules;
use crate::data_types::bonapp_data_types::RawMenuItem;
use crate::data_types::github_data_types::{GithubMenuItem, GithubStation};
use crate::data_types::{FoodItem, FoodItemMap, StationMenu};

/// Normalize every raw BonApp item into the shared schema, keyed by id.
/// Absent fields degrade to empty defaults; this never fails.
pub fn prepare_food(raw_items: &BTreeMap<String, RawMenuItem>, rules: &TrimRules) -> FoodItemMap {
    raw_items
        .iter()
        .map(|(id, raw)| {
            let item = FoodItem {
                id: if raw.id.is_empty() {
                    id.clone()
                } else {
                    raw.id.clone()
                },
                label: clean_item_label(&raw.label, rules),
                description: html_to_text(&raw.description),
                station: clean_station_label(&raw.station, rules),
                cor_icon: raw.cor_icon.clone(),
                special: raw.special,
                nutrition_link: raw.nutrition_link.clone(),
            };
            (id.clone(), item)
        })
        .collect()
}

/// `<b>@station names</b>` are a mess: strip the configured junk, decode
/// entities, then title-case so station sorting is consistent.
pub fn clean_station_label(raw: &str, rules: &TrimRules) -> String {
    lax_title_case(&decode_entities(&strip_junk(raw, &rules.station_junk)))
}

pub fn clean_item_label(raw: &str, rules: &TrimRules) -> String {
    decode_entities(&strip_junk(raw, &rules.label_junk))
        .trim()
        .to_string()
}

fn strip_junk(input: &str, junk: &[String]) -> String {
    let mut out = input.to_string();
    for fragment in junk {
        if !fragment.is_empty() {
            out = out.replace(fragment.as_str(), "");
        }
    }
    out
}

/// Decode HTML entities in a plain-text field. Any stray markup that
/// survived the junk list falls away with the tags.
pub fn decode_entities(input: &str) -> String {
    if !input.contains(&['&', '<'][..]) {
        return input.to_string();
    }
    let fragment = Html::parse_fragment(input);
    fragment.root_element().text().collect()
}

/// Title-case words, leaving short joining words and anything already
/// capitalized (BBQ, McNuggets) alone.
pub fn lax_title_case(input: &str) -> String {
    const SMALL_WORDS: &[&str] = &[
        "a", "an", "and", "as", "at", "but", "by", "for", "in", "of", "on", "or", "the", "to",
        "with",
    ];

    input
        .split_whitespace()
        .enumerate()
        .map(|(position, word)| {
            if position > 0 && SMALL_WORDS.contains(&word) {
                return word.to_string();
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) if first.is_lowercase() => {
                    first.to_uppercase().chain(chars).collect()
                }
                _ => word.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Flatten an HTML description to plain text. `<br>` and block elements
/// become line breaks; runs of inline whitespace collapse to single spaces.
pub fn html_to_text(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }
    let fragment = Html::parse_fragment(html);
    let mut out = String::new();
    collect_text(fragment.root_element(), &mut out);
    squash_whitespace(&out)
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(el) = ElementRef::wrap(child) {
            let name = el.value().name();
            if name == "br" {
                out.push('\n');
                continue;
            }
            let block = matches!(
                name,
                "p" | "div" | "li" | "ul" | "ol" | "tr" | "h1" | "h2" | "h3" | "h4"
            );
            if block && !out.ends_with('\n') && !out.is_empty() {
                out.push('\n');
            }
            collect_text(el, out);
            if block && !out.ends_with('\n') {
                out.push('\n');
            }
        }
    }
}

fn squash_whitespace(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_space = false;
    let mut pending_newlines = 0usize;

    for ch in input.chars() {
        if ch == '\n' {
            pending_newlines += 1;
            pending_space = false;
        } else if ch.is_whitespace() {
            if pending_newlines == 0 {
                pending_space = true;
            }
        } else {
            if pending_newlines > 0 && !out.is_empty() {
                out.push('\n');
                // at most one blank line survives
                if pending_newlines > 1 {
                    out.push('\n');
                }
            }
            pending_newlines = 0;
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch);
        }
    }

    out
}

/// Adapt one static-feed item to the shared schema. Ids are synthetic,
/// assigned by position since the feed has none of its own.
pub fn upgrade_menu_item(raw: &GithubMenuItem, index: usize, rules: &TrimRules) -> FoodItem {
    FoodItem {
        id: index.to_string(),
        label: clean_item_label(&raw.label, rules),
        description: html_to_text(&raw.description),
        station: clean_station_label(&raw.station, rules),
        cor_icon: raw.cor_icon.clone(),
        special: raw.special,
        nutrition_link: String::new(),
    }
}

/// Adapt one static-feed station. The item list stays empty; the fetcher
/// fills it by matching items' station labels.
pub fn upgrade_station(raw: &GithubStation, index: usize, rules: &TrimRules) -> StationMenu {
    StationMenu {
        id: index.to_string(),
        label: clean_station_label(&raw.label, rules),
        note: raw.note.clone(),
        price: raw.price.clone(),
        items: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> TrimRules {
        TrimRules::default()
    }

    #[test]
    fn station_junk_is_stripped_and_title_cased() {
        assert_eq!(clean_station_label("@grill station", &rules()), "Grill Station");
        assert_eq!(
            clean_station_label("<strong>@</strong>the grill", &rules()),
            "The Grill"
        );
    }

    #[test]
    fn station_cleanup_decodes_entities() {
        assert_eq!(
            clean_station_label("soup &amp; stew", &rules()),
            "Soup & Stew"
        );
    }

    #[test]
    fn title_case_keeps_small_words_and_existing_caps() {
        assert_eq!(lax_title_case("taste of the world"), "Taste of the World");
        assert_eq!(lax_title_case("BBQ pit"), "BBQ Pit");
    }

    #[test]
    fn item_label_is_decoded_and_trimmed() {
        assert_eq!(
            clean_item_label("  Mac &amp; Cheese ", &rules()),
            "Mac & Cheese"
        );
    }

    #[test]
    fn description_html_becomes_plain_text_with_line_breaks() {
        let text = html_to_text("<p>Comes with fries.</p><p>Add  cheese<br>for $0.50</p>");
        assert_eq!(text, "Comes with fries.\nAdd cheese\nfor $0.50");
    }

    #[test]
    fn description_inline_markup_keeps_spacing() {
        assert_eq!(
            html_to_text("served with <em>house</em> salad"),
            "served with house salad"
        );
    }

    #[test]
    fn prepare_food_defaults_absent_fields() {
        let raw: BTreeMap<String, crate::data_types::bonapp_data_types::RawMenuItem> =
            serde_json::from_str(r#"{"101": {}}"#).unwrap();
        let items = prepare_food(&raw, &rules());

        let item = &items["101"];
        assert_eq!(item.id, "101");
        assert_eq!(item.label, "");
        assert_eq!(item.description, "");
        assert_eq!(item.station, "");
        assert!(!item.special);
    }

    #[test]
    fn upgrade_assigns_positional_ids() {
        let raw = GithubMenuItem {
            label: "Smoothie".to_string(),
            station: "drinks".to_string(),
            ..GithubMenuItem::default()
        };
        let item = upgrade_menu_item(&raw, 4, &rules());
        assert_eq!(item.id, "4");
        assert_eq!(item.station, "Drinks");
    }
}
