use rocket::{get, response::content::RawHtml};

use crate::types::default_items;

const PAGE: &str = include_str!("../static/index.html");
const ITEMS_PLACEHOLDER: &str = "__DEFAULT_ITEMS__";

/// Serves the list editor page with the default items inlined.
#[get("/")]
pub fn index() -> RawHtml<String> {
    RawHtml(render_page())
}

fn render_page() -> String {
    let items = serde_json::to_string(&default_items())
        .unwrap_or_else(|_| "[]".to_string())
        .replace("</", "<\\/");
    PAGE.replace(ITEMS_PLACEHOLDER, &items)
}
