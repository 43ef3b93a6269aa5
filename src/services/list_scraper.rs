use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

use crate::domain::CompanyListing;

use super::{stripped_text, PortalFetch};

static TITLE_ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".m_title a").unwrap());
static PUBLISH_NO_PARAM: Lazy<Regex> = Lazy::new(|| Regex::new(r"publishNo=(\d+)").unwrap());
// Loose fallback; can pick up unrelated digits in the href.
static FOUR_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}").unwrap());

/// Failed pages are logged and skipped. Rows are not deduplicated.
pub async fn fetch_company_list<P: PortalFetch>(
    portal: &P,
    max_pages: u32,
) -> Vec<CompanyListing> {
    let mut companies = vec![];

    for page_index in 1..=max_pages {
        log::info!("Fetching page {}...", page_index);

        match portal.fetch_list_page(page_index).await {
            Ok(body) => {
                let rows = parse_listing_page(&body, |publish_no| portal.detail_link(publish_no));
                log::info!("Found {} companies on page {}", rows.len(), page_index);
                companies.extend(rows);
            }
            Err(e) => log::error!("Error fetching page {}: {}", page_index, e),
        }
    }

    companies
}

pub fn parse_listing_page<F>(html: &str, detail_link: F) -> Vec<CompanyListing>
where
    F: Fn(&str) -> String,
{
    let document = Html::parse_document(html);

    document
        .select(&TITLE_ANCHOR_SELECTOR)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?;
            let publish_no = extract_publish_no(href)?;

            Some(CompanyListing {
                name: extract_display_name(anchor),
                link: detail_link(&publish_no),
                publish_no,
            })
        })
        .collect()
}

pub fn extract_publish_no(href: &str) -> Option<String> {
    if let Some(caps) = PUBLISH_NO_PARAM.captures(href) {
        return Some(caps[1].to_string());
    }

    FOUR_DIGITS.find(href).map(|m| m.as_str().to_string())
}

pub fn extract_display_name(anchor: ElementRef) -> String {
    let mut name = String::new();

    // Status icons follow the name.
    for child in anchor.children() {
        match child.value() {
            Node::Element(el) if el.name() == "img" => break,
            Node::Text(text) => name.push_str(text),
            _ => {}
        }
    }

    match name.trim() {
        "" => stripped_text(anchor),
        trimmed => trimmed.to_string(),
    }
}
