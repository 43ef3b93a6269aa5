use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::domain::{CompanyDetail, MISSING_TABLE_PLACEHOLDER, UNKNOWN_COMPANY};

use super::{cell_after_label, sanitize_status_table, stripped_text, PortalError, PortalFetch};

static TABLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("table").unwrap());
static ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());

const COMPANY_NAME_LABEL: &str = "기업명";
const STATUS_TABLE_PHRASES: [&str; 2] = ["정보보호 투자 현황", "정보보호 인력 현황"];

pub async fn fetch_company_detail<P: PortalFetch>(
    portal: &P,
    publish_no: &str,
) -> Result<CompanyDetail, PortalError> {
    let body = portal.fetch_detail_page(publish_no).await.map_err(|e| {
        log::error!("Error fetching details for {}: {}", publish_no, e);
        e
    })?;

    Ok(parse_detail_page(&body, publish_no))
}

pub fn parse_detail_page(html: &str, publish_no: &str) -> CompanyDetail {
    let document = Html::parse_document(html);

    CompanyDetail {
        name: extract_company_name(&document),
        publish_no: publish_no.to_string(),
        table_html: extract_status_table(&document),
    }
}

pub fn extract_company_name(document: &Html) -> String {
    let Some(info_table) = document.select(&TABLE_SELECTOR).next() else {
        return UNKNOWN_COMPANY.to_string();
    };

    info_table
        .select(&ROW_SELECTOR)
        .find_map(|row| cell_after_label(row, &[COMPANY_NAME_LABEL]).flatten())
        .map(stripped_text)
        .unwrap_or_else(|| UNKNOWN_COMPANY.to_string())
}

pub fn extract_status_table(document: &Html) -> String {
    document
        .select(&TABLE_SELECTOR)
        .find(|table| {
            let text: String = table.text().collect();
            STATUS_TABLE_PHRASES.iter().any(|phrase| text.contains(phrase))
        })
        .map(|table| sanitize_status_table(&table.html()))
        .unwrap_or_else(|| MISSING_TABLE_PLACEHOLDER.to_string())
}
