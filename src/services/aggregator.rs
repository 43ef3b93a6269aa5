use scraper::Html;

use crate::domain::{normalize_personnel_count, CompanyListing, ExtractedStats, NOT_AVAILABLE};

use super::{fetch_company_detail, fetch_company_list, value_after_label, PortalFetch};

const IT_INVESTMENT_LABELS: &[&str] = &["정보기술부문 투자액"];
const SECURITY_INVESTMENT_LABELS: &[&str] = &["정보보호부문 투자액"];
const IT_PERSONNEL_LABELS: &[&str] = &["정보기술부문 인력"];
const SECURITY_PERSONNEL_LABELS: &[&str] = &["정보보호부문 전담인력", "정보보호 전담인력"];

/// Scrapes `page_depth` listing pages, then one stats row per target in
/// target order. A missing or failing company never aborts the batch.
pub async fn compare_companies<P: PortalFetch>(
    portal: &P,
    targets: &[String],
    page_depth: u32,
) -> Vec<ExtractedStats> {
    let listing = fetch_company_list(portal, page_depth).await;
    log::info!("Total companies found: {}", listing.len());

    compare_targets(portal, &listing, targets).await
}

pub async fn compare_targets<P: PortalFetch>(
    portal: &P,
    listing: &[CompanyListing],
    targets: &[String],
) -> Vec<ExtractedStats> {
    let mut results = Vec::with_capacity(targets.len());

    for target in targets {
        log::info!("Searching for: {}", target);

        let Some(company) = resolve_target(listing, target) else {
            log::info!("{} not found in list", target);
            results.push(ExtractedStats::not_found(target));
            continue;
        };

        log::info!("Found {}, fetching details (ID: {})", target, company.publish_no);
        let row = match fetch_company_detail(portal, &company.publish_no).await {
            Ok(detail) => extract_stats(&detail.table_html, target),
            Err(_) => ExtractedStats::fetch_error(target),
        };
        results.push(row);
    }

    results
}

pub fn resolve_target<'a>(
    listing: &'a [CompanyListing],
    target: &str,
) -> Option<&'a CompanyListing> {
    let target = target.trim();
    listing.iter().find(|company| company.name.trim() == target)
}

pub fn extract_stats(table_html: &str, company: &str) -> ExtractedStats {
    let fragment = Html::parse_fragment(table_html);
    let root = fragment.root_element();
    let stat = |labels: &[&str]| {
        value_after_label(root, labels).unwrap_or_else(|| NOT_AVAILABLE.to_string())
    };

    ExtractedStats {
        company: company.to_string(),
        it_investment: stat(IT_INVESTMENT_LABELS),
        security_investment: stat(SECURITY_INVESTMENT_LABELS),
        it_personnel: normalize_personnel_count(&stat(IT_PERSONNEL_LABELS)),
        security_personnel: normalize_personnel_count(&stat(SECURITY_PERSONNEL_LABELS)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FETCH_ERROR, MISSING_TABLE_PLACEHOLDER, NOT_FOUND};
    use crate::services::PortalError;

    const STATUS_TABLE: &str = r#"
    <table class="extracted-table">
        <tr><th colspan="3">1. 정보보호 투자 현황</th></tr>
        <tr><th>정보기술부문 투자액(A)</th><td>2024</td><td>1,000,000원</td></tr>
        <tr><th>정보보호부문 투자액(B)</th><td>2024</td><td>80,000원</td></tr>
        <tr><th colspan="3">2. 정보보호 인력 현황</th></tr>
        <tr><th>총 임직원</th><td>2024</td><td>1,500명</td></tr>
        <tr><th>정보기술부문 인력(C)</th><td>2024</td><td>120.5명외주30명</td></tr>
        <tr><th>정보보호부문 전담인력(D)</th><td>2024</td><td>12 명</td></tr>
    </table>
    "#;

    #[test]
    fn extracts_all_four_stats() {
        let stats = extract_stats(STATUS_TABLE, "(주)우리은행");

        assert_eq!(
            stats,
            ExtractedStats {
                company: "(주)우리은행".to_string(),
                it_investment: "1,000,000원".to_string(),
                security_investment: "80,000원".to_string(),
                it_personnel: "120.5명 외주 30명".to_string(),
                security_personnel: "12명".to_string(),
            }
        );
    }

    #[test]
    fn placeholder_markup_yields_not_available() {
        let stats = extract_stats(MISSING_TABLE_PLACEHOLDER, "신한은행");

        assert_eq!(stats, ExtractedStats::not_available("신한은행"));
    }

    #[test]
    fn resolves_first_exact_trimmed_match() {
        let listing = vec![
            listing("신한은행(주)", "1"),
            listing(" 신한은행 ", "2"),
            listing("신한은행", "3"),
        ];

        assert_eq!(resolve_target(&listing, "신한은행").unwrap().publish_no, "2");
        assert!(resolve_target(&listing, "신한").is_none());
    }

    fn listing(name: &str, publish_no: &str) -> CompanyListing {
        CompanyListing {
            name: name.to_string(),
            publish_no: publish_no.to_string(),
            link: String::new(),
        }
    }

    struct StubPortal;

    impl PortalFetch for StubPortal {
        async fn fetch_list_page(&self, page_index: u32) -> Result<String, PortalError> {
            match page_index {
                1 => Ok(r#"<div class="m_title">
                        <a href="?publishNo=3626">(주)우리은행<img src="i.png"></a>
                        <a href="?publishNo=4000">대신증권</a>
                    </div>"#
                    .to_string()),
                _ => Err(PortalError::InvalidUrl(url::ParseError::EmptyHost)),
            }
        }

        async fn fetch_detail_page(&self, publish_no: &str) -> Result<String, PortalError> {
            match publish_no {
                "3626" => Ok(format!("<table><tr><th>기업명</th><td>(주)우리은행</td></tr></table>{STATUS_TABLE}")),
                _ => Err(PortalError::InvalidUrl(url::ParseError::EmptyHost)),
            }
        }

        fn detail_link(&self, publish_no: &str) -> String {
            publish_no.to_string()
        }
    }

    #[tokio::test]
    async fn batch_degrades_to_sentinel_rows() {
        let targets = vec![
            "(주)우리은행".to_string(),
            "토스뱅크㈜".to_string(),
            "대신증권".to_string(),
        ];

        let rows = compare_companies(&StubPortal, &targets, 2).await;

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].security_investment, "80,000원");
        assert_eq!(rows[0].security_personnel, "12명");
        assert_eq!(rows[1], ExtractedStats::not_found("토스뱅크㈜"));
        assert!(rows[1].cells()[1..].iter().all(|c| *c == NOT_FOUND));
        assert_eq!(rows[2], ExtractedStats::fetch_error("대신증권"));
        assert_eq!(rows[2].it_investment, FETCH_ERROR);
    }
}
