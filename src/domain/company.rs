use serde::Serialize;

/// Stands in for a stat the detail table did not carry.
pub const NOT_AVAILABLE: &str = "N/A";
/// Stands in for every stat of a target missing from the listing.
pub const NOT_FOUND: &str = "Not Found";
/// Stands in for every stat of a target whose detail fetch failed.
pub const FETCH_ERROR: &str = "Error";

pub const UNKNOWN_COMPANY: &str = "Unknown";

/// Returned in place of table markup when no security status table exists.
pub const MISSING_TABLE_PLACEHOLDER: &str =
    "<p class='error-text'>정보보호 현황 테이블을 찾을 수 없습니다.</p>";

/// One search result row. Duplicates across pages are kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyListing {
    pub name: String,
    pub publish_no: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyDetail {
    pub name: String,
    pub publish_no: String,
    pub table_html: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedStats {
    pub company: String,
    pub it_investment: String,
    pub security_investment: String,
    pub it_personnel: String,
    pub security_personnel: String,
}

impl ExtractedStats {
    fn filled(company: &str, value: &str) -> Self {
        ExtractedStats {
            company: company.to_string(),
            it_investment: value.to_string(),
            security_investment: value.to_string(),
            it_personnel: value.to_string(),
            security_personnel: value.to_string(),
        }
    }

    pub fn not_available(company: &str) -> Self {
        Self::filled(company, NOT_AVAILABLE)
    }

    pub fn not_found(company: &str) -> Self {
        Self::filled(company, NOT_FOUND)
    }

    pub fn fetch_error(company: &str) -> Self {
        Self::filled(company, FETCH_ERROR)
    }

    /// Column order used by every report renderer.
    pub fn cells(&self) -> [&str; 5] {
        [
            &self.company,
            &self.it_investment,
            &self.security_investment,
            &self.it_personnel,
            &self.security_personnel,
        ]
    }
}

pub const REPORT_HEADERS: [&str; 5] = [
    "Company",
    "IT Investment",
    "Security Investment",
    "IT Personnel",
    "Security Personnel",
];
