pub mod aggregator;
pub mod company_cache;
pub mod detail_scraper;
pub mod list_scraper;
pub mod portal_client;
pub mod report;
pub mod table_cleanup;

pub use aggregator::*;
pub use company_cache::*;
pub use detail_scraper::*;
pub use list_scraper::*;
pub use portal_client::*;
pub use report::*;
pub use table_cleanup::*;
