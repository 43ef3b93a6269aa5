use tokio::sync::Mutex;

use crate::domain::CompanyListing;

use super::{fetch_company_list, PortalFetch};

/// Kept until invalidated or refreshed. An empty listing still counts as filled.
#[derive(Default)]
pub struct CompanyCache {
    companies: Mutex<Option<Vec<CompanyListing>>>,
}

impl CompanyCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_or_populate<P: PortalFetch>(
        &self,
        portal: &P,
        pages: u32,
    ) -> Vec<CompanyListing> {
        let mut companies = self.companies.lock().await;

        if let Some(cached) = companies.as_ref() {
            return cached.clone();
        }

        log::info!("Scraping company list...");
        let fresh = fetch_company_list(portal, pages).await;
        *companies = Some(fresh.clone());
        fresh
    }

    pub async fn refresh<P: PortalFetch>(&self, portal: &P, pages: u32) -> Vec<CompanyListing> {
        let mut companies = self.companies.lock().await;

        log::info!("Refreshing company list...");
        let fresh = fetch_company_list(portal, pages).await;
        *companies = Some(fresh.clone());
        fresh
    }

    pub async fn invalidate(&self) {
        *self.companies.lock().await = None;
    }

    #[cfg(test)]
    pub async fn snapshot(&self) -> Option<Vec<CompanyListing>> {
        self.companies.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;
    use crate::services::PortalError;

    #[derive(Default)]
    struct CountingPortal {
        list_requests: AtomicU32,
        empty: bool,
    }

    impl PortalFetch for CountingPortal {
        async fn fetch_list_page(&self, page_index: u32) -> Result<String, PortalError> {
            self.list_requests.fetch_add(1, Ordering::SeqCst);
            match self.empty {
                true => Ok("<html></html>".to_string()),
                false => Ok(format!(
                    r#"<p class="m_title"><a href="?publishNo={page_index}000">회사</a></p>"#
                )),
            }
        }

        async fn fetch_detail_page(&self, _publish_no: &str) -> Result<String, PortalError> {
            unreachable!()
        }

        fn detail_link(&self, publish_no: &str) -> String {
            publish_no.to_string()
        }
    }

    #[tokio::test]
    async fn populates_once() {
        let portal = CountingPortal::default();
        let cache = CompanyCache::new();
        assert_eq!(cache.snapshot().await, None);

        let first = cache.get_or_populate(&portal, 2).await;
        let second = cache.get_or_populate(&portal, 2).await;

        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
        assert_eq!(portal.list_requests.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn empty_listing_is_not_rescraped() {
        let portal = CountingPortal {
            empty: true,
            ..Default::default()
        };
        let cache = CompanyCache::new();

        cache.get_or_populate(&portal, 1).await;
        cache.get_or_populate(&portal, 1).await;

        assert_eq!(portal.list_requests.load(Ordering::SeqCst), 1);
        assert_eq!(cache.snapshot().await, Some(vec![]));
    }

    #[tokio::test]
    async fn invalidate_and_refresh_rescrape() {
        let portal = CountingPortal::default();
        let cache = CompanyCache::new();

        cache.get_or_populate(&portal, 1).await;
        cache.invalidate().await;
        assert_eq!(cache.snapshot().await, None);

        cache.get_or_populate(&portal, 1).await;
        let refreshed = cache.refresh(&portal, 3).await;

        assert_eq!(refreshed.len(), 3);
        assert_eq!(portal.list_requests.load(Ordering::SeqCst), 5);
    }
}
