use reqwest::{Client, StatusCode};
use serde::Serialize;
use url::Url;

use crate::configuration::PortalSettings;

#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error("request to the disclosure portal failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("disclosure portal answered {status} for {url}")]
    Status { status: StatusCode, url: String },
    #[error("invalid portal url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Source of raw portal pages. Scrapers only ever see page bodies through
/// this, so tests can hand them canned HTML.
#[allow(async_fn_in_trait)]
pub trait PortalFetch {
    async fn fetch_list_page(&self, page_index: u32) -> Result<String, PortalError>;

    async fn fetch_detail_page(&self, publish_no: &str) -> Result<String, PortalError>;

    fn detail_link(&self, publish_no: &str) -> String;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListQuery<'a> {
    menu_no: &'a str,
    page_index: u32,
    publish_no: &'a str,
    list_flag: &'a str,
    search_cnd: &'a str,
    search_wrd: &'a str,
    search_publish_year: &'a str,
    search_duty_yn: &'a str,
    search_publish_mod_yn: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DetailQuery<'a> {
    menu_no: &'a str,
    page_index: u32,
    publish_no: &'a str,
}

pub struct PortalClient {
    client: Client,
    list_url: Url,
    detail_url: Url,
    menu_no: String,
    search_keyword: String,
    publish_year: String,
}

impl PortalClient {
    pub fn new(settings: &PortalSettings) -> Result<Self, PortalError> {
        Ok(PortalClient {
            client: Client::new(),
            list_url: Url::parse(&settings.list_url)?,
            detail_url: Url::parse(&settings.detail_url)?,
            menu_no: settings.menu_no.clone(),
            search_keyword: settings.search_keyword.clone(),
            publish_year: settings.publish_year.clone(),
        })
    }

    async fn get_text<Q: Serialize>(&self, url: &Url, query: &Q) -> Result<String, PortalError> {
        let res = self.client.get(url.clone()).query(query).send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(PortalError::Status {
                status,
                url: res.url().to_string(),
            });
        }

        Ok(res.text().await?)
    }
}

impl PortalFetch for PortalClient {
    async fn fetch_list_page(&self, page_index: u32) -> Result<String, PortalError> {
        let query = ListQuery {
            menu_no: &self.menu_no,
            page_index,
            publish_no: "",
            list_flag: "list",
            search_cnd: "",
            search_wrd: &self.search_keyword,
            search_publish_year: &self.publish_year,
            search_duty_yn: "",
            search_publish_mod_yn: "",
        };

        self.get_text(&self.list_url, &query).await
    }

    async fn fetch_detail_page(&self, publish_no: &str) -> Result<String, PortalError> {
        let query = DetailQuery {
            menu_no: &self.menu_no,
            page_index: 1,
            publish_no,
        };

        self.get_text(&self.detail_url, &query).await
    }

    fn detail_link(&self, publish_no: &str) -> String {
        let mut link = self.detail_url.clone();
        link.query_pairs_mut()
            .clear()
            .append_pair("menuNo", &self.menu_no)
            .append_pair("pageIndex", "1")
            .append_pair("publishNo", publish_no);
        link.into()
    }
}
