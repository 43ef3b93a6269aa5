use actix_web::{web, HttpResponse};
use askama::Template;

use crate::{
    configuration::PortalSettings,
    domain::CompanyListing,
    services::{CompanyCache, PortalFetch},
};

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    companies: Vec<CompanyListing>,
}

pub async fn home<P: PortalFetch + 'static>(
    cache: web::Data<CompanyCache>,
    portal: web::Data<P>,
    settings: web::Data<PortalSettings>,
) -> HttpResponse {
    let companies = cache
        .get_or_populate(portal.get_ref(), settings.list_page_depth)
        .await;

    match (HomeTemplate { companies }).render() {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("Failed to render home page: {:?}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}
