use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::{
    configuration::PortalSettings,
    services::{fetch_company_detail, CompanyCache, PortalFetch},
};

pub async fn company_detail<P: PortalFetch + 'static>(
    path: web::Path<String>,
    portal: web::Data<P>,
) -> HttpResponse {
    let publish_no = path.into_inner();

    if publish_no.is_empty() || !publish_no.chars().all(|c| c.is_ascii_digit()) {
        return HttpResponse::NotFound().json(json!({ "error": "Details not found" }));
    }

    match fetch_company_detail(portal.get_ref(), &publish_no).await {
        Ok(detail) => HttpResponse::Ok().json(detail),
        Err(e) => HttpResponse::InternalServerError().json(json!({ "error": e.to_string() })),
    }
}

pub async fn refresh_companies<P: PortalFetch + 'static>(
    cache: web::Data<CompanyCache>,
    portal: web::Data<P>,
    settings: web::Data<PortalSettings>,
) -> HttpResponse {
    let companies = cache
        .refresh(portal.get_ref(), settings.list_page_depth)
        .await;

    HttpResponse::Ok().json(json!({ "count": companies.len() }))
}
