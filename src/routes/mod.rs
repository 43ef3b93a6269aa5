use actix_web::web;

use crate::services::PortalFetch;

pub mod company_route;
pub mod default_route;
pub mod home_route;

pub fn configure<P: PortalFetch + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(default_route::default)
        .route("/home", web::get().to(home_route::home::<P>))
        .service(
            web::scope("/api")
                .route(
                    "/company/{publish_no}",
                    web::get().to(company_route::company_detail::<P>),
                )
                .route(
                    "/companies/refresh",
                    web::post().to(company_route::refresh_companies::<P>),
                ),
        );
}
