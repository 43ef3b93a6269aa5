use std::net::TcpListener;

use actix_files::Files;
use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::{
    configuration::PortalSettings,
    routes,
    services::{CompanyCache, PortalClient},
};

pub fn run(
    listener: TcpListener,
    portal_client: PortalClient,
    portal_settings: PortalSettings,
) -> Result<Server, std::io::Error> {
    let portal_client = web::Data::new(portal_client);
    let portal_settings = web::Data::new(portal_settings);
    let company_cache = web::Data::new(CompanyCache::new());

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(Files::new("/static", "./templates/static").prefer_utf8(true))
            .configure(routes::configure::<PortalClient>)
            .app_data(portal_client.clone())
            .app_data(portal_settings.clone())
            .app_data(company_cache.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
