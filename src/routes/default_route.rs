use actix_web::{get, HttpResponse};
use askama::Template;

#[derive(Template)]
#[template(path = "landing.html")]
struct LandingTemplate {}

#[get("/")]
async fn default() -> HttpResponse {
    match (LandingTemplate {}).render() {
        Ok(body) => HttpResponse::Ok().content_type("text/html; charset=utf-8").body(body),
        Err(e) => {
            log::error!("Failed to render landing page: {:?}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}
