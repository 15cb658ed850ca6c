pub mod api_handlers;
pub mod signup_handlers;

use actix_web::{HttpResponse, web};

use crate::coupon::CouponIssuer;
use crate::orchestrator::Relay;

/// Register every route. Expects `web::Data<RelayService>` and
/// `web::Data<SubmissionOrchestrator<R, C>>` in app data and a session middleware.
pub fn configure<R, C>(cfg: &mut web::ServiceConfig)
where
    R: Relay + 'static,
    C: CouponIssuer + 'static,
{
    cfg.route("/", web::get().to(signup_handlers::form_page))
        .route("/", web::post().to(signup_handlers::submit::<R, C>))
        .configure(api_handlers::configure)
        // Static files
        .service(actix_files::Files::new("/static", "./static"))
        // Default 404 handler (must be registered last)
        .default_service(web::to(not_found));
}

async fn not_found() -> HttpResponse {
    let html = include_str!("../../templates/errors/404.html");
    HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
