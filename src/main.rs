use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};

use hpworld_signup::config::AppConfig;
use hpworld_signup::coupon::HttpCouponIssuer;
use hpworld_signup::handlers;
use hpworld_signup::orchestrator::{HttpRelay, LocalRelay, RelayClient, SubmissionOrchestrator};
use hpworld_signup::relay::{GoogleFormForwarder, RelayService};
use hpworld_signup::session;
use hpworld_signup::store::SubmissionStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env();

    // Ensure the snapshot directory exists
    if let Some(dir) = config.data_file.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    let store = Arc::new(SubmissionStore::open(&config.data_file));

    // Redirects are not followed: Google Forms answers with a 302 we only log
    let http = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .map_err(std::io::Error::other)?;

    let forwarder = match &config.google_form {
        Some(form) => Some(GoogleFormForwarder::new(http.clone(), form.clone())),
        None => {
            log::warn!("Google Forms env vars missing. Skipping Google submission.");
            None
        }
    };
    let relay_service = Arc::new(RelayService::new(store, forwarder));

    let relay = match &config.relay_url {
        Some(url) => {
            log::info!("Relaying submissions to {url}");
            RelayClient::Http(HttpRelay::new(http.clone(), url.as_str()))
        }
        None => RelayClient::Local(LocalRelay::new(relay_service.clone())),
    };
    let issuer = HttpCouponIssuer::new(http.clone(), config.coupon.api_url.as_str());
    let orchestrator = web::Data::new(SubmissionOrchestrator::new(
        relay,
        issuer,
        config.coupon.clone(),
    ));
    let relay_data = web::Data::from(relay_service);

    let secret_key = session::session_key(config.session_key.as_deref());

    log::info!("Starting server at http://{}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(session::session_middleware(secret_key.clone()))
            .wrap(middleware::Logger::default())
            .app_data(orchestrator.clone())
            .app_data(relay_data.clone())
            .configure(handlers::configure::<RelayClient, HttpCouponIssuer>)
    })
    .bind(config.bind_addr.as_str())?
    .run()
    .await
}
