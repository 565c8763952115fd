use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use wikiquiz_server::{app_state::AppState, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    config.validate_for_production();

    let state = AppState::new(config)
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;

    let host = state.config.web_server_host.clone();
    let port = state.config.web_server_port;
    log::info!("starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = state
            .config
            .allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allow_any_method()
            .allow_any_header();

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .wrap(cors)
            .service(handlers::index)
            .service(handlers::generate_quiz)
            .service(handlers::list_quizzes)
            .service(handlers::get_quiz)
            .service(handlers::delete_quiz)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
