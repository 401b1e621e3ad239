use actix_cors::Cors;
use actix_files::Files;
use actix_web::{
    dev::Server, http::header, middleware, web, App, HttpResponse, HttpServer,
};

use crate::{
    configuration::{AppState, State},
    controller::{send_notification, subscribe, unsubscribe, version},
    error::Error,
};

pub async fn server_task(app_state: &AppState<State>) -> Result<(), Error> {
    let app = app_state.clone();
    tokio::spawn(async move {
        let server = init_server(app)?;
        server.await?;
        Ok(())
    })
    .await?
}

fn init_server(app_state: AppState<State>) -> Result<Server, Error> {
    let host = app_state.config.server_host.to_owned();
    let port = app_state.config.port;

    let server = HttpServer::new(move || {
        let app = app_state.clone();
        let static_dir = app_state.config.static_dir.to_owned();
        let allowed_cors = String::from("*");
        let cors_access_all =
            app.config.allowed_origins.contains(&allowed_cors);
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _| {
                if cors_access_all {
                    return true;
                }
                let allowed = &app.config.allowed_origins;
                if let Ok(origin) = origin.to_str() {
                    return allowed.contains(&origin.to_owned());
                }
                false
            })
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT])
            .allowed_header(header::CONTENT_TYPE);

        App::new()
            .wrap(cors)
            .wrap(middleware::Compress::default())
            .app_data(web::Data::new(app_state.clone()))
            .app_data(json_config())
            .service(subscribe::index)
            .service(unsubscribe::index)
            .service(send_notification::index)
            .service(version::index)
            .service(Files::new("/", static_dir).index_file("index.html"))
    })
    .bind((host, port))?
    .disable_signals()
    .run();
    Ok(server)
}

/// JSON extractor settings shared by the server and the boundary tests:
/// body limit plus an error handler that keeps malformed or incomplete
/// bodies on the `{"error": ...}` response shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().limit(4096).error_handler(|err, _req| {
        let body = serde_json::json!({ "error": err.to_string() });
        actix_web::error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(body),
        )
        .into()
    })
}
