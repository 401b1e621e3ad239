use actix_web::{post, web, HttpResponse, Result};
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    configuration::{AppState, State},
    error::Error,
};

#[derive(Debug, Deserialize)]
pub struct Request {
    endpoint: Option<String>,
}

#[post("/unsubscribe")]
pub async fn index(
    state: web::Data<AppState<State>>,
    data: web::Json<Request>,
) -> Result<HttpResponse, Error> {
    let endpoint = data
        .into_inner()
        .endpoint
        .filter(|endpoint| !endpoint.trim().is_empty())
        .ok_or_else(|| Error::FieldNotExist(String::from("endpoint")))?;

    let removed = state.registry.remove(&endpoint)?;
    if removed {
        info!("removed subscription {}", endpoint);
    } else {
        debug!("subscription {} not found", endpoint);
    }

    if state.config.enable_reminder && state.registry.is_empty() {
        state.reminder.stop();
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({})))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        configuration::test_state, server::json_config, types::Subscription,
    };
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;

    #[actix_web::test]
    async fn test_unsubscribe_removes_matching_entry() {
        let state = test_state();
        state
            .registry
            .add(Subscription::test_fixture("https://push.example/sub/a"))
            .unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .app_data(json_config())
                .service(index),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/unsubscribe")
            .set_json(json!({ "endpoint": "https://push.example/sub/a" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(state.registry.is_empty());
    }

    #[actix_web::test]
    async fn test_unsubscribe_absent_endpoint_is_idempotent() {
        let state = test_state();
        state
            .registry
            .add(Subscription::test_fixture("https://push.example/sub/a"))
            .unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .app_data(json_config())
                .service(index),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/unsubscribe")
            .set_json(json!({ "endpoint": "https://push.example/sub/missing" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(state.registry.len(), 1);
    }

    #[actix_web::test]
    async fn test_unsubscribe_without_endpoint_is_rejected() {
        let state = test_state();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .app_data(json_config())
                .service(index),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/unsubscribe")
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body.get("error").is_some());
    }
}
