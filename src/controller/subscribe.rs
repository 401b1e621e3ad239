use actix_web::{post, web, HttpResponse, Result};
use tracing::{debug, info};

use crate::{
    configuration::{AppState, State},
    error::Error,
    types::Subscription,
};

#[post("/subscribe")]
pub async fn index(
    state: web::Data<AppState<State>>,
    subscription: web::Json<Subscription>,
) -> Result<HttpResponse, Error> {
    let subscription = subscription.into_inner();
    let endpoint = subscription.endpoint.to_owned();

    let inserted = state.registry.add(subscription)?;
    if inserted {
        info!("registered subscription {}", endpoint);
    } else {
        debug!("subscription {} already registered", endpoint);
    }

    if state.config.enable_reminder {
        state.reminder.start(state.get_ref().clone());
    }

    Ok(HttpResponse::Created().json(serde_json::json!({})))
}
