use actix_web::{post, web, HttpResponse, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    configuration::{AppState, State},
    error::Error,
    push,
    types::{DispatchResult, NotificationPayload},
};

#[derive(Debug, Deserialize)]
pub struct Request {
    title: Option<String>,
    body: Option<String>,
    icon: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Response {
    pub results: Vec<DispatchResult>,
}

#[post("/send-notification")]
pub async fn index(
    state: web::Data<AppState<State>>,
    data: web::Json<Request>,
) -> Result<HttpResponse, Error> {
    let data = data.into_inner();
    let title = require_field(data.title, "title")?;
    let body = require_field(data.body, "body")?;
    let icon = data
        .icon
        .filter(|icon| !icon.trim().is_empty())
        .unwrap_or_else(|| state.config.default_icon.to_owned());

    let payload = NotificationPayload { title, body, icon };
    info!(
        "dispatching \"{}\" to {} subscriptions",
        payload.title,
        state.registry.len()
    );

    let results = push::dispatch(state.get_ref().clone(), payload).await?;

    Ok(HttpResponse::Ok().json(Response { results }))
}

fn require_field(value: Option<String>, name: &str) -> Result<String, Error> {
    value
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| Error::FieldNotExist(String::from(name)))
}
