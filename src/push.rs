use base64::{engine::general_purpose::URL_SAFE_NO_PAD as BASE64_URL, Engine};
use chrono::Local;
use futures::future::join_all;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Url;
use tracing::error;

use crate::{
    configuration::{AppState, State},
    error::Error,
    types::{
        Claims, DeliveryStatus, DispatchResult, NotificationPayload,
        PushHeader, Subscription,
    },
};

/// Fans one payload out to every registered subscription.
///
/// Attempts are independent and capped by the push semaphore; the call
/// returns only after every attempt has settled, with exactly one
/// [`DispatchResult`] per subscription in the registry snapshot. The only
/// failure that aborts the whole dispatch is payload serialization, which
/// happens before any delivery is attempted.
pub async fn dispatch(
    state: AppState<State>,
    payload: NotificationPayload,
) -> Result<Vec<DispatchResult>, Error> {
    let body = serde_json::to_string(&payload)?;
    let subscriptions = state.registry.all()?;
    let push_header = PushHeader {
        ttl: state.config.push_ttl,
        urgency: state.config.urgency.clone(),
    };

    let attempts = subscriptions.into_iter().map(|subscription| {
        let state = state.clone();
        let push_header = push_header.clone();
        let body = body.clone();
        async move { attempt(state, subscription, push_header, body).await }
    });

    Ok(join_all(attempts).await)
}

async fn attempt(
    state: AppState<State>,
    subscription: Subscription,
    push_header: PushHeader,
    body: String,
) -> DispatchResult {
    let endpoint = subscription.endpoint.to_owned();

    let delivery = async {
        let _permit = state.push_permits.acquire().await?;
        send_push(&state, &subscription, &push_header, body.as_bytes()).await
    }
    .await;

    match delivery {
        Ok(status) if (200..300).contains(&status) => DispatchResult {
            endpoint,
            status: DeliveryStatus::Success,
            error: None,
        },
        Ok(status) => {
            if state.config.status_code_to_delete.contains(&status) {
                if let Err(e) = state.registry.remove(&endpoint) {
                    error!("failed to prune subscription {}: {}", endpoint, e);
                }
            }
            error!("push endpoint {} responded with status {}", endpoint, status);
            DispatchResult {
                endpoint,
                status: DeliveryStatus::Error,
                error: Some(format!("push service responded with status {}", status)),
            }
        }
        Err(e) => {
            error!("push delivery to {} failed: {}", endpoint, e);
            DispatchResult {
                endpoint,
                status: DeliveryStatus::Error,
                error: Some(e.to_string()),
            }
        }
    }
}

/// One delivery leg: VAPID-signed JWT, `aes128gcm` payload encryption
/// against the subscription keys, then a POST to the endpoint.
pub async fn send_push(
    state: &AppState<State>,
    subscription: &Subscription,
    push_header: &PushHeader,
    payload: &[u8],
) -> Result<u16, Error> {
    let url = Url::parse(&subscription.endpoint)?;
    let exp = Local::now().timestamp_millis() / 1000 + push_header.ttl;

    let scheme = url.scheme();
    let host = if let Some(h) = url.host() {
        h.to_string()
    } else {
        return Err(Error::InvalidOption {
            option: String::from("host"),
        });
    };

    let aud = format!("{}://{}", scheme, host);
    let sub = format!("mailto:{}", &state.config.mail_to);

    let key = EncodingKey::from_ec_pem(&state.config.vapid_private_key)?;
    let claims = Claims { aud, sub, exp };
    let token = encode(&Header::new(Algorithm::ES256), &claims, &key)?;

    let p256dh = BASE64_URL.decode(&subscription.keys.p256dh)?;
    let auth = BASE64_URL.decode(&subscription.keys.auth)?;
    let data = ece::encrypt(&p256dh, &auth, payload)?;

    state
        .http
        .post_push(
            subscription.endpoint.to_owned(),
            token,
            push_header.clone(),
            data,
        )
        .await
}
