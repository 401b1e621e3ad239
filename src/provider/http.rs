use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Client,
};
use std::time::Duration;

use crate::{configuration::Config, error::Error, types::PushHeader};

/// Shared client for the Web Push endpoints. The request timeout is the
/// only cancellation policy applied to a delivery attempt.
#[derive(Debug)]
pub struct HTTP {
    pub config: Config,
    pub http: Client,
}

impl HTTP {
    pub fn new(config: Config) -> Result<HTTP, Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(HTTP { config, http })
    }

    /// POSTs one encrypted payload to a push endpoint and returns the
    /// upstream status code. Non-2xx statuses are not an error at this
    /// layer; the dispatcher decides what they mean.
    pub async fn post_push(
        &self,
        url: String,
        signature: String,
        push_header: PushHeader,
        data: Vec<u8>,
    ) -> Result<u16, Error> {
        let mut header_map = HeaderMap::new();
        let bearer = format!("WebPush {}", &signature);

        header_map.insert(
            HeaderName::from_static("user-agent"),
            HeaderValue::from_static("push-relay"),
        );
        header_map.insert(
            HeaderName::from_static("authorization"),
            HeaderValue::from_str(bearer.as_str())?,
        );
        header_map.insert(
            HeaderName::from_static("content-encoding"),
            HeaderValue::from_static("aes128gcm"),
        );
        header_map.insert(
            HeaderName::from_static("ttl"),
            HeaderValue::from_str(&push_header.ttl.to_string())?,
        );
        header_map.insert(
            HeaderName::from_static("urgency"),
            HeaderValue::from_str(&push_header.urgency.to_string())?,
        );

        let vapid_pub_b64 = String::from_utf8(self.config.vapid_public_key.clone())
            .map_err(|_| Error::InvalidHeader(String::from("invalid VAPID public key")))?;
        let crypto_key_value = format!("p256ecdsa={}", vapid_pub_b64.trim());
        header_map.insert(
            HeaderName::from_static("crypto-key"),
            HeaderValue::from_str(&crypto_key_value)?,
        );

        let response = self
            .http
            .post(url)
            .headers(header_map)
            .body(data)
            .send()
            .await?;

        Ok(response.status().as_u16())
    }
}
