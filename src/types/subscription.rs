use serde::Deserialize;

/// Browser PushSubscription JSON, as produced by
/// `PushSubscription.toJSON()` on the client.
#[derive(Debug, Clone, Deserialize)]
pub struct Subscription {
    pub endpoint: String,
    #[serde(alias = "expirationTime")]
    pub expiration_time: Option<i64>,
    pub keys: SubscriptionKeys,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionKeys {
    pub p256dh: String,
    pub auth: String,
}

#[cfg(test)]
impl Subscription {
    /// Descriptor with a valid P-256 key pair, usable for encryption.
    pub fn test_fixture(endpoint: &str) -> Subscription {
        Subscription {
            endpoint: endpoint.to_owned(),
            expiration_time: None,
            keys: SubscriptionKeys {
                p256dh: String::from(
                    "BHS7iCZQVkDuFMLXIZrlPvm6mWSiU-jQ-FXHDjZfHGDrCZAX8ZufcffLegTKJKmg5kw605-y0I_fdt0owzk2dlo",
                ),
                auth: String::from("a5kczpmdOo0Vwm_K9SOucQ"),
            },
        }
    }
}
