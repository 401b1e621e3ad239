//! Push notification types
//!
//! Types for push message formatting, VAPID claims and per-subscription
//! delivery outcomes.

use serde::{Deserialize, Serialize};
use std::{fmt, io, str::FromStr};

#[derive(Debug, Clone)]
pub struct PushHeader {
    pub ttl: i64,
    pub urgency: Urgency,
}

/// Payload encrypted into every delivery; transient, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
    pub icon: String,
}

#[derive(Debug, Clone)]
pub enum Urgency {
    VeryLow,
    Low,
    Normal,
    High,
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Urgency::VeryLow => write!(f, "very-low"),
            Urgency::Low => write!(f, "low"),
            Urgency::Normal => write!(f, "normal"),
            Urgency::High => write!(f, "high"),
        }
    }
}

impl FromStr for Urgency {
    type Err = io::Error;

    fn from_str(value: &str) -> Result<Urgency, Self::Err> {
        match value {
            "very-low" => Ok(Urgency::VeryLow),
            "low" => Ok(Urgency::Low),
            "normal" => Ok(Urgency::Normal),
            "high" => Ok(Urgency::High),
            _ => Err(io::Error::other("Urgency not supported")),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub aud: String,
    pub sub: String,
    pub exp: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Success,
    Error,
}

/// Outcome of one delivery attempt, collected for the send response.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchResult {
    pub endpoint: String,
    pub status: DeliveryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urgency_round_trip() {
        for value in ["very-low", "low", "normal", "high"] {
            let urgency = Urgency::from_str(value).unwrap();
            assert_eq!(urgency.to_string(), value);
        }
        assert!(Urgency::from_str("urgent").is_err());
    }

    #[test]
    fn test_dispatch_result_omits_error_on_success() {
        let result = DispatchResult {
            endpoint: String::from("https://push.example/a"),
            status: DeliveryStatus::Success,
            error: None,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "success");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_dispatch_result_keeps_error_message() {
        let result = DispatchResult {
            endpoint: String::from("https://push.example/a"),
            status: DeliveryStatus::Error,
            error: Some(String::from("connection refused")),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"], "connection refused");
    }

    #[test]
    fn test_payload_serializes_all_fields() {
        let payload = NotificationPayload {
            title: String::from("Reminder"),
            body: String::from("You still have unfinished tasks"),
            icon: String::from("/icons/icon-192.png"),
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["title"], "Reminder");
        assert_eq!(json["body"], "You still have unfinished tasks");
        assert_eq!(json["icon"], "/icons/icon-192.png");
    }
}
