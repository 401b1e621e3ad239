mod push;
mod subscription;

pub use push::{
    Claims, DeliveryStatus, DispatchResult, NotificationPayload, PushHeader,
    Urgency,
};
pub use subscription::{Subscription, SubscriptionKeys};
