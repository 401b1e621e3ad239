mod reminder;

pub use reminder::Reminder;
