mod http;

pub use http::HTTP;
