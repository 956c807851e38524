pub mod alpha_vantage;
pub mod http;

pub use alpha_vantage::AlphaVantageProvider;
pub use http::ApiClient;
