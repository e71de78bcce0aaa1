pub mod analytics;
pub mod cache;
pub mod fallback;
pub mod market_data;
pub mod nav;
pub mod signals;

pub use analytics::AnalyticsLog;
pub use cache::Cache;
pub use fallback::{FallbackChain, Resolved};
pub use market_data::MarketDataGateway;
pub use nav::compute_nav;
