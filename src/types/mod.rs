pub mod analytics;
pub mod market;
pub mod signals;

pub use analytics::*;
pub use market::*;
pub use signals::*;
