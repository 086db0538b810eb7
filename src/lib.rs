pub mod api;
pub mod error;
pub mod feed;
pub mod ids;
pub mod scenario;
pub mod store;
pub mod twitter;
pub mod ui;
pub mod user_config;
pub mod users;

pub use error::{Error, Result};
pub use feed::FeedMode;
pub use twitter::Twitter;
