pub mod api;
pub mod config;
pub mod entities;
pub mod locale;
pub mod middleware;
pub mod slug;
pub mod store;

pub use api::create_api_router;
pub use config::{BackendConfig, Config, ConfigError};
pub use locale::Locale;
pub use store::{ContentStore, StoreError};
