pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod query;
pub mod state;
pub mod stats;
pub mod timestamp;
pub mod ui;
pub mod upstream;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use upstream::UpstreamClient;
