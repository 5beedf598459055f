pub mod app;
pub mod bmi;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod storage;
pub mod ui;
pub mod upload;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::GoalStore;
