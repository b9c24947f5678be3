pub mod certificate;
pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod numbering;
pub mod print;
pub mod registry;
pub mod render;
pub mod schema;
pub mod state;
pub mod validation;

pub use error::{AppError, AppResult};
pub use state::AppState;
