mod app_error;
mod dbdelay_app;

pub use app_error::AppError;
pub use dbdelay_app::{DbDelayApp, DbDelayOperation};
