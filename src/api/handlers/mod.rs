//! HTTP handlers.

mod health;
mod links;
mod qrcode;
mod redirect;
mod stats;

pub use health::health_handler;
pub use links::{create_link_handler, update_link_handler};
pub use qrcode::qr_code_handler;
pub use redirect::redirect_handler;
pub use stats::stats_handler;
