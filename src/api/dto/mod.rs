//! Request and response DTOs.

pub mod health;
pub mod link;
pub mod qrcode;
pub mod stats;
pub mod update_link;
