//! Data layer - Pure records without UI coupling
//!
//! This module contains the user records, the insert payloads and the display mode
//! shared by every widget. NO imports from frontend/ or any rendering code.

pub mod display_mode;
pub mod insert;
pub mod user;

pub use display_mode::DisplayMode;
pub use insert::{InsertResult, UserInsertData};
pub use user::User;
