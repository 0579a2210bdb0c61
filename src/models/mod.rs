//! Data models shared between storage and the API.

pub mod account;
pub mod contact;

pub use account::{Account, ExternalProfile};
pub use contact::ContactMessage;
