// SPDX-License-Identifier: MIT

//! Application services.

pub mod google;
pub mod resolver;
pub mod session;

pub use google::{GoogleAuthService, LoginSession};
pub use session::SessionIssuer;
