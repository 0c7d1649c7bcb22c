//! Core business logic module
//!
//! This module contains the ATM core:
//! - `traits` - The storage abstraction used by the session manager
//! - `session` - Login state and account operations

pub mod session;
pub mod traits;

pub use session::{SessionManager, SessionState};
pub use traits::{AccountStore, Accounts};
