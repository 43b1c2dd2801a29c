//! State Management
//!
//! Global UI state, the sign-in session, and per-page load state.

pub mod global;
pub mod load;
pub mod session;
pub mod storage;

pub use global::{provide_global_state, GlobalState};
pub use load::{resolve, settle, spawn_scoped, use_page_scope, LoadState};
pub use session::{provide_session, SessionContext};
