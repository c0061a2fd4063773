// --- File: crates/tarot_auth/src/lib.rs ---
//! Who is using the client.
//!
//! Identity lives in an explicit [`SessionContext`] handed to whatever needs
//! it, backed by an injected [`SessionStore`] for rehydration across runs.

pub mod error;
pub mod role;
pub mod session;
pub mod store;
pub mod token;


pub use error::AuthError;
pub use role::Role;
pub use session::{Session, SessionContext};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
pub use token::decode_claims;
