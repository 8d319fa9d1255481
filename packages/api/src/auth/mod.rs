//! Authentication: provider capability, in-memory provider, session tracking
//! and password hashing.

mod memory;
mod password;
mod provider;
mod session;

pub use memory::{MemoryAuth, MIN_PASSWORD_LEN};
pub use password::{hash_password, verify_password};
pub use provider::AuthProvider;
pub use session::Session;
