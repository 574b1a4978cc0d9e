pub mod password;
pub mod service;
pub mod session;
pub mod store;

pub use service::IdentityService;
pub use session::{SESSION_COOKIE, SessionStore};
pub use store::{FileIdentityStore, IdentityStore, InMemoryIdentityStore, UserRecord};
