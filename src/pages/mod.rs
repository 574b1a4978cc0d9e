pub mod account;
pub mod error;
pub mod github_profile;
pub mod home;
pub mod layout;
pub mod viewer;

pub use viewer::{SignedIn, Viewer};
