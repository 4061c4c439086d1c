pub mod client;
pub mod dto;
pub mod session;

pub use client::AuthClient;
pub use session::{Role, Session, SessionStore};
