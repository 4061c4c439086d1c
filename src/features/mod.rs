pub mod auth;
pub mod citizens;
pub mod signalements;
