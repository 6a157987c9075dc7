pub mod canonical;
pub mod resolve;
pub mod session;
pub mod types;
