pub mod claims;
pub mod context;
