pub mod crypto;
pub mod stats;
pub mod time;
pub mod token;
pub mod validation;
