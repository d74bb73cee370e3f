pub mod analytics;
pub mod client;
pub mod cogspeed;
