pub mod analytics_service;
pub mod client_service;
pub mod cogspeed_service;
