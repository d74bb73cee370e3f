pub mod analytics_dto;
pub mod client_dto;
pub mod cogspeed_dto;
