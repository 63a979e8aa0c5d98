pub mod discovery_service;
pub mod match_service;
pub mod profile_service;
