pub mod intake_service;
pub mod submission;
