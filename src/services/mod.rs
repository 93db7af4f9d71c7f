pub mod streak_service;
pub mod collection_service;
pub mod metadata;
