pub mod availability_service;
pub mod distance_service;
pub mod listing_service;
pub mod pricing_service;
pub mod recommendation_scoring;
pub mod recommendation_service;
