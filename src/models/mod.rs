pub mod listing;
pub mod pricing;
pub mod recommendation;
pub mod trip;
