// Application layer - Use cases over the wintering area data
pub mod aggregation_service;
pub mod area_source;
pub mod dashboard_service;
