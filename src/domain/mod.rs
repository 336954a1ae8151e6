// Domain layer - Wintering areas, their statistics and the dashboard model
pub mod dashboard;
pub mod statistics;
pub mod widgets;
pub mod wintering_area;
