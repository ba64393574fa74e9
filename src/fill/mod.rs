pub mod mapping;
pub mod plan_model;
pub mod planner;
