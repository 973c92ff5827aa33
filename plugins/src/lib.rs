pub mod agent;
pub mod factory;
