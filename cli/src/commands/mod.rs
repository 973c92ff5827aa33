pub mod ask;
pub mod cli;
