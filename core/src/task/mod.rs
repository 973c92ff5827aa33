pub mod types;

pub use types::{Task, TaskRequest, TaskResponse, TaskState};
