//! # 任务状态模块
//!
//! 跟踪单个任务的生命周期，保证事件序列合法：
//! 若干 `working` 之后恰好一个终态事件，终态之后不再有任何事件。

pub mod transitions;

pub use transitions::{StateTransition, TaskLifecycle, TransitionError};
