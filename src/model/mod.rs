//! Domain model for projman.
//!
//! # Core Concepts
//!
//! - [`Project`]: top-level container owning an ordered list of tasks.
//!   `Active` until every task is done, then `Closed` for good.
//! - [`Task`]: unit of work inside one project, moving
//!   `New -> InProgress -> Done` and never back.
//!
//! Both entities keep their fields private so the lifecycle rules in
//! [`Task::change_status`] and [`Project::close`] are the only way to move
//! state forward.

mod project;
mod status;
mod task;

pub use project::*;
pub use status::*;
pub use task::*;
