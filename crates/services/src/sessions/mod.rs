mod runner;
mod view;

// Public API of the attempt subsystem.
pub use crate::error::AttemptError;
pub use runner::{ExamLoopService, TaskSubmission};
pub use view::SessionSnapshot;
