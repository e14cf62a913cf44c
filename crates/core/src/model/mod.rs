mod answers;
mod ids;
mod section;
mod session;
mod test_type;

pub use answers::AnswerSheet;
pub use ids::{AttemptId, ParseIdError, QuestionKey, SectionId};
pub use section::{CatalogError, Section, SectionCatalog, SectionError};
pub use session::{ExamSession, SessionError, SessionStatus};
pub use test_type::{ParseTestTypeError, TaskKind, TestType};
