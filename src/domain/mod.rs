//! Core types: Question, Test, TestResult and their validated fields

mod grade;
mod ids;
mod question;
mod result;
mod test_name;
mod validation;
mod weight;

pub use grade::Grade;
pub use ids::{ParseIdError, QuestionId, ResultId, TestId};
pub use question::{NewQuestion, Question};
pub use result::TestResult;
pub use test::{NewTest, Test, TestEdit};
pub use test_name::TestName;
pub use validation::ValidationError;
pub use weight::Weight;
