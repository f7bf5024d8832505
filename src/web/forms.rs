//! Typed request bodies for the HTML forms.
//!
//! Browsers submit checkbox groups as repeated keys, so every form arrives
//! as an ordered list of pairs and is parsed here into a struct before any
//! store call.

use std::collections::HashMap;
use std::str::FromStr;

use crate::domain::{NewQuestion, NewTest, QuestionId, TestEdit, TestId, TestName, ValidationError};

/// Raw urlencoded fields in submission order.
pub type FormFields = Vec<(String, String)>;

fn first<'a>(fields: &'a [(String, String)], key: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn required<'a>(
    fields: &'a [(String, String)],
    key: &'static str,
) -> Result<&'a str, ValidationError> {
    first(fields, key).ok_or(ValidationError::MissingField(key))
}

fn parse_field<T: FromStr>(key: &'static str, value: &str) -> Result<T, ValidationError>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|err: T::Err| ValidationError::InvalidField {
            field: key,
            reason: err.to_string(),
        })
}

fn all<T: FromStr>(fields: &[(String, String)], key: &'static str) -> Result<Vec<T>, ValidationError>
where
    T::Err: std::fmt::Display,
{
    fields
        .iter()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| parse_field(key, v))
        .collect()
}

/// `POST /add_question`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddQuestionForm {
    pub question_text: String,
    pub answer_text: String,
    pub weight: String,
}

impl AddQuestionForm {
    pub fn parse(fields: &[(String, String)]) -> Result<Self, ValidationError> {
        Ok(Self {
            question_text: required(fields, "question_text")?.to_string(),
            answer_text: required(fields, "answer_text")?.to_string(),
            weight: required(fields, "weight")?.to_string(),
        })
    }

    /// Validates the submitted values. The raw strings stay available for
    /// re-rendering the form after a failure.
    pub fn validate(&self) -> Result<NewQuestion, ValidationError> {
        let weight: i64 = parse_field("weight", &self.weight)?;
        NewQuestion::new(&self.question_text, &self.answer_text, weight)
    }
}

/// `POST /create_test`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTestForm {
    pub test_name: String,
    pub selected_questions: Vec<QuestionId>,
}

impl CreateTestForm {
    pub fn parse(fields: &[(String, String)]) -> Result<Self, ValidationError> {
        Ok(Self {
            test_name: first(fields, "test_name").unwrap_or_default().to_string(),
            selected_questions: all(fields, "selected_questions")?,
        })
    }

    pub fn validate(&self) -> Result<NewTest, ValidationError> {
        NewTest::new(&self.test_name, self.selected_questions.iter().copied())
    }
}

/// `POST /edit_test/{id}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTestForm {
    /// A blank name keeps the current one.
    pub test_name: Option<TestName>,
    pub selected_questions: Vec<QuestionId>,
    pub deleted_questions: Vec<QuestionId>,
}

impl EditTestForm {
    pub fn parse(fields: &[(String, String)]) -> Result<Self, ValidationError> {
        let test_name = match first(fields, "test_name") {
            Some(name) if !name.is_empty() => Some(TestName::new(name)?),
            _ => None,
        };
        Ok(Self {
            test_name,
            selected_questions: all(fields, "selected_questions")?,
            deleted_questions: all(fields, "deleted_questions")?,
        })
    }

    pub fn into_edit(self) -> TestEdit {
        TestEdit {
            name: self.test_name,
            add: self.selected_questions,
            remove: self.deleted_questions,
        }
    }
}

/// `POST /take_test`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectTestForm {
    pub test_selector: TestId,
}

impl SelectTestForm {
    pub fn parse(fields: &[(String, String)]) -> Result<Self, ValidationError> {
        Ok(Self {
            test_selector: parse_field("test_selector", required(fields, "test_selector")?)?,
        })
    }
}

/// `POST /submit_test`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTestForm {
    pub test_selector: TestId,
    /// Non-empty answers keyed by question.
    pub answers: HashMap<QuestionId, String>,
}

impl SubmitTestForm {
    const ANSWER_PREFIX: &'static str = "answer_";

    pub fn parse(fields: &[(String, String)]) -> Result<Self, ValidationError> {
        let test_selector =
            parse_field("test_selector", required(fields, "test_selector")?)?;

        let mut answers = HashMap::new();
        for (key, value) in fields {
            let Some(raw_id) = key.strip_prefix(Self::ANSWER_PREFIX) else {
                continue;
            };
            let id: QuestionId = parse_field("answer", raw_id)?;
            if value.is_empty() {
                continue;
            }
            answers.insert(id, value.clone());
        }

        Ok(Self {
            test_selector,
            answers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fields(pairs: &[(&str, &str)]) -> FormFields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn qids(raw: &[i64]) -> Vec<QuestionId> {
        raw.iter().copied().map(QuestionId::from_raw).collect()
    }

    #[test]
    fn add_question_parses_and_validates() {
        let form = AddQuestionForm::parse(&fields(&[
            ("question_text", "Capital of France?"),
            ("answer_text", "Paris"),
            ("weight", "3"),
        ]))
        .unwrap();

        let new = form.validate().unwrap();
        assert_eq!(new.text(), "Capital of France?");
        assert_eq!(new.weight().get(), 3);
    }

    #[test]
    fn add_question_missing_field() {
        let err = AddQuestionForm::parse(&fields(&[("question_text", "Q")])).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("answer_text"));
    }

    #[test]
    fn add_question_non_numeric_weight() {
        let form = AddQuestionForm::parse(&fields(&[
            ("question_text", "Q"),
            ("answer_text", "A"),
            ("weight", "heavy"),
        ]))
        .unwrap();

        assert!(matches!(
            form.validate(),
            Err(ValidationError::InvalidField { field: "weight", .. })
        ));
    }

    #[test]
    fn add_question_zero_weight() {
        let form = AddQuestionForm::parse(&fields(&[
            ("question_text", "Q"),
            ("answer_text", "A"),
            ("weight", "0"),
        ]))
        .unwrap();

        assert_eq!(form.validate(), Err(ValidationError::WeightTooSmall(0)));
    }

    #[test]
    fn create_test_collects_repeated_checkboxes() {
        let form = CreateTestForm::parse(&fields(&[
            ("test_name", "Algebra"),
            ("selected_questions", "3"),
            ("selected_questions", "1"),
        ]))
        .unwrap();

        assert_eq!(form.selected_questions, qids(&[3, 1]));
        assert_eq!(form.validate().unwrap().name().as_str(), "Algebra");
    }

    #[test]
    fn create_test_without_questions_fails_validation() {
        let form = CreateTestForm::parse(&fields(&[("test_name", "Algebra")])).unwrap();
        assert_eq!(form.validate(), Err(ValidationError::NoQuestionsSelected));
    }

    #[test]
    fn create_test_rejects_bad_question_id() {
        let err = CreateTestForm::parse(&fields(&[
            ("test_name", "Algebra"),
            ("selected_questions", "x"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidField { field: "selected_questions", .. }
        ));
    }

    #[test]
    fn edit_test_blank_name_keeps_current() {
        let form = EditTestForm::parse(&fields(&[
            ("test_name", ""),
            ("deleted_questions", "2"),
        ]))
        .unwrap();

        let edit = form.into_edit();
        assert_eq!(edit.name, None);
        assert_eq!(edit.remove, qids(&[2]));
        assert!(edit.add.is_empty());
    }

    #[test]
    fn edit_test_with_name_and_additions() {
        let form = EditTestForm::parse(&fields(&[
            ("test_name", " Geometry "),
            ("selected_questions", "4"),
        ]))
        .unwrap();

        let edit = form.into_edit();
        assert_eq!(edit.name.unwrap().as_str(), " Geometry ");
        assert_eq!(edit.add, qids(&[4]));
    }

    #[test]
    fn select_test_requires_selector() {
        assert_eq!(
            SelectTestForm::parse(&[]).unwrap_err(),
            ValidationError::MissingField("test_selector")
        );
        let form = SelectTestForm::parse(&fields(&[("test_selector", "7")])).unwrap();
        assert_eq!(form.test_selector, TestId::from_raw(7));
    }

    #[test]
    fn submit_skips_empty_answers() {
        let form = SubmitTestForm::parse(&fields(&[
            ("test_selector", "1"),
            ("answer_1", "Paris"),
            ("answer_2", ""),
            ("answer_3", " "),
        ]))
        .unwrap();

        assert_eq!(form.test_selector, TestId::from_raw(1));
        assert_eq!(form.answers.len(), 2);
        assert_eq!(form.answers[&QuestionId::from_raw(1)], "Paris");
        assert_eq!(form.answers[&QuestionId::from_raw(3)], " ");
    }

    #[test]
    fn submit_rejects_malformed_answer_key() {
        let err = SubmitTestForm::parse(&fields(&[
            ("test_selector", "1"),
            ("answer_x", "Paris"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidField { field: "answer", .. }));
    }
}
