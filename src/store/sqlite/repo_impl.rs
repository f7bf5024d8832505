//! QuizRepository trait implementation for SqliteStore.

use super::SqliteStore;
use crate::domain::{
    Grade, NewQuestion, NewTest, Question, QuestionId, ResultId, Test, TestEdit, TestId,
    TestName, TestResult, ValidationError, Weight,
};
use crate::store::{QuizRepository, StoreError, StoreResult};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

impl QuizRepository for SqliteStore {
    // ===========================================
    // Question Store
    // ===========================================

    fn add_question(&mut self, question: &NewQuestion) -> StoreResult<Question> {
        self.conn.execute(
            "INSERT INTO questions (text, answer, weight) VALUES (?1, ?2, ?3)",
            params![question.text(), question.answer(), question.weight().get()],
        )?;
        let id = QuestionId::from_raw(self.conn.last_insert_rowid());
        info!(question_id = %id, weight = %question.weight(), "added question");

        Ok(Question::new(
            id,
            question.text(),
            question.answer(),
            question.weight(),
        ))
    }

    fn remove_question(&mut self, id: QuestionId) -> StoreResult<()> {
        let tx = self.transaction()?;

        if !question_exists(tx.conn(), id)? {
            return Err(StoreError::question_not_found(id));
        }

        // Unlink from every test before the row itself goes.
        let unlinked = tx.conn().execute(
            "DELETE FROM test_questions WHERE question_id = ?",
            [id.get()],
        )?;
        tx.conn()
            .execute("DELETE FROM questions WHERE id = ?", [id.get()])?;

        tx.commit()?;
        info!(question_id = %id, unlinked, "removed question");
        Ok(())
    }

    fn get_question(&self, id: QuestionId) -> StoreResult<Option<Question>> {
        let raw = self
            .conn
            .query_row(
                "SELECT id, text, answer, weight FROM questions WHERE id = ?",
                [id.get()],
                RawQuestion::from_row,
            )
            .optional()?;
        raw.map(RawQuestion::decode).transpose()
    }

    fn list_questions(&self) -> StoreResult<Vec<Question>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, text, answer, weight FROM questions ORDER BY id")?;
        let rows = stmt
            .query_map([], RawQuestion::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = rows.len(), "listed questions");
        rows.into_iter().map(RawQuestion::decode).collect()
    }

    // ===========================================
    // Test Composer
    // ===========================================

    fn create_test(&mut self, test: &NewTest) -> StoreResult<Test> {
        let tx = self.transaction()?;

        if test_id_by_name(tx.conn(), test.name())?.is_some() {
            return Err(ValidationError::DuplicateTestName(test.name().to_string()).into());
        }
        for &question_id in test.question_ids() {
            if !question_exists(tx.conn(), question_id)? {
                return Err(StoreError::question_not_found(question_id));
            }
        }

        tx.conn()
            .execute("INSERT INTO tests (name) VALUES (?)", [test.name().as_str()])?;
        let id = TestId::from_raw(tx.conn().last_insert_rowid());

        for &question_id in test.question_ids() {
            tx.conn().execute(
                "INSERT INTO test_questions (test_id, question_id) VALUES (?, ?)",
                [id.get(), question_id.get()],
            )?;
        }

        tx.commit()?;
        info!(
            test_id = %id,
            name = %test.name(),
            questions = test.question_ids().len(),
            "created test"
        );

        Ok(Test::new(
            id,
            test.name().clone(),
            test.question_ids().clone(),
        ))
    }

    fn get_test(&self, id: TestId) -> StoreResult<Option<Test>> {
        fetch_test(&self.conn, id)
    }

    fn list_tests(&self) -> StoreResult<Vec<Test>> {
        let mut memberships: BTreeMap<i64, BTreeSet<QuestionId>> = BTreeMap::new();
        let mut stmt = self
            .conn
            .prepare("SELECT test_id, question_id FROM test_questions")?;
        let pairs = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)))?;
        for pair in pairs {
            let (test_id, question_id) = pair?;
            memberships
                .entry(test_id)
                .or_default()
                .insert(QuestionId::from_raw(question_id));
        }

        let mut stmt = self.conn.prepare("SELECT id, name FROM tests ORDER BY id")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, name)| {
                let question_ids = memberships.remove(&id).unwrap_or_default();
                Ok(Test::new(TestId::from_raw(id), decode_name(&name)?, question_ids))
            })
            .collect()
    }

    fn test_questions(&self, id: TestId) -> StoreResult<Vec<Question>> {
        if !test_exists(&self.conn, id)? {
            return Err(StoreError::test_not_found(id));
        }

        let mut stmt = self.conn.prepare(
            "SELECT q.id, q.text, q.answer, q.weight
             FROM questions q JOIN test_questions tq ON q.id = tq.question_id
             WHERE tq.test_id = ?
             ORDER BY q.id",
        )?;
        let rows = stmt
            .query_map([id.get()], RawQuestion::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(RawQuestion::decode).collect()
    }

    fn edit_test(&mut self, id: TestId, edit: &TestEdit) -> StoreResult<Test> {
        if edit.is_empty() {
            return self.get_test(id)?.ok_or_else(|| StoreError::test_not_found(id));
        }

        let tx = self.transaction()?;

        let current = fetch_test(tx.conn(), id)?.ok_or_else(|| StoreError::test_not_found(id))?;

        if let Some(name) = &edit.name
            && name != current.name()
        {
            if test_id_by_name(tx.conn(), name)?.is_some() {
                return Err(ValidationError::DuplicateTestName(name.to_string()).into());
            }
            tx.conn().execute(
                "UPDATE tests SET name = ? WHERE id = ?",
                params![name.as_str(), id.get()],
            )?;
        }

        for &question_id in &edit.add {
            if !question_exists(tx.conn(), question_id)? {
                return Err(StoreError::question_not_found(question_id));
            }
            tx.conn().execute(
                "INSERT OR IGNORE INTO test_questions (test_id, question_id) VALUES (?, ?)",
                [id.get(), question_id.get()],
            )?;
        }

        for &question_id in &edit.remove {
            tx.conn().execute(
                "DELETE FROM test_questions WHERE test_id = ? AND question_id = ?",
                [id.get(), question_id.get()],
            )?;
        }

        let updated = fetch_test(tx.conn(), id)?.ok_or_else(|| StoreError::test_not_found(id))?;
        tx.commit()?;

        if updated != current {
            info!(
                test_id = %id,
                name = %updated.name(),
                questions = updated.question_ids().len(),
                "updated test"
            );
        }
        Ok(updated)
    }

    fn delete_test(&mut self, id: TestId) -> StoreResult<()> {
        let tx = self.transaction()?;

        if !test_exists(tx.conn(), id)? {
            return Err(StoreError::test_not_found(id));
        }

        // Results, then associations, then the test itself.
        let results = tx
            .conn()
            .execute("DELETE FROM results WHERE test_id = ?", [id.get()])?;
        let unlinked = tx
            .conn()
            .execute("DELETE FROM test_questions WHERE test_id = ?", [id.get()])?;
        tx.conn()
            .execute("DELETE FROM tests WHERE id = ?", [id.get()])?;

        tx.commit()?;
        info!(test_id = %id, results, unlinked, "deleted test");
        Ok(())
    }

    // ===========================================
    // Result Log
    // ===========================================

    fn record_result(&mut self, test_id: TestId, grade: Grade) -> StoreResult<TestResult> {
        let tx = self.transaction()?;

        if !test_exists(tx.conn(), test_id)? {
            return Err(StoreError::test_not_found(test_id));
        }

        let taken_at = Utc::now();
        tx.conn().execute(
            "INSERT INTO results (test_id, grade, taken_at) VALUES (?1, ?2, ?3)",
            params![test_id.get(), grade.value(), taken_at.to_rfc3339()],
        )?;
        let id = ResultId::from_raw(tx.conn().last_insert_rowid());

        tx.commit()?;
        info!(result_id = %id, test_id = %test_id, grade = %grade, "recorded result");
        Ok(TestResult::new(id, test_id, grade, taken_at))
    }

    fn results_for_test(&self, test_id: TestId) -> StoreResult<Vec<TestResult>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, test_id, grade, taken_at FROM results WHERE test_id = ? ORDER BY id",
        )?;
        let rows = stmt
            .query_map([test_id.get()], RawResult::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(RawResult::decode).collect()
    }

    fn results_by_test(&self) -> StoreResult<BTreeMap<TestId, Vec<TestResult>>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, test_id, grade, taken_at FROM results ORDER BY id")?;
        let rows = stmt
            .query_map([], RawResult::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        let mut grouped: BTreeMap<TestId, Vec<TestResult>> = BTreeMap::new();
        for raw in rows {
            let result = raw.decode()?;
            grouped.entry(result.test_id()).or_default().push(result);
        }
        Ok(grouped)
    }
}

// ===========================================
// Row Decoding
// ===========================================

struct RawQuestion {
    id: i64,
    text: String,
    answer: String,
    weight: i64,
}

impl RawQuestion {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            text: row.get(1)?,
            answer: row.get(2)?,
            weight: row.get(3)?,
        })
    }

    fn decode(self) -> StoreResult<Question> {
        let weight = Weight::new(self.weight).map_err(|e| {
            StoreError::Corrupt(format!("question {} has invalid weight: {}", self.id, e))
        })?;
        Ok(Question::new(
            QuestionId::from_raw(self.id),
            self.text,
            self.answer,
            weight,
        ))
    }
}

struct RawResult {
    id: i64,
    test_id: i64,
    grade: i64,
    taken_at: String,
}

impl RawResult {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            test_id: row.get(1)?,
            grade: row.get(2)?,
            taken_at: row.get(3)?,
        })
    }

    fn decode(self) -> StoreResult<TestResult> {
        let grade = Grade::new(self.grade).map_err(|e| {
            StoreError::Corrupt(format!("result {} has invalid grade: {}", self.id, e))
        })?;
        let taken_at = DateTime::parse_from_rfc3339(&self.taken_at)
            .map_err(|e| {
                StoreError::Corrupt(format!("result {} has invalid timestamp: {}", self.id, e))
            })?
            .with_timezone(&Utc);
        Ok(TestResult::new(
            ResultId::from_raw(self.id),
            TestId::from_raw(self.test_id),
            grade,
            taken_at,
        ))
    }
}

fn decode_name(name: &str) -> StoreResult<TestName> {
    TestName::new(name).map_err(|e| StoreError::Corrupt(format!("invalid test name: {}", e)))
}

// ===========================================
// Lookup Helpers
// ===========================================
// Free functions so they can run against a transaction's connection.

fn question_exists(conn: &Connection, id: QuestionId) -> StoreResult<bool> {
    Ok(conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM questions WHERE id = ?)",
        [id.get()],
        |row| row.get(0),
    )?)
}

fn test_exists(conn: &Connection, id: TestId) -> StoreResult<bool> {
    Ok(conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM tests WHERE id = ?)",
        [id.get()],
        |row| row.get(0),
    )?)
}

fn test_id_by_name(conn: &Connection, name: &TestName) -> StoreResult<Option<TestId>> {
    let id = conn
        .query_row(
            "SELECT id FROM tests WHERE name = ?",
            [name.as_str()],
            |row| row.get::<_, i64>(0),
        )
        .optional()?;
    Ok(id.map(TestId::from_raw))
}

fn fetch_test(conn: &Connection, id: TestId) -> StoreResult<Option<Test>> {
    let name = conn
        .query_row("SELECT name FROM tests WHERE id = ?", [id.get()], |row| {
            row.get::<_, String>(0)
        })
        .optional()?;
    let Some(name) = name else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(
        "SELECT question_id FROM test_questions WHERE test_id = ? ORDER BY question_id",
    )?;
    let question_ids = stmt
        .query_map([id.get()], |row| row.get::<_, i64>(0))?
        .map(|r| r.map(QuestionId::from_raw))
        .collect::<Result<BTreeSet<_>, _>>()?;

    Ok(Some(Test::new(id, decode_name(&name)?, question_ids)))
}
