//! Route table and request handlers.

use axum::extract::{Form, Path, State};
use axum::middleware;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use minijinja::context;
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use super::forms::{
    AddQuestionForm, CreateTestForm, EditTestForm, FormFields, SelectTestForm, SubmitTestForm,
};
use super::error::ErrorPage;
use super::{AppState, WebError};
use crate::domain::{QuestionId, TestId, TestResult};
use crate::session::TestSession;
use crate::store::{QuizRepository, StoreError};

type SharedState = Arc<AppState>;

/// Builds the router with every page of the web interface.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/view_questions", get(view_questions))
        .route("/add_question", get(add_question_form).post(add_question))
        .route("/delete_question/{id}", post(delete_question))
        .route("/create_test", get(create_test_form).post(create_test))
        .route("/view_tests", get(view_tests))
        .route("/delete_test/{id}", post(delete_test))
        .route("/edit_test/{id}", get(edit_test_form).post(edit_test))
        .route("/take_test", get(take_test_form).post(select_test))
        .route("/testing/{id}", get(testing))
        .route("/submit_test", post(submit_test))
        .layer(middleware::map_response_with_state(
            state.clone(),
            render_error_pages,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Replaces the plain-text body of a failed request with the error page.
async fn render_error_pages(
    State(state): State<SharedState>,
    mut response: Response,
) -> Response {
    let Some(page) = response.extensions_mut().remove::<ErrorPage>() else {
        return response;
    };
    match state.render_error(&page) {
        Ok(html) => (page.status, html).into_response(),
        Err(err) => {
            error!(error = %err, "failed to render error page");
            response
        }
    }
}

fn unprocessable(page: Html<String>) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, page).into_response()
}

// ===========================================
// Question Store
// ===========================================

async fn index(State(state): State<SharedState>) -> Result<Html<String>, WebError> {
    state.render("index.html", context! {})
}

async fn view_questions(State(state): State<SharedState>) -> Result<Html<String>, WebError> {
    let questions = state.store()?.list_questions()?;
    state.render("view_questions.html", context! { questions })
}

async fn add_question_form(State(state): State<SharedState>) -> Result<Html<String>, WebError> {
    state.render("add_question.html", context! {})
}

async fn add_question(
    State(state): State<SharedState>,
    Form(fields): Form<FormFields>,
) -> Result<Response, WebError> {
    let form = AddQuestionForm::parse(&fields)?;
    let new = match form.validate() {
        Ok(new) => new,
        Err(err) => {
            let page = state.render(
                "add_question.html",
                context! {
                    error_message => err.to_string(),
                    question_text => form.question_text,
                    answer_text => form.answer_text,
                    weight => form.weight,
                },
            )?;
            return Ok(unprocessable(page));
        }
    };

    state.store()?.add_question(&new)?;
    Ok(Redirect::to("/").into_response())
}

async fn delete_question(
    State(state): State<SharedState>,
    Path(id): Path<QuestionId>,
) -> Result<Redirect, WebError> {
    state.store()?.remove_question(id)?;
    Ok(Redirect::to("/view_questions"))
}

// ===========================================
// Test Composer
// ===========================================

async fn create_test_form(State(state): State<SharedState>) -> Result<Html<String>, WebError> {
    let questions = state.store()?.list_questions()?;
    state.render("create_test.html", context! { questions })
}

async fn create_test(
    State(state): State<SharedState>,
    Form(fields): Form<FormFields>,
) -> Result<Response, WebError> {
    let form = CreateTestForm::parse(&fields)?;
    let mut store = state.store()?;

    let created = form
        .validate()
        .map_err(StoreError::from)
        .and_then(|new| store.create_test(&new));

    match created {
        Ok(_) => Ok(Redirect::to("/view_tests").into_response()),
        Err(StoreError::Validation(err)) => {
            let questions = store.list_questions()?;
            let page = state.render(
                "create_test.html",
                context! {
                    error_message => err.to_string(),
                    test_name => form.test_name,
                    selected => form.selected_questions,
                    questions,
                },
            )?;
            Ok(unprocessable(page))
        }
        Err(err) => Err(err.into()),
    }
}

#[derive(Serialize)]
struct TestRow {
    id: TestId,
    name: String,
    question_count: usize,
    results: Vec<TestResult>,
}

async fn view_tests(State(state): State<SharedState>) -> Result<Html<String>, WebError> {
    let rows: Vec<TestRow> = {
        let store = state.store()?;
        let mut results = store.results_by_test()?;
        store
            .list_tests()?
            .into_iter()
            .map(|test| TestRow {
                id: test.id(),
                name: test.name().to_string(),
                question_count: test.question_ids().len(),
                results: results.remove(&test.id()).unwrap_or_default(),
            })
            .collect()
    };
    state.render("view_tests.html", context! { tests => rows })
}

async fn delete_test(
    State(state): State<SharedState>,
    Path(id): Path<TestId>,
) -> Result<Redirect, WebError> {
    state.store()?.delete_test(id)?;
    Ok(Redirect::to("/view_tests"))
}

fn render_edit_page(
    state: &AppState,
    store: &dyn QuizRepository,
    id: TestId,
    error_message: Option<String>,
) -> Result<Html<String>, WebError> {
    let test = store
        .get_test(id)?
        .ok_or_else(|| StoreError::test_not_found(id))?;
    let (included, available): (Vec<_>, Vec<_>) = store
        .list_questions()?
        .into_iter()
        .partition(|q| test.contains(q.id()));

    state.render(
        "edit_test.html",
        context! { test, included, available, error_message },
    )
}

async fn edit_test_form(
    State(state): State<SharedState>,
    Path(id): Path<TestId>,
) -> Result<Html<String>, WebError> {
    let store = state.store()?;
    render_edit_page(&state, &*store, id, None)
}

async fn edit_test(
    State(state): State<SharedState>,
    Path(id): Path<TestId>,
    Form(fields): Form<FormFields>,
) -> Result<Response, WebError> {
    let mut store = state.store()?;

    let edited = EditTestForm::parse(&fields)
        .map_err(StoreError::from)
        .and_then(|form| store.edit_test(id, &form.into_edit()));

    match edited {
        Ok(_) => Ok(Redirect::to("/view_tests").into_response()),
        Err(StoreError::Validation(err)) => {
            let page = render_edit_page(&state, &*store, id, Some(err.to_string()))?;
            Ok(unprocessable(page))
        }
        Err(err) => Err(err.into()),
    }
}

// ===========================================
// Test Session
// ===========================================

async fn take_test_form(State(state): State<SharedState>) -> Result<Html<String>, WebError> {
    let tests = state.store()?.list_tests()?;
    state.render("take_test.html", context! { tests })
}

async fn select_test(Form(fields): Form<FormFields>) -> Result<Redirect, WebError> {
    let form = SelectTestForm::parse(&fields)?;
    Ok(Redirect::to(&format!("/testing/{}", form.test_selector)))
}

async fn testing(
    State(state): State<SharedState>,
    Path(id): Path<TestId>,
) -> Result<Html<String>, WebError> {
    let session = TestSession::start(&*state.store()?, id)?;
    state.render(
        "testing.html",
        context! {
            test => session.test(),
            questions => session.questions(),
        },
    )
}

async fn submit_test(
    State(state): State<SharedState>,
    Form(fields): Form<FormFields>,
) -> Result<Html<String>, WebError> {
    let form = SubmitTestForm::parse(&fields)?;
    let (test, submission) = {
        let mut store = state.store()?;
        let mut session = TestSession::start(&*store, form.test_selector)?;
        for (question_id, answer) in form.answers {
            if !session.answer(question_id, answer) {
                debug!(question_id = %question_id, "ignoring answer for question outside test");
            }
        }
        let test = session.test().clone();
        (test, session.submit(&mut *store, state.policy())?)
    };

    state.render(
        "test_result.html",
        context! { test, report => submission.report },
    )
}
