//! HTML templates for the web interface.
//!
//! Templates are compiled into the binary. Names end in `.html` so that
//! minijinja escapes every interpolated value.

use minijinja::Environment;

/// Stylesheet inlined into every page.
pub const THEME_CSS: &str = r#"
body {
    font-family: system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    line-height: 1.6;
    max-width: 800px;
    margin: 0 auto;
    padding: 2rem;
    color: #333;
}
h1 { border-bottom: 1px solid #eee; padding-bottom: 0.5rem; }
a { color: #0066cc; text-decoration: none; }
a:hover { text-decoration: underline; }
nav a { margin-right: 1rem; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border-bottom: 1px solid #eee; padding: 0.4rem 0.6rem; text-align: left; }
th { background: #f5f5f5; }
form.inline { display: inline; }
label { display: block; margin-top: 0.75rem; }
input[type=text], input[type=number], select { padding: 0.3rem; min-width: 20rem; }
button { margin-top: 0.75rem; padding: 0.3rem 0.9rem; }
.error {
    background: #fdecea;
    border-left: 4px solid #d93025;
    padding: 0.5rem 1rem;
}
.grade { font-size: 3rem; font-weight: bold; }
.muted { color: #666; font-size: 0.9em; }
"#;

const LAYOUT_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{% block title %}Quiz Bank{% endblock %}</title>
    <style>{{ theme_css|safe }}</style>
</head>
<body>
    <nav>
        <a href="/">Home</a>
        <a href="/view_questions">Questions</a>
        <a href="/add_question">Add question</a>
        <a href="/create_test">Create test</a>
        <a href="/view_tests">Tests</a>
        <a href="/take_test">Take a test</a>
    </nav>
    <main>
    {% if error_message %}<p class="error">{{ error_message }}</p>{% endif %}
    {% block content %}{% endblock %}
    </main>
</body>
</html>"##;

const INDEX_TEMPLATE: &str = r##"{% extends "layout.html" %}
{% block content %}
<h1>Quiz Bank</h1>
<ul>
    <li><a href="/view_questions">View questions</a></li>
    <li><a href="/add_question">Add a question</a></li>
    <li><a href="/create_test">Create a test</a></li>
    <li><a href="/view_tests">View tests and results</a></li>
    <li><a href="/take_test">Take a test</a></li>
</ul>
{% endblock %}"##;

const VIEW_QUESTIONS_TEMPLATE: &str = r##"{% extends "layout.html" %}
{% block title %}Questions{% endblock %}
{% block content %}
<h1>Questions</h1>
{% if questions %}
<table>
    <tr><th>ID</th><th>Question</th><th>Answer</th><th>Weight</th><th></th></tr>
    {% for q in questions %}
    <tr>
        <td>{{ q.id }}</td>
        <td>{{ q.text }}</td>
        <td>{{ q.answer }}</td>
        <td>{{ q.weight }}</td>
        <td>
            <form class="inline" method="post" action="/delete_question/{{ q.id }}">
                <button type="submit">Delete</button>
            </form>
        </td>
    </tr>
    {% endfor %}
</table>
{% else %}
<p class="muted">No questions yet. <a href="/add_question">Add one.</a></p>
{% endif %}
{% endblock %}"##;

const ADD_QUESTION_TEMPLATE: &str = r##"{% extends "layout.html" %}
{% block title %}Add question{% endblock %}
{% block content %}
<h1>Add question</h1>
<form method="post" action="/add_question">
    <label>Question <input type="text" name="question_text" value="{{ question_text }}"></label>
    <label>Answer <input type="text" name="answer_text" value="{{ answer_text }}"></label>
    <label>Weight <input type="number" name="weight" min="1" value="{{ weight or 1 }}"></label>
    <button type="submit">Add</button>
</form>
{% endblock %}"##;

const CREATE_TEST_TEMPLATE: &str = r##"{% extends "layout.html" %}
{% block title %}Create test{% endblock %}
{% block content %}
<h1>Create test</h1>
<form method="post" action="/create_test">
    <label>Name <input type="text" name="test_name" value="{{ test_name }}"></label>
    <h2>Questions</h2>
    {% for q in questions %}
    <label>
        <input type="checkbox" name="selected_questions" value="{{ q.id }}"
            {% if q.id in selected %}checked{% endif %}>
        {{ q.text }} <span class="muted">(weight {{ q.weight }})</span>
    </label>
    {% else %}
    <p class="muted">The question bank is empty. <a href="/add_question">Add a question first.</a></p>
    {% endfor %}
    <button type="submit">Create</button>
</form>
{% endblock %}"##;

const VIEW_TESTS_TEMPLATE: &str = r##"{% extends "layout.html" %}
{% block title %}Tests{% endblock %}
{% block content %}
<h1>Tests</h1>
{% if tests %}
<table>
    <tr><th>ID</th><th>Name</th><th>Questions</th><th>Grades</th><th></th></tr>
    {% for t in tests %}
    <tr>
        <td>{{ t.id }}</td>
        <td>{{ t.name }}</td>
        <td>{{ t.question_count }}</td>
        <td>{% for r in t.results %}{{ r.grade }}{% if not loop.last %}, {% endif %}{% else %}<span class="muted">none</span>{% endfor %}</td>
        <td>
            <a href="/edit_test/{{ t.id }}">Edit</a>
            <form class="inline" method="post" action="/delete_test/{{ t.id }}">
                <button type="submit">Delete</button>
            </form>
        </td>
    </tr>
    {% endfor %}
</table>
{% else %}
<p class="muted">No tests yet. <a href="/create_test">Create one.</a></p>
{% endif %}
{% endblock %}"##;

const EDIT_TEST_TEMPLATE: &str = r##"{% extends "layout.html" %}
{% block title %}Edit {{ test.name }}{% endblock %}
{% block content %}
<h1>Edit {{ test.name }}</h1>
<form method="post" action="/edit_test/{{ test.id }}">
    <label>Name <input type="text" name="test_name" value="{{ test.name }}"></label>
    <h2>Remove questions</h2>
    {% for q in included %}
    <label>
        <input type="checkbox" name="deleted_questions" value="{{ q.id }}">
        {{ q.text }} <span class="muted">(weight {{ q.weight }})</span>
    </label>
    {% else %}
    <p class="muted">This test has no questions.</p>
    {% endfor %}
    <h2>Add questions</h2>
    {% for q in available %}
    <label>
        <input type="checkbox" name="selected_questions" value="{{ q.id }}">
        {{ q.text }} <span class="muted">(weight {{ q.weight }})</span>
    </label>
    {% else %}
    <p class="muted">Every question is already in this test.</p>
    {% endfor %}
    <button type="submit">Save</button>
</form>
{% endblock %}"##;

const TAKE_TEST_TEMPLATE: &str = r##"{% extends "layout.html" %}
{% block title %}Take a test{% endblock %}
{% block content %}
<h1>Take a test</h1>
{% if tests %}
<form method="post" action="/take_test">
    <label>Test
        <select name="test_selector">
            {% for t in tests %}<option value="{{ t.id }}">{{ t.name }}</option>{% endfor %}
        </select>
    </label>
    <button type="submit">Start</button>
</form>
{% else %}
<p class="muted">No tests yet. <a href="/create_test">Create one.</a></p>
{% endif %}
{% endblock %}"##;

const TESTING_TEMPLATE: &str = r##"{% extends "layout.html" %}
{% block title %}{{ test.name }}{% endblock %}
{% block content %}
<h1>{{ test.name }}</h1>
<form method="post" action="/submit_test">
    <input type="hidden" name="test_selector" value="{{ test.id }}">
    {% for q in questions %}
    <label>{{ loop.index }}. {{ q.text }} <span class="muted">(weight {{ q.weight }})</span>
        <input type="text" name="answer_{{ q.id }}">
    </label>
    {% endfor %}
    <button type="submit">Submit</button>
</form>
{% endblock %}"##;

const TEST_RESULT_TEMPLATE: &str = r##"{% extends "layout.html" %}
{% block title %}Result{% endblock %}
{% block content %}
<h1>{{ test.name }}</h1>
<p class="grade">{{ report.grade }}</p>
<p>Correct answers: {{ report.correct }} of {{ report.answered }} answered</p>
<p>Score: {{ report.obtained_weight }} / {{ report.total_weight }}</p>
<p><a href="/view_tests">All results</a></p>
{% endblock %}"##;

const ERROR_TEMPLATE: &str = r##"{% extends "layout.html" %}
{% block title %}{{ status }}{% endblock %}
{% block content %}
<h1>{{ status }}</h1>
<p>{{ message }}</p>
<p><a href="/">Back to the start page</a></p>
{% endblock %}"##;

const PAGES: &[(&str, &str)] = &[
    ("layout.html", LAYOUT_TEMPLATE),
    ("index.html", INDEX_TEMPLATE),
    ("view_questions.html", VIEW_QUESTIONS_TEMPLATE),
    ("add_question.html", ADD_QUESTION_TEMPLATE),
    ("create_test.html", CREATE_TEST_TEMPLATE),
    ("view_tests.html", VIEW_TESTS_TEMPLATE),
    ("edit_test.html", EDIT_TEST_TEMPLATE),
    ("take_test.html", TAKE_TEST_TEMPLATE),
    ("testing.html", TESTING_TEMPLATE),
    ("test_result.html", TEST_RESULT_TEMPLATE),
    ("error.html", ERROR_TEMPLATE),
];

/// Builds the template environment with every page registered.
pub fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    for &(name, source) in PAGES {
        env.add_template(name, source)?;
    }
    env.add_global("theme_css", THEME_CSS);
    Ok(env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn every_page_compiles() {
        let env = environment().unwrap();
        for (name, _) in PAGES {
            assert!(env.get_template(name).is_ok(), "{name} missing");
        }
    }

    #[test]
    fn interpolated_values_are_escaped() {
        let env = environment().unwrap();
        let html = env
            .get_template("add_question.html")
            .unwrap()
            .render(context! { question_text => "<script>alert(1)</script>" })
            .unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn error_message_is_shown_on_form() {
        let env = environment().unwrap();
        let html = env
            .get_template("add_question.html")
            .unwrap()
            .render(context! { error_message => "weight must be at least 1" })
            .unwrap();

        assert!(html.contains(r#"<p class="error">weight must be at least 1</p>"#));
    }

    #[test]
    fn error_page_includes_status_and_message() {
        let env = environment().unwrap();
        let html = env
            .get_template("error.html")
            .unwrap()
            .render(context! { status => "404 Not Found", message => "test not found: 4" })
            .unwrap();

        assert!(html.contains("<h1>404 Not Found</h1>"));
        assert!(html.contains("test not found: 4"));
    }
}
