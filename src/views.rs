//! Server-rendered pages. User-supplied text is escaped; recommendation text
//! is trusted catalog HTML and is inserted as-is.

use crate::models::{PredictionRecord, SYMPTOM_FIELDS};

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} · Asthma Care</title>
</head>
<body>
<main>
{body}
</main>
</body>
</html>
"#
    )
}

fn question_label(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn symptom_form(username: Option<&str>) -> String {
    let greeting = match username {
        Some(name) => format!(
            r#"<p>Signed in as <strong>{}</strong> · <a href="/logout">Log out</a></p>"#,
            escape(name)
        ),
        None => String::new(),
    };

    let questions: String = SYMPTOM_FIELDS
        .iter()
        .map(|field| {
            format!(
                r#"<fieldset><legend>{label}?</legend>
<label><input type="radio" name="{field}" value="yes" required> Yes</label>
<label><input type="radio" name="{field}" value="no"> No</label>
</fieldset>
"#,
                label = question_label(field),
            )
        })
        .collect();

    layout(
        "Symptom check",
        &format!(
            r#"{greeting}<h1>Asthma symptom check</h1>
<form method="post" action="/predict">
<label>Name <input type="text" name="name" required></label>
{questions}<label>Age <input type="number" name="age" min="0" required></label>
<label>Gender <select name="gender">
<option value="male">Male</option>
<option value="female">Female</option>
<option value="other">Other / prefer not to say</option>
</select></label>
<button type="submit">Check severity</button>
</form>"#
        ),
    )
}

pub fn result_page(record: &PredictionRecord) -> String {
    let recommendation = record.recommendation.replace('\n', "<br>\n");
    layout(
        "Result",
        &format!(
            r#"<h1>Result for {name}</h1>
<p>Gender: {gender}</p>
<p>Predicted severity: <strong>{severity}</strong> ({label})</p>
<section class="recommendation">
<p>{recommendation}</p>
</section>
<p><a href="/">Check again</a></p>"#,
            name = escape(&record.name),
            gender = escape(record.gender.as_str()),
            severity = record.severity.code(),
            label = record.severity.label(),
        ),
    )
}

pub fn signup_page() -> String {
    layout(
        "Sign up",
        r#"<h1>Create an account</h1>
<form method="post" action="/signup">
<label>Username <input type="text" name="username" required></label>
<label>Password <input type="password" name="password" required></label>
<label>Confirm password <input type="password" name="confirm_password" required></label>
<button type="submit">Sign up</button>
</form>
<p>Already registered? <a href="/login">Log in</a></p>"#,
    )
}

pub fn login_page() -> String {
    layout(
        "Log in",
        r#"<h1>Log in</h1>
<form method="post" action="/login">
<label>Username <input type="text" name="username" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Log in</button>
</form>
<p>New here? <a href="/signup">Create an account</a></p>"#,
    )
}
