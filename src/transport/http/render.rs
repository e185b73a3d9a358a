//! Server-side HTML pages.
//!
//! Every value that originates from a user (messages included) goes through
//! [`escape_html`] before it is written into a page.

use crate::storage::StoredProfile;
use std::fmt::Write;

pub const FORM_PATH: &str = "/form.html";
pub const STYLES_PATH: &str = "/assets/styles.css";
pub const STYLES_CSS: &str = include_str!("assets/styles.css");

const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/css/bootstrap.min.css";

/// Escapes text for HTML element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="ru">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link href="{BOOTSTRAP_CSS}" rel="stylesheet">
    <link rel="stylesheet" href="{STYLES_PATH}">
</head>
<body>
    <div class="container mt-5">
        <div class="row justify-content-center">
            <div class="col-md-8 col-lg-6">
{body}
            </div>
        </div>
    </div>
</body>
</html>
"#,
        title = escape_html(title),
    )
}

fn card(tone: &str, heading: &str, content: &str) -> String {
    format!(
        r#"                <div class="card shadow border-{tone}">
                    <div class="card-header bg-{tone} text-white">
                        <h4 class="card-title mb-0">{heading}</h4>
                    </div>
                    <div class="card-body">
{content}
                    </div>
                </div>"#,
        heading = escape_html(heading),
    )
}

/// Page listing every validation message.
pub fn errors_page(messages: &[&str]) -> String {
    let mut items = String::new();
    for message in messages {
        // Writing into a String cannot fail.
        let _ = writeln!(
            items,
            r#"                            <li class="text-danger mb-2">• {}</li>"#,
            escape_html(message)
        );
    }
    let content = format!(
        r#"                        <p class="text-danger">Обнаружены следующие ошибки:</p>
                        <ul class="list-unstyled">
{items}                        </ul>
                        <div class="mt-3">
                            <a href="{FORM_PATH}" class="btn btn-primary">Назад к форме</a>
                        </div>"#
    );
    layout("Ошибка валидации", &card("danger", "Ошибки валидации", &content))
}

/// Page confirming a stored profile and echoing what was saved.
pub fn success_page(stored: &StoredProfile) -> String {
    let record = &stored.record;
    let rows = [
        ("ID", stored.id.to_string()),
        ("Полное имя", record.full_name().to_string()),
        ("Email", record.email().to_string()),
        ("Телефон", record.phone().to_string()),
        ("Возраст", record.age().to_string()),
    ];
    let mut items = String::new();
    for (label, value) in rows {
        let _ = writeln!(
            items,
            r#"                                <li><strong>{label}:</strong> {}</li>"#,
            escape_html(&value)
        );
    }
    let content = format!(
        r#"                        <p class="text-success mb-3">Ваша анкета была успешно сохранена в базу данных.</p>
                        <div class="mb-3">
                            <strong>Сохранённые данные:</strong>
                            <ul class="list-unstyled mt-2">
{items}                            </ul>
                        </div>
                        <div class="d-grid gap-2">
                            <a href="{FORM_PATH}" class="btn btn-primary">Новая запись</a>
                        </div>"#
    );
    layout(
        "Данные сохранены",
        &card("success", "Данные успешно сохранены!", &content),
    )
}

/// Page shown when the store could not save the profile.
pub fn failure_page(message: &str) -> String {
    let content = format!(
        r#"                        <p class="text-danger">{}</p>
                        <div class="mt-3">
                            <a href="{FORM_PATH}" class="btn btn-primary">Назад к форме</a>
                        </div>"#,
        escape_html(message)
    );
    layout(
        "Ошибка базы данных",
        &card("danger", "Ошибка базы данных", &content),
    )
}

/// The entry form that posts to `/process`.
pub fn form_page() -> String {
    let fields = [
        ("full_name", "Полное имя", "text", r#" maxlength="100""#),
        ("email", "Email", "email", r#" maxlength="255""#),
        ("phone", "Телефон", "tel", r#" maxlength="20""#),
        ("age", "Возраст", "number", r#" min="0" max="120""#),
    ];
    let mut inputs = String::new();
    for (name, label, kind, extra) in fields {
        let _ = writeln!(
            inputs,
            r#"                            <div class="mb-3">
                                <label for="{name}" class="form-label">{label}</label>
                                <input type="{kind}" class="form-control" id="{name}" name="{name}"{extra}>
                            </div>"#
        );
    }
    let content = format!(
        r#"                        <form action="/process" method="post">
{inputs}                            <div class="d-grid">
                                <button type="submit" class="btn btn-primary">Отправить</button>
                            </div>
                        </form>"#
    );
    layout("Анкета пользователя", &card("primary", "Анкета пользователя", &content))
}
