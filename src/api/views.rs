//! Server-rendered HTML pages.
//!
//! Pages are assembled from strings; every value coming from a record, a
//! form or the principal passes through [`escape`] first.

use crate::validation::ValidationErrors;
use axum::response::Html;

/// Kind of HTML input used for a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    /// Decimal number.
    Number,
    /// Whole number.
    Integer,
    DateTime,
    Password,
    /// Drop-down restricted to the given options.
    Select(&'static [&'static str]),
}

/// A form field and how it is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    /// Name of the submitted form parameter.
    pub name: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    pub input: InputKind,
    /// Whether the field is shown as a column on the list page.
    pub listed: bool,
}

impl FormField {
    /// Field shown on the form and on the list page.
    #[must_use]
    pub const fn listed(name: &'static str, label: &'static str, input: InputKind) -> Self {
        Self {
            name,
            label,
            input,
            listed: true,
        }
    }

    /// Field shown on the form only.
    #[must_use]
    pub const fn form_only(name: &'static str, label: &'static str, input: InputKind) -> Self {
        Self {
            name,
            label,
            input,
            listed: false,
        }
    }
}

/// One row of a list page.
#[derive(Debug, Clone, PartialEq)]
pub struct ListRow {
    pub id: Option<i32>,
    /// Values aligned with the form fields.
    pub values: Vec<String>,
}

/// Escapes text for inclusion in HTML content or attribute values.
#[must_use]
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{} | Poseidon</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    ))
}

fn logout_form() -> &'static str {
    "<form action=\"/app-logout\" method=\"post\"><button type=\"submit\">Logout</button></form>"
}

/// Public landing page.
#[must_use]
pub fn home_page() -> Html<String> {
    layout(
        "Home",
        "<h1>Poseidon</h1>\n<ul>\n\
         <li><a href=\"/bidList/list\">Bid List</a></li>\n\
         <li><a href=\"/curvePoint/list\">Curve Points</a></li>\n\
         <li><a href=\"/rating/list\">Ratings</a></li>\n\
         <li><a href=\"/ruleName/list\">Rule Names</a></li>\n\
         <li><a href=\"/trade/list\">Trades</a></li>\n\
         <li><a href=\"/user/list\">User management</a></li>\n\
         </ul>\n<p><a href=\"/login\">Login</a></p>",
    )
}

/// Error page carrying a single message.
#[must_use]
pub fn error_page(message: &str) -> Html<String> {
    layout(
        "Error",
        &format!(
            "<h1>Error</h1>\n<p class=\"error\">{}</p>\n<p><a href=\"/\">Home</a></p>",
            escape(message)
        ),
    )
}

/// Login form; `failed` adds a note after rejected credentials.
#[must_use]
pub fn login_page(failed: bool) -> Html<String> {
    let note = if failed {
        "<p class=\"error\">Invalid username or password.</p>\n"
    } else {
        ""
    };
    layout(
        "Login",
        &format!(
            "<h1>Login</h1>\n{}<form action=\"/login\" method=\"post\">\n\
             <label>Username <input type=\"text\" name=\"username\"></label>\n\
             <label>Password <input type=\"password\" name=\"password\"></label>\n\
             <button type=\"submit\">Login</button>\n</form>",
            note
        ),
    )
}

/// Listing of all records of one kind, with update and delete links.
#[must_use]
pub fn list_page(
    title: &str,
    path: &str,
    username: &str,
    fields: &[FormField],
    rows: &[ListRow],
    not_found: bool,
) -> Html<String> {
    let mut body = format!(
        "<p>Logged in user: <b>{}</b></p>\n{}\n<h1>{}</h1>\n",
        escape(username),
        logout_form(),
        escape(title)
    );
    if not_found {
        body.push_str("<p class=\"error\">The requested record does not exist.</p>\n");
    }
    body.push_str(&format!(
        "<a href=\"/{}/add\">Add New</a>\n<table>\n<thead><tr><th>Id</th>",
        path
    ));
    for field in fields.iter().filter(|f| f.listed) {
        body.push_str(&format!("<th>{}</th>", escape(field.label)));
    }
    body.push_str("<th>Action</th></tr></thead>\n<tbody>\n");

    for row in rows {
        let id = row.id.map(|id| id.to_string()).unwrap_or_default();
        body.push_str(&format!("<tr><td>{}</td>", id));
        for (field, value) in fields.iter().zip(&row.values) {
            if field.listed {
                body.push_str(&format!("<td>{}</td>", escape(value)));
            }
        }
        body.push_str(&format!(
            "<td><a href=\"/{path}/update/{id}\">Edit</a> <a href=\"/{path}/delete/{id}\">Delete</a></td></tr>\n"
        ));
    }
    body.push_str("</tbody>\n</table>");

    layout(title, &body)
}

/// Add or update form. Values are aligned with `fields`; each field is
/// followed by the messages recorded against it.
#[must_use]
pub fn form_page(
    title: &str,
    action: &str,
    fields: &[FormField],
    values: &[String],
    errors: Option<&ValidationErrors>,
) -> Html<String> {
    let mut body = format!(
        "<h1>{}</h1>\n<form action=\"{}\" method=\"post\">\n",
        escape(title),
        escape(action)
    );

    for (field, value) in fields.iter().zip(values) {
        body.push_str(&format!(
            "<div class=\"field\">\n<label for=\"{name}\">{label}</label>\n{input}\n",
            name = field.name,
            label = escape(field.label),
            input = render_input(field, value)
        ));
        if let Some(errors) = errors {
            for message in errors.messages_for(field.name) {
                body.push_str(&format!("<p class=\"error\">{}</p>\n", escape(message)));
            }
        }
        body.push_str("</div>\n");
    }
    body.push_str("<button type=\"submit\">Save</button>\n</form>");

    layout(title, &body)
}

fn render_input(field: &FormField, value: &str) -> String {
    let value = escape(value);
    match field.input {
        InputKind::Text => format!(
            "<input type=\"text\" id=\"{0}\" name=\"{0}\" value=\"{1}\">",
            field.name, value
        ),
        InputKind::Number => format!(
            "<input type=\"number\" step=\"any\" id=\"{0}\" name=\"{0}\" value=\"{1}\">",
            field.name, value
        ),
        InputKind::Integer => format!(
            "<input type=\"number\" step=\"1\" id=\"{0}\" name=\"{0}\" value=\"{1}\">",
            field.name, value
        ),
        InputKind::DateTime => format!(
            "<input type=\"datetime-local\" step=\"1\" id=\"{0}\" name=\"{0}\" value=\"{1}\">",
            field.name, value
        ),
        InputKind::Password => format!(
            "<input type=\"password\" id=\"{0}\" name=\"{0}\" value=\"\">",
            field.name
        ),
        InputKind::Select(options) => {
            let mut html = format!("<select id=\"{0}\" name=\"{0}\">", field.name);
            html.push_str("<option value=\"\"></option>");
            for option in options {
                let selected = if *option == value { " selected" } else { "" };
                html.push_str(&format!(
                    "<option value=\"{0}\"{1}>{0}</option>",
                    option, selected
                ));
            }
            html.push_str("</select>");
            html
        }
    }
}
