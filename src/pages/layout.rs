use axum::response::Html;
use html_escape::{encode_double_quoted_attribute, encode_text};

const APP_NAME: &str = "GitHub Profile Sample";

/// Wraps page content in the shared document shell.
pub fn page(title: &str, signed_in_as: Option<&str>, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{title} - {APP_NAME}</title>
</head>
<body>
  <header>
    <nav>
      <a class="brand" href="/">{APP_NAME}</a>
      <ul class="nav">
        <li><a href="/">Home</a></li>
        <li><a href="/About">About</a></li>
        <li><a href="/Contact">Contact</a></li>
        <li><a href="/Privacy">Privacy</a></li>
        <li><a href="/GithubProfile">GitHub Profile</a></li>
      </ul>
      {login}
    </nav>
  </header>
  <main class="container">
{body}
  </main>
  <footer>
    <p>&copy; {APP_NAME} - <a href="/Privacy">Privacy</a></p>
  </footer>
</body>
</html>
"#,
        title = encode_text(title),
        login = login_partial(signed_in_as),
    ))
}

fn login_partial(signed_in_as: Option<&str>) -> String {
    match signed_in_as {
        Some(email) => format!(
            r#"<form id="logout-form" class="login" method="post" action="/Identity/Account/Logout">
        <a id="manage" href="/Identity/Account/Manage">Hello {}!</a>
        <button type="submit">Logout</button>
      </form>"#,
            encode_text(email)
        ),
        None => r#"<ul class="login">
        <li><a id="register" href="/Identity/Account/Register">Register</a></li>
        <li><a id="login" href="/Identity/Account/Login">Login</a></li>
      </ul>"#
            .to_string(),
    }
}

/// Renders a labelled `<input>` bound to `Input.<field>`.
pub fn input_field(field: &str, label: &str, kind: &str, value: &str) -> String {
    format!(
        r#"<div class="form-group">
      <label for="Input_{field}">{label}</label>
      <input id="Input_{field}" name="Input.{field}" type="{kind}" value="{value}" />
    </div>"#,
        label = encode_text(label),
        value = encode_double_quoted_attribute(value),
    )
}

pub fn validation_summary(message: Option<&str>) -> String {
    match message {
        Some(message) => format!(
            r#"<div class="validation-summary-errors" role="alert">{}</div>"#,
            encode_text(message)
        ),
        None => String::new(),
    }
}

pub fn status_message(message: Option<&str>) -> String {
    match message {
        Some(message) => format!(
            r#"<div class="alert alert-success" role="status">{}</div>"#,
            encode_text(message)
        ),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_layout_links_to_login_and_register() {
        let Html(html) = page("Home", None, "<p>hi</p>");
        assert!(html.contains(r#"href="/Identity/Account/Login""#));
        assert!(html.contains(r#"href="/Identity/Account/Register""#));
        assert!(html.contains("<title>Home - GitHub Profile Sample</title>"));
        assert!(!html.contains("logout-form"));
    }

    #[test]
    fn signed_in_layout_escapes_email() {
        let Html(html) = page("Home", Some("<b>@x"), "");
        assert!(html.contains("Hello &lt;b&gt;@x!"));
        assert!(html.contains("logout-form"));
    }

    #[test]
    fn input_value_is_attribute_escaped() {
        let html = input_field("UserName", "User name", "text", r#"a"><script>"#);
        assert!(html.contains(r#"name="Input.UserName""#));
        assert!(html.contains(r#"id="Input_UserName""#));
        assert!(!html.contains(r#"a"><script>"#));
    }
}
