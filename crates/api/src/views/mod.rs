//! Server-rendered HTML pages.
//!
//! Pages are assembled with `format!`. Every value that originates from a
//! user or from the database goes through [`escape_html`].

pub mod admin;
pub mod public;

use std::fmt::Write;

use axum::response::Html;
use chrono::{Datelike, NaiveDate, Utc};
use shared::session::Flash;

/// Which navigation bar the layout shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Public,
    Admin,
}

/// Escapes the five HTML-significant characters.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// `dd/mm/yyyy`, or a dash when unset.
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// `YYYY-MM-DD` for `<input type="date">`.
pub fn date_input_value(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Text with line breaks preserved.
pub fn multiline(value: &str) -> String {
    escape_html(value).replace('\n', "<br>")
}

fn render_flashes(flashes: &[Flash]) -> String {
    let mut out = String::new();
    for flash in flashes {
        let _ = write!(
            out,
            r#"<div class="alert alert-{}" role="alert">{}</div>"#,
            flash.level.as_str(),
            escape_html(&flash.message)
        );
    }
    out
}

/// Validation messages shown above a re-rendered form.
pub fn render_errors(errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let items: String = errors
        .iter()
        .map(|e| format!("<li>{}</li>", escape_html(e)))
        .collect();
    format!(r#"<div class="alert alert-danger" role="alert"><ul>{}</ul></div>"#, items)
}

fn render_nav(nav: Nav) -> &'static str {
    match nav {
        Nav::Public => r#"<nav><a href="/">Programas</a></nav>"#,
        Nav::Admin => {
            r#"<nav><a href="/admin">Inscrições</a> <a href="/admin/config">Configurações</a>
<form method="post" action="/admin/logout" class="inline"><button type="submit">Sair</button></form></nav>"#
        }
    }
}

/// Wraps `body` in the common page chrome.
pub fn layout(title: &str, nav: Nav, flashes: &[Flash], body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | FIA Girls on Track Brasil</title>
</head>
<body>
<header><h1><a href="/">FIA Girls on Track Brasil</a></h1>{nav}</header>
<main>
{flashes}
{body}
</main>
<footer>&copy; {year} FIA Girls on Track Brasil</footer>
</body>
</html>"#,
        title = escape_html(title),
        nav = render_nav(nav),
        flashes = render_flashes(flashes),
        body = body,
        year = Utc::now().year(),
    ))
}

/// Generic error page.
pub fn error_page(title: &str, message: &str) -> Html<String> {
    layout(
        title,
        Nav::Public,
        &[],
        &format!(
            "<h2>{}</h2><p>{}</p><p><a href=\"/\">Voltar ao início</a></p>",
            escape_html(title),
            escape_html(message)
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::session::FlashLevel;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x" & 'y')</script>"#),
            "&lt;script&gt;alert(&quot;x&quot; &amp; &#x27;y&#x27;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("São Paulo"), "São Paulo");
    }

    #[test]
    fn test_dates() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 9);
        assert_eq!(format_date(date), "09/03/2026");
        assert_eq!(format_date(None), "-");
        assert_eq!(date_input_value(date), "2026-03-09");
        assert_eq!(date_input_value(None), "");
    }

    #[test]
    fn test_layout_renders_escaped_flashes() {
        let flashes = vec![Flash {
            level: FlashLevel::Warning,
            message: "<b>atenção</b>".to_string(),
        }];
        let Html(page) = layout("Início", Nav::Public, &flashes, "<p>corpo</p>");
        assert!(page.contains(r#"class="alert alert-warning""#));
        assert!(page.contains("&lt;b&gt;atenção&lt;/b&gt;"));
        assert!(page.contains("<p>corpo</p>"));
        assert!(page.contains(&Utc::now().year().to_string()));
    }

    #[test]
    fn test_admin_nav_has_logout_form() {
        let Html(page) = layout("Painel", Nav::Admin, &[], "");
        assert!(page.contains(r#"action="/admin/logout""#));
    }

    #[test]
    fn test_render_errors() {
        assert!(render_errors(&[]).is_empty());
        let html = render_errors(&["Nome é obrigatório.".to_string()]);
        assert!(html.contains("<li>Nome é obrigatório.</li>"));
    }
}
