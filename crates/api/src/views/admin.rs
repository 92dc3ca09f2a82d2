//! Admin pages.

use std::fmt::Write;

use axum::response::Html;
use domain::models::{
    AnnouncementWithProgram, Application, ApplicationFilter, ApplicationListItem,
    ApplicationStatus, EmailTemplate, Program, StatusCounts,
};
use serde_json::Value;
use shared::session::Flash;

use super::public::REGION_CODES;
use super::{date_input_value, escape_html, layout, multiline, Nav};

pub fn login(email: &str, flashes: &[Flash]) -> Html<String> {
    let body = format!(
        r#"<h2>Área administrativa</h2>
<form method="post" action="/admin/login">
<label for="email">Email</label><input type="email" id="email" name="email" value="{}" required>
<label for="senha">Senha</label><input type="password" id="senha" name="senha" required>
<button type="submit">Entrar</button>
</form>"#,
        escape_html(email)
    );
    layout("Login", Nav::Public, flashes, &body)
}

fn status_select(name: &str, current: Option<ApplicationStatus>, with_blank: bool) -> String {
    let mut out = format!(r#"<select name="{}">"#, name);
    if with_blank {
        out.push_str(r#"<option value="">Todos</option>"#);
    }
    for status in ApplicationStatus::ALL {
        let mark = if current == Some(status) { " selected" } else { "" };
        let _ = write!(
            out,
            r#"<option value="{}"{}>{}</option>"#,
            status.as_str(),
            mark,
            status.label()
        );
    }
    out.push_str("</select>");
    out
}

fn status_form(application_id: i64, current: ApplicationStatus) -> String {
    format!(
        r#"<form method="post" action="/admin/inscricao/{}/status" class="inline">{}<button type="submit">Salvar</button></form>"#,
        application_id,
        status_select("status", Some(current), false)
    )
}

fn render_counts(counts: &StatusCounts) -> String {
    let mut out = String::from(r#"<section class="stats">"#);
    for status in ApplicationStatus::ALL {
        let _ = write!(
            out,
            r#"<div class="stat"><span>{}</span><strong>{}</strong></div>"#,
            status.label(),
            counts.get(status)
        );
    }
    let _ = write!(
        out,
        r#"<div class="stat"><span>Total</span><strong>{}</strong></div></section>"#,
        counts.total
    );
    out
}

fn render_filters(programs: &[Program], filter: &ApplicationFilter) -> String {
    let mut out = String::from(
        r#"<form method="get" action="/admin" class="filters"><select name="programa_id"><option value="">Todos os programas</option>"#,
    );
    for program in programs {
        let mark = if filter.program_id == Some(program.id) { " selected" } else { "" };
        let _ = write!(
            out,
            r#"<option value="{}"{}>{}</option>"#,
            program.id,
            mark,
            escape_html(&program.name)
        );
    }
    let _ = write!(
        out,
        r#"</select><input type="text" name="nome" placeholder="Nome" value="{}">{}"#,
        escape_html(filter.name_contains.as_deref().unwrap_or_default()),
        status_select("status", filter.status, true)
    );

    out.push_str(r#"<select name="estado"><option value="">UF</option>"#);
    for code in REGION_CODES {
        let mark = if filter.region_code.as_deref() == Some(code) { " selected" } else { "" };
        let _ = write!(out, r#"<option value="{code}"{mark}>{code}</option>"#);
    }
    out.push_str(r#"</select><button type="submit">Filtrar</button> <a href="/admin">Limpar</a></form>"#);
    out
}

/// `/admin`
pub fn dashboard(
    programs: &[Program],
    applications: &[ApplicationListItem],
    filter: &ApplicationFilter,
    counts: &StatusCounts,
    flashes: &[Flash],
) -> Html<String> {
    let mut body = String::from("<h2>Inscrições</h2>");
    body.push_str(&render_counts(counts));
    body.push_str(&render_filters(programs, filter));

    if applications.is_empty() {
        body.push_str("<p>Nenhuma inscrição encontrada.</p>");
    } else {
        body.push_str(
            "<table><thead><tr><th>Data</th><th>Nome</th><th>Programa</th><th>Email</th><th>Telefone</th><th>UF</th><th>Status</th><th></th></tr></thead><tbody>",
        );
        for item in applications {
            let _ = write!(
                body,
                r#"<tr><td>{}</td><td><a href="/admin/inscricao/{}">{}</a></td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
                item.created_at.format("%d/%m/%Y %H:%M"),
                item.id,
                escape_html(&item.name),
                escape_html(&item.program_name),
                escape_html(&item.email),
                escape_html(&item.phone),
                escape_html(&item.region_code),
                item.status.label(),
                status_form(item.id, item.status),
            );
        }
        body.push_str("</tbody></table>");
    }

    layout("Painel", Nav::Admin, flashes, &body)
}

/// Checkbox answers read as Sim/Não, multi-selects as a comma list.
fn attribute_value(value: &Value) -> String {
    match value {
        Value::Bool(true) => "Sim".to_string(),
        Value::Bool(false) => "Não".to_string(),
        Value::String(s) => multiline(s),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => escape_html(s),
                other => escape_html(&other.to_string()),
            })
            .collect::<Vec<_>>()
            .join(", "),
        Value::Null => String::new(),
        other => escape_html(&other.to_string()),
    }
}

fn upload_link(filename: Option<&str>) -> String {
    match filename {
        Some(name) => {
            let name = escape_html(name);
            format!(r#"<a href="/static/uploads/{name}" target="_blank">{name}</a>"#)
        }
        None => "-".to_string(),
    }
}

/// `/admin/inscricao/:id`
pub fn application_detail(
    application: &Application,
    program_name: &str,
    flashes: &[Flash],
) -> Html<String> {
    let mut body = format!(
        r#"<h2>{}</h2><p><a href="/admin">Voltar</a></p><dl>
<dt>Programa</dt><dd>{}</dd>
<dt>Email</dt><dd>{}</dd>
<dt>Telefone</dt><dd>{}</dd>
<dt>Estado</dt><dd>{}</dd>
<dt>Enviada em</dt><dd>{}</dd>
<dt>Status</dt><dd>{}</dd>
<dt>Foto</dt><dd>{}</dd>
<dt>Currículo</dt><dd>{}</dd>"#,
        escape_html(&application.name),
        escape_html(program_name),
        escape_html(&application.email),
        escape_html(&application.phone),
        escape_html(&application.region_code),
        application.created_at.format("%d/%m/%Y %H:%M"),
        application.status.label(),
        upload_link(application.photo_filename.as_deref()),
        upload_link(application.resume_filename.as_deref()),
    );

    for (key, value) in &application.attributes {
        let _ = write!(
            body,
            "<dt>{}</dt><dd>{}</dd>",
            escape_html(key),
            attribute_value(value)
        );
    }
    body.push_str("</dl>");
    body.push_str(&status_form(application.id, application.status));

    layout(&application.name, Nav::Admin, flashes, &body)
}

/// `/admin/config`
pub fn config(
    programs: &[Program],
    template: &EmailTemplate,
    announcements: &[AnnouncementWithProgram],
    flashes: &[Flash],
) -> Html<String> {
    let mut body = String::from(
        r#"<h2>Configurações</h2><form method="post" action="/admin/config"><h3>Programas</h3><table><thead><tr><th>Programa</th><th>Abertura</th><th>Fechamento</th><th>Ativo</th></tr></thead><tbody>"#,
    );
    for program in programs {
        let id = program.id;
        let active = if program.active { " checked" } else { "" };
        let _ = write!(
            body,
            r#"<tr><td>{name}</td><td><input type="date" name="programa_{id}_data_abertura" value="{open}"></td><td><input type="date" name="programa_{id}_data_fechamento" value="{close}"></td><td><input type="checkbox" name="programa_{id}_ativo" value="on"{active}></td></tr>"#,
            name = escape_html(&program.name),
            open = date_input_value(program.open_date),
            close = date_input_value(program.close_date),
        );
    }
    let _ = write!(
        body,
        r#"</tbody></table>
<h3>Email de confirmação</h3>
<p>Use <code>{{nome}}</code> e <code>{{programa}}</code> no assunto e no corpo.</p>
<label for="template_assunto">Assunto</label><input type="text" id="template_assunto" name="template_assunto" value="{}">
<label for="template_corpo">Corpo</label><textarea id="template_corpo" name="template_corpo" rows="8">{}</textarea>
<button type="submit">Salvar configurações</button></form>"#,
        escape_html(&template.subject_template),
        escape_html(&template.body_template),
    );

    body.push_str(
        r#"<h3>Novo aviso</h3><form method="post" action="/admin/avisos/novo"><select name="programa_id" required><option value="">Programa</option>"#,
    );
    for program in programs {
        let _ = write!(
            body,
            r#"<option value="{}">{}</option>"#,
            program.id,
            escape_html(&program.name)
        );
    }
    body.push_str(
        r#"</select><input type="text" name="titulo" placeholder="Título" required><textarea name="descricao" rows="3" placeholder="Descrição" required></textarea><button type="submit">Criar aviso</button></form>"#,
    );

    body.push_str("<h3>Avisos</h3>");
    if announcements.is_empty() {
        body.push_str("<p>Nenhum aviso cadastrado.</p>");
    }
    for item in announcements {
        let a = &item.announcement;
        let (state, action) = if a.active {
            ("Ativo", "Desativar")
        } else {
            ("Inativo", "Ativar")
        };
        let _ = write!(
            body,
            r#"<article><h4>{} <small>{} · {}</small></h4><p>{}</p><form method="post" action="/admin/avisos/{}/toggle" class="inline"><button type="submit">{}</button></form></article>"#,
            escape_html(&a.title),
            escape_html(&item.program_name),
            state,
            multiline(&a.body),
            a.id,
            action,
        );
    }

    layout("Configurações", Nav::Admin, flashes, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::models::Attributes;
    use serde_json::json;

    fn application(attributes: Attributes) -> Application {
        Application {
            id: 42,
            program_id: 1,
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            phone: "11".to_string(),
            region_code: "SP".to_string(),
            attributes,
            photo_filename: Some("20260309120000000000_foto.png".to_string()),
            resume_filename: None,
            status: ApplicationStatus::PreSelected,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_attribute_values() {
        assert_eq!(attribute_value(&json!(true)), "Sim");
        assert_eq!(attribute_value(&json!(false)), "Não");
        assert_eq!(attribute_value(&json!(["M", "G"])), "M, G");
        assert_eq!(attribute_value(&json!("<x>")), "&lt;x&gt;");
    }

    #[test]
    fn test_detail_page() {
        let mut attributes = Attributes::new();
        attributes.insert("nickname".to_string(), json!("foo"));
        let Html(page) = application_detail(&application(attributes), "E-Sports", &[]);
        assert!(page.contains("<dt>nickname</dt><dd>foo</dd>"));
        assert!(page.contains(r#"href="/static/uploads/20260309120000000000_foto.png""#));
        assert!(page.contains(r#"action="/admin/inscricao/42/status""#));
        assert!(page.contains(r#"<option value="pre_selected" selected>"#));
    }

    #[test]
    fn test_dashboard_echoes_filters() {
        let filter = ApplicationFilter {
            program_id: None,
            name_contains: Some("ana".to_string()),
            status: Some(ApplicationStatus::Selected),
            region_code: Some("RJ".to_string()),
        };
        let Html(page) = dashboard(&[], &[], &filter, &StatusCounts::default(), &[]);
        assert!(page.contains(r#"name="nome" placeholder="Nome" value="ana""#));
        assert!(page.contains(r#"<option value="selected" selected>"#));
        assert!(page.contains(r#"<option value="RJ" selected>"#));
        assert!(page.contains("Nenhuma inscrição encontrada."));
    }

    #[test]
    fn test_login_keeps_email() {
        let Html(page) = login("admin@example.com", &[]);
        assert!(page.contains(r#"value="admin@example.com""#));
        assert!(page.contains(r#"name="senha""#));
    }
}
