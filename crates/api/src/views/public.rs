//! Public pages: program list, program detail and application form.

use std::fmt::Write;

use axum::response::Html;
use domain::models::{Announcement, Program, ProgramVariant, SubmittedForm, WindowState};
use shared::session::Flash;

use super::{escape_html, format_date, layout, multiline, render_errors, Nav};
use crate::services::submission::{PHOTO_FIELD, RESUME_FIELD};

pub const REGION_CODES: [&str; 27] = [
    "AC", "AL", "AP", "AM", "BA", "CE", "DF", "ES", "GO", "MA", "MT", "MS", "MG", "PA", "PB",
    "PR", "PE", "PI", "RJ", "RN", "RS", "RO", "RR", "SC", "SP", "SE", "TO",
];

const YES_NO: &[&str] = &["sim", "nao"];
const SKIN_COLORS: &[&str] = &["Branca", "Preta", "Parda", "Amarela", "Indígena", "Prefiro não informar"];

#[derive(Debug, Clone, Copy)]
enum FieldKind {
    Text,
    Email,
    Tel,
    Date,
    Number,
    TextArea,
    Select(&'static [&'static str]),
    Multi(&'static [&'static str]),
    Checkbox,
}

#[derive(Debug, Clone, Copy)]
struct FieldSpec {
    name: &'static str,
    label: &'static str,
    kind: FieldKind,
    required: bool,
}

const fn field(name: &'static str, label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind,
        required: false,
    }
}

const fn required(name: &'static str, label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind,
        required: true,
    }
}

const COMMON_FIELDS: &[FieldSpec] = &[
    required("nome", "Nome completo", FieldKind::Text),
    required("email", "Email", FieldKind::Email),
    required("telefone", "Telefone", FieldKind::Tel),
    required("estado", "Estado (UF)", FieldKind::Select(&REGION_CODES)),
];

const KART_FIELDS: &[FieldSpec] = &[
    required("data_nascimento", "Data de nascimento", FieldKind::Date),
    field("cor", "Cor/raça", FieldKind::Select(SKIN_COLORS)),
    field("nome_responsavel", "Nome do responsável", FieldKind::Text),
    field("telefone_responsavel", "Telefone do responsável", FieldKind::Tel),
    required(
        "tem_condicoes_logistica",
        "Tem condições de logística para participar?",
        FieldKind::Select(YES_NO),
    ),
    required(
        "categoria",
        "Categoria",
        FieldKind::Select(&["Mirim", "Cadete", "Júnior", "Sênior"]),
    ),
    field("peso", "Peso (kg)", FieldKind::Text),
    field("altura", "Altura (cm)", FieldKind::Text),
    field("vestuario", "Tamanho de vestuário", FieldKind::Multi(&["PP", "P", "M", "G", "GG"])),
    field("categoria_atual", "Categoria em que compete atualmente", FieldKind::Text),
    field("titulos_resultados", "Títulos e resultados", FieldKind::TextArea),
    field(
        "autorizacao_responsavel",
        "Tenho autorização do responsável legal",
        FieldKind::Checkbox,
    ),
];

const IMMERSION_FIELDS: &[FieldSpec] = &[
    field("cidade", "Cidade", FieldKind::Text),
    field(
        "escolaridade",
        "Escolaridade",
        FieldKind::Select(&["Ensino médio", "Ensino superior", "Pós-graduação"]),
    ),
    field("participou_antes", "Já participou de edições anteriores?", FieldKind::Select(YES_NO)),
    field("como_ficou_sabendo", "Como ficou sabendo?", FieldKind::Text),
    field("modulo_interesse", "Módulo de interesse", FieldKind::Text),
];

const INTERNSHIP_FIELDS: &[FieldSpec] = &[
    field("data_nascimento", "Data de nascimento", FieldKind::Date),
    field("identidade_genero", "Identidade de gênero", FieldKind::Text),
    field("cor", "Cor/raça", FieldKind::Select(SKIN_COLORS)),
    field("participou_fia_got", "Já participou do FIA Girls on Track?", FieldKind::Select(YES_NO)),
    field("area_atuacao", "Área de atuação", FieldKind::Text),
    field(
        "ativacoes",
        "Ativações de interesse",
        FieldKind::Multi(&["Engenharia", "Comunicação", "Marketing", "Operações", "Hospitalidade"]),
    ),
    field("ordem_preferencia", "Ordem de preferência", FieldKind::Text),
    field("tem_cnh", "Possui CNH?", FieldKind::Select(YES_NO)),
    field("linkedin", "LinkedIn", FieldKind::Text),
    field("mini_bio", "Mini bio", FieldKind::TextArea),
    field("porque_importante", "Por que esta oportunidade é importante para você?", FieldKind::TextArea),
    field("como_ficou_sabendo", "Como ficou sabendo?", FieldKind::Text),
    required(
        "concordo_compartilhamento",
        "Concordo com o compartilhamento dos meus dados com os parceiros do programa",
        FieldKind::Checkbox,
    ),
];

const ESPORTS_FIELDS: &[FieldSpec] = &[
    field("idade", "Idade", FieldKind::Number),
    field("cidade", "Cidade", FieldKind::Text),
    field("nickname", "Nickname", FieldKind::Text),
    field(
        "plataforma",
        "Plataforma",
        FieldKind::Select(&["PC", "PlayStation", "Xbox", "Mobile"]),
    ),
    field("experiencia", "Experiência", FieldKind::TextArea),
];

fn variant_fields(variant: Option<ProgramVariant>) -> &'static [FieldSpec] {
    match variant {
        Some(ProgramVariant::Kart) => KART_FIELDS,
        Some(ProgramVariant::Immersion) => IMMERSION_FIELDS,
        Some(ProgramVariant::Internship) => INTERNSHIP_FIELDS,
        Some(ProgramVariant::ESports) => ESPORTS_FIELDS,
        None => &[],
    }
}

fn render_field(out: &mut String, spec: &FieldSpec, form: &SubmittedForm) {
    let name = spec.name;
    let label = escape_html(spec.label);
    let req = if spec.required { " required" } else { "" };
    let current = escape_html(form.get(name).unwrap_or_default());

    let input_type = match spec.kind {
        FieldKind::Text => Some("text"),
        FieldKind::Email => Some("email"),
        FieldKind::Tel => Some("tel"),
        FieldKind::Date => Some("date"),
        FieldKind::Number => Some("number"),
        _ => None,
    };

    if let Some(input_type) = input_type {
        let _ = write!(
            out,
            r#"<label for="{name}">{label}</label><input type="{input_type}" id="{name}" name="{name}" value="{current}"{req}>"#
        );
        return;
    }

    match spec.kind {
        FieldKind::TextArea => {
            let _ = write!(
                out,
                r#"<label for="{name}">{label}</label><textarea id="{name}" name="{name}" rows="4"{req}>{current}</textarea>"#
            );
        }
        FieldKind::Select(options) => {
            let selected = form.get(name).unwrap_or_default();
            let _ = write!(
                out,
                r#"<label for="{name}">{label}</label><select id="{name}" name="{name}"{req}><option value="">Selecione</option>"#
            );
            for option in options {
                let mark = if *option == selected { " selected" } else { "" };
                let value = escape_html(option);
                let _ = write!(out, r#"<option value="{value}"{mark}>{value}</option>"#);
            }
            out.push_str("</select>");
        }
        FieldKind::Multi(options) => {
            let chosen = form.get_all(name);
            let _ = write!(out, "<fieldset><legend>{label}</legend>");
            for option in options {
                let mark = if chosen.iter().any(|c| c == option) { " checked" } else { "" };
                let value = escape_html(option);
                let _ = write!(
                    out,
                    r#"<label><input type="checkbox" name="{name}" value="{value}"{mark}> {value}</label>"#
                );
            }
            out.push_str("</fieldset>");
        }
        FieldKind::Checkbox => {
            let mark = if form.is_checked(name) { " checked" } else { "" };
            let _ = write!(
                out,
                r#"<label><input type="checkbox" name="{name}" value="on"{mark}{req}> {label}</label>"#
            );
        }
        _ => {}
    }
}

fn window_summary(program: &Program) -> String {
    format!(
        "Inscrições: {} a {}",
        format_date(program.open_date),
        format_date(program.close_date)
    )
}

/// `/`
pub fn index(programs: &[Program], flashes: &[Flash]) -> Html<String> {
    let mut body = String::from("<h2>Programas</h2>");
    if programs.is_empty() {
        body.push_str("<p>Nenhum programa disponível no momento.</p>");
    }
    for program in programs {
        let _ = write!(
            body,
            r#"<article class="program"><h3><a href="/programa/{slug}">{name}</a></h3><p>{summary}</p><p class="window">{window}</p></article>"#,
            slug = escape_html(&program.slug),
            name = escape_html(&program.name),
            summary = escape_html(program.short_description.as_deref().unwrap_or_default()),
            window = window_summary(program),
        );
    }
    layout("Programas", Nav::Public, flashes, &body)
}

/// `/programa/:slug`
pub fn program_detail(
    program: &Program,
    window: WindowState,
    announcements: &[Announcement],
    flashes: &[Flash],
) -> Html<String> {
    let mut body = format!(
        "<h2>{}</h2><div class=\"description\">{}</div><p class=\"window\">{}</p>",
        escape_html(&program.name),
        multiline(program.description.as_deref().unwrap_or_default()),
        window_summary(program),
    );

    match window {
        WindowState::Open => {
            let _ = write!(
                body,
                r#"<p><a class="button" href="/inscricao/{}">Inscreva-se</a></p>"#,
                escape_html(&program.slug)
            );
        }
        WindowState::NotYetOpen => body.push_str("<p>As inscrições ainda não foram abertas.</p>"),
        WindowState::Closed => body.push_str("<p>As inscrições estão encerradas.</p>"),
    }

    if !announcements.is_empty() {
        body.push_str("<section class=\"announcements\"><h3>Avisos</h3>");
        for announcement in announcements {
            let _ = write!(
                body,
                "<article><h4>{}</h4><p>{}</p></article>",
                escape_html(&announcement.title),
                multiline(&announcement.body)
            );
        }
        body.push_str("</section>");
    }

    layout(&program.name, Nav::Public, flashes, &body)
}

/// `/inscricao/:slug`. `form` refills the inputs after a failed submission.
pub fn application_form(
    program: &Program,
    form: &SubmittedForm,
    errors: &[String],
    flashes: &[Flash],
) -> Html<String> {
    let variant = program.variant();
    let mut body = format!(
        "<h2>Inscrição: {}</h2>{}",
        escape_html(&program.name),
        render_errors(errors)
    );

    let _ = write!(
        body,
        r#"<form method="post" action="/inscricao/{}" enctype="multipart/form-data">"#,
        escape_html(&program.slug)
    );
    for spec in COMMON_FIELDS.iter().chain(variant_fields(variant)) {
        render_field(&mut body, spec, form);
    }

    if variant.is_some_and(|v| v.requires_photo()) {
        let _ = write!(
            body,
            r#"<label for="{PHOTO_FIELD}">Foto (PNG, JPG ou JPEG)</label><input type="file" id="{PHOTO_FIELD}" name="{PHOTO_FIELD}" accept=".png,.jpg,.jpeg" required>"#
        );
    }
    if variant.is_some_and(|v| v.accepts_resume()) {
        let _ = write!(
            body,
            r#"<label for="{RESUME_FIELD}">Currículo (PDF, opcional)</label><input type="file" id="{RESUME_FIELD}" name="{RESUME_FIELD}" accept=".pdf">"#
        );
    }

    body.push_str(r#"<button type="submit">Enviar inscrição</button></form>"#);
    layout(&format!("Inscrição: {}", program.name), Nav::Public, flashes, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn program(slug: &str) -> Program {
        Program {
            id: 1,
            name: "Seletiva <Kart>".to_string(),
            slug: slug.to_string(),
            short_description: Some("Resumo".to_string()),
            description: Some("Linha 1\nLinha 2".to_string()),
            open_date: NaiveDate::from_ymd_opt(2026, 3, 1),
            close_date: None,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_index_escapes_names() {
        let Html(page) = index(&[program("kart")], &[]);
        assert!(page.contains("Seletiva &lt;Kart&gt;"));
        assert!(page.contains(r#"href="/programa/kart""#));
        assert!(page.contains("01/03/2026 a -"));
    }

    #[test]
    fn test_detail_link_only_when_open() {
        let p = program("kart");
        let Html(open) = program_detail(&p, WindowState::Open, &[], &[]);
        assert!(open.contains(r#"href="/inscricao/kart""#));
        assert!(open.contains("Linha 1<br>Linha 2"));

        let Html(closed) = program_detail(&p, WindowState::Closed, &[], &[]);
        assert!(!closed.contains("/inscricao/kart"));
        assert!(closed.contains("encerradas"));
    }

    #[test]
    fn test_form_file_inputs_per_variant() {
        let empty = SubmittedForm::new();
        let Html(kart) = application_form(&program("kart"), &empty, &[], &[]);
        assert!(kart.contains(r#"name="foto""#));
        assert!(!kart.contains(r#"name="curriculo""#));
        assert!(kart.contains(r#"name="vestuario""#));

        let Html(internship) = application_form(&program("estagio-motorsport"), &empty, &[], &[]);
        assert!(internship.contains(r#"name="foto""#));
        assert!(internship.contains(r#"name="curriculo""#));

        let Html(esports) = application_form(&program("e-sports"), &empty, &[], &[]);
        assert!(!esports.contains(r#"type="file""#));
        assert!(esports.contains(r#"name="nickname""#));
    }

    #[test]
    fn test_form_refills_values_and_lists_errors() {
        let form: SubmittedForm = [("nome", "Ana \"A\""), ("estado", "SP"), ("vestuario", "M")]
            .into_iter()
            .collect();
        let errors = vec!["Foto é obrigatória.".to_string()];
        let Html(page) = application_form(&program("kart"), &form, &errors, &[]);
        assert!(page.contains(r#"value="Ana &quot;A&quot;""#));
        assert!(page.contains(r#"<option value="SP" selected>"#));
        assert!(page.contains(r#"value="M" checked"#));
        assert!(page.contains("<li>Foto é obrigatória.</li>"));
    }
}
