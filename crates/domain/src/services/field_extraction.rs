//! Per-program form field extraction.
//!
//! Every extractor reads a fixed set of named fields, trims text values,
//! turns checkboxes into booleans and multi-selects into arrays, and pushes a
//! message onto `errors` for each required field left blank.

use serde_json::Value;
use shared::validation::{is_email_shaped, normalize_region_code};

use crate::models::{Attributes, ProgramVariant, SubmittedForm};

/// Column widths of the `applications` table.
pub const MAX_NAME_LEN: usize = 255;
pub const MAX_EMAIL_LEN: usize = 255;
pub const MAX_PHONE_LEN: usize = 50;

fn too_long(value: &str, max: usize) -> bool {
    value.chars().count() > max
}

/// Fields common to every program's form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicantDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Uppercased; empty when the submitted code was invalid.
    pub region_code: String,
}

/// Reads and validates name, email, phone and region code.
pub fn extract_applicant(form: &SubmittedForm, errors: &mut Vec<String>) -> ApplicantDetails {
    let name = form.trimmed("nome");
    let email = form.trimmed("email");
    let phone = form.trimmed("telefone");
    let region = form.trimmed("estado");

    if name.is_empty() {
        errors.push("Nome é obrigatório.".to_string());
    } else if too_long(&name, MAX_NAME_LEN) {
        errors.push(format!("Nome deve ter no máximo {MAX_NAME_LEN} caracteres."));
    }
    if !is_email_shaped(&email) {
        errors.push("Email inválido.".to_string());
    } else if too_long(&email, MAX_EMAIL_LEN) {
        errors.push(format!("Email deve ter no máximo {MAX_EMAIL_LEN} caracteres."));
    }
    if phone.is_empty() {
        errors.push("Telefone é obrigatório.".to_string());
    } else if too_long(&phone, MAX_PHONE_LEN) {
        errors.push(format!("Telefone deve ter no máximo {MAX_PHONE_LEN} caracteres."));
    }
    let region_code = match normalize_region_code(&region) {
        Some(code) => code,
        None => {
            errors.push("Estado (UF) é obrigatório.".to_string());
            String::new()
        }
    };

    ApplicantDetails {
        name,
        email,
        phone,
        region_code,
    }
}

/// Dispatches on the program slug.
///
/// Unknown slugs yield an empty mapping and no extra validation.
pub fn extract_attributes(slug: &str, form: &SubmittedForm, errors: &mut Vec<String>) -> Attributes {
    match ProgramVariant::from_slug(slug) {
        Some(ProgramVariant::Kart) => extract_kart(form, errors),
        Some(ProgramVariant::Immersion) => extract_immersion(form),
        Some(ProgramVariant::Internship) => extract_internship(form, errors),
        Some(ProgramVariant::ESports) => extract_esports(form),
        None => Attributes::new(),
    }
}

struct AttributeWriter<'a> {
    form: &'a SubmittedForm,
    attributes: Attributes,
}

impl<'a> AttributeWriter<'a> {
    fn new(form: &'a SubmittedForm) -> Self {
        Self {
            form,
            attributes: Attributes::new(),
        }
    }

    /// Copies a trimmed text field and returns its value.
    fn text(&mut self, name: &str) -> String {
        let value = self.form.trimmed(name);
        self.attributes
            .insert(name.to_string(), Value::String(value.clone()));
        value
    }

    fn checkbox(&mut self, name: &str) -> bool {
        let checked = self.form.is_checked(name);
        self.attributes.insert(name.to_string(), Value::Bool(checked));
        checked
    }

    fn multi(&mut self, name: &str) {
        let values = self
            .form
            .get_all(name)
            .into_iter()
            .map(Value::String)
            .collect();
        self.attributes.insert(name.to_string(), Value::Array(values));
    }

    fn finish(self) -> Attributes {
        self.attributes
    }
}

fn extract_kart(form: &SubmittedForm, errors: &mut Vec<String>) -> Attributes {
    let mut out = AttributeWriter::new(form);

    // Birth date is only recorded when given.
    let birth_date = form.trimmed("data_nascimento");
    if birth_date.is_empty() {
        errors.push("Data de nascimento é obrigatória.".to_string());
    } else {
        out.attributes
            .insert("data_nascimento".to_string(), Value::String(birth_date));
    }

    out.text("cor");
    out.text("nome_responsavel");
    out.text("telefone_responsavel");
    if out.text("tem_condicoes_logistica").is_empty() {
        errors.push("Informe se tem condições de logística.".to_string());
    }
    if out.text("categoria").is_empty() {
        errors.push("Selecione a categoria.".to_string());
    }
    out.text("peso");
    out.text("altura");
    out.multi("vestuario");
    out.text("categoria_atual");
    out.text("titulos_resultados");
    out.checkbox("autorizacao_responsavel");

    out.finish()
}

fn extract_immersion(form: &SubmittedForm) -> Attributes {
    let mut out = AttributeWriter::new(form);
    for field in [
        "cidade",
        "escolaridade",
        "participou_antes",
        "como_ficou_sabendo",
        "modulo_interesse",
    ] {
        out.text(field);
    }
    out.finish()
}

fn extract_internship(form: &SubmittedForm, errors: &mut Vec<String>) -> Attributes {
    let mut out = AttributeWriter::new(form);

    out.text("data_nascimento");
    out.text("identidade_genero");
    out.text("cor");
    out.text("participou_fia_got");
    out.text("area_atuacao");
    out.multi("ativacoes");
    out.text("ordem_preferencia");
    out.text("tem_cnh");
    out.text("linkedin");
    out.text("mini_bio");
    out.text("porque_importante");
    out.text("como_ficou_sabendo");
    if !out.checkbox("concordo_compartilhamento") {
        errors.push("Você precisa concordar com o compartilhamento de dados.".to_string());
    }

    out.finish()
}

fn extract_esports(form: &SubmittedForm) -> Attributes {
    let mut out = AttributeWriter::new(form);
    for field in ["idade", "cidade", "nickname", "plataforma", "experiencia"] {
        out.text(field);
    }
    out.finish()
}
