//! Confirmation email composition.
//!
//! Delivery lives in the api crate; this module only renders the message.

use serde::Serialize;

use crate::models::EmailTemplate;

/// Placeholder replaced by the applicant's name.
pub const NAME_PLACEHOLDER: &str = "{nome}";

/// Placeholder replaced by the program's name.
pub const PROGRAM_PLACEHOLDER: &str = "{programa}";

/// A rendered confirmation email ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmationMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Literal substitution of `{nome}` and `{programa}` in a single pass.
///
/// Substituted values are never rescanned. Unknown braces are left
/// untouched, so a template with stray `{}` never fails to render.
pub fn fill_placeholders(template: &str, name: &str, program_name: &str) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        if let Some(after) = tail.strip_prefix(NAME_PLACEHOLDER) {
            out.push_str(name);
            rest = after;
        } else if let Some(after) = tail.strip_prefix(PROGRAM_PLACEHOLDER) {
            out.push_str(program_name);
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

pub fn compose_confirmation(
    template: &EmailTemplate,
    name: &str,
    email: &str,
    program_name: &str,
) -> ConfirmationMessage {
    ConfirmationMessage {
        to: email.to_string(),
        subject: fill_placeholders(&template.subject_template, name, program_name),
        body: fill_placeholders(&template.body_template, name, program_name),
    }
}
