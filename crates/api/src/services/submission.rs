//! Public application submission.
//!
//! Validation accumulates every problem before anything touches the disk or
//! the database: common fields, then program fields, then files.

use std::collections::HashMap;

use axum::extract::multipart::{Multipart, MultipartError};
use chrono::{DateTime, Utc};
use domain::models::{Application, NewApplication, Program, SubmittedForm};
use domain::services::{compose_confirmation, extract_applicant, extract_attributes};
use persistence::repositories::{ApplicationRepository, EmailTemplateRepository};
use thiserror::Error;
use tracing::{info, warn};

use super::email::Mailer;
use super::uploads::{AcceptedFile, FileCategory, IncomingFile, UploadError, UploadStore};
use crate::middleware::metrics::{record_application_submitted, record_notification_failure};

pub const PHOTO_FIELD: &str = "foto";
pub const RESUME_FIELD: &str = "curriculo";

pub const PHOTO_REQUIRED: &str = "Foto é obrigatória.";
pub const PHOTO_INVALID: &str = "A foto deve ser uma imagem PNG, JPG ou JPEG.";
pub const RESUME_INVALID: &str = "O currículo deve ser um arquivo PDF.";

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A parsed multipart submission.
#[derive(Debug, Default)]
pub struct SubmissionForm {
    pub fields: SubmittedForm,
    pub files: HashMap<String, IncomingFile>,
}

impl SubmissionForm {
    /// Splits text fields from file parts. File inputs left empty by the
    /// browser (no filename, no bytes) are dropped.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, MultipartError> {
        let mut form = SubmissionForm::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(filename) => {
                    let bytes = field.bytes().await?;
                    if filename.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    form.files.insert(
                        name,
                        IncomingFile {
                            filename,
                            bytes: bytes.to_vec(),
                        },
                    );
                }
                None => {
                    let value = field.text().await?;
                    form.fields.push(name, value);
                }
            }
        }

        Ok(form)
    }
}

/// A submission that passed validation; files are not yet on disk.
#[derive(Debug)]
pub struct ValidatedSubmission {
    pub application: NewApplication,
    pub photo: Option<AcceptedFile>,
    pub resume: Option<AcceptedFile>,
}

/// Runs every check for `program` and returns all messages on failure.
pub fn validate_submission(
    program: &Program,
    mut form: SubmissionForm,
    now: DateTime<Utc>,
) -> Result<ValidatedSubmission, Vec<String>> {
    let mut errors = Vec::new();

    let applicant = extract_applicant(&form.fields, &mut errors);
    let attributes = extract_attributes(&program.slug, &form.fields, &mut errors);

    let variant = program.variant();
    let mut photo = None;
    let mut resume = None;

    if variant.is_some_and(|v| v.requires_photo()) {
        match form.files.remove(PHOTO_FIELD) {
            None => errors.push(PHOTO_REQUIRED.to_string()),
            Some(file) => match AcceptedFile::accept(file, FileCategory::Image, now) {
                Some(accepted) => photo = Some(accepted),
                None => errors.push(PHOTO_INVALID.to_string()),
            },
        }
    }

    if variant.is_some_and(|v| v.accepts_resume()) {
        if let Some(file) = form.files.remove(RESUME_FIELD) {
            match AcceptedFile::accept(file, FileCategory::Pdf, now) {
                Some(accepted) => resume = Some(accepted),
                None => errors.push(RESUME_INVALID.to_string()),
            }
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidatedSubmission {
        application: NewApplication {
            program_id: program.id,
            name: applicant.name,
            email: applicant.email,
            phone: applicant.phone,
            region_code: applicant.region_code,
            attributes,
            photo_filename: photo.as_ref().map(|f| f.stored_name.clone()),
            resume_filename: resume.as_ref().map(|f| f.stored_name.clone()),
        },
        photo,
        resume,
    })
}

/// Writes the files, then inserts the row. Files written in this call are
/// removed again if a later step fails.
pub async fn persist_submission(
    uploads: &UploadStore,
    applications: &ApplicationRepository,
    submission: ValidatedSubmission,
) -> Result<Application, SubmissionError> {
    let mut written: Vec<String> = Vec::new();

    for file in [&submission.photo, &submission.resume].into_iter().flatten() {
        if let Err(e) = uploads.save(file).await {
            rollback(uploads, &written).await;
            return Err(e.into());
        }
        written.push(file.stored_name.clone());
    }

    match applications.create(&submission.application).await {
        Ok(application) => Ok(application),
        Err(e) => {
            rollback(uploads, &written).await;
            Err(e.into())
        }
    }
}

async fn rollback(uploads: &UploadStore, written: &[String]) {
    for name in written {
        uploads.remove(name).await;
    }
}

/// Sends the confirmation email. Failures are logged and counted, never
/// returned.
pub async fn notify_applicant(
    mailer: &dyn Mailer,
    templates: &EmailTemplateRepository,
    application: &Application,
    program: &Program,
) {
    record_application_submitted(&program.slug);

    let template = match templates.get_or_create().await {
        Ok(template) => template,
        Err(e) => {
            record_notification_failure();
            warn!(application_id = application.id, error = %e, "Failed to load email template");
            return;
        }
    };

    let message = compose_confirmation(&template, &application.name, &application.email, &program.name);
    match mailer.send(&message).await {
        Ok(()) => info!(
            application_id = application.id,
            provider = mailer.name(),
            "Confirmation email dispatched"
        ),
        Err(e) => {
            record_notification_failure();
            warn!(
                application_id = application.id,
                provider = mailer.name(),
                error = %e,
                "Failed to send confirmation email"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use fake::Fake;

    fn program(slug: &str) -> Program {
        Program {
            id: 7,
            name: "Programa".to_string(),
            slug: slug.to_string(),
            short_description: None,
            description: None,
            open_date: None,
            close_date: None,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 9, 12, 0, 0).unwrap()
    }

    fn common_fields() -> SubmittedForm {
        let name: String = Name().fake();
        let email: String = SafeEmail().fake();
        [
            ("nome", name),
            ("email", email),
            ("telefone", "11 90000-0000".to_string()),
            ("estado", "rj".to_string()),
        ]
        .into_iter()
        .collect()
    }

    fn file(name: &str) -> IncomingFile {
        IncomingFile {
            filename: name.to_string(),
            bytes: b"data".to_vec(),
        }
    }

    fn kart_form() -> SubmissionForm {
        let mut fields = common_fields();
        fields.push("data_nascimento", "2011-01-01");
        fields.push("tem_condicoes_logistica", "sim");
        fields.push("categoria", "cadete");
        SubmissionForm {
            fields,
            files: HashMap::new(),
        }
    }

    #[test]
    fn test_esports_needs_no_files() {
        let mut form = SubmissionForm {
            fields: common_fields(),
            files: HashMap::new(),
        };
        form.fields.push("nickname", " foo ");

        let submission = validate_submission(&program("e-sports"), form, now()).unwrap();
        assert_eq!(submission.application.program_id, 7);
        assert_eq!(submission.application.region_code, "RJ");
        assert_eq!(submission.application.attributes["nickname"], "foo");
        assert!(submission.photo.is_none());
        assert!(submission.application.photo_filename.is_none());
    }

    #[test]
    fn test_kart_without_photo_is_rejected() {
        let errors = validate_submission(&program("kart"), kart_form(), now()).unwrap_err();
        assert_eq!(errors, vec![PHOTO_REQUIRED.to_string()]);
    }

    #[test]
    fn test_internship_without_photo_is_rejected() {
        let mut form = SubmissionForm {
            fields: common_fields(),
            files: HashMap::new(),
        };
        form.fields.push("concordo_compartilhamento", "on");
        let errors =
            validate_submission(&program("estagio-motorsport"), form, now()).unwrap_err();
        assert!(errors.contains(&PHOTO_REQUIRED.to_string()));
    }

    #[test]
    fn test_kart_with_photo() {
        let mut form = kart_form();
        form.files.insert(PHOTO_FIELD.to_string(), file("Minha Foto.PNG"));

        let submission = validate_submission(&program("kart"), form, now()).unwrap();
        assert_eq!(
            submission.application.photo_filename.as_deref(),
            Some("20260309120000000000_Minha_Foto.PNG")
        );
        assert!(submission.photo.is_some());
    }

    #[test]
    fn test_photo_with_wrong_extension() {
        let mut form = kart_form();
        form.files.insert(PHOTO_FIELD.to_string(), file("foto.gif"));
        let errors = validate_submission(&program("kart"), form, now()).unwrap_err();
        assert_eq!(errors, vec![PHOTO_INVALID.to_string()]);
    }

    #[test]
    fn test_resume_only_for_internship() {
        let mut form = kart_form();
        form.files.insert(PHOTO_FIELD.to_string(), file("foto.jpg"));
        form.files.insert(RESUME_FIELD.to_string(), file("cv.pdf"));
        let submission = validate_submission(&program("kart"), form, now()).unwrap();
        assert!(submission.resume.is_none());

        let mut form = SubmissionForm {
            fields: common_fields(),
            files: HashMap::new(),
        };
        form.fields.push("concordo_compartilhamento", "on");
        form.files.insert(PHOTO_FIELD.to_string(), file("foto.jpg"));
        form.files.insert(RESUME_FIELD.to_string(), file("cv.docx"));
        let errors =
            validate_submission(&program("estagio-motorsport"), form, now()).unwrap_err();
        assert_eq!(errors, vec![RESUME_INVALID.to_string()]);
    }

    #[test]
    fn test_errors_accumulate_in_order() {
        let form = SubmissionForm::default();
        let errors = validate_submission(&program("kart"), form, now()).unwrap_err();
        assert_eq!(errors.first().map(String::as_str), Some("Nome é obrigatório."));
        assert_eq!(errors.last().map(String::as_str), Some(PHOTO_REQUIRED));
        assert_eq!(errors.len(), 8);
    }
}
