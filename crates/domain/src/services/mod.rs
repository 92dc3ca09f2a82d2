//! Domain services.

pub mod field_extraction;
pub mod notification;

pub use field_extraction::{extract_applicant, extract_attributes, ApplicantDetails};
pub use notification::{compose_confirmation, fill_placeholders, ConfirmationMessage};
