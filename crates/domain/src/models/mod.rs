//! Domain models for the registration portal.

pub mod admin_user;
pub mod announcement;
pub mod application;
pub mod email_template;
pub mod form;
pub mod program;

pub use admin_user::AdminUser;
pub use announcement::{Announcement, AnnouncementWithProgram, NewAnnouncement};
pub use application::{
    Application, ApplicationFilter, ApplicationListItem, ApplicationStatus, Attributes,
    DashboardQuery, NewApplication, StatusCounts,
};
pub use email_template::{EmailTemplate, EmailTemplateUpdate};
pub use form::SubmittedForm;
pub use program::{NewProgram, Program, ProgramSchedule, ProgramVariant, WindowState};
