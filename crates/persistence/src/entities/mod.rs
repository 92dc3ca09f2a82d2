//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod admin_user;
pub mod announcement;
pub mod application;
pub mod email_template;
pub mod program;

pub use admin_user::AdminUserEntity;
pub use announcement::{AnnouncementEntity, AnnouncementWithProgramEntity};
pub use application::{
    ApplicationEntity, ApplicationListEntity, ApplicationStatusDb, StatusCountsEntity,
};
pub use email_template::EmailTemplateEntity;
pub use program::ProgramEntity;
