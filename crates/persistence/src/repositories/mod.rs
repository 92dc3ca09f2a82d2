//! Repository implementations for database operations.

pub mod admin_user;
pub mod announcement;
pub mod application;
pub mod email_template;
pub mod program;
pub mod settings;

pub use admin_user::AdminUserRepository;
pub use announcement::AnnouncementRepository;
pub use application::ApplicationRepository;
pub use email_template::EmailTemplateRepository;
pub use program::ProgramRepository;
pub use settings::SettingsRepository;
