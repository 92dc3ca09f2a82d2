//! Request-independent services used by the route handlers.

pub mod admin_bootstrap;
pub mod email;
pub mod session;
pub mod submission;
pub mod uploads;

pub use email::{mailer_from_config, Mailer};
pub use session::{Session, SessionStore};
pub use uploads::UploadStore;
