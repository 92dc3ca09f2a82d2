//! Program domain model and its submission window.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::validate_slug;
use validator::{Validate, ValidationError};

/// A named outreach program with its own application form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Program {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub open_date: Option<NaiveDate>,
    pub close_date: Option<NaiveDate>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Where a date falls relative to a program's submission window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    NotYetOpen,
    Open,
    Closed,
}

impl WindowState {
    /// Warning shown when a submission is attempted outside the window.
    pub fn rejection_message(&self) -> Option<&'static str> {
        match self {
            WindowState::NotYetOpen => {
                Some("Inscrições ainda não foram abertas para este programa.")
            }
            WindowState::Closed => Some("Inscrições encerradas para este programa."),
            WindowState::Open => None,
        }
    }
}

impl Program {
    /// Both bounds are inclusive; an unset bound never closes the window.
    pub fn window_state(&self, today: NaiveDate) -> WindowState {
        if matches!(self.open_date, Some(open) if today < open) {
            return WindowState::NotYetOpen;
        }
        if matches!(self.close_date, Some(close) if today > close) {
            return WindowState::Closed;
        }
        WindowState::Open
    }

    pub fn variant(&self) -> Option<ProgramVariant> {
        ProgramVariant::from_slug(&self.slug)
    }
}

/// The four program forms the portal knows how to collect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramVariant {
    Kart,
    Immersion,
    Internship,
    ESports,
}

impl ProgramVariant {
    pub const ALL: [ProgramVariant; 4] = [
        ProgramVariant::Internship,
        ProgramVariant::Immersion,
        ProgramVariant::Kart,
        ProgramVariant::ESports,
    ];

    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "kart" => Some(ProgramVariant::Kart),
            "imersao" => Some(ProgramVariant::Immersion),
            "estagio-motorsport" => Some(ProgramVariant::Internship),
            "e-sports" => Some(ProgramVariant::ESports),
            _ => None,
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            ProgramVariant::Kart => "kart",
            ProgramVariant::Immersion => "imersao",
            ProgramVariant::Internship => "estagio-motorsport",
            ProgramVariant::ESports => "e-sports",
        }
    }

    /// Name used when the program is seeded.
    pub fn default_name(&self) -> &'static str {
        match self {
            ProgramVariant::Kart => "Seletiva de Kart FIA Girls on Track Brasil",
            ProgramVariant::Immersion => "Imersão para Mulheres no Motorsport",
            ProgramVariant::Internship => "Estágio Motorsport",
            ProgramVariant::ESports => "Campeonato de E-Sports FIA Girls on Track Brasil",
        }
    }

    pub fn requires_photo(&self) -> bool {
        matches!(self, ProgramVariant::Kart | ProgramVariant::Internship)
    }

    pub fn accepts_resume(&self) -> bool {
        matches!(self, ProgramVariant::Internship)
    }
}

/// Input for creating a program.
#[derive(Debug, Clone, Validate)]
#[validate(schema(function = "validate_new_program_window"))]
pub struct NewProgram {
    #[validate(length(min = 1, max = 120, message = "Name must be between 1 and 120 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 120, message = "Slug must be between 1 and 120 characters"))]
    #[validate(custom(function = "validate_slug"))]
    pub slug: String,

    #[validate(length(max = 250, message = "Short description cannot exceed 250 characters"))]
    pub short_description: Option<String>,

    pub description: Option<String>,
    pub open_date: Option<NaiveDate>,
    pub close_date: Option<NaiveDate>,
    pub active: bool,
}

impl NewProgram {
    /// Seed data for one of the built-in programs.
    pub fn seed(variant: ProgramVariant) -> Self {
        let name = variant.default_name();
        Self {
            name: name.to_string(),
            slug: variant.slug().to_string(),
            short_description: None,
            description: Some(format!("Descrição padrão para {}.", name)),
            open_date: None,
            close_date: None,
            active: true,
        }
    }
}

fn validate_new_program_window(program: &NewProgram) -> Result<(), ValidationError> {
    check_window(program.open_date, program.close_date)
}

/// Editable per-program settings from the configuration page.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
#[validate(schema(function = "validate_schedule_window"))]
pub struct ProgramSchedule {
    pub program_id: i64,
    pub open_date: Option<NaiveDate>,
    pub close_date: Option<NaiveDate>,
    pub active: bool,
}

fn validate_schedule_window(schedule: &ProgramSchedule) -> Result<(), ValidationError> {
    check_window(schedule.open_date, schedule.close_date)
}

fn check_window(open: Option<NaiveDate>, close: Option<NaiveDate>) -> Result<(), ValidationError> {
    match (open, close) {
        (Some(open), Some(close)) if open > close => {
            let mut err = ValidationError::new("window_order");
            err.message = Some("Open date must not be after close date".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn program(open: Option<NaiveDate>, close: Option<NaiveDate>) -> Program {
        Program {
            id: 1,
            name: "Seletiva de Kart".to_string(),
            slug: "kart".to_string(),
            short_description: None,
            description: None,
            open_date: open,
            close_date: close,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_window_unbounded_is_open() {
        let p = program(None, None);
        assert_eq!(p.window_state(date(1999, 1, 1)), WindowState::Open);
        assert_eq!(p.window_state(date(2100, 12, 31)), WindowState::Open);
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let p = program(Some(date(2026, 3, 1)), Some(date(2026, 3, 31)));
        assert_eq!(p.window_state(date(2026, 2, 28)), WindowState::NotYetOpen);
        assert_eq!(p.window_state(date(2026, 3, 1)), WindowState::Open);
        assert_eq!(p.window_state(date(2026, 3, 31)), WindowState::Open);
        assert_eq!(p.window_state(date(2026, 4, 1)), WindowState::Closed);
    }

    #[test]
    fn test_window_single_bound() {
        let only_open = program(Some(date(2026, 5, 10)), None);
        assert_eq!(only_open.window_state(date(2026, 5, 9)), WindowState::NotYetOpen);
        assert_eq!(only_open.window_state(date(2030, 1, 1)), WindowState::Open);

        let only_close = program(None, Some(date(2026, 5, 10)));
        assert_eq!(only_close.window_state(date(2020, 1, 1)), WindowState::Open);
        assert_eq!(only_close.window_state(date(2026, 5, 11)), WindowState::Closed);
    }

    #[test]
    fn test_rejection_messages() {
        assert!(WindowState::Open.rejection_message().is_none());
        assert!(WindowState::NotYetOpen
            .rejection_message()
            .unwrap()
            .contains("ainda não foram abertas"));
        assert!(WindowState::Closed
            .rejection_message()
            .unwrap()
            .contains("encerradas"));
    }

    #[test]
    fn test_variant_slug_roundtrip() {
        for variant in ProgramVariant::ALL {
            assert_eq!(ProgramVariant::from_slug(variant.slug()), Some(variant));
        }
        assert_eq!(ProgramVariant::from_slug("formula-1"), None);
    }

    #[test]
    fn test_variant_file_rules() {
        assert!(ProgramVariant::Kart.requires_photo());
        assert!(ProgramVariant::Internship.requires_photo());
        assert!(!ProgramVariant::Immersion.requires_photo());
        assert!(!ProgramVariant::ESports.requires_photo());
        assert!(ProgramVariant::Internship.accepts_resume());
        assert!(!ProgramVariant::Kart.accepts_resume());
    }

    #[test]
    fn test_seed_programs_are_valid() {
        for variant in ProgramVariant::ALL {
            let seed = NewProgram::seed(variant);
            assert!(seed.validate().is_ok(), "seed {} invalid", seed.slug);
            assert!(seed.description.unwrap().starts_with("Descrição padrão para"));
        }
    }

    #[test]
    fn test_new_program_rejects_bad_slug() {
        let mut seed = NewProgram::seed(ProgramVariant::Kart);
        seed.slug = "Kart Brasil".to_string();
        assert!(seed.validate().is_err());
    }

    #[test]
    fn test_new_program_rejects_inverted_window() {
        let mut seed = NewProgram::seed(ProgramVariant::Kart);
        seed.open_date = Some(date(2026, 6, 1));
        seed.close_date = Some(date(2026, 5, 1));
        assert!(seed.validate().is_err());
    }

    #[test]
    fn test_schedule_validation() {
        let ok = ProgramSchedule {
            program_id: 1,
            open_date: Some(date(2026, 5, 1)),
            close_date: Some(date(2026, 5, 1)),
            active: true,
        };
        assert!(ok.validate().is_ok());

        let inverted = ProgramSchedule {
            open_date: Some(date(2026, 5, 2)),
            ..ok
        };
        assert!(inverted.validate().is_err());
    }
}
