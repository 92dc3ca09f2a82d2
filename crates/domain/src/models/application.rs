//! Application (public submission) domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Program-specific answers keyed by field name.
///
/// Values are strings, booleans (checkboxes) or string arrays (multi-selects).
pub type Attributes = serde_json::Map<String, serde_json::Value>;

/// Review status of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    PreSelected,
    Selected,
    NotSelected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::Pending,
        ApplicationStatus::PreSelected,
        ApplicationStatus::Selected,
        ApplicationStatus::NotSelected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::PreSelected => "pre_selected",
            ApplicationStatus::Selected => "selected",
            ApplicationStatus::NotSelected => "not_selected",
        }
    }

    /// Label shown to staff.
    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pendente",
            ApplicationStatus::PreSelected => "Pré-selecionada",
            ApplicationStatus::Selected => "Selecionada",
            ApplicationStatus::NotSelected => "Não selecionada",
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized status value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown application status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for ApplicationStatus {
    type Err = UnknownStatus;

    /// Accepts the canonical values, hyphenated spellings and the Portuguese
    /// values used by older form links.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "pending" | "pendente" => Ok(ApplicationStatus::Pending),
            "pre_selected" | "pre-selected" | "pre_selecionada" => {
                Ok(ApplicationStatus::PreSelected)
            }
            "selected" | "selecionada" => Ok(ApplicationStatus::Selected),
            "not_selected" | "not-selected" | "nao_selecionada" => {
                Ok(ApplicationStatus::NotSelected)
            }
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// A stored application.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Application {
    pub id: i64,
    pub program_id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub region_code: String,
    pub attributes: Attributes,
    pub photo_filename: Option<String>,
    pub resume_filename: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row shown on the admin dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ApplicationListItem {
    pub id: i64,
    pub program_id: i64,
    pub program_name: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub region_code: String,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

/// Validated input for inserting an application.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub program_id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub region_code: String,
    pub attributes: Attributes,
    pub photo_filename: Option<String>,
    pub resume_filename: Option<String>,
}

/// Raw dashboard query string.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub programa_id: Option<String>,
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub estado: Option<String>,
}

/// Parsed dashboard filters. Each filter is independent; `None` means unfiltered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationFilter {
    pub program_id: Option<i64>,
    pub name_contains: Option<String>,
    pub status: Option<ApplicationStatus>,
    pub region_code: Option<String>,
}

impl From<&DashboardQuery> for ApplicationFilter {
    /// Malformed values are dropped rather than rejected.
    fn from(query: &DashboardQuery) -> Self {
        let program_id = query
            .programa_id
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty() && v.chars().all(|c| c.is_ascii_digit()))
            .and_then(|v| v.parse().ok());

        let name_contains = query
            .nome
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        let status = query.status.as_deref().and_then(|v| v.parse().ok());

        let region_code = query
            .estado
            .as_deref()
            .map(|v| v.trim().to_uppercase())
            .filter(|v| !v.is_empty());

        Self {
            program_id,
            name_contains,
            status,
            region_code,
        }
    }
}

impl ApplicationFilter {
    pub fn is_empty(&self) -> bool {
        *self == ApplicationFilter::default()
    }
}

/// Global per-status totals, computed without the dashboard filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pending: i64,
    pub pre_selected: i64,
    pub selected: i64,
    pub not_selected: i64,
    pub total: i64,
}

impl StatusCounts {
    pub fn get(&self, status: ApplicationStatus) -> i64 {
        match status {
            ApplicationStatus::Pending => self.pending,
            ApplicationStatus::PreSelected => self.pre_selected,
            ApplicationStatus::Selected => self.selected,
            ApplicationStatus::NotSelected => self.not_selected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_canonical_and_aliases() {
        assert_eq!("pending".parse(), Ok(ApplicationStatus::Pending));
        assert_eq!("pendente".parse(), Ok(ApplicationStatus::Pending));
        assert_eq!("pre-selected".parse(), Ok(ApplicationStatus::PreSelected));
        assert_eq!("pre_selecionada".parse(), Ok(ApplicationStatus::PreSelected));
        assert_eq!("selecionada".parse(), Ok(ApplicationStatus::Selected));
        assert_eq!("not-selected".parse(), Ok(ApplicationStatus::NotSelected));
        assert_eq!("nao_selecionada".parse(), Ok(ApplicationStatus::NotSelected));
        assert!("approved".parse::<ApplicationStatus>().is_err());
        assert!("".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn test_status_display_roundtrip() {
        for status in ApplicationStatus::ALL {
            assert_eq!(status.to_string().parse(), Ok(status));
        }
    }

    #[test]
    fn test_status_serde() {
        let json = serde_json::to_string(&ApplicationStatus::PreSelected).unwrap();
        assert_eq!(json, "\"pre_selected\"");
    }

    #[test]
    fn test_filter_from_full_query() {
        let query = DashboardQuery {
            programa_id: Some("3".to_string()),
            nome: Some(" ana ".to_string()),
            status: Some("selected".to_string()),
            estado: Some("sp".to_string()),
        };
        let filter = ApplicationFilter::from(&query);
        assert_eq!(filter.program_id, Some(3));
        assert_eq!(filter.name_contains.as_deref(), Some("ana"));
        assert_eq!(filter.status, Some(ApplicationStatus::Selected));
        assert_eq!(filter.region_code.as_deref(), Some("SP"));
    }

    #[test]
    fn test_filter_drops_malformed_values() {
        let query = DashboardQuery {
            programa_id: Some("-1".to_string()),
            nome: Some("   ".to_string()),
            status: Some("aprovada".to_string()),
            estado: Some("".to_string()),
        };
        assert!(ApplicationFilter::from(&query).is_empty());

        let query = DashboardQuery {
            programa_id: Some("1a".to_string()),
            ..Default::default()
        };
        assert!(ApplicationFilter::from(&query).is_empty());
    }

    #[test]
    fn test_status_counts_get() {
        let counts = StatusCounts {
            pending: 4,
            pre_selected: 3,
            selected: 2,
            not_selected: 1,
            total: 10,
        };
        assert_eq!(counts.get(ApplicationStatus::Pending), 4);
        assert_eq!(counts.get(ApplicationStatus::NotSelected), 1);
    }
}
