//! Display labels for statuses and alerts
//!
//! The engine only deals in `Status`/`AlertLevel`; this table is the single
//! place where they meet human-readable, language-specific text.

use crate::types::{AlertLevel, EngineError, Result, Status};
use serde::{Deserialize, Serialize};

/// Display language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "pt-br", alias = "pt")]
    PtBr,
    #[serde(rename = "en")]
    En,
}

impl Locale {
    pub fn label(self, status: Status) -> &'static str {
        match (self, status) {
            (Locale::PtBr, Status::Late) => "Atrasada",
            (Locale::PtBr, Status::Scheduled) => "Programada",
            (Locale::PtBr, Status::Completed) => "Concluída",
            (Locale::PtBr, Status::InProgress) => "Em andamento",
            (Locale::En, Status::Late) => "Late",
            (Locale::En, Status::Scheduled) => "Scheduled",
            (Locale::En, Status::Completed) => "Completed",
            (Locale::En, Status::InProgress) => "In progress",
            (_, Status::Undetermined) => "-",
        }
    }

    pub fn alert_label(self, alert: AlertLevel) -> &'static str {
        match (self, alert) {
            (_, AlertLevel::None) => "",
            (Locale::PtBr, AlertLevel::DueSoon) => "Vence em breve",
            (Locale::PtBr, AlertLevel::Late) => "Atrasada",
            (Locale::En, AlertLevel::DueSoon) => "Due soon",
            (Locale::En, AlertLevel::Late) => "Late",
        }
    }
}

/// Parse a status label typed by a user or found in an imported sheet
///
/// Accepts either language in any case, the legacy upper-case spellings,
/// `-`/`_` for undetermined and the canonical snake_case names. A blank label
/// means "no override" and yields `Ok(None)`.
pub fn parse_status_label(text: &str) -> Result<Option<Status>> {
    let normalized = text.trim().to_lowercase();
    if normalized.is_empty() {
        return Ok(None);
    }

    let status = match normalized.as_str() {
        "atrasada" | "late" => Status::Late,
        "programada" | "scheduled" => Status::Scheduled,
        "concluída" | "concluida" | "completed" => Status::Completed,
        "em andamento" | "in progress" | "in_progress" => Status::InProgress,
        "-" | "_" | "undetermined" => Status::Undetermined,
        _ => return Err(EngineError::UnknownStatusLabel(text.to_string())),
    };
    Ok(Some(status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip_through_parser() {
        for locale in [Locale::PtBr, Locale::En] {
            for status in Status::ALL {
                let label = locale.label(status);
                assert_eq!(parse_status_label(label).unwrap(), Some(status), "{label}");
            }
        }
    }

    #[test]
    fn test_legacy_spellings() {
        assert_eq!(parse_status_label("CONCLUÍDA").unwrap(), Some(Status::Completed));
        assert_eq!(parse_status_label("EM ANDAMENTO").unwrap(), Some(Status::InProgress));
        assert_eq!(parse_status_label("ATRASADA").unwrap(), Some(Status::Late));
        assert_eq!(parse_status_label("_").unwrap(), Some(Status::Undetermined));
        assert_eq!(parse_status_label("in_progress").unwrap(), Some(Status::InProgress));
    }

    #[test]
    fn test_blank_is_no_override() {
        assert_eq!(parse_status_label("").unwrap(), None);
        assert_eq!(parse_status_label("   ").unwrap(), None);
    }

    #[test]
    fn test_unknown_label() {
        assert!(matches!(
            parse_status_label("Cancelada"),
            Err(EngineError::UnknownStatusLabel(label)) if label == "Cancelada"
        ));
    }

    #[test]
    fn test_locale_deserialization() {
        let locale: Locale = serde_json::from_str(r#""en""#).unwrap();
        assert_eq!(locale, Locale::En);
        let locale: Locale = serde_json::from_str(r#""pt""#).unwrap();
        assert_eq!(locale, Locale::PtBr);
    }
}
