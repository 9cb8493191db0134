use thiserror::Error;

use crate::domain::profile::FieldKind;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("profile is incomplete, {} field(s) still unresolved", .missing.len())]
    IncompleteProfile { missing: Vec<FieldKind> },
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("catalog failure: {0}")]
    Catalog(String),
    #[error("oracle failure: {0}")]
    Oracle(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("conflict: {message}")]
    Conflict { message: String, correlation_id: String },
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
    #[error("service unavailable: {message}")]
    ServiceUnavailable { message: String, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl InterfaceError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Conflict { .. } => "Please complete all questions first.",
            Self::BadRequest { .. } => {
                "The request could not be processed. Check inputs and try again."
            }
            Self::ServiceUnavailable { .. } => {
                "The service is temporarily unavailable. Please retry shortly."
            }
            Self::Internal { .. } => "An unexpected internal error occurred.",
        }
    }
}

impl ApplicationError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        let mut mapped = InterfaceError::from(self);
        match &mut mapped {
            InterfaceError::Conflict { correlation_id: id, .. }
            | InterfaceError::BadRequest { correlation_id: id, .. }
            | InterfaceError::ServiceUnavailable { correlation_id: id, .. }
            | InterfaceError::Internal { correlation_id: id, .. } => *id = correlation_id,
        }
        mapped
    }
}

impl From<ApplicationError> for InterfaceError {
    fn from(value: ApplicationError) -> Self {
        match value {
            ApplicationError::Domain(DomainError::IncompleteProfile { .. }) => Self::Conflict {
                message: "profile is incomplete".to_owned(),
                correlation_id: "unassigned".to_owned(),
            },
            ApplicationError::Domain(DomainError::InvariantViolation(_)) => Self::BadRequest {
                message: "domain validation failed".to_owned(),
                correlation_id: "unassigned".to_owned(),
            },
            ApplicationError::Catalog(message) | ApplicationError::Oracle(message) => {
                Self::ServiceUnavailable { message, correlation_id: "unassigned".to_owned() }
            }
            ApplicationError::Configuration(message) => {
                Self::Internal { message, correlation_id: "unassigned".to_owned() }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::profile::FieldKind;
    use crate::errors::{ApplicationError, DomainError, InterfaceError};

    #[test]
    fn incomplete_profile_maps_to_conflict_with_canned_message() {
        let interface = ApplicationError::from(DomainError::IncompleteProfile {
            missing: vec![FieldKind::Income, FieldKind::Score],
        })
        .into_interface("req-1");

        assert!(matches!(
            interface,
            InterfaceError::Conflict {
                ref correlation_id,
                ..
            } if correlation_id == "req-1"
        ));
        assert_eq!(interface.user_message(), "Please complete all questions first.");
    }

    #[test]
    fn catalog_error_maps_to_service_unavailable() {
        let interface =
            ApplicationError::Catalog("cards.json unreadable".to_owned()).into_interface("req-2");

        assert!(matches!(interface, InterfaceError::ServiceUnavailable { .. }));
        assert_eq!(
            interface.user_message(),
            "The service is temporarily unavailable. Please retry shortly."
        );
    }

    #[test]
    fn configuration_error_maps_to_internal() {
        let interface =
            ApplicationError::Configuration("invalid oracle key".to_owned()).into_interface("req-3");

        assert!(matches!(interface, InterfaceError::Internal { .. }));
        assert_eq!(interface.user_message(), "An unexpected internal error occurred.");
    }
}
