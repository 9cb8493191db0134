pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod recommend;
pub mod textjson;

pub use catalog::CatalogError;
pub use domain::card::{CardProduct, RecommendedCard, ScoredCard};
pub use domain::profile::{
    CardOwnership, CreditScoreBand, FieldKind, FieldValue, PreferredBenefit, SpendingCategory,
    UserProfile,
};
pub use errors::{ApplicationError, DomainError, InterfaceError};
