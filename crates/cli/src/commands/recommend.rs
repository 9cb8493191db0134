use std::path::PathBuf;

use cardwise_core::config::{AppConfig, LoadOptions};
use cardwise_core::domain::profile::{
    CardOwnership, CreditScoreBand, FieldValue, PreferredBenefit, SpendingCategory, UserProfile,
};
use cardwise_core::{catalog, recommend};

use super::CommandResult;

#[derive(Debug, clap::Args)]
pub struct RecommendArgs {
    #[arg(long, help = "Monthly income")]
    pub income: u64,
    #[arg(long, help = "Spending category: fuel|groceries|travel|dining")]
    pub spending: String,
    #[arg(long, help = "Preferred benefit: cashback|lounge access|travel points")]
    pub benefits: String,
    #[arg(long, help = "Existing cards: yes|none")]
    pub cards: String,
    #[arg(long, help = "Credit score band: good|low|unknown")]
    pub score: String,
    #[arg(long, help = "Catalog path (defaults to the configured catalog)")]
    pub catalog: Option<PathBuf>,
}

pub fn run(args: RecommendArgs) -> CommandResult {
    let profile = match build_profile(&args) {
        Ok(profile) => profile,
        Err(message) => return CommandResult::failure("recommend", "invalid_argument", message, 2),
    };

    let catalog_path = match args.catalog {
        Some(path) => path,
        None => match AppConfig::load(LoadOptions::default()) {
            Ok(config) => config.catalog.path,
            Err(error) => {
                return CommandResult::failure("recommend", "configuration", error.to_string(), 2)
            }
        },
    };

    let snapshot = match catalog::load_from_path(&catalog_path) {
        Ok(snapshot) => snapshot,
        Err(error) => return CommandResult::failure("recommend", "catalog", error.to_string(), 2),
    };

    let cards = recommend::recommend(&profile, &snapshot);
    let output = serde_json::to_string_pretty(&cards)
        .unwrap_or_else(|error| format!("serialization failed: {error}"));

    CommandResult { exit_code: 0, output }
}

fn build_profile(args: &RecommendArgs) -> Result<UserProfile, String> {
    let spending = SpendingCategory::parse(&args.spending)
        .ok_or_else(|| format!("unknown spending category `{}`", args.spending))?;
    let benefits = PreferredBenefit::parse(&args.benefits)
        .ok_or_else(|| format!("unknown benefit `{}`", args.benefits))?;
    let cards = CardOwnership::parse(&args.cards)
        .ok_or_else(|| format!("unknown cards value `{}`", args.cards))?;
    let score = CreditScoreBand::parse(&args.score)
        .ok_or_else(|| format!("unknown score band `{}`", args.score))?;

    let mut profile = UserProfile::new();
    profile.set(FieldValue::Income(args.income));
    profile.set(FieldValue::Spending(spending));
    profile.set(FieldValue::Benefits(benefits));
    profile.set(FieldValue::Cards(cards));
    profile.set(FieldValue::Score(score));
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::{build_profile, RecommendArgs};

    fn args() -> RecommendArgs {
        RecommendArgs {
            income: 50_000,
            spending: "travel".to_string(),
            benefits: "lounge access".to_string(),
            cards: "yes".to_string(),
            score: "good".to_string(),
            catalog: None,
        }
    }

    #[test]
    fn flags_build_a_complete_profile() {
        let profile = build_profile(&args()).expect("profile should build");

        assert!(profile.is_complete());
        assert_eq!(profile.income(), Some(50_000));
    }

    #[test]
    fn unknown_enum_values_are_rejected_with_context() {
        let mut bad = args();
        bad.benefits = "miles".to_string();

        let error = build_profile(&bad).expect_err("should fail");

        assert!(error.contains("miles"));
    }
}
