//! Deterministic card ranking over a catalog snapshot.

use crate::domain::card::{CardProduct, RecommendedCard, ScoredCard};
use crate::domain::profile::UserProfile;

/// Assumed average monthly spend used for the yearly reward estimate.
pub const ASSUMED_MONTHLY_SPEND: u64 = 5_000;
pub const MONTHS_PER_YEAR: u64 = 12;
/// At most this many cards are returned, highest score first.
pub const MAX_RESULTS: usize = 3;

/// Filters, scores, and ranks the catalog against the profile.
///
/// Callers enforce completeness at the boundary; an incomplete profile is
/// still scored here (unset slots simply never match), so the function is
/// total and deterministic for any input. Ties keep catalog order.
pub fn recommend(profile: &UserProfile, catalog: &[CardProduct]) -> Vec<RecommendedCard> {
    let income = profile.income().unwrap_or(0);

    let mut scored: Vec<ScoredCard> = catalog
        .iter()
        .filter(|product| product.min_income <= income)
        .map(|product| score_card(profile, income, product))
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(MAX_RESULTS);
    scored.into_iter().map(RecommendedCard::from).collect()
}

fn score_card(profile: &UserProfile, income: u64, product: &CardProduct) -> ScoredCard {
    let mut score = 0u8;
    let mut reasons = Vec::new();

    if let Some(benefit) = profile.benefits() {
        if product.has_perk(benefit.perk_tag()) {
            score += 2;
            reasons.push(format!("Matches your benefit: {}", benefit.perk_tag()));
        }
    }
    if let Some(spending) = profile.spending() {
        if product.has_perk(spending.perk_tag()) {
            score += 2;
            reasons.push(format!("Matches your spending: {}", spending.perk_tag()));
        }
    }
    if product.joining_fee == 0 {
        score += 1;
        reasons.push("Zero joining fee".to_string());
    }
    if product.annual_fee == 0 {
        score += 1;
        reasons.push("No annual fee".to_string());
    }
    reasons.push(format!("You are eligible with income ₹{income}"));

    ScoredCard {
        product: product.clone(),
        score,
        reasons,
        reward_estimate: reward_estimate(product.reward_rate),
    }
}

fn reward_estimate(reward_rate: f64) -> String {
    let annual_spend = (ASSUMED_MONTHLY_SPEND * MONTHS_PER_YEAR) as f64;
    let reward = (reward_rate * annual_spend).floor().max(0.0) as i64;
    format!("Estimated yearly reward: ₹{reward}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::{
        CardOwnership, CreditScoreBand, FieldValue, PreferredBenefit, SpendingCategory,
    };

    fn complete_profile() -> UserProfile {
        let mut profile = UserProfile::new();
        profile.set(FieldValue::Income(50_000));
        profile.set(FieldValue::Spending(SpendingCategory::Travel));
        profile.set(FieldValue::Benefits(PreferredBenefit::LoungeAccess));
        profile.set(FieldValue::Cards(CardOwnership::Yes));
        profile.set(FieldValue::Score(CreditScoreBand::Good));
        profile
    }

    fn card(name: &str, min_income: u64, perks: &[&str]) -> CardProduct {
        CardProduct {
            name: name.to_string(),
            issuer: "Test Bank".to_string(),
            min_income,
            perks: perks.iter().map(|perk| perk.to_string()).collect(),
            joining_fee: 0,
            annual_fee: 0,
            reward_rate: 0.01,
            image: String::new(),
            apply_link: format!("https://example.com/apply/{name}"),
        }
    }

    #[test]
    fn matching_travel_card_scores_five_with_annual_fee() {
        let profile = complete_profile();
        let product = CardProduct {
            min_income: 30_000,
            perks: vec!["travel".to_string(), "lounge access".to_string()],
            joining_fee: 0,
            annual_fee: 500,
            reward_rate: 0.02,
            ..card("Voyager Prime", 30_000, &[])
        };

        let results = recommend(&profile, &[product]);

        assert_eq!(results.len(), 1);
        let top = &results[0];
        assert_eq!(
            top.reasons,
            vec![
                "Matches your benefit: lounge access",
                "Matches your spending: travel",
                "Zero joining fee",
                "You are eligible with income ₹50000",
            ]
        );
        assert_eq!(top.reward_estimate, "Estimated yearly reward: ₹1200");
    }

    #[test]
    fn products_above_income_threshold_are_filtered_out() {
        let profile = complete_profile();
        let affordable = card("Within Reach", 50_000, &["travel"]);
        let premium = card("Out Of Reach", 50_001, &["travel", "lounge access"]);

        let results = recommend(&profile, &[premium, affordable]);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Within Reach");
    }

    #[test]
    fn score_stays_within_bounds() {
        let profile = complete_profile();
        let best = card("Full Match", 0, &["travel", "lounge access"]);
        let worst = CardProduct {
            joining_fee: 1_000,
            annual_fee: 2_000,
            ..card("No Match", 0, &[])
        };

        let scored_best = super::score_card(&profile, 50_000, &best);
        let scored_worst = super::score_card(&profile, 50_000, &worst);

        assert_eq!(scored_best.score, 6);
        assert_eq!(scored_worst.score, 0);
    }

    #[test]
    fn ties_keep_catalog_order_and_results_cap_at_three() {
        let profile = complete_profile();
        let catalog = vec![
            card("Alpha", 0, &["travel"]),
            card("Bravo", 0, &["travel"]),
            card("Charlie", 0, &["travel"]),
            card("Delta", 0, &["travel"]),
        ];

        let results = recommend(&profile, &catalog);

        assert_eq!(results.len(), MAX_RESULTS);
        let names: Vec<&str> = results.iter().map(|card| card.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Bravo", "Charlie"]);
    }

    #[test]
    fn higher_scores_rank_first() {
        let profile = complete_profile();
        let weak = CardProduct { annual_fee: 900, ..card("Weak", 0, &[]) };
        let strong = card("Strong", 0, &["travel", "lounge access"]);

        let results = recommend(&profile, &[weak, strong]);

        assert_eq!(results[0].name, "Strong");
        assert_eq!(results[1].name, "Weak");
    }

    #[test]
    fn repeated_calls_are_identical() {
        let profile = complete_profile();
        let catalog = vec![
            card("Alpha", 0, &["travel", "cashback"]),
            card("Bravo", 20_000, &["lounge access"]),
            card("Charlie", 0, &["dining"]),
        ];

        let first = recommend(&profile, &catalog);
        let second = recommend(&profile, &catalog);

        assert_eq!(first, second);
    }

    #[test]
    fn incomplete_profile_scores_without_preference_matches() {
        let mut profile = UserProfile::new();
        profile.set(FieldValue::Income(10_000));
        let product = card("Starter", 0, &["travel", "lounge access"]);

        let scored = super::score_card(&profile, 10_000, &product);

        // Only the fee bonuses apply when preferences are unset.
        assert_eq!(scored.score, 2);
        assert_eq!(scored.reasons.last().unwrap(), "You are eligible with income ₹10000");
    }
}
