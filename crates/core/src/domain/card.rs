use serde::{Deserialize, Serialize};

/// One catalog entry. The catalog file may omit any field with a default;
/// only `name`, `issuer`, and `apply_link` are required.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardProduct {
    pub name: String,
    pub issuer: String,
    #[serde(default)]
    pub min_income: u64,
    #[serde(default)]
    pub perks: Vec<String>,
    #[serde(default)]
    pub joining_fee: u64,
    #[serde(default)]
    pub annual_fee: u64,
    #[serde(default)]
    pub reward_rate: f64,
    #[serde(default)]
    pub image: String,
    pub apply_link: String,
}

impl CardProduct {
    /// Perk tags are compared case-insensitively against the user's
    /// preference tags.
    pub fn has_perk(&self, tag: &str) -> bool {
        self.perks.iter().any(|perk| perk.eq_ignore_ascii_case(tag))
    }
}

/// A catalog entry annotated by the recommendation engine. Transient.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredCard {
    pub product: CardProduct,
    pub score: u8,
    pub reasons: Vec<String>,
    pub reward_estimate: String,
}

/// The public result shape returned to clients.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecommendedCard {
    pub name: String,
    pub issuer: String,
    pub image: String,
    pub reasons: Vec<String>,
    pub reward_estimate: String,
    pub apply_link: String,
}

impl From<ScoredCard> for RecommendedCard {
    fn from(scored: ScoredCard) -> Self {
        Self {
            name: scored.product.name,
            issuer: scored.product.issuer,
            image: scored.product.image,
            reasons: scored.reasons,
            reward_estimate: scored.reward_estimate,
            apply_link: scored.product.apply_link,
        }
    }
}
