use serde::{Deserialize, Serialize};

/// The five facts the conversation must collect before a recommendation can
/// be produced. Serialized names double as the oracle's JSON contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Income,
    Spending,
    Benefits,
    Cards,
    Score,
}

impl FieldKind {
    /// Collection order. The planner asks for fields in this order and the
    /// extractor's fallback merge walks it the same way.
    pub const REQUIRED: [FieldKind; 5] = [
        FieldKind::Income,
        FieldKind::Spending,
        FieldKind::Benefits,
        FieldKind::Cards,
        FieldKind::Score,
    ];

    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Spending => "spending",
            Self::Benefits => "benefits",
            Self::Cards => "cards",
            Self::Score => "score",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpendingCategory {
    Fuel,
    Groceries,
    Travel,
    Dining,
}

impl SpendingCategory {
    /// Keyword-match order is significant: first hit wins.
    pub const ALL: [SpendingCategory; 4] =
        [Self::Fuel, Self::Groceries, Self::Travel, Self::Dining];

    /// The tag used both as conversation keyword and as catalog perk tag.
    pub fn perk_tag(self) -> &'static str {
        match self {
            Self::Fuel => "fuel",
            Self::Groceries => "groceries",
            Self::Travel => "travel",
            Self::Dining => "dining",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|category| category.perk_tag() == normalized)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferredBenefit {
    Cashback,
    LoungeAccess,
    TravelPoints,
}

impl PreferredBenefit {
    pub const ALL: [PreferredBenefit; 3] = [Self::Cashback, Self::LoungeAccess, Self::TravelPoints];

    /// The tag used both as conversation keyword and as catalog perk tag.
    pub fn perk_tag(self) -> &'static str {
        match self {
            Self::Cashback => "cashback",
            Self::LoungeAccess => "lounge access",
            Self::TravelPoints => "travel points",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase().replace('_', " ");
        Self::ALL.into_iter().find(|benefit| benefit.perk_tag() == normalized)
    }
}

/// Whether the user already holds any credit cards. Absence of the slot
/// (rather than a third variant) represents "not yet asked".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardOwnership {
    Yes,
    None,
}

impl CardOwnership {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::None => "none",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "yes" => Some(Self::Yes),
            "no" | "none" => Some(Self::None),
            _ => Option::None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditScoreBand {
    Good,
    Low,
    Unknown,
}

impl CreditScoreBand {
    pub const ALL: [CreditScoreBand; 3] = [Self::Good, Self::Low, Self::Unknown];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Low => "low",
            Self::Unknown => "unknown",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|band| band.as_str() == normalized)
    }
}

/// One resolved field, as produced by the extractor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Income(u64),
    Spending(SpendingCategory),
    Benefits(PreferredBenefit),
    Cards(CardOwnership),
    Score(CreditScoreBand),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Income(_) => FieldKind::Income,
            Self::Spending(_) => FieldKind::Spending,
            Self::Benefits(_) => FieldKind::Benefits,
            Self::Cards(_) => FieldKind::Cards,
            Self::Score(_) => FieldKind::Score,
        }
    }
}

/// The facts collected so far for one conversation. A slot is `Some` iff it
/// has been resolved; each slot is write-once for the life of the session.
///
/// First-write-wins is enforced by [`UserProfile::set`] itself, so callers
/// can merge candidate updates from any source without risking an overwrite.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserProfile {
    income: Option<u64>,
    spending: Option<SpendingCategory>,
    benefits: Option<PreferredBenefit>,
    cards: Option<CardOwnership>,
    score: Option<CreditScoreBand>,
}

impl UserProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes the slot only when it is still unset. Returns whether the
    /// write landed.
    pub fn set(&mut self, value: FieldValue) -> bool {
        match value {
            FieldValue::Income(income) if self.income.is_none() => {
                self.income = Some(income);
                true
            }
            FieldValue::Spending(spending) if self.spending.is_none() => {
                self.spending = Some(spending);
                true
            }
            FieldValue::Benefits(benefits) if self.benefits.is_none() => {
                self.benefits = Some(benefits);
                true
            }
            FieldValue::Cards(cards) if self.cards.is_none() => {
                self.cards = Some(cards);
                true
            }
            FieldValue::Score(score) if self.score.is_none() => {
                self.score = Some(score);
                true
            }
            _ => false,
        }
    }

    pub fn income(&self) -> Option<u64> {
        self.income
    }

    pub fn spending(&self) -> Option<SpendingCategory> {
        self.spending
    }

    pub fn benefits(&self) -> Option<PreferredBenefit> {
        self.benefits
    }

    pub fn cards(&self) -> Option<CardOwnership> {
        self.cards
    }

    pub fn score(&self) -> Option<CreditScoreBand> {
        self.score
    }

    pub fn is_set(&self, kind: FieldKind) -> bool {
        match kind {
            FieldKind::Income => self.income.is_some(),
            FieldKind::Spending => self.spending.is_some(),
            FieldKind::Benefits => self.benefits.is_some(),
            FieldKind::Cards => self.cards.is_some(),
            FieldKind::Score => self.score.is_some(),
        }
    }

    pub fn is_complete(&self) -> bool {
        FieldKind::REQUIRED.into_iter().all(|kind| self.is_set(kind))
    }

    /// Unresolved fields in the fixed collection order.
    pub fn missing_fields(&self) -> Vec<FieldKind> {
        FieldKind::REQUIRED.into_iter().filter(|kind| !self.is_set(*kind)).collect()
    }

    /// Resolved slots as field values, in collection order. Feeding these
    /// through another profile's `set` merges monotonically.
    pub fn resolved_fields(&self) -> Vec<FieldValue> {
        let mut values = Vec::new();
        if let Some(income) = self.income {
            values.push(FieldValue::Income(income));
        }
        if let Some(spending) = self.spending {
            values.push(FieldValue::Spending(spending));
        }
        if let Some(benefits) = self.benefits {
            values.push(FieldValue::Benefits(benefits));
        }
        if let Some(cards) = self.cards {
            values.push(FieldValue::Cards(cards));
        }
        if let Some(score) = self.score {
            values.push(FieldValue::Score(score));
        }
        values
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
