use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Flood-risk tier reported by the property-data provider
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FloodRisk {
    Low,
    Moderate,
    High,
}

impl std::fmt::Display for FloodRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FloodRisk::Low => write!(f, "low"),
            FloodRisk::Moderate => write!(f, "moderate"),
            FloodRisk::High => write!(f, "high"),
        }
    }
}

/// Core property data model
///
/// Immutable within a request. The `insight`/`insight_generated_at` pair is
/// attached by the cache layer after a successful generation, never mutated
/// in place by the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub id: String,
    pub price: i64,
    pub city: String,
    pub state: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub days_on_market: u32,
    /// Deal score in [0, 100] when the provider computed one
    pub deal_score: Option<u8>,
    pub price_drop_amount: Option<i64>,
    pub price_drop_percent: Option<f64>,
    pub estimated_monthly_rent: Option<i64>,
    pub flood_risk: FloodRisk,
    pub neighborhood_score: Option<u8>,
    pub insight: Option<String>,
    pub insight_generated_at: Option<DateTime<Utc>>,
}

impl Property {
    /// Price rendered as US currency with zero decimal places, e.g. "$450,000"
    pub fn formatted_price(&self) -> String {
        format_price(self.price)
    }
}

/// Currency formatting used by the prompt builder
pub fn format_price(price: i64) -> String {
    let negative = price < 0;
    let digits = price.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        let remaining = digits.len() - i;
        if i > 0 && remaining % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if negative {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// What the user wants out of a purchase
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    LiveIn,
    RentOut,
    Both,
}

impl std::fmt::Display for Goal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Goal::LiveIn => write!(f, "live in it"),
            Goal::RentOut => write!(f, "rent it out"),
            Goal::Both => write!(f, "live in it and rent part of it"),
        }
    }
}

/// How soon the user intends to buy
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Timeline {
    ReadyNow,
    ThreeToTwelveMonths,
    Browsing,
}

impl std::fmt::Display for Timeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Timeline::ReadyNow => write!(f, "ready to buy now"),
            Timeline::ThreeToTwelveMonths => write!(f, "buying in 3-12 months"),
            Timeline::Browsing => write!(f, "just browsing"),
        }
    }
}

/// Onboarding answers; read-only input to prompt rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub goal: Goal,
    pub timeline: Timeline,
    /// min <= max when both present; callers are responsible for well-formed input
    pub budget_min: Option<i64>,
    pub budget_max: Option<i64>,
    pub preferred_locations: Vec<String>,
    pub preferred_property_types: Vec<String>,
}

/// Ephemeral per-question aggregate; never persisted by the core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchContext {
    pub saved_property_count: usize,
    pub recent_searches: Vec<String>,
    pub preferred_locations: Vec<String>,
}

/// One memoized insight with its generation time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedInsight {
    pub content: String,
    pub generated_at: DateTime<Utc>,
}

/// One entry of a parsed ranking; `id` always refers to a property in the
/// caller-supplied candidate set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedProperty {
    pub id: String,
    /// 1-based, dense, assigned in accepted-line order
    pub rank: usize,
    pub reasons: Vec<String>,
    pub risk: String,
}

/// Parsed message-rewrite result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageSuggestion {
    pub rewritten_message: String,
    /// At most two, in the order they appeared
    pub follow_up_questions: Vec<String>,
}

/// Chat message role on the wire
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// Wire-level unit sent to and received from the model gateway
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}
