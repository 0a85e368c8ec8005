mod clock;

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use clock::{Clock, ManualClock, SystemClock};

/// Wire value used for "no bound" in plan configuration files.
pub const UNLIMITED_SENTINEL: i64 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Feature {
    Generation,
    Export,
    Project,
    VoiceChar,
}

impl Feature {
    pub const ALL: [Feature; 4] = [
        Feature::Generation,
        Feature::Export,
        Feature::Project,
        Feature::VoiceChar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Generation => "generation",
            Feature::Export => "export",
            Feature::Project => "project",
            Feature::VoiceChar => "voiceChar",
        }
    }

    fn display_name(&self) -> &'static str {
        match self {
            Feature::Generation => "generation",
            Feature::Export => "export",
            Feature::Project => "project",
            Feature::VoiceChar => "voice",
        }
    }

    /// Billed service for character-metered features.
    pub fn service(&self) -> Option<Service> {
        match self {
            Feature::Generation => Some(Service::Generation),
            Feature::VoiceChar => Some(Service::Voice),
            Feature::Export | Feature::Project => None,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    Free,
    Premium,
}

impl PlanTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanTier::Free => "free",
            PlanTier::Premium => "premium",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Service {
    Generation,
    Voice,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageEvent {
    pub timestamp: DateTime<Utc>,
    pub subject_id: String,
    pub feature: Feature,
    pub success: bool,
    #[serde(default)]
    pub unit_count: u64,
}

/// A count bound; `Unlimited` is written as `-1` in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Bound {
    #[default]
    Unlimited,
    Max(u64),
}

impl Bound {
    pub fn max(&self) -> Option<u64> {
        match self {
            Bound::Unlimited => None,
            Bound::Max(value) => Some(*value),
        }
    }

    pub fn is_reached(&self, count: u64) -> bool {
        match self {
            Bound::Unlimited => false,
            Bound::Max(value) => count >= *value,
        }
    }

    pub fn remaining(&self, count: u64) -> Option<u64> {
        self.max().map(|value| value.saturating_sub(count))
    }
}

impl Serialize for Bound {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Bound::Unlimited => serializer.serialize_i64(UNLIMITED_SENTINEL),
            Bound::Max(value) => serializer.serialize_u64(*value),
        }
    }
}

impl<'de> Deserialize<'de> for Bound {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        match raw {
            UNLIMITED_SENTINEL => Ok(Bound::Unlimited),
            value if value >= 0 => Ok(Bound::Max(value as u64)),
            value => Err(serde::de::Error::custom(format!(
                "invalid bound {value}, expected -1 or a non-negative count"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureLimits {
    #[serde(default)]
    pub hourly: Bound,
    #[serde(default)]
    pub daily: Bound,
    #[serde(default)]
    pub total: Bound,
}

/// Per-tier, per-feature bounds. Features missing from a tier are unlimited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanLimits {
    pub tiers: BTreeMap<PlanTier, BTreeMap<Feature, FeatureLimits>>,
}

impl PlanLimits {
    pub fn limits_for(&self, tier: PlanTier, feature: Feature) -> FeatureLimits {
        self.tiers
            .get(&tier)
            .and_then(|features| features.get(&feature))
            .copied()
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitReason {
    HourlyLimit,
    DailyLimit,
    TotalLimit,
}

impl LimitReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            LimitReason::HourlyLimit => "hourly_limit",
            LimitReason::DailyLimit => "daily_limit",
            LimitReason::TotalLimit => "total_limit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitDecision {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<LimitReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_at: Option<DateTime<Utc>>,
}

impl LimitDecision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
            reset_at: None,
        }
    }

    pub fn deny(reason: LimitReason, reset_at: Option<DateTime<Utc>>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
            reset_at,
        }
    }

    /// User-facing explanation of a denial, `None` when allowed.
    pub fn message(&self, feature: Feature) -> Option<String> {
        let reason = self.reason?;
        let name = feature.display_name();
        let message = match (reason, self.reset_at) {
            (LimitReason::HourlyLimit, Some(reset_at)) => format!(
                "Hourly {name} limit reached. Try again after {} UTC.",
                reset_at.format("%H:%M")
            ),
            (LimitReason::DailyLimit, Some(reset_at)) => format!(
                "Daily {name} limit reached. Try again after {} UTC.",
                reset_at.format("%Y-%m-%d %H:%M")
            ),
            (LimitReason::HourlyLimit, None) => format!("Hourly {name} limit reached."),
            (LimitReason::DailyLimit, None) => format!("Daily {name} limit reached."),
            (LimitReason::TotalLimit, _) => {
                format!("Your plan's {name} limit is reached. Upgrade to continue.")
            }
        };
        Some(message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostRates {
    pub generation_per_1k: f64,
    pub voice_per_1k: f64,
}

impl CostRates {
    pub fn rate_for(&self, service: Service) -> f64 {
        match service {
            Service::Generation => self.generation_per_1k,
            Service::Voice => self.voice_per_1k,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyCaps {
    pub free: f64,
    pub premium: f64,
}

impl DailyCaps {
    pub fn cap_for(&self, tier: PlanTier) -> f64 {
        match tier {
            PlanTier::Free => self.free,
            PlanTier::Premium => self.premium,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostState {
    pub total_cost_today: f64,
    pub characters_by_service: BTreeMap<Service, u64>,
    pub request_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCostSnapshot {
    pub date: String,
    pub subjects: BTreeMap<String, CostState>,
}

/// Outcome of testing a prospective action against the daily cost cap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCapCheck {
    pub daily_total: f64,
    pub estimate: f64,
    pub daily_cap: f64,
}

impl DailyCapCheck {
    pub fn would_exceed(&self) -> bool {
        self.daily_total + self.estimate > self.daily_cap
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureUsage {
    pub feature: Feature,
    pub hourly_used: u64,
    pub hourly_limit: Bound,
    pub daily_used: u64,
    pub daily_limit: Bound,
    pub total_used: u64,
    pub total_limit: Bound,
}

impl FeatureUsage {
    /// Smallest allowance left across the configured windows.
    pub fn remaining(&self) -> Option<u64> {
        [
            self.hourly_limit.remaining(self.hourly_used),
            self.daily_limit.remaining(self.daily_used),
            self.total_limit.remaining(self.total_used),
        ]
        .into_iter()
        .flatten()
        .min()
    }
}

pub fn estimate_cost(rates: &CostRates, feature: Feature, unit_count: u64) -> f64 {
    match feature.service() {
        Some(service) => (unit_count as f64 / 1000.0) * rates.rate_for(service),
        None => 0.0,
    }
}

pub fn format_cost(value: f64) -> String {
    format!("{value:.4}")
}
