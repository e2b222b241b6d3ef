use crate::domain::errors::DomainError;
use chrono::Duration;
use serde::{Deserialize, Serialize};

// ===== Priority Tier =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriorityTier {
    Low,
    Medium,
    High,
    Urgent,
}

impl PriorityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityTier::Low => "Low",
            PriorityTier::Medium => "Medium",
            PriorityTier::High => "High",
            PriorityTier::Urgent => "Urgent",
        }
    }
}

impl std::fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority names are matched exactly, the way they are stored on tickets.
impl std::str::FromStr for PriorityTier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(PriorityTier::Low),
            "Medium" => Ok(PriorityTier::Medium),
            "High" => Ok(PriorityTier::High),
            "Urgent" => Ok(PriorityTier::Urgent),
            _ => Err(DomainError::UnknownPriorityTier(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdKind {
    FirstResponse,
    Resolution,
}

// ===== SLA Policy =====

/// Hour thresholds for one priority tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TierThresholds {
    pub first_response_hours: u32,
    pub resolution_hours: u32,
}

impl TierThresholds {
    pub fn new(first_response_hours: u32, resolution_hours: u32) -> Self {
        Self {
            first_response_hours,
            resolution_hours,
        }
    }

    pub fn hours(&self, kind: ThresholdKind) -> u32 {
        match kind {
            ThresholdKind::FirstResponse => self.first_response_hours,
            ThresholdKind::Resolution => self.resolution_hours,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaPolicy {
    pub id: String,
    pub name: String,
    pub low: TierThresholds,
    pub medium: TierThresholds,
    pub high: TierThresholds,
    pub urgent: TierThresholds,
}

impl SlaPolicy {
    pub fn new(
        name: String,
        low: TierThresholds,
        medium: TierThresholds,
        high: TierThresholds,
        urgent: TierThresholds,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            low,
            medium,
            high,
            urgent,
        }
    }

    pub fn tier(&self, tier: PriorityTier) -> &TierThresholds {
        match tier {
            PriorityTier::Low => &self.low,
            PriorityTier::Medium => &self.medium,
            PriorityTier::High => &self.high,
            PriorityTier::Urgent => &self.urgent,
        }
    }

    /// Hour count for `tier` and `kind`.
    pub fn threshold_for(&self, tier: PriorityTier, kind: ThresholdKind) -> u32 {
        self.tier(tier).hours(kind)
    }
}

// ===== Evaluation Result =====

/// Outcome of checking one SLA deadline against the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlaEvaluation {
    /// Already satisfied, or no policy applies.
    NotApplicable,
    /// Deadline not reached; time left until it.
    Remaining(Duration),
    Violated,
}

impl SlaEvaluation {
    pub fn is_violated(&self) -> bool {
        matches!(self, SlaEvaluation::Violated)
    }

    pub fn remaining(&self) -> Option<Duration> {
        match self {
            SlaEvaluation::Remaining(d) => Some(*d),
            _ => None,
        }
    }

    /// Remaining time as `HH:MM:SS`, if any.
    pub fn remaining_hms(&self) -> Option<String> {
        self.remaining().map(|d| format_hms(&d))
    }
}

impl std::fmt::Display for SlaEvaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlaEvaluation::NotApplicable => write!(f, "not_applicable"),
            SlaEvaluation::Remaining(d) => write!(f, "remaining {}", format_hms(d)),
            SlaEvaluation::Violated => write!(f, "violated"),
        }
    }
}

/// Format a duration as zero-padded `HH:MM:SS`. Hours are not wrapped at 24.
/// Negative durations are clamped to zero.
pub fn format_hms(duration: &Duration) -> String {
    let total = duration.num_seconds().max(0);
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

// ===== DTOs =====

/// Derived SLA attributes of one ticket, evaluated against a single instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketSlaView {
    pub ticket_id: String,
    pub priority: String,
    pub sla_id: Option<String>,
    pub evaluated_at: chrono::DateTime<chrono::Utc>,
    pub response_deadline: Option<chrono::DateTime<chrono::Utc>>,
    pub resolution_deadline: Option<chrono::DateTime<chrono::Utc>>,
    /// `HH:MM:SS` until the first-response deadline, when one is pending.
    pub remaining_response_time: Option<String>,
    /// `HH:MM:SS` until the resolution deadline, when one is pending.
    pub remaining_resolve_time: Option<String>,
    pub is_response_violated: bool,
    pub is_resolved_time_violated: bool,
}
