//! Closed display categories
//!
//! Sentiment, live status, and outcome are finite sets. Each one maps to a
//! badge through an exhaustive `match`, so a new variant does not compile
//! until it has a color and an icon.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Badge color used by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Green,
    Yellow,
    Red,
    Blue,
    Gray,
}

/// Badge icon used by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeIcon {
    CheckCircle,
    ExclamationCircle,
    Phone,
    Globe,
}

/// Color and icon pair for a category value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub color: BadgeColor,
    pub icon: BadgeIcon,
}

impl Badge {
    pub const fn new(color: BadgeColor, icon: BadgeIcon) -> Self {
        Self { color, icon }
    }
}

/// User sentiment as reported by the voice agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Chart order
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    /// Badge for values outside the closed set
    pub const UNKNOWN_BADGE: Badge = Badge::new(BadgeColor::Gray, BadgeIcon::ExclamationCircle);

    /// Exact, case-sensitive match against the upstream spelling
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Positive" => Some(Sentiment::Positive),
            "Neutral" => Some(Sentiment::Neutral),
            "Negative" => Some(Sentiment::Negative),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }

    /// Chart label
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positivo",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negativo",
        }
    }

    pub fn badge(&self) -> Badge {
        match self {
            Sentiment::Positive => Badge::new(BadgeColor::Green, BadgeIcon::CheckCircle),
            Sentiment::Neutral => Badge::new(BadgeColor::Yellow, BadgeIcon::ExclamationCircle),
            Sentiment::Negative => Badge::new(BadgeColor::Red, BadgeIcon::ExclamationCircle),
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Live status of a call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    Started,
    Ongoing,
    Ended,
}

impl CallStatus {
    pub const UNKNOWN_BADGE: Badge = Badge::new(BadgeColor::Gray, BadgeIcon::Globe);

    /// Parse from string (case-insensitive)
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "started" => Some(CallStatus::Started),
            "ongoing" => Some(CallStatus::Ongoing),
            "ended" => Some(CallStatus::Ended),
            _ => None,
        }
    }

    pub fn badge(&self) -> Badge {
        match self {
            CallStatus::Ended => Badge::new(BadgeColor::Red, BadgeIcon::ExclamationCircle),
            CallStatus::Ongoing => Badge::new(BadgeColor::Blue, BadgeIcon::Phone),
            CallStatus::Started => Badge::new(BadgeColor::Green, BadgeIcon::CheckCircle),
        }
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallStatus::Started => write!(f, "started"),
            CallStatus::Ongoing => write!(f, "ongoing"),
            CallStatus::Ended => write!(f, "ended"),
        }
    }
}

/// Whether the agent achieved the call's goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallOutcome {
    Successful,
    Failed,
}

impl CallOutcome {
    /// Chart order, success first
    pub const ALL: [CallOutcome; 2] = [CallOutcome::Successful, CallOutcome::Failed];

    pub fn from_flag(successful: bool) -> Self {
        if successful {
            CallOutcome::Successful
        } else {
            CallOutcome::Failed
        }
    }

    /// Chart label
    pub fn label(&self) -> &'static str {
        match self {
            CallOutcome::Successful => "Exitosa",
            CallOutcome::Failed => "Fallida",
        }
    }

    pub fn badge(&self) -> Badge {
        match self {
            CallOutcome::Successful => Badge::new(BadgeColor::Green, BadgeIcon::CheckCircle),
            CallOutcome::Failed => Badge::new(BadgeColor::Red, BadgeIcon::ExclamationCircle),
        }
    }
}
