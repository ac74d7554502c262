//! Healthcare-device domains offered on the landing view.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the six fixed domains a user can chat about.
///
/// Picking a domain only switches the view; it is never sent to the
/// assistant service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainTag {
    Insulin,
    Ventilator,
    Cardio,
    Ehr,
    Iso,
    Samples,
}

impl DomainTag {
    /// All domains in landing-card order.
    pub const ALL: [Self; 6] = [
        Self::Insulin,
        Self::Ventilator,
        Self::Cardio,
        Self::Ehr,
        Self::Iso,
        Self::Samples,
    ];

    /// URL slug.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Insulin => "insulin",
            Self::Ventilator => "ventilator",
            Self::Cardio => "cardio",
            Self::Ehr => "ehr",
            Self::Iso => "iso",
            Self::Samples => "samples",
        }
    }

    #[must_use]
    pub fn emoji(self) -> &'static str {
        match self {
            Self::Insulin => "💉",
            Self::Ventilator => "🫁",
            Self::Cardio => "🫀",
            Self::Ehr => "🏥",
            Self::Iso => "⚠️",
            Self::Samples => "🧪",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Insulin => "Insulin Pumps",
            Self::Ventilator => "Ventilators",
            Self::Cardio => "Cardiology Devices",
            Self::Ehr => "EHR/Clinical Software",
            Self::Iso => "ISO/Regulatory Audit",
            Self::Samples => "Sandbox / Samples",
        }
    }

    #[must_use]
    pub fn subtitle(self) -> &'static str {
        match self {
            Self::Insulin => "Basal/bolus delivery, safety interlocks",
            Self::Ventilator => "Alarms, modes, fail-safes",
            Self::Cardio => "ECG/HR monitoring & diagnostics",
            Self::Ehr => "Security, audit trails, interoperability",
            Self::Iso => "62304, 14971, CSV, 13485",
            Self::Samples => "Try with realistic sample data",
        }
    }

    /// Heading shown above the chat panel.
    #[must_use]
    pub fn heading(self) -> String {
        format!("{} Assistant", self.title())
    }
}

impl fmt::Display for DomainTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Returned when a slug names no known domain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown domain `{0}`")]
pub struct UnknownDomain(pub String);

impl FromStr for DomainTag {
    type Err = UnknownDomain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|d| d.slug() == wanted)
            .ok_or_else(|| UnknownDomain(s.to_string()))
    }
}
