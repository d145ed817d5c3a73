//! Stance value object

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Argumentative framing applied to one model consultation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Stance {
    /// Argue in favour of the proposal
    For,
    /// Argue against the proposal
    Against,
    /// Weigh both sides
    #[default]
    Neutral,
    /// Caller-defined label (e.g. "security-reviewer")
    Custom(String),
}

impl Stance {
    pub fn as_str(&self) -> &str {
        match self {
            Stance::For => "for",
            Stance::Against => "against",
            Stance::Neutral => "neutral",
            Stance::Custom(label) => label,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Stance::Custom(_))
    }
}

impl std::fmt::Display for Stance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Stance {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Stance::from(s))
    }
}

impl From<&str> for Stance {
    fn from(value: &str) -> Self {
        let trimmed = value.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "for" | "support" | "favor" => Stance::For,
            "against" | "oppose" | "critical" => Stance::Against,
            "neutral" | "" => Stance::Neutral,
            _ => Stance::Custom(trimmed.to_string()),
        }
    }
}

impl Serialize for Stance {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Stance {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Stance::from(s.as_str()))
    }
}
