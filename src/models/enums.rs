use crate::error::TrackerError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = TrackerError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(TrackerError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Gender {
    Male => "male",
    Female => "female",
    Other => "other",
});

str_enum!(DoseStatus {
    Taken => "taken",
    Missed => "missed",
});

str_enum!(AdherenceTier {
    Excellent => "excellent",
    Good => "good",
    NeedsAttention => "needs_attention",
});

str_enum!(TrendDirection {
    Up => "up",
    Down => "down",
    Flat => "flat",
});

str_enum!(AdherenceSource {
    Derived => "derived",
    Stored => "stored",
});

str_enum!(ContactValidation {
    Accept => "accept",
    Strict => "strict",
});

impl Gender {
    /// Case-insensitive match against the form's select values.
    pub fn parse_loose(raw: &str) -> Option<Self> {
        raw.trim().to_ascii_lowercase().parse().ok()
    }
}

impl AdherenceTier {
    /// Human label shown on the report badge.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::NeedsAttention => "Needs Attention",
        }
    }

    /// Badge variant used by the dashboard front-end.
    pub fn badge(&self) -> &'static str {
        match self {
            Self::Excellent => "default",
            Self::Good => "secondary",
            Self::NeedsAttention => "destructive",
        }
    }
}
