//! Broken-link reporting policy.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ConfigError;

/// What to do when a link does not resolve to a content page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkPolicy {
    /// Fail the build
    Throw,
    /// Emit a warning and continue
    Warn,
    /// Emit an informational message and continue
    Log,
    /// Say nothing
    Ignore,
}

impl LinkPolicy {
    /// Every recognized spelling, in severity order.
    pub const VALUES: [&'static str; 4] = ["throw", "warn", "log", "ignore"];

    /// The configuration spelling of this policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Throw => "throw",
            Self::Warn => "warn",
            Self::Log => "log",
            Self::Ignore => "ignore",
        }
    }

    /// Whether an offending link must abort the build.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Throw)
    }

    /// Parse an optional policy value for `field`, falling back to `default`.
    pub(crate) fn from_field(
        field: &str,
        value: Option<&str>,
        default: Self,
    ) -> Result<Self, ConfigError> {
        match value {
            None => Ok(default),
            Some(v) => v.parse().map_err(|UnknownPolicy(value)| ConfigError::InvalidPolicy {
                field: field.to_string(),
                value,
            }),
        }
    }
}

impl fmt::Display for LinkPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A policy string that is not one of [`LinkPolicy::VALUES`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown link policy '{0}'")]
pub struct UnknownPolicy(pub String);

impl FromStr for LinkPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "throw" => Ok(Self::Throw),
            "warn" => Ok(Self::Warn),
            "log" => Ok(Self::Log),
            "ignore" => Ok(Self::Ignore),
            other => Err(UnknownPolicy(other.to_string())),
        }
    }
}
