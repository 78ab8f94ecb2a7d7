//! Validated scan target domain

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Dotted-label hostname: labels of 1-63 alphanumeric-or-hyphen characters,
/// no leading/trailing hyphen, final label alphabetic and at least 2 long.
static DOMAIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,}$")
        .expect("domain pattern is a valid regex")
});

/// A fully-qualified domain name that passed client-side validation.
///
/// A [`ScanRequest`](super::ScanRequest) can only be built from a `Domain`,
/// so malformed input is rejected before any request reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Domain(String);

impl Domain {
    /// Validate and wrap a domain string. Surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if DOMAIN_PATTERN.is_match(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(ValidationError::InvalidDomain(input.to_string()))
        }
    }

    /// Check a string without allocating a `Domain`.
    #[allow(dead_code)]
    pub fn is_valid(input: &str) -> bool {
        DOMAIN_PATTERN.is_match(input.trim())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Domain {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Domain {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Domain> for String {
    fn from(domain: Domain) -> Self {
        domain.0
    }
}
