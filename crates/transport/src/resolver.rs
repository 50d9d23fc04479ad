//! Transfer resolution
//!
//! Pure mapping from a transfer request to a dialable address. Resolution
//! order:
//! 1. first destination (profiles, then destinations, in list order) that
//!    matches by exact number or case-insensitive name/department and has a
//!    number; a match without a number keeps scanning
//! 2. the requested number itself
//! 3. the first dialable destination of the first profile
//! 4. nothing

use serde::{Deserialize, Serialize};

use phone_agent_config::constants::transfer::ADDRESS_SCHEME;
use phone_agent_config::{Destination, TelephonyProfile};

/// Caller-supplied transfer request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferTarget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl TransferTarget {
    pub fn by_number(number: impl Into<String>) -> Self {
        Self {
            number: Some(number.into()),
            ..Default::default()
        }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn by_department(department: impl Into<String>) -> Self {
        Self {
            department: Some(department.into()),
            ..Default::default()
        }
    }

    fn number(&self) -> Option<&str> {
        non_blank(self.number.as_deref())
    }

    fn name(&self) -> Option<&str> {
        non_blank(self.name.as_deref())
    }

    fn department(&self) -> Option<&str> {
        non_blank(self.department.as_deref())
    }

    fn matches(&self, destination: &Destination) -> bool {
        let number_match = self
            .number()
            .is_some_and(|n| destination.dialable_number() == Some(n));
        let name_match = self
            .name()
            .is_some_and(|n| destination.name().is_some_and(|d| same_text(d, n)));
        let department_match = self
            .department()
            .is_some_and(|n| destination.department().is_some_and(|d| same_text(d, n)));

        number_match || name_match || department_match
    }
}

fn same_text(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn address(number: &str) -> String {
    format!("{}{}", ADDRESS_SCHEME, number)
}

/// Resolve a transfer request to a `tel:` address
pub fn resolve_destination(target: &TransferTarget, profiles: &[TelephonyProfile]) -> Option<String> {
    let matched = profiles
        .iter()
        .flat_map(|profile| profile.destinations.iter())
        .filter(|destination| target.matches(destination))
        .find_map(Destination::dialable_number);

    if let Some(number) = matched {
        return Some(address(number));
    }

    if let Some(number) = target.number() {
        return Some(address(number));
    }

    profiles
        .first()
        .and_then(TelephonyProfile::first_dialable)
        .and_then(Destination::dialable_number)
        .map(address)
}
