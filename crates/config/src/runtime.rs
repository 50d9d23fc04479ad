//! Per-call runtime configuration
//!
//! A `RuntimeConfig` describes who the agent is, what it may say about the
//! company and where calls may be transferred. It is loaded once per call and
//! never mutated afterwards; components share it behind an `Arc`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::constants::voice;

/// Complete runtime configuration snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeConfig {
    pub identity: AgentIdentity,
    pub company: CompanyProfile,
    pub scopes: KnowledgeScopes,
    pub telephony_profiles: Vec<TelephonyProfile>,
    pub safety: SafetyLimits,
}

impl RuntimeConfig {
    /// Built-in defaults
    pub fn defaults() -> Self {
        Self::default()
    }

    /// Whether any profile has a destination that could be asked for by
    /// number, name or department.
    ///
    /// Instruction assembly and the action registry both use this, so the
    /// spoken transfer claim and the transfer action always agree.
    pub fn has_transfer_destinations(&self) -> bool {
        self.telephony_profiles
            .iter()
            .flat_map(|profile| profile.destinations.iter())
            .any(Destination::is_addressable)
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            identity: AgentIdentity::default(),
            company: CompanyProfile::default(),
            scopes: KnowledgeScopes::default(),
            telephony_profiles: default_telephony_profiles(),
            safety: SafetyLimits::default(),
        }
    }
}

/// Who the agent is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentIdentity {
    pub agent_name: String,
    /// ISO 639-1 code
    pub default_language: String,
    pub voice: String,
}

impl Default for AgentIdentity {
    fn default() -> Self {
        Self {
            agent_name: "Receptionist".to_string(),
            default_language: voice::DEFAULT_LANGUAGE.to_string(),
            voice: voice::DEFAULT_VOICE_ID.to_string(),
        }
    }
}

/// Public facts about the company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub company_name: String,
    pub company_description: String,
    pub company_services: Vec<String>,
    pub locations: Vec<Location>,
    pub business_hours: BusinessHours,
    /// ISO dates
    pub holiday_dates: Vec<String>,
}

impl Default for CompanyProfile {
    fn default() -> Self {
        Self {
            company_name: "The Company".to_string(),
            company_description: "We provide outstanding customer support. If you need specific help, let me know and I will route you to the right team.".to_string(),
            company_services: vec![
                "Customer Support".to_string(),
                "Consulting".to_string(),
                "Onboarding".to_string(),
            ],
            locations: vec![
                Location {
                    name: "Headquarters".to_string(),
                    address: "123 Market Street, Suite 500, San Francisco, CA".to_string(),
                    phone: Some("+1 202-555-0100".to_string()),
                },
                Location {
                    name: "European Office".to_string(),
                    address: "45 High Street, London, UK".to_string(),
                    phone: None,
                },
            ],
            business_hours: [
                ("monday", "09:00-18:00"),
                ("tuesday", "09:00-18:00"),
                ("wednesday", "09:00-18:00"),
                ("thursday", "09:00-18:00"),
                ("friday", "09:00-17:00"),
                ("saturday", "Closed"),
                ("sunday", "Closed"),
            ]
            .into_iter()
            .collect(),
            holiday_dates: vec!["2025-01-01".to_string(), "2025-12-25".to_string()],
        }
    }
}

/// Physical location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Day → schedule mapping that keeps the configured day order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BusinessHours(IndexMap<String, String>);

impl BusinessHours {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the schedule for a day. An existing day keeps its position.
    pub fn insert(&mut self, day: impl Into<String>, schedule: impl Into<String>) {
        self.0.insert(day.into(), schedule.into());
    }

    pub fn get(&self, day: &str) -> Option<&str> {
        self.0.get(day).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(d, s)| (d.as_str(), s.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<D: Into<String>, S: Into<String>> FromIterator<(D, S)> for BusinessHours {
    fn from_iter<I: IntoIterator<Item = (D, S)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(day, schedule)| (day.into(), schedule.into()))
                .collect(),
        )
    }
}

/// Independent toggles gating which company facts may be disclosed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeScopes {
    pub company_overview: bool,
    pub services: bool,
    pub locations: bool,
    pub business_hours: bool,
    pub knowledge_base: bool,
    pub faq: bool,
}

impl Default for KnowledgeScopes {
    fn default() -> Self {
        Self {
            company_overview: true,
            services: true,
            locations: true,
            business_hours: true,
            knowledge_base: true,
            faq: true,
        }
    }
}

/// How the agent hands the caller over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferPreference {
    #[default]
    Announced,
    Blind,
}

/// Routing configuration for one inbound number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelephonyProfile {
    pub label: String,
    pub e164: String,
    #[serde(default)]
    pub transfer_preference: TransferPreference,
    /// Transport identifiers in preference order (sip, pstn, voip, ...)
    #[serde(default)]
    pub transfer_methods: Vec<String>,
    /// Candidate destinations in priority order
    #[serde(default)]
    pub destinations: Vec<Destination>,
}

impl TelephonyProfile {
    /// First destination that carries a dialable number
    pub fn first_dialable(&self) -> Option<&Destination> {
        self.destinations.iter().find(|d| d.dialable_number().is_some())
    }
}

/// Routable target inside a profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Destination {
    /// Trimmed number, if one is configured
    pub fn dialable_number(&self) -> Option<&str> {
        non_blank(&self.number)
    }

    pub fn name(&self) -> Option<&str> {
        non_blank(&self.name)
    }

    pub fn department(&self) -> Option<&str> {
        non_blank(&self.department)
    }

    /// Can be referred to by number, name or department
    pub fn is_addressable(&self) -> bool {
        self.dialable_number().is_some() || self.name().is_some() || self.department().is_some()
    }
}

/// Conversation guard rails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyLimits {
    pub max_turns_total: u32,
    pub max_consecutive_failures: u32,
    pub silence_timeout_ms: u64,
}

impl Default for SafetyLimits {
    fn default() -> Self {
        Self {
            max_turns_total: 30,
            max_consecutive_failures: 3,
            silence_timeout_ms: 12_000,
        }
    }
}

/// Trimmed value, treating blank strings as absent
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn default_telephony_profiles() -> Vec<TelephonyProfile> {
    vec![
        TelephonyProfile {
            label: "Main Reception".to_string(),
            e164: "+12025550100".to_string(),
            transfer_preference: TransferPreference::Announced,
            transfer_methods: vec!["sip".to_string(), "pstn".to_string()],
            destinations: vec![
                Destination {
                    number: Some("365".to_string()),
                    name: Some("Mark Spencer".to_string()),
                    department: Some("Sales".to_string()),
                    description: Some("Direct sales representative".to_string()),
                },
                Destination {
                    number: Some("312".to_string()),
                    name: Some("Luke Harris".to_string()),
                    department: Some("Support".to_string()),
                    description: Some("Tier 2 support specialist".to_string()),
                },
                Destination {
                    department: Some("Billing".to_string()),
                    description: Some("Billing escalation queue".to_string()),
                    ..Default::default()
                },
            ],
        },
        TelephonyProfile {
            label: "After Hours".to_string(),
            e164: "+12025550999".to_string(),
            transfer_preference: TransferPreference::Blind,
            transfer_methods: vec!["sip".to_string()],
            destinations: vec![Destination {
                department: Some("On Call Engineer".to_string()),
                description: Some("Escalate urgent incidents".to_string()),
                ..Default::default()
            }],
        },
    ]
}
