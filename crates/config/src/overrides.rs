//! Typed overrides and the total merge onto defaults
//!
//! Every field is optional. `RuntimeConfig::merge` applies an override set to
//! a base config and always yields a complete config; it reads nothing but
//! its two arguments.
//!
//! Merge rules:
//! - scalars take the override when present
//! - `identity`, `scopes` and `safety` merge field by field
//! - company list/map fields (`companyServices`, `locations`,
//!   `businessHours`, `holidayDates`) are replaced wholesale
//! - `telephonyProfiles` is replaced wholesale

use serde::{Deserialize, Serialize};

use crate::runtime::{BusinessHours, Location, RuntimeConfig, TelephonyProfile};

/// Partial runtime configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuntimeConfigOverrides {
    pub identity: IdentityOverrides,
    pub company: CompanyOverrides,
    pub scopes: ScopeOverrides,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephony_profiles: Option<Vec<TelephonyProfile>>,
    pub safety: SafetyOverrides,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdentityOverrides {
    pub agent_name: Option<String>,
    pub default_language: Option<String>,
    pub voice: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyOverrides {
    pub company_name: Option<String>,
    pub company_description: Option<String>,
    pub company_services: Option<Vec<String>>,
    pub locations: Option<Vec<Location>>,
    pub business_hours: Option<BusinessHours>,
    pub holiday_dates: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScopeOverrides {
    pub company_overview: Option<bool>,
    pub services: Option<bool>,
    pub locations: Option<bool>,
    pub business_hours: Option<bool>,
    pub knowledge_base: Option<bool>,
    pub faq: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SafetyOverrides {
    pub max_turns_total: Option<u32>,
    pub max_consecutive_failures: Option<u32>,
    pub silence_timeout_ms: Option<u64>,
}

fn apply<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

impl RuntimeConfig {
    /// Apply overrides to this config
    pub fn merge(mut self, overrides: RuntimeConfigOverrides) -> Self {
        let RuntimeConfigOverrides {
            identity,
            company,
            scopes,
            telephony_profiles,
            safety,
        } = overrides;

        apply(&mut self.identity.agent_name, identity.agent_name);
        apply(&mut self.identity.default_language, identity.default_language);
        apply(&mut self.identity.voice, identity.voice);

        apply(&mut self.company.company_name, company.company_name);
        apply(&mut self.company.company_description, company.company_description);
        apply(&mut self.company.company_services, company.company_services);
        apply(&mut self.company.locations, company.locations);
        apply(&mut self.company.business_hours, company.business_hours);
        apply(&mut self.company.holiday_dates, company.holiday_dates);

        apply(&mut self.scopes.company_overview, scopes.company_overview);
        apply(&mut self.scopes.services, scopes.services);
        apply(&mut self.scopes.locations, scopes.locations);
        apply(&mut self.scopes.business_hours, scopes.business_hours);
        apply(&mut self.scopes.knowledge_base, scopes.knowledge_base);
        apply(&mut self.scopes.faq, scopes.faq);

        apply(&mut self.telephony_profiles, telephony_profiles);

        apply(&mut self.safety.max_turns_total, safety.max_turns_total);
        apply(&mut self.safety.max_consecutive_failures, safety.max_consecutive_failures);
        apply(&mut self.safety.silence_timeout_ms, safety.silence_timeout_ms);

        self
    }

    /// Built-in defaults with overrides applied
    pub fn from_overrides(overrides: RuntimeConfigOverrides) -> Self {
        Self::defaults().merge(overrides)
    }
}
