//! Instruction assembly
//!
//! Pure functions of the runtime config. Scope flags decide which company
//! facts may appear at all; a disabled scope leaves no trace in the output.

use phone_agent_config::{CompanyProfile, Location, RuntimeConfig};

const BASE_DIRECTIVES: &[&str] = &[
    "You are a professional phone receptionist. Keep every reply short and polite, and phrase it for being spoken aloud.",
    "Use the available tools when they help the caller. Never invent facts you were not given.",
];

const KNOWLEDGE_DISABLED: &str = "Knowledge base access is disabled for this call. Answer only from the configured details above, and say so when you do not know something.";
const KNOWLEDGE_ENABLED: &str = "After each caller turn you may receive additional context retrieved from the knowledge base. Use it when it is relevant and ignore it otherwise.";

const TRANSFER_UNAVAILABLE: &str = "Call transfers are not available. If the caller asks for a person or a department, offer to take a message instead.";
const TRANSFER_AVAILABLE: &str = "Call transfers are available. When the caller asks for a person, a department or a number, use the transfer_call tool.";

/// Full instruction text for the conversational engine
pub fn build_instructions(config: &RuntimeConfig) -> String {
    let mut lines: Vec<String> = BASE_DIRECTIVES.iter().map(|s| s.to_string()).collect();

    lines.extend(company_summary(config));

    lines.push(
        if config.scopes.knowledge_base {
            KNOWLEDGE_ENABLED
        } else {
            KNOWLEDGE_DISABLED
        }
        .to_string(),
    );

    lines.push(
        if config.has_transfer_destinations() {
            TRANSFER_AVAILABLE
        } else {
            TRANSFER_UNAVAILABLE
        }
        .to_string(),
    );

    lines
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Instructions for the opening line of the call
pub fn greeting_instructions(config: &RuntimeConfig) -> String {
    match company_name(config) {
        Some(name) => format!(
            "Greet the caller on behalf of {} and offer assistance.",
            name
        ),
        None => "Greet the caller and offer assistance.".to_string(),
    }
}

/// Company name, only when the overview scope allows it
fn company_name(config: &RuntimeConfig) -> Option<&str> {
    if !config.scopes.company_overview {
        return None;
    }
    non_blank(&config.company.company_name)
}

fn company_summary(config: &RuntimeConfig) -> Vec<String> {
    let scopes = &config.scopes;
    let company = &config.company;
    let mut lines = Vec::new();

    lines.push(match non_blank(&config.identity.agent_name) {
        Some(name) => format!("You are {}, the virtual receptionist answering this line.", name),
        None => "You are the virtual receptionist answering this line.".to_string(),
    });

    if scopes.company_overview {
        if let Some(name) = non_blank(&company.company_name) {
            lines.push(format!("You represent {}.", name));
        }
        if let Some(description) = non_blank(&company.company_description) {
            lines.push(format!("About the company: {}", description));
        }
    }

    if scopes.services {
        let services: Vec<&str> = company
            .company_services
            .iter()
            .filter_map(|s| non_blank(s))
            .collect();
        if !services.is_empty() {
            lines.push(format!("Services offered: {}.", services.join(", ")));
        }
    }

    if scopes.locations {
        let entries: Vec<String> = company
            .locations
            .iter()
            .map(location_entry)
            .filter(|entry| !entry.is_empty())
            .collect();
        if !entries.is_empty() {
            lines.push(format!("You can share these locations: {}.", entries.join("; ")));
        }
    }

    if scopes.business_hours {
        lines.extend(hours_lines(company));
    }

    lines
}

fn location_entry(location: &Location) -> String {
    [
        non_blank(&location.name),
        non_blank(&location.address),
        location.phone.as_deref().and_then(non_blank),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" — ")
}

fn hours_lines(company: &CompanyProfile) -> Vec<String> {
    let mut lines = Vec::new();

    let days: Vec<String> = company
        .business_hours
        .iter()
        .map(|(day, schedule)| format!("{}: {}", day, schedule))
        .collect();
    if !days.is_empty() {
        lines.push(format!("Business hours: {}.", days.join("; ")));
    }

    let holidays: Vec<&str> = company
        .holiday_dates
        .iter()
        .filter_map(|d| non_blank(d))
        .collect();
    if !holidays.is_empty() {
        lines.push(format!(
            "The office is closed on these holidays: {}.",
            holidays.join(", ")
        ));
    }

    lines
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
