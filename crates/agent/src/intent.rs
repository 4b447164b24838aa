//! Intent classification and prompt rendering.
//!
//! Classification is a fixed rule list evaluated in order, first match
//! wins: exact help phrases, then weather keywords, then general. This is
//! deliberately not an NLU layer.
//!
//! Templates are plain text with `{placeholder}` slots filled from the
//! assembled context. An unknown placeholder is a configuration defect
//! and surfaces as a `TemplateError`; the built-in templates only use
//! names the context always supplies.

use std::sync::OnceLock;

use daybrief_core::error::TemplateError;
use regex::Regex;

use crate::context::BriefingContext;

/// System message sent with every completion request.
pub const SYSTEM_PROMPT: &str = "You are a helpful personal assistant.";

/// Inputs that trigger the capability explanation, matched exactly after
/// lowercasing.
const HELP_PHRASES: [&str; 4] = [
    "what can you do",
    "help",
    "capabilities",
    "what are your tools",
];

const WEATHER_KEYWORDS: [&str; 3] = ["weather", "temperature", "forecast"];

fn location_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // "what's the weather in San Francisco?" -> "San Francisco"
        Regex::new(r"(?:in|at|for)\s+([A-Za-z\s]+)(?:\?|$)").unwrap()
    })
}

/// What the user is asking for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// The scheduled daily summary. Never produced by `classify`; callers
    /// select it explicitly.
    MorningBriefing,
    /// "what can you do" and friends.
    Capability,
    /// A weather question, with the location mentioned in it, if any.
    Weather { location: Option<String> },
    /// Everything else.
    General,
}

impl Intent {
    /// The prompt template for this intent.
    pub fn template(&self) -> &'static str {
        match self {
            Intent::MorningBriefing => MORNING_BRIEFING_TEMPLATE,
            Intent::Capability => CAPABILITY_TEMPLATE,
            Intent::Weather { .. } => WEATHER_TEMPLATE,
            Intent::General => GENERAL_TEMPLATE,
        }
    }
}

/// Classify user input. First matching rule wins.
pub fn classify(input: &str) -> Intent {
    let lowered = input.trim().to_lowercase();

    if HELP_PHRASES.contains(&lowered.as_str()) {
        return Intent::Capability;
    }

    if WEATHER_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        let location = location_pattern()
            .captures(input)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|loc| !loc.is_empty());
        return Intent::Weather { location };
    }

    Intent::General
}

/// Fill `{placeholder}` slots in a template from the context.
pub fn render(template: &str, context: &BriefingContext) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut offset = 0;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];
        let close = after_open
            .find('}')
            .ok_or(TemplateError::UnclosedPlaceholder(offset + open))?;
        let name = &after_open[..close];
        let value = context
            .value_of(name)
            .ok_or_else(|| TemplateError::UnknownPlaceholder(name.to_string()))?;
        out.push_str(&value);
        offset += open + 1 + close + 1;
        rest = &after_open[close + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

pub const MORNING_BRIEFING_TEMPLATE: &str = "\
You are a helpful personal assistant generating a morning briefing.

Current Context:
- Today's date: {date}
- Weather: {weather}
- Calendar events today: {calendar_events}
- Notes from yesterday: {notes}
- Incomplete tasks: {todos}

Please provide a natural, concise briefing that:
1. Summarizes today's weather and how it might affect plans
2. Lists today's calendar events chronologically
3. Highlights key points from yesterday's notes
4. Reminds about any incomplete tasks
5. Suggests any necessary preparations or actions (mark these with TODO:)

Format the response in a clear, organized way using markdown headings.";

pub const CAPABILITY_TEMPLATE: &str = "\
You are a helpful personal assistant.

Available Capabilities:
{capabilities}

Please explain what you can do based on the available capabilities. Focus on:
1. Core features and operations available
2. Types of tasks you can help with
3. Specific commands or questions the user can ask

Format your response in a clear, organized way using markdown.";

pub const WEATHER_TEMPLATE: &str = "\
You are a helpful personal assistant.

Current weather:
{weather}

User Input: {user_input}

Answer the user's weather question using the report above. If the report
is unavailable or missing the detail they asked about, say so plainly
rather than guessing.";

pub const GENERAL_TEMPLATE: &str = "\
You are a helpful personal assistant.

Current Context:
- Date: {date}
- Weather: {weather}
- Calendar Events: {calendar_events}
- Notes: {notes}
- Todos: {todos}
- Available Capabilities: {capabilities}

User Input: {user_input}

Please analyze the user's request and respond appropriately:
1. For weather queries: Extract location if provided, else use current weather data
2. For calendar queries: Look up relevant events and suggest actions
3. For todo queries: Help manage tasks and suggest priorities
4. For other queries: Use available context to provide helpful responses

Format your response in a clear, conversational way.";

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use daybrief_core::capability::CapabilityMap;

    fn context() -> BriefingContext {
        BriefingContext {
            date: NaiveDate::from_ymd_opt(2025, 6, 22).unwrap(),
            weather: "sunny, 21°C".into(),
            calendar_events: Vec::new(),
            notes: Vec::new(),
            incomplete_todos: Vec::new(),
            capabilities: CapabilityMap::all_available(),
            user_input: Some("hello".into()),
        }
    }

    #[test]
    fn help_phrases_are_capability_intent() {
        assert_eq!(classify("help"), Intent::Capability);
        assert_eq!(classify("What can you do"), Intent::Capability);
        assert_eq!(classify("  capabilities  "), Intent::Capability);
    }

    #[test]
    fn help_phrase_must_match_exactly() {
        // A sentence merely containing "help" is not a capability query.
        assert_eq!(classify("help me plan my day"), Intent::General);
    }

    #[test]
    fn weather_keywords_trigger_weather_intent() {
        assert_eq!(classify("what's the weather"), Intent::Weather { location: None });
        assert_eq!(
            classify("current temperature please"),
            Intent::Weather { location: None }
        );
        assert_eq!(classify("any forecast?"), Intent::Weather { location: None });
    }

    #[test]
    fn location_extracted_from_weather_query() {
        assert_eq!(
            classify("what's the weather in San Francisco?"),
            Intent::Weather {
                location: Some("San Francisco".into())
            }
        );
        assert_eq!(
            classify("temperature for Delhi"),
            Intent::Weather {
                location: Some("Delhi".into())
            }
        );
    }

    #[test]
    fn capability_precedes_weather() {
        // "help" wins even though a longer sentence could mention weather;
        // exact phrases are checked first.
        assert_eq!(classify("help"), Intent::Capability);
    }

    #[test]
    fn everything_else_is_general() {
        assert_eq!(classify("remind me to call mom"), Intent::General);
        assert_eq!(classify(""), Intent::General);
    }

    #[test]
    fn render_substitutes_placeholders() {
        let rendered = render("On {date}: {weather}", &context()).unwrap();
        assert_eq!(rendered, "On 2025-06-22: sunny, 21°C");
    }

    #[test]
    fn render_unknown_placeholder_fails() {
        let err = render("{horoscope}", &context()).unwrap_err();
        assert!(matches!(err, TemplateError::UnknownPlaceholder(_)));
    }

    #[test]
    fn render_unclosed_placeholder_fails() {
        let err = render("hello {date", &context()).unwrap_err();
        assert!(matches!(err, TemplateError::UnclosedPlaceholder(6)));
    }

    #[test]
    fn builtin_templates_render_against_any_context() {
        let ctx = context();
        for intent in [
            Intent::MorningBriefing,
            Intent::Capability,
            Intent::Weather { location: None },
            Intent::General,
        ] {
            let rendered = render(intent.template(), &ctx).unwrap();
            assert!(!rendered.is_empty());
            assert!(!rendered.contains('{'));
        }
    }
}
