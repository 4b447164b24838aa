//! CLI command implementations.

pub mod brief;
pub mod chat;
pub mod onboard;
pub mod recall;
pub mod todo;

use std::sync::Arc;

use daybrief_agent::{Assistant, BriefingFlow, ContextAssembler};
use daybrief_config::AppConfig;
use daybrief_core::provider::{CalendarProvider, NotesProvider, WeatherProvider};
use daybrief_core::store::TaskStore;
use daybrief_llm::{CompletionInvoker, OpenAiCompatClient};
use daybrief_providers::{
    HttpCalendarProvider, HttpNotesProvider, InMemoryCalendar, InMemoryNotes, OpenWeatherProvider,
    StaticWeather,
};
use daybrief_store::SqliteTaskStore;

/// The wired-up system: config, store, and the two orchestrators.
pub struct Runtime {
    pub config: AppConfig,
    pub store: Arc<SqliteTaskStore>,
    pub flow: BriefingFlow,
    pub assistant: Assistant,
}

/// Build the runtime from configuration.
///
/// Providers without configured endpoints fall back to in-memory
/// implementations: calendar and notes become empty local stores, weather
/// becomes a permanently-failing handle so the capability map reports it
/// honestly.
pub async fn build_runtime() -> Result<Runtime, Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if config.llm.api_key.is_none() {
        eprintln!();
        eprintln!("  ERROR: No LLM API key configured!");
        eprintln!();
        eprintln!("  Set the environment variable:");
        eprintln!("    DAYBRIEF_API_KEY=gsk_...");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!(
            "    {}",
            AppConfig::config_dir().join("config.toml").display()
        );
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    let db_path = config.store_path();
    if let Some(parent) = std::path::Path::new(&db_path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let store = Arc::new(SqliteTaskStore::new(&format!("sqlite://{db_path}")).await?);

    let calendar: Arc<dyn CalendarProvider> = match &config.calendar.base_url {
        Some(url) => Arc::new(HttpCalendarProvider::new(
            url.clone(),
            config.calendar.token.clone(),
        )?),
        None => Arc::new(InMemoryCalendar::new()),
    };

    let notes: Arc<dyn NotesProvider> = match &config.notes.base_url {
        Some(url) => Arc::new(HttpNotesProvider::new(
            url.clone(),
            config.notes.token.clone(),
        )?),
        None => Arc::new(InMemoryNotes::new()),
    };

    let weather: Arc<dyn WeatherProvider> = match &config.weather.api_key {
        Some(key) => Arc::new(OpenWeatherProvider::new(
            config.weather.base_url.clone(),
            key.clone(),
            config.weather.units.clone(),
        )?),
        None => {
            let offline = StaticWeather::clear_skies(&config.location);
            offline.set_failing("no weather API key configured");
            Arc::new(offline)
        }
    };

    let api_key = config.llm.api_key.clone().unwrap_or_default();
    let client = OpenAiCompatClient::new(
        "llm",
        config.llm.base_url.clone(),
        api_key,
        config.llm.model.clone(),
    )?;

    let task_store: Arc<dyn TaskStore> = store.clone();

    let flow = BriefingFlow::new(
        ContextAssembler::new(
            calendar.clone(),
            notes.clone(),
            weather.clone(),
            task_store.clone(),
        ),
        CompletionInvoker::new(Arc::new(client)),
        task_store.clone(),
    );

    // The assistant gets its own assembler and client over the same handles.
    let client = OpenAiCompatClient::new(
        "llm",
        config.llm.base_url.clone(),
        config.llm.api_key.clone().unwrap_or_default(),
        config.llm.model.clone(),
    )?;
    let assistant = Assistant::new(
        ContextAssembler::new(calendar, notes, weather, task_store.clone()),
        CompletionInvoker::new(Arc::new(client)),
        task_store,
        config.location.clone(),
    );

    Ok(Runtime {
        config,
        store,
        flow,
        assistant,
    })
}

/// Parse a `YYYY-MM-DD` argument, defaulting to today.
pub fn parse_date(arg: Option<&str>) -> Result<chrono::NaiveDate, Box<dyn std::error::Error>> {
    match arg {
        Some(s) => Ok(chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| format!("Invalid date '{s}': {e}"))?),
        None => Ok(chrono::Local::now().date_naive()),
    }
}
