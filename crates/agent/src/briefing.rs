//! The morning briefing flow and the interactive assistant.
//!
//! Both are linear orchestrations: assemble a context, render a prompt,
//! invoke the completion, persist what needs persisting. Provider and
//! completion failures degrade inside their own boundaries; the only
//! errors that escape here are store failures (fatal) and template
//! defects (configuration bugs).

use std::sync::Arc;

use chrono::NaiveDate;
use daybrief_core::completion::CompletionRequest;
use daybrief_core::error::Error;
use daybrief_core::store::TaskStore;
use daybrief_llm::CompletionInvoker;
use tracing::info;

use crate::context::ContextAssembler;
use crate::extract::TodoExtractor;
use crate::intent::{classify, render, Intent, SYSTEM_PROMPT};

/// Runs the daily briefing:
/// assemble, render, complete, store, extract todos, persist them.
///
/// Always reaches the end: provider failures degrade during assembly and
/// completion failures become the fallback reply, so the returned string
/// is never empty.
pub struct BriefingFlow {
    assembler: ContextAssembler,
    invoker: CompletionInvoker,
    store: Arc<dyn TaskStore>,
}

impl BriefingFlow {
    pub fn new(
        assembler: ContextAssembler,
        invoker: CompletionInvoker,
        store: Arc<dyn TaskStore>,
    ) -> Self {
        Self {
            assembler,
            invoker,
            store,
        }
    }

    pub async fn run(&self, date: NaiveDate, location: &str) -> Result<String, Error> {
        let context = self.assembler.assemble(date, location, None).await;
        let prompt = render(Intent::MorningBriefing.template(), &context)?;

        let briefing = self
            .invoker
            .invoke(CompletionRequest::new(SYSTEM_PROMPT, prompt))
            .await;

        self.store.store_briefing(date, &briefing).await?;

        let todos = TodoExtractor::extract(&briefing);
        let count = todos.len();
        for todo in todos {
            self.store.store_todo(date, &todo).await?;
        }

        info!(%date, todos = count, "Morning briefing stored");
        Ok(briefing)
    }
}

/// One interactive turn: classify the input, assemble a matching context,
/// and complete.
pub struct Assistant {
    assembler: ContextAssembler,
    invoker: CompletionInvoker,
    store: Arc<dyn TaskStore>,
    location: String,
}

impl Assistant {
    pub fn new(
        assembler: ContextAssembler,
        invoker: CompletionInvoker,
        store: Arc<dyn TaskStore>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            assembler,
            invoker,
            store,
            location: location.into(),
        }
    }

    /// Respond to user input.
    ///
    /// A weather question naming a location gets a fresh fetch for that
    /// location instead of the configured default.
    pub async fn respond(&self, date: NaiveDate, input: &str) -> Result<String, Error> {
        let intent = classify(input);

        let location = match &intent {
            Intent::Weather {
                location: Some(loc),
            } => loc.as_str(),
            _ => self.location.as_str(),
        };

        let context = self
            .assembler
            .assemble(date, location, Some(input.to_string()))
            .await;

        let prompt = render(intent.template(), &context)?;
        Ok(self
            .invoker
            .invoke(CompletionRequest::new(SYSTEM_PROMPT, prompt))
            .await)
    }

    /// A previously stored briefing, if one exists for the date.
    pub async fn previous_briefing(&self, date: NaiveDate) -> Result<Option<String>, Error> {
        Ok(self.store.get_briefing(date).await?)
    }
}
