//! The daybrief agent: context assembly, prompt selection, todo
//! extraction, and the morning briefing flow.
//!
//! Everything here is pure orchestration over the traits in
//! `daybrief-core`. Provider handles and the store are injected at
//! construction; the agent holds no global state and owns no I/O clients
//! of its own.

pub mod briefing;
pub mod context;
pub mod extract;
pub mod intent;

pub use briefing::{Assistant, BriefingFlow};
pub use context::{BriefingContext, ContextAssembler};
pub use extract::TodoExtractor;
pub use intent::{classify, render, Intent};
