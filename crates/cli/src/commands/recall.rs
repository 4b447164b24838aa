//! `daybrief recall` — Print a previously stored briefing.

use super::build_runtime;

pub async fn run(date: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = build_runtime().await?;

    // Without an argument, recall yesterday's briefing.
    let date = match date.as_deref() {
        Some(s) => chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| format!("Invalid date '{s}': {e}"))?,
        None => {
            let today = chrono::Local::now().date_naive();
            today.pred_opt().unwrap_or(today)
        }
    };

    match runtime.assistant.previous_briefing(date).await? {
        Some(briefing) => {
            println!("{briefing}");
        }
        None => {
            println!("No briefing stored for {date}.");
        }
    }

    Ok(())
}
