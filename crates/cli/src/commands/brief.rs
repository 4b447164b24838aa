//! `daybrief brief` — Generate and print today's morning briefing.

use super::build_runtime;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let runtime = build_runtime().await?;
    let today = chrono::Local::now().date_naive();

    eprintln!("Generating your morning briefing...");
    let briefing = runtime
        .flow
        .run(today, &runtime.config.location)
        .await
        .map_err(|e| format!("Briefing failed: {e}"))?;

    println!();
    println!("{briefing}");
    Ok(())
}
