//! `daybrief chat` — Interactive assistant session.
//!
//! Opens with the morning briefing, then loops on stdin. Ctrl+C or an
//! exit word ends the session; an interrupt during a completion abandons
//! the in-flight request. Nothing has been written to the store at that
//! point, so dropping the future is safe.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};

use super::build_runtime;

const EXIT_WORDS: [&str; 3] = ["exit", "quit", "bye"];

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let runtime = build_runtime().await?;
    let today = chrono::Local::now().date_naive();

    println!();
    println!("  daybrief — your personal assistant");
    println!();
    println!("  Model:    {}", runtime.config.llm.model);
    println!("  Location: {}", runtime.config.location);
    println!();

    eprintln!("  Generating your morning briefing...");
    match runtime.flow.run(today, &runtime.config.location).await {
        Ok(briefing) => {
            println!();
            println!("{briefing}");
            println!();
        }
        Err(e) => {
            eprintln!("  [Error] Briefing failed: {e}");
            println!();
        }
    }

    println!("  Type your message and press Enter.");
    println!("  Type 'exit' or Ctrl+C to quit.");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("  You > ");
        std::io::stdout().flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => break,
        };

        let input = match line {
            Some(line) => line.trim().to_string(),
            None => break,
        };

        if input.is_empty() {
            continue;
        }
        if EXIT_WORDS.contains(&input.to_lowercase().as_str()) {
            break;
        }

        eprint!("  ...");
        let response = tokio::select! {
            response = runtime.assistant.respond(today, &input) => response,
            _ = tokio::signal::ctrl_c() => {
                eprint!("\r     \r");
                eprintln!("  [Interrupted]");
                break;
            }
        };
        eprint!("\r     \r");

        match response {
            Ok(reply) => {
                println!();
                for line in reply.lines() {
                    println!("  Assistant > {line}");
                }
                println!();
            }
            Err(e) => {
                eprintln!("  [Error] {e}");
                println!();
            }
        }
    }

    println!();
    println!("  Goodbye! Have a great day!");
    Ok(())
}
