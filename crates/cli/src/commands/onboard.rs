//! `daybrief onboard` — First-time setup.

use daybrief_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");
    let data_dir = config_dir.join("data");

    println!("daybrief — First-Time Setup");
    println!("===========================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("Created config directory: {}", config_dir.display());
    } else {
        println!("Config directory exists: {}", config_dir.display());
    }

    if !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)?;
        println!("Created data directory: {}", data_dir.display());
    }

    if !config_path.exists() {
        std::fs::write(&config_path, AppConfig::default_toml())?;
        println!("Created default config: {}", config_path.display());
    } else {
        println!("Config file exists: {}", config_path.display());
    }

    println!();
    println!("Next steps:");
    println!("  1. Set DAYBRIEF_API_KEY (or add llm.api_key to the config)");
    println!("  2. Optionally set OPENWEATHER_API_KEY for live weather");
    println!("  3. Run `daybrief brief` for your first morning briefing");

    Ok(())
}
