//! The `wkquiz init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("wkquiz.toml").exists() {
        println!("wkquiz.toml already exists, skipping.");
    } else {
        std::fs::write("wkquiz.toml", SAMPLE_CONFIG)?;
        println!("Created wkquiz.toml");
    }

    println!("\nNext steps:");
    println!("  1. Put your WaniKani API token in wkquiz.toml (or export WKQUIZ_API_TOKEN)");
    println!("  2. Run: wkquiz");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# wkquiz configuration

# Personal access token from https://www.wanikani.com/settings/personal_access_tokens
api_token = "${WANIKANI_API_TOKEN}"

# Typing this at any quiz prompt ends the session.
stop_word = "!stop"

# Which endpoint decides that a subject has been reviewed:
# "review_statistics" or "reviews".
review_source = "review_statistics"

timeout_secs = 30
"#;
