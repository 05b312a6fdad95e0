use super::context::AppContext;
use crate::output::Output;
use color_eyre::Result;
use dialoguer::Input;
use owo_colors::OwoColorize;
use reelify_core::respond;
use serde_json::json;
use std::time::Duration;

const EXIT_WORDS: [&str; 3] = ["exit", "quit", "q"];

/// Answer a single message, or chat interactively when none is given
pub async fn run_chat(ctx: &AppContext, message: Option<String>, output: &Output) -> Result<()> {
    let delay = Duration::from_millis(ctx.config.chat.reply_delay_ms);

    if let Some(message) = message {
        reply(&message, delay, output).await;
        return Ok(());
    }

    output.info(format!(
        "{} Tell me what you're in the mood for ('exit' to leave).",
        "🎬".bold()
    ));

    loop {
        let line = match Input::<String>::new()
            .with_prompt("You")
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => line,
            Err(e) => {
                tracing::debug!(error = %e, "Chat input closed");
                break;
            }
        };

        if EXIT_WORDS.contains(&line.trim().to_lowercase().as_str()) {
            break;
        }
        reply(&line, delay, output).await;
    }
    Ok(())
}

async fn reply(message: &str, delay: Duration, output: &Output) {
    let Some(answer) = respond(message) else {
        return;
    };

    tokio::time::sleep(delay).await;
    output.render(
        || format!("{} {}", "Reelify:".cyan().bold(), answer),
        &json!({ "message": message.trim(), "reply": answer }),
    );
}
