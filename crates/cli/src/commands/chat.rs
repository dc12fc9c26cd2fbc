//! `taskchat chat` — Interactive or single-message chat mode.

use std::sync::Arc;

use taskchat_assistant::{AssistantGateway, ChatSession};
use taskchat_channels::CliChannel;
use taskchat_config::AppConfig;
use taskchat_core::channel::Channel;
use taskchat_core::task::Task;

pub async fn run(message: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Check for API key early — give a clear error before any network call
    if !config.has_api_key() {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    GEMINI_API_KEY    (recommended)");
        eprintln!("    GOOGLE_API_KEY");
        eprintln!("    TASKCHAT_API_KEY");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        eprintln!("  Get a Gemini key at: https://aistudio.google.com/apikey");
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    // Build provider from config
    let router = taskchat_providers::router::build_from_config(&config);
    let provider = router.default_provider().ok_or_else(|| {
        taskchat_core::ProviderError::NotConfigured(config.default_provider.clone())
    })?;

    let model = config
        .providers
        .get(&config.default_provider)
        .and_then(|p| p.default_model.clone())
        .unwrap_or_else(|| config.default_model.clone());

    let gateway = AssistantGateway::new(provider, &model, config.default_temperature)
        .with_max_output_tokens(config.default_max_tokens);

    let mut session = ChatSession::new();

    if let Some(msg) = message {
        // Single message mode
        eprint!("  Thinking...");
        let outcome = session.submit(&gateway, &msg).await?;
        eprint!("\r              \r");
        println!("{}", outcome.reply);
        if let Some(task) = outcome.new_task {
            println!("[task] {task}");
        }
    } else {
        // Interactive mode
        println!();
        println!("  TaskChat — Interactive Mode");
        println!("  ---------------------------");
        println!();
        println!("  Provider:  {}", config.default_provider);
        println!("  Model:     {model}");
        println!();
        println!("  Type your message and press Enter.");
        println!("  Type '/tasks' to list extracted tasks.");
        println!("  Type 'exit' or Ctrl+C to quit.");
        println!();

        let channel = CliChannel::new();
        let mut rx = channel
            .start()
            .await
            .map_err(|e| format!("Channel error: {e}"))?;

        print!("  You > ");
        use std::io::Write;
        std::io::stdout().flush()?;

        while let Some(result) = rx.recv().await {
            match result {
                Ok(chan_msg) => {
                    if chan_msg.content == "/tasks" {
                        print_tasks(session.tasks());
                    } else {
                        eprint!("  ...");

                        match session.submit(&gateway, &chan_msg.content).await {
                            Ok(outcome) => {
                                eprint!("\r     \r");
                                let mut rendered = String::from("\n");
                                for line in outcome.reply.lines() {
                                    rendered.push_str("  Assistant > ");
                                    rendered.push_str(line);
                                    rendered.push('\n');
                                }
                                if let Some(task) = outcome.new_task {
                                    rendered.push_str(&format!("  [task] {task}\n"));
                                }
                                channel
                                    .send(&chan_msg.chat_id, &rendered)
                                    .await
                                    .map_err(|e| format!("Channel error: {e}"))?;
                            }
                            Err(e) => {
                                eprint!("\r     \r");
                                eprintln!("  [Error] {e}");
                                println!();
                            }
                        }
                    }

                    print!("  You > ");
                    std::io::stdout().flush()?;
                }
                Err(e) => {
                    eprintln!("  [Channel Error] {e}");
                    break;
                }
            }
        }

        channel
            .stop()
            .await
            .map_err(|e| format!("Channel error: {e}"))?;

        println!();
        if !session.tasks().is_empty() {
            print_tasks(session.tasks());
        }
        println!("  Goodbye!");
        println!();
    }

    Ok(())
}

fn print_tasks(tasks: &[Task]) {
    println!();
    if tasks.is_empty() {
        println!("  No tasks extracted yet.");
    } else {
        println!("  Tasks ({}):", tasks.len());
        for (i, task) in tasks.iter().enumerate() {
            println!("    {}. {task}", i + 1);
        }
    }
    println!();
}
