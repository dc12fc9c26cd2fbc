//! `taskchat doctor` — Diagnose configuration and connectivity.

use taskchat_config::AppConfig;

pub async fn run(live: bool) -> Result<(), Box<dyn std::error::Error>> {
    println!("TaskChat Doctor — Diagnostics");
    println!("=============================\n");

    let mut issues = 0;

    // Check config
    let config_path = AppConfig::config_dir().join("config.toml");
    let config = if config_path.exists() {
        match AppConfig::load() {
            Ok(config) => {
                println!("  ✅ Config file valid");
                Some(config)
            }
            Err(e) => {
                println!("  ❌ Config file invalid: {e}");
                issues += 1;
                None
            }
        }
    } else {
        println!("  ⚠️  No config file — run `taskchat onboard` (env vars still work)");
        AppConfig::load().ok()
    };

    // Check API key
    let has_key = config.as_ref().is_some_and(|c| c.has_api_key());
    if has_key {
        println!("  ✅ API key configured");
    } else {
        println!("  ⚠️  No API key — set GEMINI_API_KEY or add api_key to config.toml");
        issues += 1;
    }

    // Optional live probe
    if live {
        if let Some(config) = &config {
            if has_key {
                let router = taskchat_providers::router::build_from_config(config);
                match router.default_provider() {
                    Some(provider) => match provider.health_check().await {
                        Ok(true) => println!("  ✅ Provider reachable"),
                        Ok(false) => {
                            println!("  ❌ Provider rejected the API key");
                            issues += 1;
                        }
                        Err(e) => {
                            println!("  ❌ Provider unreachable: {e}");
                            issues += 1;
                        }
                    },
                    None => {
                        println!("  ❌ No default provider configured");
                        issues += 1;
                    }
                }
            } else {
                println!("  ⚠️  Skipping live probe: no API key");
            }
        }
    }

    // Summary
    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
