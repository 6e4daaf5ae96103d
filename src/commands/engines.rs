use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use roastme::config::Config;
use roastme::engines::{openai, EngineInfo, EngineOptions, RoastAdapter};

pub async fn run(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path);
    if config.ci {
        colored::control::set_override(false);
    }

    let options = EngineOptions {
        model: config.model.clone(),
        ..EngineOptions::default()
    };
    let engines = RoastAdapter::new().list_engines(&options).await;

    print!("{}", format_engines(&engines));
    Ok(())
}

fn format_engines(engines: &[EngineInfo]) -> String {
    let mut out = format!("{}\n\n", "🤖 RoastBot: Available Engines".bold());

    for engine in engines {
        let status = if engine.availability.available { "✅" } else { "❌" };
        out.push_str(&format!(
            "{status} {}: {}\n",
            engine.name.as_str().to_uppercase().bold(),
            engine.availability.description
        ));
        if let Some(ref setup) = engine.availability.setup {
            out.push_str(&format!("   {} {}\n", "Setup:".dimmed(), setup));
        }
    }

    out.push_str("\nUsage:\n");
    out.push_str("  roastme index.js --engine static\n");
    out.push_str("  roastme index.js --engine ollama --model mistral\n");
    out.push_str("  roastme index.js --engine openai\n");
    out.push_str("\nEnvironment Variables:\n");
    out.push_str(&format!("  {}=sk-xxx (for OpenAI engine)\n", openai::API_KEY_ENV));
    out.push_str("  Ollama must be installed and running (for Ollama engine)\n");
    out
}
