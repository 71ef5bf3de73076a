//! murmur binary — composition root.
//!
//! Ties the crates together into a single executable:
//! 1. Parse CLI arguments
//! 2. Initialize tracing
//! 3. Load configuration from TOML
//! 4. Construct the chat and synthesis backends
//! 5. Run the interactive turn loop over stdin/stdout

mod cli;
mod repl;

use std::io;

use clap::Parser;

use cli::CliArgs;
use murmur_chat::client::HttpChatClient;
use murmur_core::config::MurmurConfig;
use murmur_speech::output::WavFileOutput;
use murmur_speech::synth::HttpSynthesizer;
use repl::Repl;

const BANNER: &str = "\
murmur - a terminal voice for conversational AI

Type '!help' to show a full list of commands.
Press enter twice to submit your question.";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Tracing.
    let filter = match args.log_level {
        Some(ref level) => tracing_subscriber::EnvFilter::new(level),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Starting murmur v{}", env!("CARGO_PKG_VERSION"));

    // Config.
    let config_file = args.resolve_config_path();
    let mut config = MurmurConfig::load_or_default(&config_file);
    if let Some(output) = args.output {
        config.speech.output_path = output;
    }

    // Backends.
    let chat = HttpChatClient::new(
        &config.chat.base_url,
        &config.chat.access_token,
        config.chat.timeout_secs,
    )?;
    let synth = HttpSynthesizer::new(&config.speech.endpoint)?;
    let audio = WavFileOutput;

    println!("{BANNER}");
    print_speakers(&config.speech.speakers, config.general.escape_output);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut repl = Repl::new(
        &chat,
        &synth,
        &audio,
        &config,
        stdin.lock(),
        stdout.lock(),
    );
    repl.run()?;

    tracing::info!("Session ended");
    Ok(())
}

/// Print the configured speaker roster, one id per row. Skipped when the
/// list is empty or implausibly large.
fn print_speakers(speakers: &[String], escape: bool) {
    if speakers.is_empty() || speakers.len() > 100 {
        return;
    }
    println!("ID\tSpeaker");
    for (id, name) in speakers.iter().enumerate() {
        if escape {
            println!("{id}\t{}", name.escape_default());
        } else {
            println!("{id}\t{name}");
        }
    }
}
