use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use voicecal::calculator::parse_keys;
use voicecal::speech::{CommandSink, LogSink, NullSink, SpeechSink};
use voicecal::ui::{HELP_TEXT, render_display, render_keypad};
use voicecal::{LanguageTag, Session, Settings};

#[derive(Parser)]
#[command(name = "voicecal")]
#[command(about = "A calculator that speaks every key press")]
struct Cli {
    /// Speech language (en-US, es-ES, fr-FR, zh-CN, zh-HK)
    #[arg(long)]
    language: Option<String>,

    /// Speaking speed, 0.1 to 0.75
    #[arg(long)]
    rate: Option<f32>,

    /// Where spoken phrases go
    #[arg(long, value_enum, default_value_t = SinkKind::Command)]
    sink: SinkKind,

    /// Settings file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Press these keys, print the result and exit
    #[arg(long)]
    keys: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SinkKind {
    /// Run the configured text-to-speech program
    Command,
    /// Write phrases to the log
    Log,
    /// Stay silent
    None,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voicecal=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => Settings::default_path()?,
    };
    let mut settings = Settings::load_from(&config_path)?;
    if let Some(tag) = &cli.language {
        settings.language = LanguageTag::from_tag_or_default(tag);
    }
    if let Some(rate) = cli.rate {
        settings.set_speech_rate(rate);
    }

    let sink: Box<dyn SpeechSink> = match cli.sink {
        SinkKind::Command => Box::new(CommandSink::new(settings.tts_command.clone())),
        SinkKind::Log => Box::new(LogSink),
        SinkKind::None => Box::new(NullSink),
    };
    let mut session = Session::new(&settings, sink);

    if let Some(keys) = cli.keys {
        session.press_all(parse_keys(&keys)?);
        println!("{}", render_display(&session.readout()));
        return Ok(());
    }

    run_interactive(&mut session, &mut settings, &config_path)
}

fn run_interactive(
    session: &mut Session<Box<dyn SpeechSink>>,
    settings: &mut Settings,
    config_path: &Path,
) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("{}", render_display(&session.readout()));
    println!("Type :help for help.");

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read input")?;
        let line = line.trim();

        if let Some(command) = line.strip_prefix(':') {
            let mut parts = command.split_whitespace();
            match (parts.next(), parts.next()) {
                (Some("quit" | "q"), _) => break,
                (Some("help"), _) => println!("{}", HELP_TEXT),
                (Some("keys"), _) => println!("{}", render_keypad()),
                (Some("lang"), Some(tag)) => match tag.parse::<LanguageTag>() {
                    Ok(lang) => {
                        session.set_language(lang);
                        settings.language = lang;
                        println!("Language: {}", lang.display_name());
                    }
                    Err(err) => eprintln!("{err}"),
                },
                (Some("rate"), Some(rate)) => match rate.parse::<f32>() {
                    Ok(rate) => {
                        session.set_speech_rate(rate);
                        settings.speech_rate = session.speech_rate();
                        println!("Rate: {}", session.speech_rate());
                    }
                    Err(err) => eprintln!("Invalid rate {rate:?}: {err}"),
                },
                (Some("save"), _) => {
                    save_settings(settings, config_path);
                }
                _ => eprintln!("Unknown command; type :help"),
            }
            continue;
        }

        match parse_keys(line) {
            Ok(keys) => {
                session.press_all(keys);
                println!("{}", render_display(&session.readout()));
            }
            Err(err) => eprintln!("{err}"),
        }
        stdout.flush()?;
    }

    Ok(())
}

/// Save settings, reporting the outcome. A failed save leaves the session running.
fn save_settings(settings: &Settings, path: &Path) -> bool {
    match settings.save_to(path) {
        Ok(()) => {
            println!("Saved to {}", path.display());
            true
        }
        Err(err) => {
            eprintln!("{err}");
            false
        }
    }
}
