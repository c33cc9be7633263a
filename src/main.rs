use anyhow::Result;
use clap::Parser;
use parlance::api::Purpose;
use parlance::capability::{FileAudioOutput, ReaderSpeechInput};
use parlance::commands::{self, config::Config};
use std::path::PathBuf;
use std::sync::Arc;

/// parlance - translation, chatbot and dashboard client
///
/// Requests are authenticated with a bearer token from the PARLANCE_TOKEN
/// environment variable or, if unset, the session saved by `parlance login`.
///
/// Examples:
///   parlance login --token <TOKEN>
///   parlance translate "Good morning" --to es
///   echo "Thank you" | parlance translate --to ja
#[derive(Parser, Debug)]
#[command(author, version = env!("PARLANCE_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Backend API URL (defaults to http://localhost:5000)
    #[arg(long = "api-url", env = "PARLANCE_API_URL", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Session file (defaults to <config dir>/parlance/session.json)
    #[arg(
        long = "session-file",
        env = "PARLANCE_SESSION_FILE",
        value_name = "PATH",
        global = true
    )]
    pub session_file: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Translate text (reads stdin when TEXT is omitted)
    Translate(TranslateArgs),

    /// Synthesize speech and save it as MP3
    Speak(SpeakArgs),

    /// Talk to the language-learning chatbot
    Chat(ChatArgs),

    /// Show dashboard statistics
    Stats,

    /// Show recent translations
    Recent,

    /// Update dashboard preferences
    Preferences(PreferencesArgs),

    /// Ask the backend which language suits your location
    DetectLocation,

    /// List supported languages
    Languages,

    /// Save a session token from the identity provider
    Login(LoginArgs),

    /// Remove the saved session
    Logout,

    /// Show whether a credential is available
    Status,
}

#[derive(clap::Args, Debug)]
pub struct TranslateArgs {
    /// Text to translate
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Source language code
    #[arg(long, short = 'f', default_value = "auto")]
    pub from: String,

    /// Target language code
    #[arg(long, short = 't', default_value = "en")]
    pub to: String,
}

#[derive(clap::Args, Debug)]
pub struct SpeakArgs {
    /// Text to speak
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Language code
    #[arg(long, short = 'l', default_value = "en")]
    pub language: String,

    /// Where to write the MP3 audio
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct ChatArgs {
    /// Conversation purpose: business, travel, education, social, technical
    #[arg(long, short = 'p')]
    pub purpose: Purpose,

    /// Messages to send after the conversation starts
    #[arg(value_name = "MESSAGE")]
    pub messages: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct PreferencesArgs {
    /// Primary language code
    #[arg(long = "primary-language", value_name = "CODE")]
    pub primary_language: String,
}

#[derive(clap::Args, Debug)]
pub struct LoginArgs {
    /// Token to store (read from stdin when omitted)
    #[arg(long)]
    pub token: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let Cli {
        command,
        api_url,
        session_file,
    } = Cli::parse();
    let config =
        || Config::new(parlance::runtime::RealRuntime, api_url.clone(), session_file.clone());

    match command {
        Commands::Translate(args) => {
            let api = config()?.api()?;
            let mut input = ReaderSpeechInput::stdin();
            commands::translate(&api, args.text, &mut input, &args.from, &args.to).await?;
        }
        Commands::Speak(args) => {
            let config = config()?;
            let output = FileAudioOutput::new(Arc::clone(&config.runtime), args.output);
            commands::speak(&config.api()?, &args.text, &args.language, &output).await?;
        }
        Commands::Chat(args) => {
            commands::chat(&config()?.api()?, args.purpose, &args.messages).await?;
        }
        Commands::Stats => {
            commands::stats(&config()?.api()?).await?;
        }
        Commands::Recent => {
            commands::recent(&config()?.api()?).await?;
        }
        Commands::Preferences(args) => {
            commands::preferences(&config()?.api()?, &args.primary_language).await?;
        }
        Commands::DetectLocation => {
            commands::detect_location(&config()?.api()?).await?;
        }
        Commands::Languages => commands::languages(),
        Commands::Login(args) => commands::login(&config()?, args.token, std::io::stdin())?,
        Commands::Logout => {
            commands::logout(&config()?)?;
        }
        Commands::Status => {
            commands::status(&config()?).await?;
        }
    }
    Ok(())
}
