use anyhow::Context;
use clap::{Parser, Subcommand};
use cityweather_core::{
    FileSettings, Location, OutputFormat, SettingsStore, WeatherError, WeatherProvider,
    fetch_report, provider_from_settings, resolve_location,
    settings::{OUTPUT_FORMAT, WEATHER_API_KEY},
};
use inquire::{Password, PasswordDisplayMode, required};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "View current weather for a given location")]
pub struct Cli {
    /// Output format for this run only: text, json or csv.
    #[arg(long, global = true, value_name = "FORMAT")]
    pub output_format: Option<String>,

    /// Log requests and replies to stderr.
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current weather; without --location the last location is reused.
    Show {
        /// The location (city, state) for which the weather is displayed.
        #[arg(long, num_args = 1.., value_delimiter = ',', value_name = "CITY[,STATE]")]
        location: Option<Vec<String>>,
    },

    /// Store the API key and/or the default output format.
    Configure {
        /// OpenWeather API key; prompted for when no option is given.
        #[arg(long)]
        api_key: Option<String>,

        /// Output format used when --output-format is not passed.
        #[arg(long, value_name = "FORMAT")]
        default_format: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show { location } => show(location.as_deref(), self.output_format).await,
            Command::Configure { api_key, default_format } => configure(api_key, default_format),
        }
    }
}

async fn show(location: Option<&[String]>, output_format: Option<String>) -> anyhow::Result<()> {
    let mut settings = FileSettings::load()?;

    let (location, format) = prepare_show(&mut settings, location, output_format.as_deref())?;
    settings.save()?;

    let provider = provider_from_settings(&settings)?;
    print!("{}", render_report(provider.as_ref(), &location, format).await?);
    Ok(())
}

/// Pick the output format and resolve the location.
///
/// The format is checked first so a rejected run leaves the store untouched.
/// An explicit `--output-format` applies to this run only.
fn prepare_show<S>(
    settings: &mut S,
    location: Option<&[String]>,
    output_format: Option<&str>,
) -> Result<(Location, OutputFormat), WeatherError>
where
    S: SettingsStore + ?Sized,
{
    let format = match output_format {
        Some(value) => value.parse()?,
        None => OutputFormat::from_setting(settings.get(OUTPUT_FORMAT).as_deref())?,
    };

    let location = resolve_location(location, settings)?;
    Ok((location, format))
}

async fn render_report(
    provider: &dyn WeatherProvider,
    location: &Location,
    format: OutputFormat,
) -> Result<String, WeatherError> {
    let table = fetch_report(provider, location).await?;
    Ok(table.render(format))
}

fn configure(api_key: Option<String>, default_format: Option<String>) -> anyhow::Result<()> {
    let mut settings = FileSettings::load()?;

    let api_key = match (api_key, &default_format) {
        (Some(key), _) => Some(key),
        (None, None) => Some(prompt_api_key()?),
        (None, Some(_)) => None,
    };

    apply_configure(&mut settings, api_key.as_deref(), default_format.as_deref())?;

    settings.save()?;
    tracing::info!(path = %settings.path().display(), "settings updated");
    println!("Settings saved to {}", settings.path().display());
    Ok(())
}

/// Validate everything before writing anything.
fn apply_configure<S>(
    settings: &mut S,
    api_key: Option<&str>,
    default_format: Option<&str>,
) -> anyhow::Result<()>
where
    S: SettingsStore + ?Sized,
{
    let format = default_format.map(str::parse::<OutputFormat>).transpose()?;

    let api_key = api_key.map(str::trim);
    if api_key == Some("") {
        anyhow::bail!("API key must not be empty");
    }

    if let Some(key) = api_key {
        settings.set(WEATHER_API_KEY, key);
    }
    if let Some(format) = format {
        settings.set(OUTPUT_FORMAT, format.as_str());
    }
    Ok(())
}

fn prompt_api_key() -> anyhow::Result<String> {
    Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_validator(required!("An API key is required"))
        .prompt()
        .context("Failed to read API key")
}
