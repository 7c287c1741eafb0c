use anyhow::Context;
use clima_core::Config;
use inquire::{CustomType, Text};

/// Prompt for each setting, starting from what is saved today.
pub fn run() -> anyhow::Result<()> {
    let current = Config::load()?;

    let language = Text::new("Idioma dos nomes de lugares:")
        .with_default(&current.language)
        .prompt()
        .context("Failed to read language")?;

    let timeout = CustomType::<u64>::new("Timeout HTTP em segundos (0 = padrão do cliente):")
        .with_default(current.timeout_secs.unwrap_or(0))
        .with_error_message("Digite um número inteiro de segundos")
        .prompt()
        .context("Failed to read timeout")?;

    let geocoding_url = Text::new("URL de geocodificação:")
        .with_default(&current.geocoding_url)
        .prompt()
        .context("Failed to read geocoding URL")?;

    let forecast_url = Text::new("URL de previsão:")
        .with_default(&current.forecast_url)
        .prompt()
        .context("Failed to read forecast URL")?;

    let updated = apply(current, language, timeout, geocoding_url, forecast_url);
    let path = updated.save()?;
    println!("Configuração salva em {}", path.display());

    Ok(())
}

fn apply(
    current: Config,
    language: String,
    timeout: u64,
    geocoding_url: String,
    forecast_url: String,
) -> Config {
    Config {
        language: language.trim().to_string(),
        timeout_secs: (timeout > 0).then_some(timeout),
        geocoding_url: geocoding_url.trim().to_string(),
        forecast_url: forecast_url.trim().to_string(),
        ..current
    }
}
