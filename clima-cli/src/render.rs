use chrono::Local;
use clima_core::{DisplayMode, QueryState};

pub const PLACEHOLDER: &str = "Digite uma cidade...";
pub const LOADING: &str = "Buscando clima...";

/// One screen's worth of text for `state`.
pub fn render(state: &QueryState) -> String {
    match state.mode() {
        DisplayMode::Initial => "Busque uma cidade para ver o clima atual.\n".to_string(),
        DisplayMode::Loading => format!("{LOADING}\n"),
        DisplayMode::Error(message) => format!("✖ {message}\n"),
        DisplayMode::Result(result) => {
            let descriptor = result.code.descriptor();
            let mut out = format!(
                "\n  {}\n  {}  {}°C\n  {}\n",
                result.location_label,
                glyph(descriptor.icon),
                result.temperature_c,
                descriptor.name,
            );
            if let Some(at) = state.updated_at {
                out.push_str(&format!(
                    "  Atualizado às {}\n",
                    at.with_timezone(&Local).format("%H:%M")
                ));
            }
            out.push('\n');
            out
        }
    }
}

/// Terminal stand-in for an icon identifier.
pub fn glyph(icon: &str) -> &'static str {
    match icon {
        "weather-sunny" => "☀",
        "weather-partly-cloudy" => "⛅",
        "weather-cloudy" => "☁",
        "weather-fog" => "🌫",
        "weather-rainy" => "🌦",
        "weather-pouring" => "🌧",
        "weather-lightning-rainy" => "⛈",
        "weather-lightning" => "🌩",
        _ => "?",
    }
}
