use std::fmt;

/// Current-condition codes reported by the forecast API (WMO subset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WeatherCode {
    #[default]
    ClearSky,
    MainlyClear,
    PartlyCloudy,
    Overcast,
    Fog,
    LightDrizzle,
    LightRain,
    ModerateRain,
    HeavyRain,
    LightShowers,
    Thunderstorm,
}

/// Display name and icon identifier for a [`WeatherCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherDescriptor {
    pub name: &'static str,
    pub icon: &'static str,
}

impl WeatherCode {
    pub const fn all() -> &'static [WeatherCode] {
        &[
            WeatherCode::ClearSky,
            WeatherCode::MainlyClear,
            WeatherCode::PartlyCloudy,
            WeatherCode::Overcast,
            WeatherCode::Fog,
            WeatherCode::LightDrizzle,
            WeatherCode::LightRain,
            WeatherCode::ModerateRain,
            WeatherCode::HeavyRain,
            WeatherCode::LightShowers,
            WeatherCode::Thunderstorm,
        ]
    }

    /// Numeric code as used on the wire.
    pub const fn code(self) -> i64 {
        match self {
            WeatherCode::ClearSky => 0,
            WeatherCode::MainlyClear => 1,
            WeatherCode::PartlyCloudy => 2,
            WeatherCode::Overcast => 3,
            WeatherCode::Fog => 45,
            WeatherCode::LightDrizzle => 51,
            WeatherCode::LightRain => 61,
            WeatherCode::ModerateRain => 63,
            WeatherCode::HeavyRain => 65,
            WeatherCode::LightShowers => 80,
            WeatherCode::Thunderstorm => 95,
        }
    }

    /// Lenient conversion: anything outside the known set becomes [`WeatherCode::ClearSky`].
    pub fn from_code(code: i64) -> Self {
        Self::try_from(code).unwrap_or_default()
    }

    pub const fn descriptor(self) -> WeatherDescriptor {
        let (name, icon) = match self {
            WeatherCode::ClearSky => ("Céu Limpo", "weather-sunny"),
            WeatherCode::MainlyClear => ("Quase Limpo", "weather-partly-cloudy"),
            WeatherCode::PartlyCloudy => ("Parcialmente Nublado", "weather-partly-cloudy"),
            WeatherCode::Overcast => ("Nublado", "weather-cloudy"),
            WeatherCode::Fog => ("Nevoeiro", "weather-fog"),
            WeatherCode::LightDrizzle => ("Garoa Leve", "weather-rainy"),
            WeatherCode::LightRain => ("Chuva Leve", "weather-pouring"),
            WeatherCode::ModerateRain => ("Chuva Moderada", "weather-pouring"),
            WeatherCode::HeavyRain => ("Chuva Forte", "weather-pouring"),
            WeatherCode::LightShowers => ("Pancadas Leves", "weather-lightning-rainy"),
            WeatherCode::Thunderstorm => ("Trovoada", "weather-lightning"),
        };
        WeatherDescriptor { name, icon }
    }
}

impl fmt::Display for WeatherCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor().name)
    }
}

impl TryFrom<i64> for WeatherCode {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        WeatherCode::all()
            .iter()
            .copied()
            .find(|c| c.code() == value)
            .ok_or(value)
    }
}
