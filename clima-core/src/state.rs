use chrono::{DateTime, Utc};

use crate::model::WeatherResult;

/// Everything the screen shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryState {
    /// Text currently typed into the search field.
    pub input: String,
    pub result: Option<WeatherResult>,
    pub loading: bool,
    pub error: Option<String>,
    /// When `result` was published.
    pub updated_at: Option<DateTime<Utc>>,
}

/// The single thing the screen presents at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode<'a> {
    Initial,
    Loading,
    Error(&'a str),
    Result(&'a WeatherResult),
}

impl QueryState {
    pub fn mode(&self) -> DisplayMode<'_> {
        if self.loading {
            DisplayMode::Loading
        } else if let Some(err) = self.error.as_deref() {
            DisplayMode::Error(err)
        } else if let Some(result) = self.result.as_ref() {
            DisplayMode::Result(result)
        } else {
            DisplayMode::Initial
        }
    }

    pub(crate) fn begin_lookup(&mut self) {
        self.loading = true;
        self.error = None;
        self.result = None;
        self.updated_at = None;
    }

    pub(crate) fn publish_result(&mut self, result: WeatherResult) {
        self.result = Some(result);
        self.error = None;
        self.updated_at = Some(Utc::now());
        self.finish();
    }

    pub(crate) fn publish_error(&mut self, message: String) {
        self.error = Some(message);
        self.result = None;
        self.updated_at = None;
        self.finish();
    }

    fn finish(&mut self) {
        self.loading = false;
        self.input.clear();
    }
}
