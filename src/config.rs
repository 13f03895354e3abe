use crate::error::SibylError;
use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use toml;

#[derive(Deserialize, Serialize, Clone)]
pub struct Config {
    pub kafka: KafkaConfig,
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default)]
    pub feed: FeedConfig,
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        toml::ser::to_string_pretty(self)
            .map_err(|_| fmt::Error)
            .and_then(|value| write!(f, "{}", value))
    }
}

pub fn default_group_id() -> String {
    String::from("sentiment-trend")
}

pub fn default_offset_reset() -> String {
    String::from("latest")
}

pub fn default_poll_timeout_ms() -> u64 {
    500
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct KafkaConfig {
    // Comma-separated broker addresses
    pub brokers: String,
    // Topic carrying the JSON post records
    pub topic: String,
    #[serde(default = "default_group_id")]
    pub group_id: String,
    // Where a fresh consumer group starts: "earliest" or "latest"
    #[serde(default = "default_offset_reset")]
    pub offset_reset: String,
    #[serde(default = "default_poll_timeout_ms")]
    pub poll_timeout_ms: u64,
}

pub fn default_chart_title() -> String {
    String::from("Real-Time Sentiment Trend")
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChartConfig {
    #[serde(default = "default_chart_title")]
    pub title: String,
    // Number of trailing points to draw; the full history is always kept
    pub window: Option<usize>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: default_chart_title(),
            window: None,
        }
    }
}

pub fn default_interval_ms() -> u64 {
    1000
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FeedConfig {
    // Delay between generated posts
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

pub fn load_config(config_path: &str) -> Result<Config, SibylError> {
    let mut file_str = String::new();
    let file_path = Path::new(config_path);
    let mut open_file = File::open(file_path).map_err(|e| {
        SibylError::Config(format!(
            "Could not open file: {file}. Reason: {error}",
            file = config_path,
            error = e
        ))
    })?;
    open_file.read_to_string(&mut file_str).map_err(|e| {
        SibylError::Config(format!(
            "Could not read the config file: {file}. Reason: {error}",
            file = config_path,
            error = e
        ))
    })?;
    toml::from_str(&file_str).map_err(|e| {
        SibylError::Config(format!(
            "Unable to load config: {file}. Reason: {error}",
            file = config_path,
            error = e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config: Config = toml::from_str(
            r#"
            [kafka]
            brokers = "localhost:9092"
            topic = "buzz-posts"
            group_id = "trend-watchers"
            offset_reset = "earliest"

            [chart]
            title = "Sentiment"
            window = 200

            [feed]
            interval_ms = 250
            "#,
        )
        .unwrap();
        assert_eq!(config.kafka.topic, "buzz-posts");
        assert_eq!(config.kafka.offset_reset, "earliest");
        assert_eq!(config.chart.window, Some(200));
        assert_eq!(config.feed.interval_ms, 250);
    }

    #[test]
    fn optional_sections_fall_back_to_defaults() {
        let config: Config = toml::from_str(
            r#"
            [kafka]
            brokers = "localhost:9092"
            topic = "buzz-posts"
            "#,
        )
        .unwrap();
        assert_eq!(config.kafka.group_id, "sentiment-trend");
        assert_eq!(config.kafka.offset_reset, "latest");
        assert_eq!(config.kafka.poll_timeout_ms, 500);
        assert_eq!(config.chart.title, "Real-Time Sentiment Trend");
        assert_eq!(config.chart.window, None);
        assert_eq!(config.feed.interval_ms, 1000);
    }
}
