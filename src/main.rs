use clap::{App, Arg};
use kafka_sibyl_system::chart::TermChart;
use kafka_sibyl_system::config::{self, Config};
use kafka_sibyl_system::error::SibylError;
use kafka_sibyl_system::ingest::source::KafkaSource;
use kafka_sibyl_system::ingest::IngestLoop;
use log::{error, info, Level};

fn cmd_line_config() -> String {
    let matches = App::new("kafka-sibyl-system")
        .version("0.1")
        .about("Real-time sentiment trend visualization for Kafka topic streams")
        .arg(
            Arg::with_name("config")
                .short("c")
                .value_name("config-file")
                .takes_value(true)
                .help("Configuration file"),
        )
        .get_matches();

    String::from(matches.value_of("config").unwrap_or("config.toml").trim())
}

fn consume(config: Config) -> Result<(), SibylError> {
    let source = KafkaSource::new(&config.kafka)?;
    let renderer = TermChart::new(&config.chart)?;
    IngestLoop::new(source, renderer).run()
}

fn main() {
    // Initialize logging
    simple_logger::init_with_level(Level::Info)
        .expect("Could not initialize the logging framework");

    // Fetch configuration
    let config_uri = cmd_line_config();
    let config = config::load_config(&config_uri).expect("Invalid configuration");
    info!(
        "Consuming topic {} from {}",
        config.kafka.topic, config.kafka.brokers
    );

    if let Err(err) = consume(config) {
        error!("Pipeline terminated: {}", err);
        std::process::exit(1);
    }
}
