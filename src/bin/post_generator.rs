use chrono::Local;
use clap::{App, Arg};
use kafka_sibyl_system::config::{self, Config};
use kafka_sibyl_system::error::SibylError;
use kafka_sibyl_system::record::{SocialPost, RECORD_DATE_FORMAT};
use log::{error, info, Level};
use rand::Rng;
use rdkafka::config::ClientConfig;
use rdkafka::producer::{BaseProducer, BaseRecord};
use std::thread;
use std::time::Duration;

const AUTHORS: &[&str] = &["Alice", "Bob", "Charlie", "Eve", "Mallory"];
const ACTIONS: &[&str] = &["found", "saw", "tried", "shared", "discussed"];
const ADJECTIVES: &[&str] = &["amazing", "funny", "boring", "exciting", "weird"];
const TOPICS_BY_CATEGORY: &[(&str, &[&str])] = &[
    ("humor", &["a meme", "a joke", "a funny story"]),
    ("tech", &["Python", "Kafka", "a gadget", "JavaScript"]),
    ("food", &["a recipe", "a restaurant", "a dish"]),
    ("travel", &["a hike", "a city", "a road trip"]),
    ("entertainment", &["a movie", "a concert", "a show"]),
    ("gaming", &["a game", "a speedrun", "an e-sports match"]),
];

fn pick<'a, R: Rng>(rng: &mut R, choices: &[&'a str]) -> &'a str {
    choices[rng.gen_range(0..choices.len())]
}

/// Fabricate one post with random field values and a stub sentiment score.
fn random_post<R: Rng>(rng: &mut R) -> SocialPost {
    let (category, topics) = TOPICS_BY_CATEGORY[rng.gen_range(0..TOPICS_BY_CATEGORY.len())];
    let topic = pick(rng, topics);
    let message = format!(
        "I just {} {}! It was {}.",
        pick(rng, ACTIONS),
        topic,
        pick(rng, ADJECTIVES)
    );
    let keyword = topic.rsplit(' ').next().unwrap_or(topic).to_owned();
    let sentiment = (rng.gen_range(0.0..=1.0) * 100.0_f64).round() / 100.0;

    SocialPost {
        message_length: message.len(),
        message,
        author: pick(rng, AUTHORS).to_owned(),
        timestamp: Local::now().format(RECORD_DATE_FORMAT).to_string(),
        category: category.to_owned(),
        sentiment,
        keyword_mentioned: keyword,
    }
}

fn produce(config: Config) -> Result<(), SibylError> {
    let producer: BaseProducer = ClientConfig::new()
        .set("bootstrap.servers", &config.kafka.brokers)
        .set("message.timeout.ms", "5000")
        .create()?;
    let interval = Duration::from_millis(config.feed.interval_ms);
    let mut rng = rand::thread_rng();

    info!(
        "Publishing a post every {}ms to topic {}",
        config.feed.interval_ms, config.kafka.topic
    );
    loop {
        let post = random_post(&mut rng);
        let payload =
            serde_json::to_string(&post).expect("post records always serialize to JSON");
        let record = BaseRecord::to(config.kafka.topic.as_str())
            .payload(&payload)
            .key(post.author.as_str());
        match producer.send(record) {
            Ok(()) => info!("[{}] {}", post.category, post.message),
            Err((err, _)) => error!("Error while publishing post: {}", err),
        }
        // Drive delivery callbacks between sends
        producer.poll(Duration::from_millis(0));
        thread::sleep(interval);
    }
}

fn cmd_line_config() -> String {
    let matches = App::new("post-generator")
        .version("0.1")
        .about("Publishes synthetic social post records to a Kafka topic")
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

fn main() {
    // Initialize logging
    simple_logger::init_with_level(Level::Info)
        .expect("Could not initialize the logging framework");

    // Fetch configuration
    let config_uri = cmd_line_config();
    let config = config::load_config(&config_uri).expect("Invalid configuration");

    if let Err(err) = produce(config) {
        error!("Generator terminated: {}", err);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_posts_carry_the_full_schema() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let post = random_post(&mut rng);
            assert!(!post.message.is_empty());
            assert!(!post.author.is_empty());
            assert!(!post.keyword_mentioned.is_empty());
            assert_eq!(post.message_length, post.message.len());
            assert!(post.sentiment >= 0.0 && post.sentiment <= 1.0);
        }
    }

    #[test]
    fn generated_timestamps_use_the_record_format() {
        let mut rng = rand::thread_rng();
        let post = random_post(&mut rng);
        assert!(
            chrono::NaiveDateTime::parse_from_str(&post.timestamp, RECORD_DATE_FORMAT).is_ok()
        );
    }
}
