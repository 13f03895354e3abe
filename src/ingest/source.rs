use crate::config::KafkaConfig;
use crate::error::SibylError;
use log::info;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{BaseConsumer, Consumer};
use rdkafka::message::Message;
use std::time::Duration;

/// Outcome of one poll against the transport.
pub enum Delivery {
    /// A message arrived; the payload is handed over as delivered.
    Message(Vec<u8>),
    /// Nothing available within the poll timeout.
    Idle,
    /// The subscription has ended; no further messages will arrive.
    Closed,
}

/// One-at-a-time pull access to a stream of raw payloads.
///
/// The consume loop only needs this seam; production runs bind it to Kafka,
/// tests feed it from a vector.
pub trait MessageSource {
    fn poll_next(&mut self) -> Result<Delivery, SibylError>;
}

/// Kafka binding: a blocking consumer subscribed to the configured topic,
/// polled with a timeout so the loop can interleave operator input checks.
pub struct KafkaSource {
    consumer: BaseConsumer,
    poll_timeout: Duration,
}

impl KafkaSource {
    pub fn new(config: &KafkaConfig) -> Result<Self, SibylError> {
        let consumer: BaseConsumer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("group.id", &config.group_id)
            .set("auto.offset.reset", &config.offset_reset)
            .set("enable.partition.eof", "false")
            .set("session.timeout.ms", "6000")
            .create()?;
        consumer.subscribe(&[config.topic.as_str()])?;
        info!("Subscribed to topic {} as group {}", config.topic, config.group_id);

        Ok(Self {
            consumer,
            poll_timeout: Duration::from_millis(config.poll_timeout_ms),
        })
    }
}

impl MessageSource for KafkaSource {
    fn poll_next(&mut self) -> Result<Delivery, SibylError> {
        match self.consumer.poll(self.poll_timeout) {
            Some(Ok(message)) => {
                let payload = message.payload().unwrap_or_default().to_vec();
                Ok(Delivery::Message(payload))
            }
            Some(Err(err)) => Err(SibylError::Transport(err)),
            None => Ok(Delivery::Idle),
        }
    }
}

/// In-memory source for tests: yields each payload once, then closes.
#[cfg(test)]
pub struct VecSource {
    payloads: std::vec::IntoIter<Vec<u8>>,
}

#[cfg(test)]
impl VecSource {
    pub fn new(payloads: Vec<Vec<u8>>) -> Self {
        Self {
            payloads: payloads.into_iter(),
        }
    }
}

#[cfg(test)]
impl MessageSource for VecSource {
    fn poll_next(&mut self) -> Result<Delivery, SibylError> {
        Ok(match self.payloads.next() {
            Some(payload) => Delivery::Message(payload),
            None => Delivery::Closed,
        })
    }
}
