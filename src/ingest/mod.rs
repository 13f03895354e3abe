use crate::chart::Renderer;
use crate::error::SibylError;
use crate::record::TrendPoint;
use log::{error, info};

pub mod source;
pub mod trend;

use source::{Delivery, MessageSource};
use trend::TrendStore;

/// Drives the subscribe-parse-append-render cycle: pull one payload from the
/// source, extract its trend point, append it to the history, redraw.
///
/// Everything runs on the calling thread; the only suspension point is the
/// source's poll. The store is owned here and the renderer only ever reads
/// it between appends.
pub struct IngestLoop<S, R> {
    source: S,
    renderer: R,
    store: TrendStore,
}

impl<S, R> IngestLoop<S, R>
where
    S: MessageSource,
    R: Renderer,
{
    pub fn new(source: S, renderer: R) -> Self {
        Self {
            source,
            renderer,
            store: TrendStore::new(),
        }
    }

    /// Consume until the source closes, the operator quits, or a fatal
    /// error surfaces. Malformed and incomplete records are logged and
    /// skipped without touching the trend history.
    pub fn run(&mut self) -> Result<(), SibylError> {
        info!("Starting ingestion");
        loop {
            match self.source.poll_next()? {
                Delivery::Closed => break,
                Delivery::Idle => {}
                Delivery::Message(payload) => self.process(&payload)?,
            }
            if self.renderer.poll_quit()? {
                info!("Operator requested shutdown");
                break;
            }
        }
        info!("Ingestion finished after {} records", self.store.len());
        Ok(())
    }

    fn process(&mut self, payload: &[u8]) -> Result<(), SibylError> {
        match TrendPoint::from_payload(payload) {
            Ok(point) => {
                info!(
                    "Appended sentiment {value:.2} at {time}",
                    value = point.sentiment,
                    time = point.timestamp
                );
                self.store.append(point.timestamp, point.sentiment)?;
                self.renderer.redraw(&self.store)
            }
            Err(err) if err.is_skippable() => {
                error!("Error while processing record: {}", err);
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    pub fn trend(&self) -> &TrendStore {
        &self.store
    }
}
