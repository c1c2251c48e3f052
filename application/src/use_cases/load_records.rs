//! Load Records use case.
//!
//! Fetches the record listing once per view load. Failures are logged and
//! produce an empty listing; there is no error UI beyond logging.

use crate::ports::record_source::RecordSource;
use finder_domain::Human;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Use case for loading the record listing.
#[derive(Clone)]
pub struct LoadRecordsUseCase {
    source: Arc<dyn RecordSource>,
}

impl LoadRecordsUseCase {
    pub fn new(source: Arc<dyn RecordSource>) -> Self {
        Self { source }
    }

    /// Fetch records as-is. Returns an empty list if the fetch fails.
    ///
    /// Records that fail validation are kept and reported with `warn!`.
    pub async fn execute(&self) -> Vec<Human> {
        match self.source.load_humans().await {
            Ok(humans) => {
                for human in &humans {
                    if let Err(e) = human.validate() {
                        warn!("Suspicious record: {}", e);
                    }
                }
                info!("Loaded {} records", humans.len());
                humans
            }
            Err(e) => {
                error!("Failed to load records: {}", e);
                Vec::new()
            }
        }
    }
}
