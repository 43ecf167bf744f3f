//! High-level service facade chaining the three lookup stages.

use std::sync::Arc;

use tracing::instrument::WithSubscriber;
use tracing::{Dispatch, info};

use crate::failure::ResolveError;
use crate::locator::locate;
use crate::model::{JurisdictionMeta, Schedule};
use crate::normalizer::normalize;
use crate::plugin::ResolverPlugin;
use crate::schedule::lookup_schedule;

/// Public entry point answering "when is my trash picked up?".
pub struct TrashDayService {
    plugin: Arc<ResolverPlugin>,
    dispatch: Option<Dispatch>,
}

impl TrashDayService {
    /// Create a new service bound to the provided plugin.
    #[must_use]
    pub fn new(plugin: Arc<ResolverPlugin>) -> Self {
        Self {
            plugin,
            dispatch: None,
        }
    }

    /// Send this service's log events to `dispatch` instead of the global subscriber.
    #[must_use]
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    /// Jurisdiction served by the underlying plugin.
    #[must_use]
    pub fn jurisdiction(&self) -> &JurisdictionMeta {
        &self.plugin.meta
    }

    /// Run the pipeline and return the schedule or the stage that failed.
    ///
    /// Stages run strictly in order; the first failure ends the run.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolveError`] naming the failed stage and its reason.
    pub async fn resolve(&self, address: &str) -> Result<Schedule, ResolveError> {
        let run = self.run_stages(address);
        match &self.dispatch {
            Some(dispatch) => run.with_subscriber(dispatch.clone()).await,
            None => run.await,
        }
    }

    /// Answer with a single human-readable sentence.
    ///
    /// Failures collapse into one of three fixed apologies; details only go to
    /// the log.
    pub async fn trash_day(&self, address: &str) -> String {
        let run = async {
            info!(address, "Received request for address");
            let response = match self.run_stages(address).await {
                Ok(schedule) => schedule.to_string(),
                Err(err) => err.user_message().to_owned(),
            };
            info!(address, response = %response, "Returning trash info");
            response
        };
        match &self.dispatch {
            Some(dispatch) => run.with_subscriber(dispatch.clone()).await,
            None => run.await,
        }
    }

    async fn run_stages(&self, address: &str) -> Result<Schedule, ResolveError> {
        let canonical = normalize(self.plugin.geocode_port.as_ref(), address).await?;
        let parcel = locate(self.plugin.parcel_port.as_ref(), &canonical).await?;
        Ok(lookup_schedule(self.plugin.schedule_port.as_ref(), &parcel).await?)
    }
}
