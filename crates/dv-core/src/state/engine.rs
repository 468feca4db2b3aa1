//! View model: owns the current snapshot and serialises uploads

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use super::{ChartKind, Theme, TickStrategy, ViewState};
use crate::data::{DataSource, Dataset, IngestError, LoadError};
use crate::environment::Environment;
use crate::events::{events, EventBus};

/// Handle for an upload in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTicket {
    pub generation: u64,
    pub source_name: String,
}

/// What happened to a finished upload
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    /// The dataset replaced the previous one
    Applied { row_count: usize, column_count: usize },
    /// The file held nothing to chart; the previous dataset was cleared
    Cleared(IngestError),
    /// The file could not be parsed; the previous state was kept
    Failed(String),
    /// A newer upload started meanwhile; the result was dropped
    Stale,
}

/// The main view model.
///
/// Holds one immutable [`ViewState`] snapshot at a time. Every mutation runs a
/// pure transition on a copy and swaps the result in, so readers holding an
/// older snapshot never observe partial updates.
pub struct ViewModel {
    state: RwLock<Arc<ViewState>>,
    upload_generation: AtomicU64,
    event_bus: Arc<EventBus>,
    environment: Arc<dyn Environment>,
}

impl ViewModel {
    /// Create a new view model bound to an environment
    pub fn new(environment: Arc<dyn Environment>) -> Self {
        Self {
            state: RwLock::new(Arc::new(ViewState::default())),
            upload_generation: AtomicU64::new(0),
            event_bus: Arc::new(EventBus::new()),
            environment,
        }
    }

    /// Current state snapshot
    pub fn snapshot(&self) -> Arc<ViewState> {
        self.state.read().clone()
    }

    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.event_bus
    }

    pub fn environment(&self) -> &Arc<dyn Environment> {
        &self.environment
    }

    /// Apply a transition and publish the resulting snapshot
    pub fn update<F>(&self, transition: F) -> Arc<ViewState>
    where
        F: FnOnce(ViewState) -> ViewState,
    {
        let mut state = self.state.write();
        let next = Arc::new(transition((**state).clone()));
        *state = next.clone();
        next
    }

    /// Register a new upload; any upload started earlier becomes stale
    pub fn begin_upload(&self, source_name: impl Into<String>) -> UploadTicket {
        let generation = self.upload_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let source_name = source_name.into();
        tracing::debug!("Upload {} started for '{}'", generation, source_name);
        UploadTicket {
            generation,
            source_name,
        }
    }

    /// Publish the result of an upload started with [`begin_upload`](Self::begin_upload)
    pub fn finish_upload(
        &self,
        ticket: UploadTicket,
        result: Result<Dataset, LoadError>,
    ) -> UploadOutcome {
        let outcome = {
            let mut state = self.state.write();

            // Checked under the write lock so a newer upload cannot slip in between
            if ticket.generation != self.upload_generation.load(Ordering::SeqCst) {
                None
            } else {
                let outcome = match result {
                    Ok(dataset) => {
                        let row_count = dataset.len();
                        let column_count = dataset.headers().len();
                        let next = (**state).clone().with_dataset(&ticket.source_name, dataset);
                        *state = Arc::new(next);
                        UploadOutcome::Applied {
                            row_count,
                            column_count,
                        }
                    }
                    Err(LoadError::Ingest(err)) => {
                        *state = Arc::new((**state).clone().cleared());
                        UploadOutcome::Cleared(err)
                    }
                    Err(LoadError::Parse(message)) => UploadOutcome::Failed(message),
                };
                Some(outcome)
            }
        };

        match outcome {
            None => {
                tracing::info!(
                    "Discarding stale upload {} of '{}'",
                    ticket.generation,
                    ticket.source_name
                );
                self.event_bus.publish(events::StaleUploadDiscarded {
                    source_name: ticket.source_name,
                    generation: ticket.generation,
                });
                UploadOutcome::Stale
            }
            Some(outcome) => {
                match &outcome {
                    UploadOutcome::Applied {
                        row_count,
                        column_count,
                    } => {
                        tracing::info!(
                            "Loaded '{}': {} rows, {} columns",
                            ticket.source_name,
                            row_count,
                            column_count
                        );
                        self.event_bus.publish(events::DatasetLoaded {
                            source_name: ticket.source_name,
                            row_count: *row_count,
                            column_count: *column_count,
                        });
                    }
                    UploadOutcome::Cleared(err) => {
                        tracing::warn!("Rejected '{}': {}", ticket.source_name, err);
                        self.event_bus.publish(events::DataSourceError {
                            source_name: ticket.source_name,
                            error: err.to_string(),
                        });
                    }
                    UploadOutcome::Failed(message) => {
                        tracing::warn!("Failed to parse '{}': {}", ticket.source_name, message);
                        self.event_bus.publish(events::DataSourceError {
                            source_name: ticket.source_name,
                            error: message.clone(),
                        });
                    }
                    UploadOutcome::Stale => {}
                }
                outcome
            }
        }
    }

    /// Load a data source end to end
    pub async fn load(&self, source: &dyn DataSource) -> UploadOutcome {
        let ticket = self.begin_upload(source.source_name());
        let result = source.load().await;
        self.finish_upload(ticket, result)
    }

    pub fn toggle_column(&self, column: &str) -> Arc<ViewState> {
        self.update(|state| state.toggle_column(column))
    }

    pub fn set_chart_kind(&self, kind: ChartKind) -> Arc<ViewState> {
        self.update(|state| state.with_chart_kind(kind))
    }

    pub fn set_tick_strategy(&self, strategy: TickStrategy) -> Arc<ViewState> {
        self.update(|state| state.with_tick_strategy(strategy))
    }

    pub fn zoom_in(&self) -> Arc<ViewState> {
        self.zoom_with(ViewState::zoomed_in)
    }

    pub fn zoom_out(&self) -> Arc<ViewState> {
        self.zoom_with(ViewState::zoomed_out)
    }

    pub fn reset_zoom(&self) -> Arc<ViewState> {
        self.zoom_with(ViewState::zoom_reset)
    }

    fn zoom_with(&self, transition: fn(ViewState) -> ViewState) -> Arc<ViewState> {
        let before = self.snapshot().zoom;
        let next = self.update(transition);
        if next.zoom != before {
            tracing::debug!("Zoom window now [{}, {}]", next.zoom.start, next.zoom.end);
            self.event_bus.publish(events::ZoomChanged {
                start: next.zoom.start,
                end: next.zoom.end,
            });
        }
        next
    }

    /// Switch theme and let the environment restyle itself
    pub fn set_theme(&self, theme: Theme) -> Arc<ViewState> {
        let next = self.update(|state| state.with_theme(theme));
        self.environment.apply_theme(theme);
        self.event_bus.publish(events::ThemeChanged { theme });
        next
    }

    pub fn toggle_theme(&self) -> Arc<ViewState> {
        let theme = self.snapshot().settings.theme.toggled();
        self.set_theme(theme)
    }
}
