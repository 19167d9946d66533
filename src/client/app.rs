//! Client controller tying the cache, filter, edit session and transport together

use super::cache::RecordCache;
use super::export::export_to_xlsx;
use super::session::{EditSession, PendingWrite, RecordForm};
use super::transport::{HttpTransport, RecordTransport};
use crate::config::{ClientConfig, ConfigDrift, ProjectCatalog};
use crate::core::error::{Result, SessionError, TrainingError};
use crate::core::field::RecordField;
use crate::core::filter::{FilterMode, RecordFilter};
use crate::core::record::TrainingRecord;
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// One user's view of the record store
///
/// Methods take `&mut self`, so filter changes, session transitions and
/// fetch completions are applied one at a time. Failures are returned and
/// also kept in [`last_error`](Self::last_error); unsaved input is never
/// discarded because of one.
pub struct TrainingClient {
    transport: Arc<dyn RecordTransport>,
    cache: RecordCache,
    filter: RecordFilter,
    session: EditSession,
    catalog: ProjectCatalog,
    local_catalog: Option<ProjectCatalog>,
    drift: Option<ConfigDrift>,
    last_error: Option<String>,
}

impl TrainingClient {
    pub fn new(transport: Arc<dyn RecordTransport>) -> Self {
        Self {
            transport,
            cache: RecordCache::new(),
            filter: RecordFilter::default(),
            session: EditSession::Idle,
            catalog: ProjectCatalog::default(),
            local_catalog: None,
            drift: None,
            last_error: None,
        }
    }

    /// Client over HTTP as configured
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(config)?;
        let mut client = Self::new(Arc::new(transport));
        if let Some(catalog) = &config.project_names {
            client = client.with_local_catalog(catalog.clone());
        }
        Ok(client)
    }

    /// Project list configured on this side, checked against the server's
    ///
    /// Used as the catalog until the server's list has been loaded.
    pub fn with_local_catalog(mut self, catalog: ProjectCatalog) -> Self {
        self.catalog = catalog.clone();
        self.local_catalog = Some(catalog);
        self
    }

    /// Load the option lists, then the records
    pub async fn connect(&mut self) -> Result<()> {
        self.load_options().await?;
        self.refresh().await
    }

    /// Adopt the server's project catalog
    ///
    /// A differing local catalog, or a status or training type this build
    /// cannot represent, is reported through [`drift`](Self::drift).
    pub async fn load_options(&mut self) -> Result<()> {
        let options = match self.transport.options().await {
            Ok(options) => options,
            Err(e) => return Err(self.fail(e)),
        };
        let catalog = match ProjectCatalog::new(options.project_names.clone()) {
            Ok(catalog) => catalog,
            Err(e) => return Err(self.fail(e)),
        };

        let mut drift = self
            .local_catalog
            .as_ref()
            .and_then(|local| local.drift_from(&catalog))
            .unwrap_or_default();
        drift.unknown_statuses = options.unknown_statuses();
        drift.unknown_training_types = options.unknown_training_types();

        if drift.is_empty() {
            self.drift = None;
        } else {
            tracing::warn!(
                only_local = ?drift.only_local,
                only_server = ?drift.only_server,
                unknown_statuses = ?drift.unknown_statuses,
                unknown_training_types = ?drift.unknown_training_types,
                "option lists differ from the record store; using the store's lists"
            );
            self.drift = Some(drift);
        }
        self.catalog = catalog;
        Ok(())
    }

    /// Replace the cache with a fresh fetch
    ///
    /// On failure the previous snapshot stays.
    pub async fn refresh(&mut self) -> Result<()> {
        match self.transport.fetch_all().await {
            Ok(records) => {
                tracing::debug!(count = records.len(), "record cache refreshed");
                self.cache.replace(records);
                self.last_error = None;
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Open a blank template
    pub fn begin_create(&mut self) -> Result<()> {
        let form = RecordForm::blank(self.catalog.first(), Utc::now().date_naive());
        self.session.begin_create(form)?;
        tracing::debug!("create session opened");
        Ok(())
    }

    /// Open the cached record `id` for editing
    pub fn begin_edit(&mut self, id: &Uuid) -> Result<()> {
        let record = self
            .cache
            .find(id)
            .ok_or(SessionError::RecordNotCached { id: *id })?;
        self.session.begin_edit(record)?;
        tracing::debug!(%id, "edit session opened");
        Ok(())
    }

    /// Edit a field of the open template
    pub fn set_field(&mut self, field: RecordField, value: &str) -> Result<()> {
        self.session.set_field(field, value)
    }

    /// Drop the open template without writing
    pub fn cancel(&mut self) {
        self.session.cancel();
    }

    /// Validate and write the open template, then refetch
    ///
    /// A failed check or write leaves the session open. Once the write has
    /// succeeded the session is closed; a failing refetch after that is only
    /// recorded in `last_error` and the stored record is still returned.
    pub async fn submit(&mut self) -> Result<TrainingRecord> {
        let write = match self.session.pending_write() {
            Ok(write) => write,
            Err(e) => return Err(self.fail(e)),
        };

        let saved = match &write {
            PendingWrite::Create(details) => self.transport.create(details).await,
            PendingWrite::Update { id, details } => self.transport.update(id, details).await,
        };
        let saved = match saved {
            Ok(record) => record,
            Err(e) => return Err(self.fail(e)),
        };

        tracing::debug!(id = %saved.id, "record written");
        self.session = EditSession::Idle;
        self.refresh_after_write().await;
        Ok(saved)
    }

    /// Delete the record `id`, then refetch
    pub async fn delete(&mut self, id: &Uuid) -> Result<()> {
        if let Err(e) = self.transport.delete(id).await {
            return Err(self.fail(e));
        }
        tracing::debug!(%id, "record deleted");
        self.refresh_after_write().await;
        Ok(())
    }

    /// Refetch after a write that already reached the store
    ///
    /// The write is not repeated and its result stands. A failing refetch
    /// keeps the previous snapshot and is left in `last_error` by `refresh`.
    async fn refresh_after_write(&mut self) {
        if let Err(e) = self.refresh().await {
            tracing::debug!(error = %e, "keeping stale snapshot after write");
        }
    }

    pub fn set_filter(&mut self, field: RecordField, value: impl Into<String>) {
        self.filter.fields.set(field, value);
    }

    pub fn clear_filters(&mut self) {
        self.filter.fields.clear_all();
        self.filter.query.clear();
    }

    pub fn set_mode(&mut self, mode: FilterMode) {
        self.filter.mode = mode;
    }

    /// Query used in free-text mode
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
    }

    pub fn filter(&self) -> &RecordFilter {
        &self.filter
    }

    /// Records passing the current filter, in store order
    pub fn visible_records(&self) -> Vec<&TrainingRecord> {
        self.filter.apply(self.cache.records())
    }

    pub fn records(&self) -> &[TrainingRecord] {
        self.cache.records()
    }

    pub fn cache(&self) -> &RecordCache {
        &self.cache
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn catalog(&self) -> &ProjectCatalog {
        &self.catalog
    }

    pub fn drift(&self) -> Option<&ConfigDrift> {
        self.drift.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Export every cached record, ignoring the filter
    pub fn export(&self, path: impl AsRef<Path>) -> Result<()> {
        export_to_xlsx(self.cache.records(), path)
    }

    fn fail(&mut self, err: TrainingError) -> TrainingError {
        if err.is_validation() {
            tracing::debug!(error = %err, "client-side check failed");
        } else {
            tracing::warn!(error = %err, "record store call failed");
        }
        self.last_error = Some(err.to_string());
        err
    }
}
