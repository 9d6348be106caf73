use std::thread;

use tracing::{info, warn};

use crate::client::{CarbonApi, FetchError};
use crate::form::{EntryForm, FormError, PatchForm};
use crate::models::{CarbonEntry, CarbonSummary};
use crate::screens::{LoadOutcome, Notice, ViewLifetime, clear_error};

/// Number of entries shown under "Recent Entries".
pub const RECENT_ENTRIES: usize = 5;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] FormError),
    #[error(transparent)]
    Request(#[from] FetchError),
}

/// Summary card, recent entries and the add-entry form.
pub struct HomeScreen<'a, A: CarbonApi> {
    api: &'a A,
    base_url: String,
    lifetime: ViewLifetime,
    entries: Vec<CarbonEntry>,
    summary: Option<CarbonSummary>,
    loading: bool,
    form_open: bool,
    pub form: EntryForm,
    notice: Option<Notice>,
}

impl<'a, A: CarbonApi> HomeScreen<'a, A> {
    /// `base_url` only feeds the connection error message.
    pub fn new(api: &'a A, base_url: &str) -> Self {
        Self {
            api,
            base_url: base_url.to_string(),
            lifetime: ViewLifetime::new(),
            entries: Vec::new(),
            summary: None,
            loading: false,
            form_open: false,
            form: EntryForm::default(),
            notice: None,
        }
    }

    /// Create the screen and run the initial load.
    pub fn mount(api: &'a A, base_url: &str) -> Self {
        let mut screen = Self::new(api, base_url);
        screen.load();
        screen
    }

    pub fn lifetime(&self) -> ViewLifetime {
        self.lifetime.clone()
    }

    pub fn unmount(&self) {
        self.lifetime.unmount();
    }

    pub fn entries(&self) -> &[CarbonEntry] {
        &self.entries
    }

    /// First entries in service order, no client-side sorting.
    pub fn recent_entries(&self) -> &[CarbonEntry] {
        &self.entries[..self.entries.len().min(RECENT_ENTRIES)]
    }

    pub fn summary(&self) -> Option<&CarbonSummary> {
        self.summary.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn open_form(&mut self) {
        self.form_open = true;
    }

    pub fn cancel_form(&mut self) {
        self.form_open = false;
    }

    /// Fetch entries and summary concurrently. Both must succeed before
    /// anything is replaced; on failure previous data stays as it was.
    pub fn load(&mut self) -> LoadOutcome {
        if !self.lifetime.is_mounted() {
            return LoadOutcome::Discarded;
        }
        self.loading = true;
        let api = self.api;
        let (entries, summary) = thread::scope(|s| {
            let entries = s.spawn(|| api.list_entries());
            let summary = s.spawn(|| api.fetch_summary());
            (
                entries
                    .join()
                    .unwrap_or_else(|_| Err(FetchError::new("list entries", "worker panicked"))),
                summary
                    .join()
                    .unwrap_or_else(|_| Err(FetchError::new("fetch summary", "worker panicked"))),
            )
        });
        self.loading = false;

        if !self.lifetime.is_mounted() {
            info!("home screen unmounted, dropping load result");
            return LoadOutcome::Discarded;
        }

        match (entries, summary) {
            (Ok(entries), Ok(summary)) => {
                info!(entries = entries.len(), total = summary.total_carbon, "home screen loaded");
                self.entries = entries;
                self.summary = Some(summary);
                clear_error(&mut self.notice);
                LoadOutcome::Loaded
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!(error = %e, "error loading data");
                self.notice = Some(Notice::connection_error(&self.base_url));
                LoadOutcome::Failed(e)
            }
        }
    }

    /// Validate the form, create the entry, then reload everything.
    ///
    /// The new entry becomes visible only once the reload completes.
    pub fn submit_entry(&mut self) -> Result<CarbonEntry, SubmitError> {
        let entry = match self.form.validate() {
            Ok(entry) => entry,
            Err(e) => {
                self.notice = Some(Notice::error("Error", e.to_string()));
                return Err(e.into());
            }
        };

        self.loading = true;
        let created = self.api.create_entry(&entry);
        self.loading = false;
        let created = match created {
            Ok(created) => created,
            Err(e) => {
                warn!(error = %e, "create entry failed");
                self.notice = Some(Notice::error("Error", "Failed to add entry"));
                return Err(e.into());
            }
        };

        self.form_open = false;
        self.form.reset();
        if self.load().is_loaded() {
            self.notice = Some(Notice::success("Success", "Carbon entry added successfully!"));
        }
        Ok(created)
    }

    pub fn update_entry(&mut self, id: u64, form: &PatchForm) -> Result<CarbonEntry, SubmitError> {
        let patch = match form.validate() {
            Ok(patch) => patch,
            Err(e) => {
                self.notice = Some(Notice::error("Error", e.to_string()));
                return Err(e.into());
            }
        };
        let updated = self.api.update_entry(id, &patch).map_err(|e| {
            warn!(id, error = %e, "update entry failed");
            self.notice = Some(Notice::error("Error", "Failed to update entry"));
            e
        })?;
        if self.load().is_loaded() {
            self.notice = Some(Notice::success("Success", "Carbon entry updated successfully!"));
        }
        Ok(updated)
    }

    pub fn delete_entry(&mut self, id: u64) -> Result<(), SubmitError> {
        self.api.delete_entry(id).map_err(|e| {
            warn!(id, error = %e, "delete entry failed");
            self.notice = Some(Notice::error("Error", "Failed to delete entry"));
            e
        })?;
        if self.load().is_loaded() {
            self.notice = Some(Notice::success("Success", "Carbon entry deleted"));
        }
        Ok(())
    }
}
