use tracing::warn;

use crate::client::CarbonApi;
use crate::models::CarbonEntry;
use crate::screens::{LoadOutcome, Notice, ViewLifetime, clear_error};

/// Full entry list, or a single entry looked up by id.
pub struct EntriesScreen<'a, A: CarbonApi> {
    api: &'a A,
    lifetime: ViewLifetime,
    entries: Vec<CarbonEntry>,
    notice: Option<Notice>,
}

impl<'a, A: CarbonApi> EntriesScreen<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self {
            api,
            lifetime: ViewLifetime::new(),
            entries: Vec::new(),
            notice: None,
        }
    }

    pub fn unmount(&self) {
        self.lifetime.unmount();
    }

    pub fn entries(&self) -> &[CarbonEntry] {
        &self.entries
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn load_all(&mut self) -> LoadOutcome {
        if !self.lifetime.is_mounted() {
            return LoadOutcome::Discarded;
        }
        let result = self.api.list_entries();
        self.apply(result)
    }

    pub fn load_one(&mut self, id: u64) -> LoadOutcome {
        if !self.lifetime.is_mounted() {
            return LoadOutcome::Discarded;
        }
        let result = self.api.get_entry(id).map(|e| vec![e]);
        self.apply(result)
    }

    fn apply(&mut self, result: Result<Vec<CarbonEntry>, crate::client::FetchError>) -> LoadOutcome {
        if !self.lifetime.is_mounted() {
            return LoadOutcome::Discarded;
        }
        match result {
            Ok(entries) => {
                self.entries = entries;
                clear_error(&mut self.notice);
                LoadOutcome::Loaded
            }
            Err(e) => {
                warn!(error = %e, "error loading entries");
                self.notice = Some(Notice::error("Error", "Failed to fetch entries from server"));
                LoadOutcome::Failed(e)
            }
        }
    }
}
