//! Screen controllers. Each screen loads its own data, keeps it private and
//! never shares a cache with another screen.

pub mod analytics;
pub mod entries;
pub mod home;
pub mod map;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::client::FetchError;

pub use analytics::AnalyticsScreen;
pub use entries::EntriesScreen;
pub use home::{HomeScreen, SubmitError};
pub use map::MapScreen;

/// Mounted flag shared between a screen and whoever may dispose of it.
///
/// Results that arrive after `unmount` are dropped instead of written into
/// the screen's state.
#[derive(Clone, Debug)]
pub struct ViewLifetime(Arc<AtomicBool>);

impl ViewLifetime {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_mounted(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn unmount(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl Default for ViewLifetime {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum LoadOutcome {
    Loaded,
    Failed(FetchError),
    /// The screen was unmounted before the data could be applied.
    Discarded,
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// User-facing message, the terminal counterpart of an alert dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }

    pub fn success(title: &str, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: title.to_string(),
            message: message.into(),
        }
    }

    pub fn error(title: &str, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn connection_error(base_url: &str) -> Self {
        Self::error(
            "Connection Error",
            format!("Could not connect to server. Please make sure the backend is running on {base_url}"),
        )
    }
}

/// Drop an error left over from an earlier failed load. Success notices stay.
pub(crate) fn clear_error(notice: &mut Option<Notice>) {
    if notice.as_ref().is_some_and(Notice::is_error) {
        *notice = None;
    }
}

#[cfg(test)]
pub(crate) mod fake {
    //! In-memory service double shared by the screen tests.

    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::{TimeZone, Utc};

    use crate::client::{CarbonApi, FetchError};
    use crate::models::{CarbonEntry, CarbonSummary, Category, EntryPatch, NewCarbonEntry};

    #[derive(Default)]
    pub struct FakeApi {
        pub entries: Mutex<Vec<CarbonEntry>>,
        pub summary: Mutex<CarbonSummary>,
        pub fail_list: Mutex<bool>,
        pub fail_summary: Mutex<bool>,
        pub fail_create: Mutex<bool>,
        pub creates: AtomicUsize,
        pub lists: AtomicUsize,
        pub on_list: Mutex<Option<Box<dyn Fn() + Send>>>,
    }

    pub fn entry(id: u64, activity: &str, category: &str, amount: f64) -> CarbonEntry {
        CarbonEntry {
            id: Some(id),
            activity: activity.to_string(),
            category: Category::parse(category),
            carbon_amount: amount,
            location: "Lyon".to_string(),
            latitude: None,
            longitude: None,
            timestamp: Utc.with_ymd_and_hms(2025, 3, id as u32 % 28 + 1, 9, 0, 0).unwrap(),
        }
    }

    impl FakeApi {
        pub fn with_entries(entries: Vec<CarbonEntry>) -> Self {
            let api = FakeApi::default();
            *api.entries.lock().unwrap() = entries;
            api.resummarize();
            api
        }

        pub fn resummarize(&self) {
            let entries = self.entries.lock().unwrap();
            let mut summary = CarbonSummary::default();
            for e in entries.iter() {
                summary.total_carbon += e.carbon_amount;
                let prev = summary.category_breakdown.get(&e.category).unwrap_or(0.0);
                summary
                    .category_breakdown
                    .insert(e.category.clone(), prev + e.carbon_amount);
            }
            *self.summary.lock().unwrap() = summary;
        }
    }

    impl CarbonApi for FakeApi {
        fn list_entries(&self) -> Result<Vec<CarbonEntry>, FetchError> {
            self.lists.fetch_add(1, Ordering::SeqCst);
            if let Some(hook) = self.on_list.lock().unwrap().as_ref() {
                hook();
            }
            if *self.fail_list.lock().unwrap() {
                return Err(FetchError::new("list entries", "non-success status"));
            }
            Ok(self.entries.lock().unwrap().clone())
        }

        fn get_entry(&self, id: u64) -> Result<CarbonEntry, FetchError> {
            self.entries
                .lock()
                .unwrap()
                .iter()
                .find(|e| e.id == Some(id))
                .cloned()
                .ok_or_else(|| FetchError::new("get entry", "non-success status"))
        }

        fn create_entry(&self, entry: &NewCarbonEntry) -> Result<CarbonEntry, FetchError> {
            self.creates.fetch_add(1, Ordering::SeqCst);
            if *self.fail_create.lock().unwrap() {
                return Err(FetchError::new("create entry", "non-success status"));
            }
            let created = {
                let mut entries = self.entries.lock().unwrap();
                let id = entries.iter().filter_map(|e| e.id).max().unwrap_or(0) + 1;
                let created = entry.clone().with_id(id);
                entries.insert(0, created.clone());
                created
            };
            self.resummarize();
            Ok(created)
        }

        fn fetch_summary(&self) -> Result<CarbonSummary, FetchError> {
            if *self.fail_summary.lock().unwrap() {
                return Err(FetchError::new("fetch summary", "connection refused"));
            }
            Ok(self.summary.lock().unwrap().clone())
        }

        fn update_entry(&self, id: u64, patch: &EntryPatch) -> Result<CarbonEntry, FetchError> {
            let updated = {
                let mut entries = self.entries.lock().unwrap();
                let entry = entries
                    .iter_mut()
                    .find(|e| e.id == Some(id))
                    .ok_or_else(|| FetchError::new("update entry", "non-success status"))?;
                patch.apply_to(entry);
                entry.clone()
            };
            self.resummarize();
            Ok(updated)
        }

        fn delete_entry(&self, id: u64) -> Result<(), FetchError> {
            {
                let mut entries = self.entries.lock().unwrap();
                let before = entries.len();
                entries.retain(|e| e.id != Some(id));
                if entries.len() == before {
                    return Err(FetchError::new("delete entry", "non-success status"));
                }
            }
            self.resummarize();
            Ok(())
        }
    }
}
