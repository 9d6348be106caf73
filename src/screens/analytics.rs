use tracing::{info, warn};

use crate::client::CarbonApi;
use crate::insights::{self, CategoryBar, Insights, MonthlyBar};
use crate::models::CarbonSummary;
use crate::screens::{LoadOutcome, Notice, ViewLifetime, clear_error};

/// Monthly bars, category distribution and insights, all derived from a
/// single summary fetch.
pub struct AnalyticsScreen<'a, A: CarbonApi> {
    api: &'a A,
    lifetime: ViewLifetime,
    summary: Option<CarbonSummary>,
    loading: bool,
    notice: Option<Notice>,
}

impl<'a, A: CarbonApi> AnalyticsScreen<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self {
            api,
            lifetime: ViewLifetime::new(),
            summary: None,
            loading: true,
            notice: None,
        }
    }

    pub fn mount(api: &'a A) -> Self {
        let mut screen = Self::new(api);
        screen.load();
        screen
    }

    pub fn lifetime(&self) -> ViewLifetime {
        self.lifetime.clone()
    }

    pub fn unmount(&self) {
        self.lifetime.unmount();
    }

    pub fn load(&mut self) -> LoadOutcome {
        if !self.lifetime.is_mounted() {
            return LoadOutcome::Discarded;
        }
        self.loading = true;
        let result = self.api.fetch_summary();
        self.loading = false;
        if !self.lifetime.is_mounted() {
            return LoadOutcome::Discarded;
        }
        match result {
            Ok(summary) => {
                info!(months = summary.monthly_data.len(), "analytics loaded");
                self.summary = Some(summary);
                clear_error(&mut self.notice);
                LoadOutcome::Loaded
            }
            Err(e) => {
                warn!(error = %e, "error loading summary");
                self.notice = Some(Notice::error("Error", "Could not load analytics"));
                LoadOutcome::Failed(e)
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn summary(&self) -> Option<&CarbonSummary> {
        self.summary.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn monthly_bars(&self) -> Vec<MonthlyBar> {
        self.summary.as_ref().map(insights::monthly_bars).unwrap_or_default()
    }

    pub fn category_bars(&self) -> Vec<CategoryBar> {
        self.summary.as_ref().map(insights::category_bars).unwrap_or_default()
    }

    pub fn insights(&self) -> Option<Insights> {
        self.summary.as_ref().map(insights::insights)
    }
}
