pub mod category;
pub mod entry;
pub mod summary;

pub use category::{Category, FALLBACK_COLOR, Rgb};
pub use entry::{CarbonEntry, EntryPatch, NewCarbonEntry};
pub use summary::{CarbonSummary, CategoryBreakdown, MonthlyData};
