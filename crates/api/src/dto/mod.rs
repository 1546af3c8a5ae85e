pub mod refresh;
pub mod views;

pub use refresh::RefreshQuery;
pub use views::{ViewRowCount, ViewsReportResponse};
