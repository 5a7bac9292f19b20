pub mod row;
pub mod store;
pub mod trend;

pub use row::{LogRow, LogTable, LOG_COLUMNS};
pub use store::{Appended, SessionLog};
pub use trend::{render_trend, TrendPoint, TrendSeries};
