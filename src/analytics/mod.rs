pub mod equity;
pub mod periods;
pub mod summary;

pub use equity::{equity_curve, EquityPoint};
pub use periods::{by_month, by_year, PeriodOrder};
pub use summary::{compute_summary, Summary};
