pub mod budget_service;
pub mod export_service;
pub mod summary_service;

pub use budget_service::{AlertLevel, BudgetState, BudgetStatus, BudgetTracker};
pub use export_service::{ExportRecord, LedgerExporter};
pub use summary_service::{LedgerSummary, MonthlyTotals, SummaryService};
