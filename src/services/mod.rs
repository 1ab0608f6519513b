// Service exports
pub mod daily;
pub mod undo;

pub use daily::{DailyConfig, DailyPick, DailyService, DailyStatus};
pub use undo::{PendingUndo, UndoOutcome, UndoService};
