pub mod clock_reconciler;
pub mod silence_monitor;
