/// CSV export of step telemetry and spot snapshots.
pub mod export;
