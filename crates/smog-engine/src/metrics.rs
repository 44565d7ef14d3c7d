//! Per-step metrics for the stencil worker.
//!
//! [`StepMetrics`] captures timing and traffic data, enabling telemetry
//! and the partition-tuning measurements the benchmarks rely on.

/// Timing and traffic metrics for a worker.
///
/// Durations are in microseconds and describe the most recent step;
/// counters are cumulative since construction. The engine populates the
/// struct after each `step()`.
#[derive(Clone, Debug, Default)]
pub struct StepMetrics {
    /// Steps completed so far.
    pub steps_total: u64,
    /// Wall-clock time of the most recent step, in microseconds.
    pub total_us: u64,
    /// Time the most recent step spent in the border exchange (zero for
    /// single-worker runs), in microseconds.
    pub exchange_us: u64,
    /// Time the most recent step spent in the stencil computation, in
    /// microseconds.
    pub compute_us: u64,
    /// Cells updated by the most recent step.
    pub cells_updated: u64,
    /// Cumulative border rows sent to neighbours.
    pub rows_sent: u64,
    /// Cumulative border rows received from neighbours.
    pub rows_received: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = StepMetrics::default();
        assert_eq!(m.steps_total, 0);
        assert_eq!(m.total_us, 0);
        assert_eq!(m.exchange_us, 0);
        assert_eq!(m.compute_us, 0);
        assert_eq!(m.cells_updated, 0);
        assert_eq!(m.rows_sent, 0);
        assert_eq!(m.rows_received, 0);
    }
}
