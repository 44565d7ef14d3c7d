//! The [`StencilWorld`] worker.
//!
//! One `StencilWorld` runs per worker. All of them execute the same
//! step loop; rank 0 (the root) additionally coordinates the scatter and
//! the gather, alternating both roles without ever messaging itself.
//!
//! # Ownership model
//!
//! `StencilWorld` is [`Send`] (moved into its worker thread) but not
//! shared: all mutating methods take `&mut self`, and each worker owns
//! its band outright. There is no shared memory between workers; every
//! byte that crosses a worker boundary travels through the transport.

use std::time::Instant;

use smog_comm::Transport;
use smog_core::{band_plan, Rank, RowRange, Rules, StepId};
use smog_grid::{BandGrid, FullGrid};

use crate::config::{ConfigError, WorkerConfig};
use crate::error::StepError;
use crate::exchange::{edge_traffic, exchange_borders};
use crate::gather::{gather_root, send_band};
use crate::metrics::StepMetrics;
use crate::scatter::{receive_band, scatter_root};
use crate::step::compute_band;

/// One worker of a band-decomposed stencil run.
///
/// # Example
///
/// ```ignore
/// let mut world = StencilWorld::new(config)?;
/// world.distribute()?;
/// for _ in 0..steps {
///     world.step()?;
/// }
/// if let Some(alive) = world.living_cells()? {
///     println!("{alive} cells alive");
/// }
/// ```
pub struct StencilWorld {
    size: usize,
    rank: Rank,
    workers: usize,
    comm: Box<dyn Transport>,
    rules: Box<dyn Rules>,
    /// Root only: the authoritative full grid (initial board before the
    /// scatter, reassembled board after a gather).
    full: Option<FullGrid>,
    /// The local band; `None` until `distribute()` runs.
    band: Option<BandGrid>,
    step_id: StepId,
    /// Whether the full grid reflects the current generation.
    aggregated: bool,
    metrics: StepMetrics,
}

// Workers are moved into threads whole.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<StencilWorld>();
    }
};

impl StencilWorld {
    /// Create a worker from a validated configuration.
    ///
    /// Consumes the `WorkerConfig`. Initial grids supplied to non-root
    /// workers are discarded here; their state arrives via the scatter.
    pub fn new(config: WorkerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let WorkerConfig {
            size,
            rank,
            workers,
            comm,
            rules,
            initial,
        } = config;
        Ok(Self {
            size,
            rank,
            workers,
            comm,
            rules,
            full: if rank.is_root() { initial } else { None },
            band: None,
            step_id: StepId(0),
            aggregated: false,
            metrics: StepMetrics::default(),
        })
    }

    /// Run the scatter and take ownership of the local band.
    ///
    /// Must be called exactly once, before the first `step()`, on every
    /// worker. This is a synchronisation point: the root blocks until
    /// each worker has taken delivery of its band, and every non-root
    /// worker blocks until its band arrives. A single-worker run carves
    /// the whole interior locally with no transport traffic.
    pub fn distribute(&mut self) -> Result<(), StepError> {
        if self.band.is_some() {
            return Err(StepError::AlreadyDistributed);
        }

        let plan = band_plan(self.size, self.workers);
        let band = match &self.full {
            Some(full) => {
                if self.workers > 1 {
                    scatter_root(full, &plan, &*self.comm)?;
                }
                BandGrid::from_full(full, plan[self.rank.0])?
            }
            None => receive_band(self.size, &*self.comm)?,
        };
        self.band = Some(band);
        self.aggregated = false;
        Ok(())
    }

    /// Advance one generation.
    ///
    /// Exchanges ghost rows (multi-worker runs), computes the stencil
    /// over the owned band, and publishes the staging buffers. The
    /// blocking exchange means no worker can run ahead: every worker
    /// finishes step N before any begins step N + 1.
    pub fn step(&mut self) -> Result<(), StepError> {
        let band = self.band.as_mut().ok_or(StepError::NotDistributed)?;

        let started = Instant::now();
        if self.workers > 1 {
            exchange_borders(band, &*self.comm)?;
        }
        let exchanged = Instant::now();

        let updated = compute_band(band, &*self.rules);
        band.swap();
        let finished = Instant::now();

        self.step_id = StepId(self.step_id.0 + 1);
        // The full grid, if any, now describes a stale generation.
        self.aggregated = false;

        let (sent, received) = edge_traffic(self.rank, self.workers);
        self.metrics.steps_total += 1;
        self.metrics.total_us = finished.duration_since(started).as_micros() as u64;
        self.metrics.exchange_us = exchanged.duration_since(started).as_micros() as u64;
        self.metrics.compute_us = finished.duration_since(exchanged).as_micros() as u64;
        self.metrics.cells_updated = updated;
        self.metrics.rows_sent += sent;
        self.metrics.rows_received += received;
        Ok(())
    }

    /// Ship every band back to the root and reassemble the full grid.
    ///
    /// Collective: every worker must call this (directly, or through a
    /// query) for the gather to complete; the root blocks until each
    /// band arrives. Idempotent: a second call without an intervening
    /// `step()` is a no-op on every worker, so drivers that issue the
    /// same query sequence everywhere stay in lockstep. Normally
    /// invoked lazily by the first post-run query rather than directly.
    pub fn collect(&mut self) -> Result<(), StepError> {
        let band = self.band.as_ref().ok_or(StepError::NotDistributed)?;
        if self.aggregated {
            return Ok(());
        }

        match &mut self.full {
            Some(full) => {
                let plan = band_plan(self.size, self.workers);
                gather_root(full, band, &plan, &*self.comm)?;
            }
            None => send_band(band, &*self.comm)?,
        }
        self.aggregated = true;
        Ok(())
    }

    /// Number of alive cells across the full grid.
    ///
    /// Triggers [`collect()`](Self::collect) if the current generation
    /// has not been aggregated yet. Returns `Some` on the root; `None`
    /// on every other worker (they have shipped their rows away, and
    /// only the root holds a whole-grid answer).
    pub fn living_cells(&mut self) -> Result<Option<u64>, StepError> {
        self.collect()?;
        Ok(self.full.as_ref().map(FullGrid::living_cells))
    }

    /// Average pollution across the full grid, normalised to `[0, 1]`.
    ///
    /// The pollution total divided by the interior cell count and by the
    /// rule-set's maximum pollution. Aggregates lazily like
    /// [`living_cells()`](Self::living_cells); `None` off the root.
    pub fn average_pollution(&mut self) -> Result<Option<f64>, StepError> {
        self.collect()?;
        let interior = (self.size - 2) as f64;
        let max = f64::from(self.rules.max_pollution());
        Ok(self
            .full
            .as_ref()
            .map(|full| full.pollution_total() as f64 / (interior * interior) / max))
    }

    /// This worker's rank.
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Number of cooperating workers.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Grid dimension.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Steps completed so far (0 after construction).
    pub fn step_id(&self) -> StepId {
        self.step_id
    }

    /// The owned row range, once distributed.
    pub fn band(&self) -> Option<RowRange> {
        self.band.as_ref().map(BandGrid::range)
    }

    /// The local band grid, once distributed. Diagnostic access for
    /// tests and tooling; ghost rows are readable through it.
    pub fn grid(&self) -> Option<&BandGrid> {
        self.band.as_ref()
    }

    /// The root's full grid. Reflects the current generation only after
    /// an aggregation; `None` on non-root workers.
    pub fn full_grid(&self) -> Option<&FullGrid> {
        self.full.as_ref()
    }

    /// Metrics from the most recent step.
    pub fn metrics(&self) -> &StepMetrics {
        &self.metrics
    }
}

impl std::fmt::Debug for StencilWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StencilWorld")
            .field("rank", &self.rank)
            .field("workers", &self.workers)
            .field("size", &self.size)
            .field("step_id", &self.step_id)
            .field("band", &self.band.as_ref().map(BandGrid::range))
            .field("aggregated", &self.aggregated)
            .finish()
    }
}
