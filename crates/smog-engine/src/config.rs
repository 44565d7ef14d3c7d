//! Worker configuration and validation.
//!
//! [`WorkerConfig`] is the constructor input for a
//! [`StencilWorld`](crate::StencilWorld): an explicit, role-tagged
//! description of one worker's place in the run. There is no ambient
//! process state anywhere; rank, worker count, and the transport handle
//! all travel through this struct.

use smog_comm::Transport;
use smog_core::{Rank, Rules};
use smog_grid::FullGrid;
use std::error::Error;
use std::fmt;

/// Errors detected during [`WorkerConfig::validate()`].
#[derive(Debug)]
pub enum ConfigError {
    /// The grid dimension cannot hold a boundary ring plus an interior.
    GridTooSmall {
        /// The offending dimension.
        size: usize,
    },
    /// The worker set is empty.
    NoWorkers,
    /// The configured rank is outside the worker set.
    RankOutOfRange {
        /// The offending rank.
        rank: Rank,
        /// Size of the worker set.
        workers: usize,
    },
    /// More workers than the interior rows can be split across.
    ///
    /// The equal-split plan needs `size / workers >= 2` so the outer
    /// bands stay non-empty after clamping away the boundary rows.
    TooManyWorkers {
        /// Configured worker count.
        workers: usize,
        /// Grid dimension.
        size: usize,
    },
    /// The transport was built for a different worker set.
    TransportWorkerMismatch {
        /// Worker count in this configuration.
        config: usize,
        /// Worker count the transport reports.
        transport: usize,
    },
    /// The transport endpoint belongs to a different rank.
    TransportRankMismatch {
        /// Rank in this configuration.
        config: Rank,
        /// Rank the transport reports.
        transport: Rank,
    },
    /// The root worker was configured without an initial grid.
    MissingInitialGrid,
    /// The root's initial grid has the wrong dimension.
    InitialGridSizeMismatch {
        /// The configured grid dimension.
        expected: usize,
        /// The initial grid's dimension.
        got: usize,
    },
    /// The rule-set's maximum pollution is not strictly positive.
    ///
    /// It is the divisor of the average-pollution normalisation, so zero
    /// or negative bounds are rejected up front.
    NonPositiveMaxPollution {
        /// The offending bound.
        value: i32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GridTooSmall { size } => {
                write!(f, "grid dimension {size} is below the minimum of 3")
            }
            Self::NoWorkers => write!(f, "worker set is empty"),
            Self::RankOutOfRange { rank, workers } => {
                write!(f, "rank {rank} outside worker set of {workers}")
            }
            Self::TooManyWorkers { workers, size } => {
                write!(
                    f,
                    "{workers} workers cannot split a {size}-row grid (need size / workers >= 2)"
                )
            }
            Self::TransportWorkerMismatch { config, transport } => {
                write!(
                    f,
                    "config names {config} workers, transport connects {transport}"
                )
            }
            Self::TransportRankMismatch { config, transport } => {
                write!(f, "config is for rank {config}, transport endpoint is rank {transport}")
            }
            Self::MissingInitialGrid => {
                write!(f, "root worker requires an initial grid")
            }
            Self::InitialGridSizeMismatch { expected, got } => {
                write!(f, "initial grid is {got}x{got}, config says {expected}x{expected}")
            }
            Self::NonPositiveMaxPollution { value } => {
                write!(f, "max_pollution must be strictly positive, got {value}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Complete configuration for one stencil worker.
///
/// Consumed by `StencilWorld::new`. The root worker (rank 0) must carry
/// the authoritative initial grid; initial grids on non-root workers are
/// ignored entirely, their state arrives via the scatter.
pub struct WorkerConfig {
    /// Grid dimension (`size × size` cells, boundary ring included).
    pub size: usize,
    /// This worker's rank.
    pub rank: Rank,
    /// Number of cooperating workers.
    pub workers: usize,
    /// Point-to-point transport connecting the worker set.
    pub comm: Box<dyn Transport>,
    /// Transition rules for both layers.
    pub rules: Box<dyn Rules>,
    /// Initial board. Required on the root, ignored elsewhere.
    pub initial: Option<FullGrid>,
}

impl WorkerConfig {
    /// Validate all structural invariants.
    ///
    /// This is the ambient screen in front of the unchecked partition
    /// arithmetic: every shape `band_plan` documents as a precondition is
    /// rejected here, before any storage or protocol state exists.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size < 3 {
            return Err(ConfigError::GridTooSmall { size: self.size });
        }
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        if self.rank.0 >= self.workers {
            return Err(ConfigError::RankOutOfRange {
                rank: self.rank,
                workers: self.workers,
            });
        }
        if self.workers > 1 && self.size / self.workers < 2 {
            return Err(ConfigError::TooManyWorkers {
                workers: self.workers,
                size: self.size,
            });
        }
        if self.comm.workers() != self.workers {
            return Err(ConfigError::TransportWorkerMismatch {
                config: self.workers,
                transport: self.comm.workers(),
            });
        }
        if self.comm.rank() != self.rank {
            return Err(ConfigError::TransportRankMismatch {
                config: self.rank,
                transport: self.comm.rank(),
            });
        }
        if self.rank.is_root() {
            match &self.initial {
                None => return Err(ConfigError::MissingInitialGrid),
                Some(grid) if grid.size() != self.size => {
                    return Err(ConfigError::InitialGridSizeMismatch {
                        expected: self.size,
                        got: grid.size(),
                    });
                }
                Some(_) => {}
            }
        }
        let max = self.rules.max_pollution();
        if max <= 0 {
            return Err(ConfigError::NonPositiveMaxPollution { value: max });
        }
        Ok(())
    }
}

impl fmt::Debug for WorkerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerConfig")
            .field("size", &self.size)
            .field("rank", &self.rank)
            .field("workers", &self.workers)
            .field("initial", &self.initial.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smog_comm::ChannelMesh;
    use smog_test_utils::ConwayRules;

    fn solo_config() -> WorkerConfig {
        let mut endpoints = ChannelMesh::connect(1);
        WorkerConfig {
            size: 8,
            rank: Rank(0),
            workers: 1,
            comm: Box::new(endpoints.remove(0)),
            rules: Box::new(ConwayRules),
            initial: Some(FullGrid::new(8).unwrap()),
        }
    }

    #[test]
    fn validate_accepts_solo_config() {
        assert!(solo_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_tiny_grid() {
        let mut cfg = solo_config();
        cfg.size = 2;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::GridTooSmall { size: 2 })
        ));
    }

    #[test]
    fn validate_rejects_zero_workers() {
        let mut cfg = solo_config();
        cfg.workers = 0;
        assert!(matches!(cfg.validate(), Err(ConfigError::NoWorkers)));
    }

    #[test]
    fn validate_rejects_rank_outside_set() {
        let mut cfg = solo_config();
        cfg.rank = Rank(1);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::RankOutOfRange { .. })
        ));
    }

    #[test]
    fn validate_rejects_oversubscribed_grid() {
        // 8 rows across 5 workers: rows_per = 1, outer bands collapse.
        let mut endpoints = ChannelMesh::connect(5);
        let cfg = WorkerConfig {
            size: 8,
            rank: Rank(0),
            workers: 5,
            comm: Box::new(endpoints.remove(0)),
            rules: Box::new(ConwayRules),
            initial: Some(FullGrid::new(8).unwrap()),
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::TooManyWorkers {
                workers: 5,
                size: 8
            })
        ));
    }

    #[test]
    fn validate_rejects_transport_for_other_set() {
        let mut cfg = solo_config();
        let mut endpoints = ChannelMesh::connect(2);
        cfg.comm = Box::new(endpoints.remove(0));
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::TransportWorkerMismatch {
                config: 1,
                transport: 2
            })
        ));
    }

    #[test]
    fn validate_rejects_foreign_endpoint() {
        let mut endpoints = ChannelMesh::connect(2);
        let _ep0 = endpoints.remove(0);
        let cfg = WorkerConfig {
            size: 8,
            rank: Rank(0),
            workers: 2,
            comm: Box::new(endpoints.remove(0)),
            rules: Box::new(ConwayRules),
            initial: Some(FullGrid::new(8).unwrap()),
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::TransportRankMismatch { .. })
        ));
    }

    #[test]
    fn validate_requires_root_initial_grid() {
        let mut cfg = solo_config();
        cfg.initial = None;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::MissingInitialGrid)
        ));
    }

    #[test]
    fn validate_rejects_mis_sized_initial_grid() {
        let mut cfg = solo_config();
        cfg.initial = Some(FullGrid::new(9).unwrap());
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InitialGridSizeMismatch {
                expected: 8,
                got: 9
            })
        ));
    }

    #[test]
    fn validate_rejects_non_positive_max_pollution() {
        struct BadBound;
        impl Rules for BadBound {
            fn cell_next_state(&self, state: i32, _n: u32, _p: i32) -> i32 {
                state
            }
            fn next_pollution(&self, _s: i32, p: i32, _o: i32, _d: i32) -> i32 {
                p
            }
            fn max_pollution(&self) -> i32 {
                0
            }
        }
        let mut cfg = solo_config();
        cfg.rules = Box::new(BadBound);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NonPositiveMaxPollution { value: 0 })
        ));
    }

    #[test]
    fn non_root_needs_no_initial_grid() {
        let mut endpoints = ChannelMesh::connect(2);
        let _ep0 = endpoints.remove(0);
        let cfg = WorkerConfig {
            size: 8,
            rank: Rank(1),
            workers: 2,
            comm: Box::new(endpoints.remove(0)),
            rules: Box::new(ConwayRules),
            initial: None,
        };
        assert!(cfg.validate().is_ok());
    }
}
