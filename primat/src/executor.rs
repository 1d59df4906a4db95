//! Adaptive serial/parallel execution for bulk element-wise operations
//!
//! Every bulk operation asks [`ParallelExecutor::is_parallelable`] once and
//! then either loops on the calling thread or splits its row range into
//! contiguous blocks, one per worker, and blocks until all of them finish.
//! Workers only ever write to the rows of their own block, so no lock is
//! taken anywhere.
//!
//! Fallible variants stop at the first error: the failing worker raises a
//! shared flag, the others check it at each row boundary and return early,
//! and the first error observed is handed back to the caller.

use std::{
    fmt,
    ops::Range,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, OnceLock,
    },
};

use primat_core::{validation::checked_storage, MatrixElement, MatrixError, Shape};
use rayon::{prelude::*, ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use tracing::{debug, trace};

use crate::{config::ParallelConfig, Matrix};

/// Fork/join executor shared by every matrix derived from the same source
pub struct ParallelExecutor {
    config: ParallelConfig,
    pool: Option<ThreadPool>,
}

impl fmt::Debug for ParallelExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParallelExecutor")
            .field("config", &self.config)
            .field("dedicated_pool", &self.pool.is_some())
            .finish()
    }
}

impl ParallelExecutor {
    /// Create an executor, building a dedicated pool when `config.workers` is set
    pub fn new(config: ParallelConfig) -> Result<Self, ThreadPoolBuildError> {
        let pool = match config.workers {
            Some(workers) if config.enabled => {
                debug!(workers, "building dedicated matrix worker pool");
                Some(
                    ThreadPoolBuilder::new()
                        .num_threads(workers)
                        .thread_name(|index| format!("primat-worker-{index}"))
                        .build()?,
                )
            }
            _ => None,
        };

        Ok(Self { config, pool })
    }

    /// Executor that always runs on the calling thread
    pub fn serial() -> Self {
        Self {
            config: ParallelConfig::serial(),
            pool: None,
        }
    }

    /// Immutable default executor used by constructors that take none
    pub fn shared() -> Arc<Self> {
        static SHARED: OnceLock<Arc<ParallelExecutor>> = OnceLock::new();
        SHARED
            .get_or_init(|| {
                Arc::new(Self {
                    config: ParallelConfig::default(),
                    pool: None,
                })
            })
            .clone()
    }

    /// Get the configuration
    pub fn config(&self) -> &ParallelConfig {
        &self.config
    }

    /// Number of partitions a parallel run is split into
    pub fn workers(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => self
                .config
                .workers
                .unwrap_or_else(rayon::current_num_threads)
                .max(1),
        }
    }

    /// Whether a bulk operation over `shape` should run in parallel
    pub fn is_parallelable(&self, shape: Shape) -> bool {
        self.exceeds_threshold(shape.count())
    }

    /// Like [`is_parallelable`](Self::is_parallelable) for operations doing
    /// `ops_per_element` units of work per cell
    pub fn is_parallelable_scaled(&self, shape: Shape, ops_per_element: u64) -> bool {
        self.exceeds_threshold(shape.count().saturating_mul(ops_per_element))
    }

    fn exceeds_threshold(&self, ops: u64) -> bool {
        self.config.enabled && ops > self.config.min_count_for_parallel
    }

    /// Split `range` into contiguous, disjoint blocks, one per worker
    pub fn partition(&self, range: Range<usize>) -> Vec<Range<usize>> {
        if range.is_empty() {
            return Vec::new();
        }
        let block = block_len(range.len(), self.workers());
        let end = range.end;

        range
            .step_by(block)
            .map(|start| start..(start + block).min(end))
            .collect()
    }

    fn install<R, OP>(&self, op: OP) -> R
    where
        R: Send,
        OP: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    /// Visit every `(i, j)` of the rectangle exactly once
    pub fn run<F>(&self, rows: Range<usize>, cols: Range<usize>, op: F, parallel: bool)
    where
        F: Fn(usize, usize) + Sync,
    {
        trace!(parallel, rows = rows.len(), cols = cols.len(), "run");
        if !parallel {
            for i in rows {
                for j in cols.clone() {
                    op(i, j);
                }
            }
            return;
        }

        let blocks = self.partition(rows);
        self.install(|| {
            blocks.into_par_iter().for_each(|block| {
                for i in block {
                    for j in cols.clone() {
                        op(i, j);
                    }
                }
            })
        });
    }

    /// Fallible [`run`](Self::run), first error wins
    pub fn try_run<E, F>(
        &self,
        rows: Range<usize>,
        cols: Range<usize>,
        op: F,
        parallel: bool,
    ) -> Result<(), E>
    where
        E: Send,
        F: Fn(usize, usize) -> Result<(), E> + Sync,
    {
        trace!(parallel, rows = rows.len(), cols = cols.len(), "fallible run");
        if !parallel {
            for i in rows {
                for j in cols.clone() {
                    op(i, j)?;
                }
            }
            return Ok(());
        }

        let failed = AtomicBool::new(false);
        let blocks = self.partition(rows);
        self.install(|| {
            blocks.into_par_iter().try_for_each(|block| {
                for i in block {
                    if failed.load(Ordering::Relaxed) {
                        break;
                    }
                    for j in cols.clone() {
                        if let Err(error) = op(i, j) {
                            failed.store(true, Ordering::Relaxed);
                            return Err(error);
                        }
                    }
                }
                Ok(())
            })
        })
    }

    /// Mutate every cell of `cols` in every row-buffer
    ///
    /// `op` receives the row index within `buffers`, the column index and
    /// the cell.
    pub fn run_rows_mut<T, F>(&self, buffers: &mut [Vec<T>], cols: Range<usize>, op: F, parallel: bool)
    where
        T: Send,
        F: Fn(usize, usize, &mut T) + Sync,
    {
        let visit = |base: usize, chunk: &mut [Vec<T>]| {
            for (offset, row) in chunk.iter_mut().enumerate() {
                for j in cols.clone() {
                    op(base + offset, j, &mut row[j]);
                }
            }
        };

        trace!(parallel, rows = buffers.len(), cols = cols.len(), "row update");
        if !parallel {
            visit(0, buffers);
            return;
        }

        let block = block_len(buffers.len(), self.workers());
        self.install(|| {
            buffers
                .par_chunks_mut(block)
                .enumerate()
                .for_each(|(index, chunk)| visit(index * block, chunk))
        });
    }

    /// Allocate a `rows x cols` buffer whose cell `(i, j)` is `op(i, j)`
    pub fn generate<U, F>(&self, rows: usize, cols: usize, op: F, parallel: bool) -> Vec<Vec<U>>
    where
        U: Send,
        F: Fn(usize, usize) -> U + Sync,
    {
        let mut out: Vec<Vec<U>> = (0..rows).map(|_| Vec::with_capacity(cols)).collect();
        let fill = |base: usize, chunk: &mut [Vec<U>]| {
            for (offset, row) in chunk.iter_mut().enumerate() {
                let i = base + offset;
                row.extend((0..cols).map(|j| op(i, j)));
            }
        };

        trace!(parallel, rows, cols, "generate");
        if !parallel {
            fill(0, &mut out);
            return out;
        }

        let block = block_len(rows, self.workers());
        self.install(|| {
            out.par_chunks_mut(block)
                .enumerate()
                .for_each(|(index, chunk)| fill(index * block, chunk))
        });
        out
    }

    /// Fallible [`generate`](Self::generate); nothing is returned on error
    pub fn try_generate<U, E, F>(
        &self,
        rows: usize,
        cols: usize,
        op: F,
        parallel: bool,
    ) -> Result<Vec<Vec<U>>, E>
    where
        U: Send,
        E: Send,
        F: Fn(usize, usize) -> Result<U, E> + Sync,
    {
        let failed = AtomicBool::new(false);
        let mut out: Vec<Vec<U>> = (0..rows).map(|_| Vec::with_capacity(cols)).collect();
        let fill = |base: usize, chunk: &mut [Vec<U>]| -> Result<(), E> {
            for (offset, row) in chunk.iter_mut().enumerate() {
                if failed.load(Ordering::Relaxed) {
                    return Ok(());
                }
                let i = base + offset;
                for j in 0..cols {
                    match op(i, j) {
                        Ok(value) => row.push(value),
                        Err(error) => {
                            failed.store(true, Ordering::Relaxed);
                            return Err(error);
                        }
                    }
                }
            }
            Ok(())
        };

        trace!(parallel, rows, cols, "fallible generate");
        if !parallel {
            fill(0, &mut out)?;
            return Ok(out);
        }

        let block = block_len(rows, self.workers());
        self.install(|| {
            out.par_chunks_mut(block)
                .enumerate()
                .try_for_each(|(index, chunk)| fill(index * block, chunk))
        })?;
        Ok(out)
    }

    /// Naive triple-loop product `a x b`
    ///
    /// `op(acc, a_ik, b_kj)` accumulates into the destination cell. Each
    /// worker owns whole destination rows and walks `k` then `j` for them.
    pub fn multiply<T, U, R, F>(&self, a: &Matrix<T>, b: &Matrix<U>, op: F) -> primat_core::Result<Matrix<R>>
    where
        T: MatrixElement,
        U: MatrixElement,
        R: MatrixElement,
        F: Fn(&mut R, &T, &U) + Sync,
    {
        if a.cols() != b.rows() {
            return Err(MatrixError::ShapeMismatch {
                left: a.shape(),
                right: b.shape(),
            });
        }
        let (rows, inner, cols) = (a.rows(), a.cols(), b.cols());
        checked_storage::<R>(rows, cols)?;

        let parallel = self.is_parallelable_scaled(a.shape(), cols as u64);
        debug!(rows, inner, cols, parallel, "dispatching multiply");

        let lhs = a.as_rows();
        let rhs = b.as_rows();
        let kernel = |base: usize, chunk: &mut [Vec<R>]| {
            for (offset, dst) in chunk.iter_mut().enumerate() {
                for (a_ik, b_k) in lhs[base + offset].iter().zip(rhs) {
                    for (acc, b_kj) in dst.iter_mut().zip(b_k) {
                        op(acc, a_ik, b_kj);
                    }
                }
            }
        };

        let mut out = vec![vec![R::zero(); cols]; rows];
        if parallel {
            let block = block_len(rows, self.workers());
            self.install(|| {
                out.par_chunks_mut(block)
                    .enumerate()
                    .for_each(|(index, chunk)| kernel(index * block, chunk))
            });
        } else {
            kernel(0, &mut out);
        }

        Ok(a.derive(out, cols))
    }
}

fn block_len(len: usize, workers: usize) -> usize {
    len.div_ceil(workers.max(1)).max(1)
}
