//! Row-at-a-time transformation pipeline.
//!
//! RowSource -> VariableBinder -> QueryEvaluator -> DedupWindow -> Emitter, one row
//! at a time on the calling thread. Auxiliary memory is the dedup window plus the
//! row in flight, independent of the input size.

use crate::config::TransformConfig;
use crate::core::{Header, Row, VariableBinder};
use crate::error::{Error, Result};
use crate::execution::emitter::Emitter;
use crate::querying::QueryEvaluator;
use crate::sources::RowSource;
use crate::stream::DedupWindow;
use log::{debug, info, warn};
use serde::Serialize;
use std::io::{Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Lifecycle of a pipeline run. `Done` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Init,
    Streaming,
    Draining,
    Done,
    Failed,
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed)
    }
}

/// Metrics collected during a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineMetrics {
    /// Data rows read, the header row excluded
    pub rows_read: u64,
    /// Rows dropped because their evaluation failed
    pub rows_skipped: u64,
    /// Rows whose length differed from the header
    pub ragged_rows: u64,
    pub triples_produced: u64,
    pub triples_emitted: u64,
    pub triples_suppressed: u64,
    pub elapsed_seconds: f64,
    /// True when the run was stopped before the input ended
    pub interrupted: bool,
}

impl PipelineMetrics {
    pub fn rows_per_second(&self) -> f64 {
        if self.elapsed_seconds > 0.0 {
            self.rows_read as f64 / self.elapsed_seconds
        } else {
            0.0
        }
    }

    pub fn suppression_rate(&self) -> f64 {
        if self.triples_produced > 0 {
            (self.triples_suppressed as f64 / self.triples_produced as f64) * 100.0
        } else {
            0.0
        }
    }
}

pub struct Pipeline<E: QueryEvaluator> {
    config: TransformConfig,
    evaluator: E,
    state: PipelineState,
    should_stop: Option<Arc<AtomicBool>>,
}

impl<E: QueryEvaluator> Pipeline<E> {
    pub fn new(config: TransformConfig, evaluator: E) -> Self {
        Self {
            config,
            evaluator,
            state: PipelineState::Init,
            should_stop: None,
        }
    }

    /// Stops reading rows once `flag` is raised. The output is still finalized.
    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.should_stop = Some(flag);
        self
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Runs the pipeline to completion.
    ///
    /// A pipeline runs once: calling this again after a terminal state is a
    /// configuration error.
    pub fn run<R: Read, W: Write>(&mut self, input: R, output: W) -> Result<PipelineMetrics> {
        if self.state.is_terminal() {
            return Err(Error::Config("the pipeline has already run".to_string()));
        }

        let start_time = Instant::now();
        let mut metrics = PipelineMetrics::default();

        match self.execute(input, output, &mut metrics) {
            Ok(()) => {
                metrics.elapsed_seconds = start_time.elapsed().as_secs_f64();
                self.transition(PipelineState::Done);
                info!(
                    "Transformed {} rows into {} triples ({} suppressed, {} skipped) in {:.2}s",
                    metrics.rows_read,
                    metrics.triples_emitted,
                    metrics.triples_suppressed,
                    metrics.rows_skipped,
                    metrics.elapsed_seconds
                );
                Ok(metrics)
            }
            Err(err) => {
                self.transition(PipelineState::Failed);
                Err(err)
            }
        }
    }

    fn execute<R: Read, W: Write>(
        &mut self,
        input: R,
        output: W,
        metrics: &mut PipelineMetrics,
    ) -> Result<()> {
        let dialect = self.config.validate()?;
        let mut source = RowSource::new(input, dialect);
        let (header, mut pending) = read_header(&mut source, self.config.has_header)?;
        debug!("Header variables: {:?}", header.names());

        let mut window = DedupWindow::new(self.config.dedup_window);
        let mut emitter =
            Emitter::start(self.config.output_format, self.evaluator.prefixes(), output)?;
        let mut binder = VariableBinder::new();

        self.transition(PipelineState::Streaming);

        loop {
            if self.stop_requested() {
                info!("Stop requested, finishing after {} rows", metrics.rows_read);
                metrics.interrupted = true;
                break;
            }

            let row = match pending.take() {
                Some(row) => row,
                None => match source.next_row()? {
                    Some(row) => row,
                    None => break,
                },
            };
            metrics.rows_read += 1;

            let bindings = binder.bind(&header, &row);
            let triples = match self.evaluator.evaluate(&bindings) {
                Ok(triples) => triples,
                Err(e) => {
                    let err = Error::Evaluation {
                        row: row.number,
                        message: e.to_string(),
                    };
                    if self.config.strict {
                        return Err(err);
                    }
                    warn!("Skipping row: {}", err);
                    metrics.rows_skipped += 1;
                    continue;
                }
            };

            debug!("Row {} produced {} triples", row.number, triples.len());
            metrics.triples_produced += triples.len() as u64;

            for triple in &triples {
                if window.consider(triple) {
                    emitter.emit(triple)?;
                    metrics.triples_emitted += 1;
                } else {
                    metrics.triples_suppressed += 1;
                }
            }
        }

        metrics.ragged_rows = binder.ragged_rows();

        self.transition(PipelineState::Draining);
        emitter.finish()?;
        Ok(())
    }

    fn stop_requested(&self) -> bool {
        self.should_stop.as_ref().map_or(false, |flag| flag.load(Ordering::Relaxed))
    }

    fn transition(&mut self, next: PipelineState) {
        debug!("Pipeline {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

/// Builds the header before any row is bound.
///
/// With a header row the first row names the variables and is not evaluated.
/// Without one the synthetic header is sized from the first row, which is handed
/// back to be processed as data.
fn read_header<R: Read>(
    source: &mut RowSource<R>,
    has_header: bool,
) -> Result<(Header, Option<Row>)> {
    let first = source.next_row()?;
    Ok(match (has_header, first) {
        (true, Some(row)) => (Header::from_names(&row.cells), None),
        (false, Some(row)) => (Header::synthetic(row.len()), Some(row)),
        (_, None) => (Header::synthetic(0), None),
    })
}
