//! Background worker for running engine jobs without blocking the REPL.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread::{self, JoinHandle};

use proforma_core::{
    LeverValues, OptimizationOutcome, OptimizationTarget, SimulationConfig, SimulationError,
    SimulationProgress, SimulationSummary, run_optimization, run_simulation,
};

/// Request sent to the background worker
#[derive(Debug)]
pub enum EngineRequest {
    /// Run a Monte Carlo simulation
    Simulate {
        levers: LeverValues,
        config: SimulationConfig,
    },
    /// Run a goal-seek optimization
    Optimize {
        levers: LeverValues,
        target: OptimizationTarget,
    },
    /// Graceful shutdown
    Shutdown,
}

/// Response from the background worker
#[derive(Debug)]
pub enum EngineResponse {
    /// Simulation finished (boxed to keep the enum small)
    SimulationComplete(Box<SimulationSummary>),
    /// Optimization finished
    OptimizationComplete(Box<OptimizationOutcome>),
    /// The running job was cancelled
    Cancelled,
    /// Error occurred
    Error(String),
}

/// Background worker that runs engine jobs on a separate thread
pub struct EngineWorker {
    request_tx: Sender<EngineRequest>,
    response_rx: Receiver<EngineResponse>,
    cancel_flag: Arc<AtomicBool>,
    progress: Arc<AtomicUsize>,
    progress_total: Arc<AtomicUsize>,
    thread: Option<JoinHandle<()>>,
}

impl EngineWorker {
    /// Create a new worker with a background thread
    pub fn new() -> Self {
        let (request_tx, request_rx) = channel();
        let (response_tx, response_rx) = channel();
        let cancel_flag = Arc::new(AtomicBool::new(false));
        let progress = Arc::new(AtomicUsize::new(0));
        let progress_total = Arc::new(AtomicUsize::new(0));

        let ctx = WorkerContext {
            response_tx,
            cancel_flag: cancel_flag.clone(),
            progress: progress.clone(),
            progress_total: progress_total.clone(),
        };

        let thread = thread::spawn(move || {
            ctx.run(request_rx);
        });

        Self {
            request_tx,
            response_rx,
            cancel_flag,
            progress,
            progress_total,
            thread: Some(thread),
        }
    }

    /// Send a request to the worker, clearing state from the previous job
    pub fn send(&self, request: EngineRequest) -> bool {
        self.cancel_flag.store(false, Ordering::SeqCst);
        self.progress.store(0, Ordering::SeqCst);
        self.progress_total.store(0, Ordering::SeqCst);
        self.request_tx.send(request).is_ok()
    }

    /// Try to receive a response (non-blocking)
    pub fn try_recv(&self) -> Option<EngineResponse> {
        self.response_rx.try_recv().ok()
    }

    /// Completed and total iteration counts of the running simulation
    pub fn progress(&self) -> (usize, usize) {
        (
            self.progress.load(Ordering::SeqCst),
            self.progress_total.load(Ordering::SeqCst),
        )
    }

    /// Request cancellation of the current job
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::SeqCst);
    }

    /// Check if cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::SeqCst)
    }

    /// Shutdown the worker thread
    pub fn shutdown(&self) {
        let _ = self.request_tx.send(EngineRequest::Shutdown);
    }
}

impl Default for EngineWorker {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for EngineWorker {
    fn drop(&mut self) {
        self.shutdown();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// Shared state for the background worker thread.
struct WorkerContext {
    response_tx: Sender<EngineResponse>,
    cancel_flag: Arc<AtomicBool>,
    progress: Arc<AtomicUsize>,
    progress_total: Arc<AtomicUsize>,
}

impl WorkerContext {
    fn run(&self, request_rx: Receiver<EngineRequest>) {
        while let Ok(request) = request_rx.recv() {
            match request {
                EngineRequest::Shutdown => break,

                EngineRequest::Simulate { levers, config } => {
                    tracing::info!(
                        iterations = config.iterations,
                        seed = ?config.seed,
                        "Starting simulation"
                    );
                    self.progress.store(0, Ordering::SeqCst);
                    self.progress_total.store(config.iterations, Ordering::SeqCst);

                    let progress = SimulationProgress::from_atomics(
                        self.progress.clone(),
                        self.progress_total.clone(),
                        self.cancel_flag.clone(),
                    );

                    match run_simulation(&levers, &config, Some(&progress)) {
                        Ok(summary) => {
                            let _ = self
                                .response_tx
                                .send(EngineResponse::SimulationComplete(Box::new(summary)));
                        }
                        Err(SimulationError::Cancelled) => {
                            let _ = self.response_tx.send(EngineResponse::Cancelled);
                        }
                        Err(e) => {
                            let _ = self.response_tx.send(EngineResponse::Error(e.to_string()));
                        }
                    }
                }

                EngineRequest::Optimize { levers, target } => {
                    tracing::info!(
                        metric = %target.metric,
                        value = target.value,
                        "Starting optimization"
                    );
                    if self.cancel_flag.load(Ordering::SeqCst) {
                        let _ = self.response_tx.send(EngineResponse::Cancelled);
                        continue;
                    }

                    let outcome = run_optimization(&levers, &target);
                    let _ = self
                        .response_tx
                        .send(EngineResponse::OptimizationComplete(Box::new(outcome)));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use proforma_core::TargetMetric;

    use super::*;

    fn recv_with_timeout(worker: &EngineWorker) -> EngineResponse {
        let deadline = Instant::now() + Duration::from_secs(30);
        loop {
            if let Some(response) = worker.try_recv() {
                return response;
            }
            assert!(Instant::now() < deadline, "worker did not respond in time");
            thread::sleep(Duration::from_millis(5));
        }
    }

    /// Test a full simulate round trip through the worker thread.
    #[test]
    fn test_simulate_round_trip() {
        let worker = EngineWorker::new();
        let sent = worker.send(EngineRequest::Simulate {
            levers: LeverValues::new(),
            config: SimulationConfig {
                iterations: 300,
                seed: Some(42),
            },
        });
        assert!(sent);

        match recv_with_timeout(&worker) {
            EngineResponse::SimulationComplete(summary) => {
                assert_eq!(summary.iterations, 300);
                let (completed, total) = worker.progress();
                assert_eq!(completed, 300);
                assert_eq!(total, 300);
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    /// Test an optimize round trip.
    #[test]
    fn test_optimize_round_trip() {
        let worker = EngineWorker::new();
        worker.send(EngineRequest::Optimize {
            levers: LeverValues::new(),
            target: OptimizationTarget {
                metric: TargetMetric::Ebit,
                value: 1_200.0,
            },
        });

        match recv_with_timeout(&worker) {
            EngineResponse::OptimizationComplete(outcome) => {
                assert!(outcome.converged);
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    /// Test that sending a new job clears a stale cancellation.
    #[test]
    fn test_send_clears_stale_cancel() {
        let worker = EngineWorker::new();
        worker.cancel();
        assert!(worker.is_cancelled());

        worker.send(EngineRequest::Optimize {
            levers: LeverValues::new(),
            target: OptimizationTarget {
                metric: TargetMetric::Ebit,
                value: 0.0,
            },
        });
        assert!(!worker.is_cancelled());

        match recv_with_timeout(&worker) {
            EngineResponse::OptimizationComplete(_) => {}
            other => panic!("stale cancel leaked into the new job: {other:?}"),
        }
    }
}
