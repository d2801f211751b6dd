//! Fan-out of independent jobs over the rayon pool.
//!
//! A [`Sweep`] moves `Idle -> Dispatching -> Collecting -> Done`. Every job
//! must succeed: the first failing (or panicking) job, by index, aborts the
//! sweep with [`SimError::Worker`]. Outputs come back in submission order.

use crate::error::{SimError, SimResult};
use rayon::prelude::*;
use std::{any::Any, fmt::Display, panic::{self, AssertUnwindSafe}};
use tracing::debug;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SweepState {
    Idle,
    Dispatching,
    Collecting,
    Done,
}

#[derive(Clone, Debug)]
pub struct Sweep<I> {
    label: &'static str,
    jobs: Vec<I>,
    state: SweepState,
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}

impl<I> Sweep<I>
where
    I: Sync,
{
    pub fn new(label: &'static str, jobs: Vec<I>) -> Self {
        Self { label, jobs, state: SweepState::Idle }
    }

    pub fn state(&self) -> SweepState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn jobs(&self) -> &[I] {
        &self.jobs
    }

    /// Run `f(index, job)` for every job in parallel.
    pub fn run<O, E, F>(&mut self, f: F) -> SimResult<Vec<O>>
    where
        O: Send,
        E: Display,
        F: Fn(usize, &I) -> Result<O, E> + Sync + Send,
    {
        self.state = SweepState::Dispatching;
        debug!(sweep = self.label, jobs = self.jobs.len(), "dispatching");
        let mut results: Vec<(usize, Result<O, String>)> = self.jobs
            .par_iter()
            .enumerate()
            .map(|(k, job)| {
                let out = match panic::catch_unwind(AssertUnwindSafe(|| f(k, job))) {
                    Ok(Ok(o)) => Ok(o),
                    Ok(Err(e)) => Err(e.to_string()),
                    Err(payload) => Err(panic_message(payload)),
                };
                (k, out)
            })
            .collect();

        self.state = SweepState::Collecting;
        results.sort_by_key(|(k, _)| *k);
        let out = results
            .into_iter()
            .map(|(job, r)| r.map_err(|message| SimError::Worker { job, message }))
            .collect::<SimResult<Vec<O>>>();
        self.state = SweepState::Done;
        debug!(sweep = self.label, ok = out.is_ok(), "collected");
        out
    }
}
