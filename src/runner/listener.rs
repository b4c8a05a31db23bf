//! Result listeners
//!
//! The runner pushes events; a `ResultListener` consumes them. Each handler
//! runs to completion before the next event is read.

use std::io::{self, Write};

use super::stream::RunEvent;
use crate::cli::display::render_feedback_message;
use crate::cli::{
    render_step, render_step_summary, render_summary, render_test_result, RenderOptions,
};
use crate::results::{Test, WorkflowResult};

/// Receives results as the runner reports them
pub trait ResultListener {
    /// A test finished
    fn on_test_result(&mut self, test: &Test) -> io::Result<()>;

    /// The workflow finished; called once, after every test result
    fn on_workflow_result(&mut self, result: &WorkflowResult) -> io::Result<()>;
}

/// Route an event to the matching listener handler.
pub fn dispatch<L: ResultListener + ?Sized>(listener: &mut L, event: &RunEvent) -> io::Result<()> {
    match event {
        RunEvent::TestResult(test) => listener.on_test_result(test),
        RunEvent::WorkflowResult(result) => listener.on_workflow_result(result),
        RunEvent::Unknown { .. } => Ok(()),
    }
}

/// Renders results to a terminal (or any writer)
pub struct ConsoleReporter<W: Write> {
    out: W,
    options: RenderOptions,
}

impl<W: Write> ConsoleReporter<W> {
    /// Create a reporter writing to `out`
    pub const fn new(out: W, options: RenderOptions) -> Self {
        Self { out, options }
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ResultListener for ConsoleReporter<W> {
    fn on_test_result(&mut self, test: &Test) -> io::Result<()> {
        render_test_result(&mut self.out, test)?;
        if !test.passed || self.options.verbose {
            render_step_summary(&mut self.out, &test.steps)?;
            for step in &test.steps {
                render_step(&mut self.out, step, self.options)?;
            }
        }
        self.out.flush()
    }

    fn on_workflow_result(&mut self, result: &WorkflowResult) -> io::Result<()> {
        render_summary(&mut self.out, result)?;
        render_feedback_message(&mut self.out)?;
        self.out.flush()
    }
}
