/// Events emitted while a topology is being built.
///
/// A phase brackets one stage of the workflow; tasks inside a phase report a known
/// number of steps so front-ends can render a bar.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards [`Progress`] events to an optional callback; silent without one.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    /// Runs `task` as a counted task of `total_steps` steps, bracketing it with
    /// `TaskStart` and `TaskFinish`.
    pub fn task<T>(&self, total_steps: u64, task: impl FnOnce() -> T) -> T {
        self.report(Progress::TaskStart { total_steps });
        let result = task();
        self.report(Progress::TaskFinish);
        result
    }
}
