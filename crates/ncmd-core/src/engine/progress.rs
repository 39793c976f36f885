/// Events emitted by long-running workflows.
///
/// A workflow is a sequence of named phases; a phase may contain one counted task.
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

/// Forwards [`Progress`] events to an optional callback.
///
/// A reporter without a callback discards every event, which is what library callers
/// and tests usually want.
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

    pub fn message(&self, text: impl Into<String>) {
        if self.callback.is_some() {
            self.report(Progress::Message(text.into()));
        }
    }

    /// Runs `body` between a `PhaseStart` and a `PhaseFinish` event.
    ///
    /// `PhaseFinish` is only reported when `body` succeeds.
    pub fn phase<T, E>(
        &self,
        name: &'static str,
        body: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        self.report(Progress::PhaseStart { name });
        let result = body()?;
        self.report(Progress::PhaseFinish);
        Ok(result)
    }
}
