use enough::StopReason;

/// Observer for transcode progress.
///
/// Every call sees `image_started` once, then zero or more
/// `image_progress` reports with non-decreasing percentages in `[0, 100)`,
/// then exactly one of `image_complete` or `aborted`.
pub trait ProgressListener {
    fn image_started(&mut self) {}

    /// Called after each destination row on windowed paths.
    fn image_progress(&mut self, _percent: f32) {}

    fn image_complete(&mut self) {}

    fn aborted(&mut self) {}
}

/// Listener that ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressListener for NoProgress {}

/// Result of an operation that can be cancelled cooperatively.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome<T> {
    Complete(T),
    /// Stopped at a row boundary; nothing was produced.
    Aborted(StopReason),
}

impl<T> Outcome<T> {
    pub fn is_complete(&self) -> bool {
        matches!(self, Outcome::Complete(_))
    }

    pub fn complete(self) -> Option<T> {
        match self {
            Outcome::Complete(v) => Some(v),
            Outcome::Aborted(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Complete(v) => Outcome::Complete(f(v)),
            Outcome::Aborted(r) => Outcome::Aborted(r),
        }
    }
}
