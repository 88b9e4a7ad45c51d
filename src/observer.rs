//! Task-boundary observation.
//!
//! The sequential traced runner calls into a [`TaskObserver`] around every
//! unit of work the decomposition would hand to the scheduler. This is the
//! moral equivalent of running the lab kernels under a trace tool: the task
//! graph can be reconstructed from the event stream without executing
//! anything in parallel.

use std::sync::Mutex;

/// The kind of work a task performs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TaskKind {
    /// A recursive sort decomposition over a range.
    Sort,
    /// A recursive merge decomposition over an output window.
    Merge,
    /// A sequential base-case sort.
    BaseSort,
    /// A sequential base-case merge.
    BaseMerge,
}

/// One recorded task boundary.
///
/// `offset` and `len` describe the range the task owns, in elements of the
/// destination buffer of that task.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TaskEvent {
    pub kind: TaskKind,
    pub offset: usize,
    pub len: usize,
    pub enter: bool,
}

/// Hook invoked around each task boundary.
///
/// Implementations must be cheap; the hot parallel path uses [`NoopObserver`]
/// and pays nothing for this seam.
pub trait TaskObserver {
    fn task_start(&self, kind: TaskKind, offset: usize, len: usize);
    fn task_end(&self, kind: TaskKind, offset: usize, len: usize);
}

/// Observer that does nothing.
pub struct NoopObserver;

impl TaskObserver for NoopObserver {
    #[inline]
    fn task_start(&self, _kind: TaskKind, _offset: usize, _len: usize) {}

    #[inline]
    fn task_end(&self, _kind: TaskKind, _offset: usize, _len: usize) {}
}

/// Records every task boundary in call order.
///
/// Event order is only meaningful under the sequential traced runner; under a
/// parallel runner the interleaving is whatever the workers produced.
#[derive(Debug, Default)]
pub struct TraceRecorder {
    events: Mutex<Vec<TaskEvent>>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the recorded events, leaving the recorder empty.
    pub fn take(&self) -> Vec<TaskEvent> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }
}

impl TaskObserver for TraceRecorder {
    fn task_start(&self, kind: TaskKind, offset: usize, len: usize) {
        self.events.lock().unwrap().push(TaskEvent {
            kind,
            offset,
            len,
            enter: true,
        });
    }

    fn task_end(&self, kind: TaskKind, offset: usize, len: usize) {
        self.events.lock().unwrap().push(TaskEvent {
            kind,
            offset,
            len,
            enter: false,
        });
    }
}
