//! Operation counters for the analysis engines.
//!
//! The engines keep no ambient state: every run receives its own working
//! arrays, and observability is limited to `tracing` calls plus these
//! explicit counters. Callers that want instrumentation pass a
//! `&mut Counters` to the `*_with` entry points; the plain entry points
//! discard the counts.

/// Work counters accumulated by one engine invocation.
///
/// Each engine touches the subset that is meaningful for it: the SCC
/// engine counts vertices and stack operations, the orderer counts queue
/// operations, the path engine counts vertices and edge relaxations.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Counters {
    /// Vertices taken off the work list and processed.
    pub vertices_visited: u64,
    /// Edge relaxations attempted (including skipped ones).
    pub edges_relaxed: u64,
    /// Pushes onto the Tarjan component stack.
    pub stack_ops: u64,
    /// Pushes onto the Kahn FIFO queue.
    pub queue_ops: u64,
}

impl Counters {
    /// Fold another counter set into this one.
    pub fn absorb(&mut self, other: Self) {
        self.vertices_visited += other.vertices_visited;
        self.edges_relaxed += other.edges_relaxed;
        self.stack_ops += other.stack_ops;
        self.queue_ops += other.queue_ops;
    }
}
