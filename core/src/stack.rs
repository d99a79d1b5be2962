//! Stack growth for the recursive parts of parsing and evaluation.
//!
//! Evaluation recurses once per node, so a program well inside the
//! block-call limit can still nest deeper than the host thread's stack
//! (rayon workers and test threads get 2 MB). [`ensure_sufficient_stack`]
//! moves the recursion onto a heap-allocated segment before that happens.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if the red zone has been reached.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
