//! Stack growth for deeply nested source.
//!
//! Array literals, parenthesized expressions and type expressions nest
//! without limit, and every phase that walks them (parsing, lowering,
//! assignability, formatting, dropping the AST) recurses once per level.
//! Wrapping the recursive entry point in [`ensure_sufficient_stack`] moves
//! the rest of the walk onto a fresh segment when the current one runs low.
//!
//! On `wasm32` the closure is called directly.

/// Grow when less than this remains.
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than [`RED_ZONE`] bytes remain.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
