//! Basic types and aliases used across the crate.

/// A trait that is `Send` for multi-threaded runtimes.
///
/// Trait bounds reference this alias instead of `Send` directly so a
/// single-threaded build can relax them in one place.
pub trait OptionalSend: Send {}
impl<T: Send + ?Sized> OptionalSend for T {}

/// A trait that is `Sync` for multi-threaded runtimes.
pub trait OptionalSync: Sync {}
impl<T: Sync + ?Sized> OptionalSync for T {}
