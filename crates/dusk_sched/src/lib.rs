//! # dusk_sched - Delayed One-Shot Scheduling
//!
//! A small frame-driven queue for "play this in N seconds" requests:
//! delayed dialog, queued camera paths, deferred input restoration. The
//! queue releases at most one entry per frame, and only when the caller's
//! readiness check passes, so "only one of a kind plays at a time" falls
//! out of the caller's check instead of queue-side special cases.

pub mod queue;

pub use queue::SchedulingQueue;
