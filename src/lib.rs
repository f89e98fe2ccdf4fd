//! rhs-inspect: a read-only state inspector for `ck_rhs_t` robin-hood
//! hash sets, bound to any debugger host through a minimal
//! structured-value interface.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: render the bucket array of a live (or core-dumped) `ck_rhs_t`
//!   as a deterministic text report, without ever naming a concrete
//!   debugger API below the command layer.
//! - Layers:
//!   - Value (trait): the five accessors a host-backed value must
//!     provide (field lookup, indexing, null test, integer coercion,
//!     C-string dereference).
//!   - MemValue: owned `Rc`-backed value trees implementing Value;
//!     reference implementation, test fixture type, and the embedding
//!     path for hosts that materialize snapshots.
//!   - Snapshot (MapState/SlotState/Payload): one capture pass over
//!     `map.entries.descs[0..=mask]` into plain data.
//!   - Report: pure formatting of a snapshot; `render` composes
//!     capture + format.
//!   - Command: `Host` trait, `CommandRegistry`, and the `print_rhs_t`
//!     handler with its usage/error conventions.
//!
//! Constraints
//! - Read-only: no write ever reaches the inspected process; every
//!   entity is a transient projection discarded after one report.
//! - Stateless: nothing persists between invocations; a failed capture
//!   aborts that invocation only.
//! - Deterministic: equal snapshots format to identical bytes, and slot
//!   lines follow physical bucket order (ascending indices), never
//!   logical or insertion order.
//! - Single pass: capture reads each field once, header then slots; no
//!   recursion, no re-reads.
//!
//! Payload policy
//! - The set stores opaque `void *` payloads. Whether a payload points at
//!   printable key text is knowledge only the embedder has, so the
//!   rendering policy is an explicit [`PayloadMode`] (address / text /
//!   auto-detect), defaulting to addresses.
//!
//! Failure boundaries
//! - Usage and evaluation errors are recovered inside the command handler
//!   and surface as operator-visible text.
//! - Field-access errors while capturing mean the inspected layout and
//!   this crate disagree; they propagate unhandled.
//!
//! Notes and non-goals
//! - No expression parsing, process attachment, or symbol resolution;
//!   those stay in the host behind [`Host::evaluate`].
//! - No mutation of, or locking against, the inspected process; the host
//!   supplies a frozen or externally-synchronized snapshot.
//! - The crate installs no tracing subscriber; hosts bring their own.

mod command;
mod error;
mod mem;
mod report;
mod report_proptest;
mod snapshot;
mod value;

// Public surface
pub use command::{Command, CommandRegistry, Host, PrintRhsCommand, USAGE};
pub use error::{Error, Result};
pub use mem::MemValue;
pub use report::{format_report, render, RenderOptions, EMPTY_MESSAGE};
pub use snapshot::{MapState, Payload, PayloadMode, SlotState, Snapshot};
pub use value::Value;
