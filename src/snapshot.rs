//! Snapshot capture: one pass over a live `ck_rhs_t`, out comes plain data.
//!
//! `capture` walks the handle exactly once: the eight scalar configuration
//! fields of the map, then every slot descriptor in ascending bucket order
//! (`map.entries.descs[0..=mask]`, the physical layout order). The result
//! owns nothing but plain integers, strings and a `Vec`, so the formatting
//! layer above is a pure function and re-rendering an unchanged snapshot
//! is byte-identical.
//!
//! Field values are trusted as given; the only validation is that each
//! expected field exists and coerces. A failure there propagates: it
//! means either the inspected layout or this crate is wrong, and there is
//! no state to unwind.

use tracing::debug;

use crate::error::Result;
use crate::value::Value;

/// How a non-null `entry` pointer is materialized.
///
/// The underlying set stores opaque `void *` payloads; whether those point
/// at printable key text is something only the embedder knows. Nothing in
/// the inspected memory disambiguates, so the choice is explicit here
/// rather than guessed.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum PayloadMode {
    /// Render the pointer value only. Never dereferences payloads.
    #[default]
    Address,
    /// Dereference every payload as NUL-terminated text; undecodable
    /// pointers are an error.
    Text,
    /// Try text, fall back to the address.
    Auto,
}

/// A slot's occupant, as materialized under some [`PayloadMode`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Payload {
    Null,
    Address(u64),
    Text { addr: u64, text: String },
}

/// Per-slot diagnostic state, one per bucket.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SlotState {
    pub probes: u64,
    pub wanted: u64,
    /// Signed on purpose: the probe bound is compared and printed as a
    /// signed decimal by the toolchain this report is read next to.
    pub probe_bound: i64,
    pub in_rh: bool,
    pub entry: Payload,
}

/// The map's configuration scalars plus every slot, bucket order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MapState {
    pub mask: u64,
    pub step: u64,
    pub probe_limit: u64,
    pub n_entries: u64,
    pub capacity: u64,
    pub size: u64,
    pub max_entries: u64,
    pub offset_mask: u64,
    pub slots: Vec<SlotState>,
}

/// Result of one capture pass over a `ck_rhs_t` handle.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Snapshot {
    /// `map` was NULL: the set was never populated, or its first
    /// allocation failed.
    Empty,
    Map(MapState),
}

impl Snapshot {
    /// Capture from a `ck_rhs_t`-shaped handle (a struct with a `map`
    /// field). Handles that *are* the map descriptor go through
    /// [`MapState::capture`] directly.
    pub fn capture<V: Value>(handle: &V, mode: PayloadMode) -> Result<Snapshot> {
        let map = handle.field("map")?;
        if map.is_null() {
            return Ok(Snapshot::Empty);
        }
        Ok(Snapshot::Map(MapState::capture(&map, mode)?))
    }
}

impl MapState {
    /// Capture a map descriptor: scalars first, then slots ascending.
    pub fn capture<V: Value>(map: &V, mode: PayloadMode) -> Result<MapState> {
        let mask = map.field("mask")?.as_u64()?;
        let step = map.field("step")?.as_u64()?;
        let probe_limit = map.field("probe_limit")?.as_u64()?;
        let n_entries = map.field("n_entries")?.as_u64()?;
        let capacity = map.field("capacity")?.as_u64()?;
        let size = map.field("size")?.as_u64()?;
        let max_entries = map.field("max_entries")?.as_u64()?;
        let offset_mask = map.field("offset_mask")?.as_u64()?;

        // Slot array lives behind the entries union as `descs`.
        let descs = map.field("entries")?.field("descs")?;
        let mut slots = Vec::with_capacity((mask as usize).saturating_add(1));
        for i in 0..=mask {
            slots.push(SlotState::capture(&descs.index(i)?, mode)?);
        }
        debug!(mask, slots = slots.len(), "captured ck_rhs map state");

        Ok(MapState {
            mask,
            step,
            probe_limit,
            n_entries,
            capacity,
            size,
            max_entries,
            offset_mask,
            slots,
        })
    }
}

impl SlotState {
    fn capture<V: Value>(desc: &V, mode: PayloadMode) -> Result<SlotState> {
        Ok(SlotState {
            probes: desc.field("probes")?.as_u64()?,
            wanted: desc.field("wanted")?.as_u64()?,
            probe_bound: desc.field("probe_bound")?.as_i64()?,
            in_rh: desc.field("in_rh")?.as_u64()? != 0,
            entry: Payload::capture(&desc.field("entry")?, mode)?,
        })
    }
}

impl Payload {
    fn capture<V: Value>(entry: &V, mode: PayloadMode) -> Result<Payload> {
        if entry.is_null() {
            return Ok(Payload::Null);
        }
        match mode {
            PayloadMode::Address => Ok(Payload::Address(entry.as_u64()?)),
            PayloadMode::Text => Ok(Payload::Text {
                addr: entry.as_u64()?,
                text: entry.deref_cstr()?,
            }),
            PayloadMode::Auto => match entry.deref_cstr() {
                Ok(text) => Ok(Payload::Text {
                    addr: entry.as_u64()?,
                    text,
                }),
                Err(_) => Ok(Payload::Address(entry.as_u64()?)),
            },
        }
    }
}
