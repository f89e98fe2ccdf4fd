//! Report assembly: a snapshot in, the bucket-layout text report out.
//!
//! The output shape is fixed and load-bearing: engineers diff these
//! reports across breakpoints, so the header labels, the width-8 value
//! columns and the ascending bucket lines must not drift between runs or
//! releases. Formatting is a pure function of the snapshot; nothing here
//! touches the host.

use crate::error::Result;
use crate::snapshot::{MapState, Payload, PayloadMode, Snapshot};
use crate::value::Value;

/// Fixed literal for a never-populated set.
pub const EMPTY_MESSAGE: &str = "Empty ck_rhs_t (map is NULL)";

/// Report-generation knobs. Only the payload policy exists today.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct RenderOptions {
    pub payload: PayloadMode,
}

impl RenderOptions {
    pub fn with_payload(payload: PayloadMode) -> Self {
        RenderOptions { payload }
    }
}

/// Capture `handle` and format the report in one call.
///
/// The usual entry point for command handlers; the split pieces
/// ([`Snapshot::capture`], [`format_report`]) stay public for embedders
/// that want to hold or compare snapshots.
pub fn render<V: Value>(handle: &V, options: RenderOptions) -> Result<String> {
    let snapshot = Snapshot::capture(handle, options.payload)?;
    Ok(format_report(&snapshot))
}

/// Format a snapshot. Deterministic: equal snapshots give equal bytes.
pub fn format_report(snapshot: &Snapshot) -> String {
    match snapshot {
        Snapshot::Empty => EMPTY_MESSAGE.to_string(),
        Snapshot::Map(map) => format_map(map),
    }
}

fn format_map(m: &MapState) -> String {
    let mut lines = Vec::with_capacity(m.slots.len() + 6);

    lines.push("map values:".to_string());
    lines.push(format!(
        "         mask {:>8}        step {:>8}",
        m.mask, m.step
    ));
    lines.push(format!(
        "  probe_limit {:>8} offset mask {:>8}",
        m.probe_limit, m.offset_mask
    ));
    lines.push(format!(
        "    n_entries {:>8}    capacity {:>8}",
        m.n_entries, m.capacity
    ));
    lines.push(format!(
        "         size {:>8} max_entries {:>8}",
        m.size, m.max_entries
    ));

    lines.push("map buckets:".to_string());
    for (i, slot) in m.slots.iter().enumerate() {
        lines.push(format!(
            "  {}) probes: {}, wanted: {}, probe_bound: {}, in_rh: {}, entry: {}",
            i,
            slot.probes,
            slot.wanted,
            slot.probe_bound,
            if slot.in_rh { 'T' } else { 'F' },
            fmt_payload(&slot.entry),
        ));
    }

    lines.join("\n")
}

fn fmt_payload(p: &Payload) -> String {
    match p {
        Payload::Null => "NULL".to_string(),
        Payload::Address(addr) => format!("{addr:#x}"),
        Payload::Text { text, .. } => format!("\"{}\"", text.escape_default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::SlotState;

    fn slot(probes: u64, wanted: u64, in_rh: bool, entry: Payload) -> SlotState {
        SlotState {
            probes,
            wanted,
            probe_bound: 4,
            in_rh,
            entry,
        }
    }

    // The exact transcript for a two-bucket map; guards both header
    // spacing and slot-line shape against drift.
    #[test]
    fn two_bucket_transcript() {
        let m = MapState {
            mask: 1,
            step: 2,
            probe_limit: 4,
            n_entries: 1,
            capacity: 2,
            size: 1,
            max_entries: 2,
            offset_mask: 1,
            slots: vec![
                slot(1, 0, false, Payload::Null),
                slot(2, 1, true, Payload::Address(0xABCDEF)),
            ],
        };
        let expected = "\
map values:
         mask        1        step        2
  probe_limit        4 offset mask        1
    n_entries        1    capacity        2
         size        1 max_entries        2
map buckets:
  0) probes: 1, wanted: 0, probe_bound: 4, in_rh: F, entry: NULL
  1) probes: 2, wanted: 1, probe_bound: 4, in_rh: T, entry: 0xabcdef";
        assert_eq!(format_report(&Snapshot::Map(m)), expected);
    }

    #[test]
    fn empty_snapshot_is_the_fixed_literal() {
        assert_eq!(format_report(&Snapshot::Empty), EMPTY_MESSAGE);
    }

    #[test]
    fn text_payload_renders_quoted() {
        let p = Payload::Text {
            addr: 0x1000,
            text: "key\n0".into(),
        };
        assert_eq!(fmt_payload(&p), "\"key\\n0\"");
    }

    #[test]
    fn negative_probe_bound_renders_signed() {
        let mut s = slot(0, 0, false, Payload::Null);
        s.probe_bound = -1;
        let m = MapState {
            mask: 0,
            step: 1,
            probe_limit: 1,
            n_entries: 0,
            capacity: 1,
            size: 0,
            max_entries: 1,
            offset_mask: 0,
            slots: vec![s],
        };
        let out = format_report(&Snapshot::Map(m));
        assert!(out.contains("probe_bound: -1,"));
    }

    #[test]
    fn wide_values_push_past_the_column() {
        // Width 8 is a minimum, not a truncation.
        let m = MapState {
            mask: 4294967295,
            step: 1,
            probe_limit: 1,
            n_entries: 0,
            capacity: 1,
            size: 0,
            max_entries: 1,
            offset_mask: 0,
            slots: vec![],
        };
        let out = format_report(&Snapshot::Map(m));
        assert!(out.contains("         mask 4294967295        step        1"));
    }
}
