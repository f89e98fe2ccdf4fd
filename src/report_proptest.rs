#![cfg(test)]

// Property tests for the formatter kept inside the crate so they can
// build snapshots directly instead of going through value trees.
//
// Properties:
// - determinism: formatting a snapshot and its clone is byte-identical;
// - shape: a map report is always 6 header lines plus one line per slot;
// - order: slot lines carry strictly ascending bucket indices, and the
//   index prefix depends only on position, never on slot content;
// - null payloads render the literal NULL.

use crate::report::format_report;
use crate::snapshot::{MapState, Payload, SlotState, Snapshot};
use proptest::prelude::*;

fn arb_payload() -> impl Strategy<Value = Payload> {
    prop_oneof![
        Just(Payload::Null),
        (1u64..=u64::MAX).prop_map(Payload::Address),
        ((1u64..=u64::MAX), "[a-z0-9]{0,8}")
            .prop_map(|(addr, text)| Payload::Text { addr, text }),
    ]
}

fn arb_slot() -> impl Strategy<Value = SlotState> {
    (0u64..512, 0u64..512, -8i64..512, any::<bool>(), arb_payload()).prop_map(
        |(probes, wanted, probe_bound, in_rh, entry)| SlotState {
            probes,
            wanted,
            probe_bound,
            in_rh,
            entry,
        },
    )
}

fn arb_map() -> impl Strategy<Value = MapState> {
    let scalar = || 0u64..1 << 20;
    (
        proptest::collection::vec(arb_slot(), 1..=64),
        (
            scalar(),
            scalar(),
            scalar(),
            scalar(),
            scalar(),
            scalar(),
            scalar(),
        ),
    )
        .prop_map(
            |(slots, (step, probe_limit, n_entries, capacity, size, max_entries, offset_mask))| {
                MapState {
                    mask: slots.len() as u64 - 1,
                    step,
                    probe_limit,
                    n_entries,
                    capacity,
                    size,
                    max_entries,
                    offset_mask,
                    slots,
                }
            },
        )
}

proptest! {
    #[test]
    fn prop_format_is_deterministic(m in arb_map()) {
        let a = format_report(&Snapshot::Map(m.clone()));
        let b = format_report(&Snapshot::Map(m));
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_line_count_is_header_plus_slots(m in arb_map()) {
        let n = m.slots.len();
        let out = format_report(&Snapshot::Map(m));
        prop_assert_eq!(out.lines().count(), 6 + n);
    }

    #[test]
    fn prop_slot_lines_ascend(m in arb_map()) {
        let out = format_report(&Snapshot::Map(m));
        for (i, line) in out.lines().skip(6).enumerate() {
            let prefix = format!("  {}) probes: ", i);
            prop_assert!(line.starts_with(&prefix));
        }
    }

    #[test]
    fn prop_reorder_moves_content_not_indices(mut m in arb_map()) {
        let before = format_report(&Snapshot::Map(m.clone()));
        m.slots.reverse();
        let after = format_report(&Snapshot::Map(m));
        let strip = |s: &str| s.split_once(')').map(|(_, rest)| rest.to_string());
        let bodies_before: Vec<_> = before.lines().skip(6).map(|l| strip(l).unwrap()).collect();
        let mut bodies_after: Vec<_> = after.lines().skip(6).map(|l| strip(l).unwrap()).collect();
        bodies_after.reverse();
        // Same content set, repositioned; the index column stays put.
        prop_assert_eq!(bodies_before, bodies_after);
        for (i, line) in after.lines().skip(6).enumerate() {
            let prefix = format!("  {}) ", i);
            prop_assert!(line.starts_with(&prefix));
        }
    }

    #[test]
    fn prop_null_payload_renders_null(mut m in arb_map()) {
        m.slots[0].entry = Payload::Null;
        let out = format_report(&Snapshot::Map(m));
        let first_slot = out.lines().nth(6).unwrap();
        prop_assert!(first_slot.ends_with("entry: NULL"));
    }
}

proptest! {
    #[test]
    fn prop_mode_only_affects_entry_column(m in arb_map()) {
        // Address-mode rendering never shows quoted text.
        let out = format_report(&Snapshot::Map(MapState {
            slots: m
                .slots
                .iter()
                .cloned()
                .map(|mut s| {
                    if let Payload::Text { addr, .. } = s.entry {
                        s.entry = Payload::Address(addr);
                    }
                    s
                })
                .collect(),
            ..m
        }));
        for line in out.lines().skip(6) {
            let (_, entry) = line.rsplit_once("entry: ").unwrap();
            prop_assert!(!entry.starts_with('"'));
        }
    }
}
