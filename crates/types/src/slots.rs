//! The canonical daily schedule.
//!
//! Persisted activity maps are keyed by these labels verbatim (note the U+2013 en-dash),
//! and every rendered schedule lists all of them in this order.

pub const SLOT_COUNT: usize = 12;

pub const TIME_SLOTS: [&str; SLOT_COUNT] = [
    "07h00\u{2013}07h30 Morning care & breakfast",
    "07h30\u{2013}08h00 Arrival / Free play",
    "08h00\u{2013}08h40 Morning ring / News",
    "08h40\u{2013}09h00 Music / Movement",
    "09h00\u{2013}09h30 Free play & Fruit routine",
    "09h30\u{2013}10h30 Creative art activities",
    "10h30\u{2013}11h00 Toilet routine & Snack",
    "11h00\u{2013}11h20 Free play",
    "11h20\u{2013}12h00 Structured outside play",
    "12h00\u{2013}12h30 Story time",
    "12h30\u{2013}12h40 Pack away time",
    "12h40 Home time",
];

/// Position of `label` in the canonical schedule, compared byte-for-byte.
pub fn slot_index(label: &str) -> Option<usize> {
    TIME_SLOTS.iter().position(|slot| *slot == label)
}

pub fn is_canonical_slot(label: &str) -> bool {
    slot_index(label).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_unique() {
        for (i, slot) in TIME_SLOTS.iter().enumerate() {
            assert_eq!(slot_index(slot), Some(i));
        }
    }

    #[test]
    fn hyphen_is_not_an_en_dash() {
        assert!(is_canonical_slot("07h00\u{2013}07h30 Morning care & breakfast"));
        assert!(!is_canonical_slot("07h00-07h30 Morning care & breakfast"));
    }
}
