use super::store::AttributeStore;
use crate::kind::AttributeType;
use crate::raw_value::RawValue;
use smol_str::SmolStr;
use std::cmp::Ordering;
use std::collections::btree_map;
use std::iter::Peekable;

/// One differing key: `(key, old, new)`. A missing side means the key was
/// absent from that snapshot.
pub type RawChange<'a> = (&'a SmolStr, Option<&'a RawValue>, Option<&'a RawValue>);

impl AttributeStore {
    // ════════════════════════════════════════════════════════════════════════
    // Change tracking (baseline vs. current)
    // ════════════════════════════════════════════════════════════════════════

    /// True when anything was set, changed or cleared since the last load or
    /// flush.
    #[inline]
    pub fn changed(&self) -> bool {
        self.raw != self.baseline
    }

    /// Sorted names of every key whose value differs from the baseline,
    /// including keys that were added or removed.
    pub fn changed_keys(&self) -> Vec<SmolStr> {
        self.changes().map(|(key, _, _)| key.clone()).collect()
    }

    #[inline]
    pub fn attribute_changed(&self, name: &str) -> bool {
        self.raw.get(name) != self.baseline.get(name)
    }

    /// `(old, new)` as `T` when `name` changed, otherwise `None`.
    pub fn change<T: AttributeType>(
        &self,
        name: &str,
    ) -> Option<(Option<T::Value>, Option<T::Value>)> {
        if !self.declares::<T>(name) || !self.attribute_changed(name) {
            return None;
        }
        Some((
            self.baseline.get(name).and_then(T::from_raw),
            self.raw.get(name).and_then(T::from_raw),
        ))
    }

    /// Every differing key with its raw old and new value, in key order.
    pub fn changes(&self) -> Changes<'_> {
        Changes {
            old: self.baseline.iter().peekable(),
            new: self.raw.iter().peekable(),
        }
    }
}

// ─── Changes iterator ───────────────────────────────────────────────────────

/// Merge-walk over the two sorted snapshots.
pub struct Changes<'a> {
    old: Peekable<btree_map::Iter<'a, SmolStr, RawValue>>,
    new: Peekable<btree_map::Iter<'a, SmolStr, RawValue>>,
}

impl<'a> Iterator for Changes<'a> {
    type Item = RawChange<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let order = match (self.old.peek(), self.new.peek()) {
                (None, None) => return None,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some((ok, _)), Some((nk, _))) => ok.cmp(nk),
            };
            match order {
                Ordering::Less => {
                    let (key, old) = self.old.next()?;
                    return Some((key, Some(old), None));
                }
                Ordering::Greater => {
                    let (key, new) = self.new.next()?;
                    return Some((key, None, Some(new)));
                }
                Ordering::Equal => {
                    let (key, old) = self.old.next()?;
                    let (_, new) = self.new.next()?;
                    if old != new {
                        return Some((key, Some(old), Some(new)));
                    }
                }
            }
        }
    }
}
