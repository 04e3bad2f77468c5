use crate::models::{Category, PercentageAllocation, VoteCounts};

// ── PercentageAllocator ───────────────────────────────────────────────────────

/// Stateless conversion from raw vote counts to display percentages.
///
/// The three returned integers always sum to exactly 100 and a category with
/// at least one vote is never shown as 0%, guaranteed by a floor step and a
/// drift-normalization step over the rounded shares. The all-zero tally is
/// the deliberate exception and maps to 0/0/0 rather than an arbitrary 100%.
pub struct PercentageAllocator;

impl PercentageAllocator {
    /// Allocate display percentages for one tally snapshot.
    ///
    /// Steps:
    /// 1. An empty tally short-circuits to 0/0/0.
    /// 2. Each share is `round(count / total * 100)`, half away from zero.
    /// 3. Floor: a positive count whose share rounded to 0 becomes 1, so
    ///    "if anyone voted for you, you are visible".
    /// 4. Normalize: whatever amount the sum drifted from 100 (at most ±2
    ///    with three categories) is absorbed by the current leader, first
    ///    maximal category winning ties in [`Category::ALL`] order.
    ///
    /// Total over every non-negative input; no side effects.
    pub fn allocate(counts: &VoteCounts) -> PercentageAllocation {
        // Widen before summing: three u64 counts cannot overflow a u128, so
        // shares stay exact even for absurd inputs.
        let total = Category::ALL
            .iter()
            .map(|c| counts.get(*c) as u128)
            .sum::<u128>();
        if total == 0 {
            return PercentageAllocation::default();
        }

        let mut pcts = [0i32; 3];
        for (i, cat) in Category::ALL.iter().enumerate() {
            let count = counts.get(*cat);
            let share = count as f64 / total as f64;
            pcts[i] = (share * 100.0).round() as i32;
            if count > 0 && pcts[i] == 0 {
                pcts[i] = 1;
            }
        }

        let sum: i32 = pcts.iter().sum();
        let diff = 100 - sum;
        if diff != 0 {
            // Strict comparison keeps the first maximal index on ties.
            let leader = pcts
                .iter()
                .enumerate()
                .reduce(|best, cur| if cur.1 > best.1 { cur } else { best })
                .map(|(i, _)| i)
                .unwrap_or(0);
            pcts[leader] += diff;
        }

        PercentageAllocation::new(pcts[0] as u8, pcts[1] as u8, pcts[2] as u8)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
