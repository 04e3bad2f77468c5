use serde::{Deserialize, Serialize};

// ── Category ──────────────────────────────────────────────────────────────────

/// One of the three fixed provider buckets being tallied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Aws,
    Azure,
    Gc,
}

impl Category {
    /// Fixed enumeration order. Every place that needs a stable ordering
    /// (bar layout, the normalization tie-break) iterates this array.
    pub const ALL: [Category; 3] = [Category::Aws, Category::Azure, Category::Gc];

    /// Human-readable display name.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Aws => "AWS",
            Category::Azure => "Azure",
            Category::Gc => "Google Cloud",
        }
    }

    /// Wire field name as it appears in scores payloads.
    pub fn field(&self) -> &'static str {
        match self {
            Category::Aws => "aws",
            Category::Azure => "azure",
            Category::Gc => "gc",
        }
    }
}

// ── VoteCounts ────────────────────────────────────────────────────────────────

/// One snapshot of raw vote counts, one value per provider.
///
/// Immutable once constructed; a fresh instance arrives with every scores
/// event and is discarded after the allocation derived from it has been
/// applied to the display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteCounts {
    pub aws: u64,
    pub azure: u64,
    pub gc: u64,
}

impl VoteCounts {
    pub fn new(aws: u64, azure: u64, gc: u64) -> Self {
        Self { aws, azure, gc }
    }

    /// Count for a single category.
    pub fn get(&self, category: Category) -> u64 {
        match category {
            Category::Aws => self.aws,
            Category::Azure => self.azure,
            Category::Gc => self.gc,
        }
    }

    /// Sum of all three counts. Saturates rather than overflowing so the
    /// allocator stays total over every possible input.
    pub fn total(&self) -> u64 {
        self.aws.saturating_add(self.azure).saturating_add(self.gc)
    }

    /// `true` when no category has received a vote.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

// ── PercentageAllocation ─────────────────────────────────────────────────────

/// The three display percentages driving the bar widths.
///
/// Invariant: the components sum to exactly 100 for any allocation produced
/// from a non-empty [`VoteCounts`]; the all-zero tally yields 0/0/0 (the one
/// sanctioned exception, so an empty tally never reads as a 100% landslide).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PercentageAllocation {
    pub aws: u8,
    pub azure: u8,
    pub gc: u8,
}

impl PercentageAllocation {
    pub fn new(aws: u8, azure: u8, gc: u8) -> Self {
        Self { aws, azure, gc }
    }

    /// Percentage for a single category.
    pub fn get(&self, category: Category) -> u8 {
        match category {
            Category::Aws => self.aws,
            Category::Azure => self.azure,
            Category::Gc => self.gc,
        }
    }

    /// Sum of the three components (100 for any non-empty tally, 0 otherwise).
    pub fn sum(&self) -> u16 {
        self.aws as u16 + self.azure as u16 + self.gc as u16
    }

    /// The category currently holding the largest percentage, first maximal
    /// in [`Category::ALL`] order winning ties. `None` for the empty tally.
    pub fn leader(&self) -> Option<Category> {
        if self.sum() == 0 {
            return None;
        }
        Category::ALL
            .iter()
            .copied()
            .reduce(|best, cat| if self.get(cat) > self.get(best) { cat } else { best })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
