use serde::{Deserialize, Serialize};

/// Ordering applied to the filtered product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Preserve the order products arrived in.
    #[default]
    None,
    NewestFirst,
    OldestFirst,
    /// Seeded shuffle; stable for a fixed seed and fixed list content.
    Random,
}

impl std::str::FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(SortMode::None),
            "newest" | "new-to-old" => Ok(SortMode::NewestFirst),
            "oldest" | "old-to-new" => Ok(SortMode::OldestFirst),
            "random" => Ok(SortMode::Random),
            other => Err(format!(
                "unknown sort mode \"{other}\" (expected none, newest, oldest, or random)"
            )),
        }
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortMode::None => write!(f, "none"),
            SortMode::NewestFirst => write!(f, "newest"),
            SortMode::OldestFirst => write!(f, "oldest"),
            SortMode::Random => write!(f, "random"),
        }
    }
}

/// The filter/sort/search state the derived view is computed from.
///
/// This value object is the single source of truth for what the view
/// pipeline produces. `None` on `collection`/`vendor` means "all".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewQuery {
    /// Free-text search string. Trimmed before matching; empty means no
    /// search filter.
    pub search: String,
    /// Exact collection-title filter, or `None` for all collections.
    pub collection: Option<String>,
    /// Exact vendor filter, or `None` for all vendors.
    pub vendor: Option<String>,
    pub sort: SortMode,
    /// Shuffle seed in `[0, 1)`. Only meaningful when `sort` is
    /// [`SortMode::Random`].
    pub seed: f64,
}

impl Default for ViewQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            collection: None,
            vendor: None,
            sort: SortMode::None,
            seed: 0.0,
        }
    }
}

impl ViewQuery {
    /// Returns `true` when no stage of the pipeline would drop or reorder
    /// anything: empty search, both filters at "all", and no sorting.
    #[must_use]
    pub fn is_passthrough(&self) -> bool {
        self.search.trim().is_empty()
            && self.collection.is_none()
            && self.vendor.is_none()
            && self.sort == SortMode::None
    }
}
