//! Join and sort configuration.

use std::cmp::Ordering;

use crate::error::{ComposeError, ComposeResult};

/// Field name used by [`relation_set`](crate::relation_set) when none is
/// configured.
pub const DEFAULT_RELATION_NAME: &str = "relation";

/// Direction of one sort column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl SortOrder {
    /// Applies this direction to an ascending comparison.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// How the values of one sort column are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortFlag {
    /// Loose comparison: nulls first, then numbers, booleans and numeric
    /// strings by value, then other strings bytewise, then composites.
    #[default]
    Regular,
    /// Both sides converted to numbers.
    Numeric,
    /// Both sides converted to strings, compared bytewise.
    String,
    /// Strings compared after lower-casing.
    CaseInsensitive,
    /// Strings compared with digit runs ordered by numeric value.
    Natural,
    /// Natural ordering after lower-casing.
    NaturalCaseInsensitive,
}

/// A setting given once for all sort keys or once per key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setting<T> {
    /// One value broadcast to every key.
    All(T),
    /// One value per key, in key order.
    PerKey(Vec<T>),
}

impl<T: Copy> Setting<T> {
    /// Expands the setting to exactly `count` values.
    ///
    /// A per-key list whose length differs from `count` is an
    /// [`ComposeError::InvalidConfig`].
    pub fn expand(&self, count: usize, what: &str) -> ComposeResult<Vec<T>> {
        match self {
            Self::All(value) => Ok(vec![*value; count]),
            Self::PerKey(values) if values.len() == count => Ok(values.clone()),
            Self::PerKey(values) => Err(ComposeError::invalid_config(format!(
                "{what} has {} entries but there are {count} sort keys",
                values.len()
            ))),
        }
    }
}

impl From<SortOrder> for Setting<SortOrder> {
    fn from(value: SortOrder) -> Self {
        Self::All(value)
    }
}

impl From<Vec<SortOrder>> for Setting<SortOrder> {
    fn from(values: Vec<SortOrder>) -> Self {
        Self::PerKey(values)
    }
}

impl From<SortFlag> for Setting<SortFlag> {
    fn from(value: SortFlag) -> Self {
        Self::All(value)
    }
}

impl From<Vec<SortFlag>> for Setting<SortFlag> {
    fn from(values: Vec<SortFlag>) -> Self {
        Self::PerKey(values)
    }
}

/// Configuration for [`multisort`](crate::multisort).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortConfig {
    /// Column directions.
    pub directions: Setting<SortOrder>,
    /// Column comparison modes.
    pub flags: Setting<SortFlag>,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            directions: Setting::All(SortOrder::Ascending),
            flags: Setting::All(SortFlag::Regular),
        }
    }
}

impl SortConfig {
    /// Creates a configuration sorting every column ascending, regular.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the column directions.
    #[must_use]
    pub fn directions(mut self, directions: impl Into<Setting<SortOrder>>) -> Self {
        self.directions = directions.into();
        self
    }

    /// Sets the column comparison modes.
    #[must_use]
    pub fn flags(mut self, flags: impl Into<Setting<SortFlag>>) -> Self {
        self.flags = flags.into();
        self
    }
}

/// Configuration for the joiner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinConfig {
    /// Field that receives the matched foreign record.
    pub relation_name: String,
    /// Whether backfill may replace fields already on the primary record.
    pub overwrite: bool,
}

impl Default for JoinConfig {
    fn default() -> Self {
        Self {
            relation_name: DEFAULT_RELATION_NAME.to_string(),
            overwrite: false,
        }
    }
}

impl JoinConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the relation field name.
    #[must_use]
    pub fn relation_name(mut self, name: impl Into<String>) -> Self {
        self.relation_name = name.into();
        self
    }

    /// Sets whether backfill overwrites existing fields.
    #[must_use]
    pub const fn overwrite(mut self, value: bool) -> Self {
        self.overwrite = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let sort = SortConfig::default();
        assert_eq!(sort.directions, Setting::All(SortOrder::Ascending));
        assert_eq!(sort.flags, Setting::All(SortFlag::Regular));

        let join = JoinConfig::default();
        assert_eq!(join.relation_name, "relation");
        assert!(!join.overwrite);
    }

    #[test]
    fn builder_pattern() {
        let sort = SortConfig::new()
            .directions(vec![SortOrder::Descending, SortOrder::Ascending])
            .flags(SortFlag::Natural);
        assert_eq!(
            sort.directions,
            Setting::PerKey(vec![SortOrder::Descending, SortOrder::Ascending])
        );

        let join = JoinConfig::new().relation_name("owner").overwrite(true);
        assert_eq!(join.relation_name, "owner");
        assert!(join.overwrite);
    }

    #[test]
    fn setting_expansion() {
        assert_eq!(
            Setting::All(SortFlag::Numeric).expand(3, "flags").unwrap(),
            vec![SortFlag::Numeric; 3]
        );

        let err = Setting::PerKey(vec![SortOrder::Ascending])
            .expand(2, "directions")
            .unwrap_err();
        assert!(matches!(err, ComposeError::InvalidConfig { .. }));
        assert!(err.to_string().contains("directions has 1 entries"));
    }

    #[test]
    fn descending_reverses() {
        assert_eq!(SortOrder::Descending.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(SortOrder::Ascending.apply(Ordering::Less), Ordering::Less);
    }
}
