use std::{cmp::Ordering, fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortKey<C> {
    pub column: C,
    pub direction: SortDirection,
}

/// Three-state column sort used by tables.
///
/// Clicking a column cycles unsorted -> ascending -> descending -> unsorted.
/// Clicking another column always starts it ascending. The string form is
/// `""`, `"column"` or `"-column"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortState<C>(Option<SortKey<C>>);

impl<C> Default for SortState<C> {
    fn default() -> Self {
        Self(None)
    }
}

impl<C: Copy + PartialEq> SortState<C> {
    pub const fn unsorted() -> Self {
        Self(None)
    }

    pub const fn ascending(column: C) -> Self {
        Self(Some(SortKey {
            column,
            direction: SortDirection::Ascending,
        }))
    }

    pub const fn descending(column: C) -> Self {
        Self(Some(SortKey {
            column,
            direction: SortDirection::Descending,
        }))
    }

    pub const fn key(&self) -> Option<SortKey<C>> {
        self.0
    }

    #[must_use]
    pub fn toggle(self, column: C) -> Self {
        match self.0 {
            Some(key) if key.column == column => match key.direction {
                SortDirection::Ascending => Self::descending(column),
                SortDirection::Descending => Self::unsorted(),
            },
            _ => Self::ascending(column),
        }
    }

    /// Applies the state to a per-column ascending comparator. Unsorted
    /// compares everything as equal.
    pub fn compare<T>(&self, a: &T, b: &T, by_column: impl Fn(C, &T, &T) -> Ordering) -> Ordering {
        match self.0 {
            None => Ordering::Equal,
            Some(SortKey {
                column,
                direction: SortDirection::Ascending,
            }) => by_column(column, a, b),
            Some(SortKey {
                column,
                direction: SortDirection::Descending,
            }) => by_column(column, b, a),
        }
    }

    /// Stable sort of `items`; leaves them untouched when unsorted.
    pub fn sort<T>(&self, items: &mut [T], by_column: impl Fn(C, &T, &T) -> Ordering) {
        if self.0.is_none() {
            return;
        }
        items.sort_by(|a, b| self.compare(a, b, &by_column));
    }
}

impl<C: AsRef<str>> fmt::Display for SortState<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            None => Ok(()),
            Some(key) => match key.direction {
                SortDirection::Ascending => write!(f, "{}", key.column.as_ref()),
                SortDirection::Descending => write!(f, "-{}", key.column.as_ref()),
            },
        }
    }
}

impl<C: FromStr> FromStr for SortState<C> {
    type Err = C::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self(None));
        }
        let (direction, column) = s.strip_prefix('-').map_or(
            (SortDirection::Ascending, s),
            |rest| (SortDirection::Descending, rest),
        );
        Ok(Self(Some(SortKey {
            column: column.parse()?,
            direction,
        })))
    }
}
