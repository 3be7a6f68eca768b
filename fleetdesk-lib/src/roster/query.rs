//! The read side of the roster: search, filter, sort and paginate.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::roster::{DriverRecord, DriverStatus};

/// Number of drivers on one page of the roster view.
pub const ITEMS_PER_PAGE: usize = 10;

#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    pub fn matches(self, status: DriverStatus) -> bool {
        match self {
            Self::All => true,
            Self::Active => status == DriverStatus::Active,
            Self::Inactive => status == DriverStatus::Inactive,
        }
    }
}

/// Every field a roster can be sorted by, named after the driver field it compares.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
#[serde(rename_all = "camelCase")]
pub enum SortColumn {
    Id,
    Name,
    Company,
    LicenseNumber,
    Status,
    Email,
    Phone,
    Address,
    HireDate,
    PerformanceRating,
    ProfilePhoto,
}

impl SortColumn {
    /// Ascending comparison of two drivers on this column.
    pub fn compare(self, a: &DriverRecord, b: &DriverRecord) -> Ordering {
        match self {
            Self::Id => a.id().cmp(&b.id()),
            Self::Name => a.name().cmp(b.name()),
            Self::Company => a.company().cmp(b.company()),
            Self::LicenseNumber => a.license_number().cmp(b.license_number()),
            Self::Status => a.status().cmp(&b.status()),
            Self::Email => a.email().cmp(b.email()),
            Self::Phone => a.phone().cmp(b.phone()),
            Self::Address => a.address().cmp(b.address()),
            Self::HireDate => a.hire_date().cmp(&b.hire_date()),
            Self::PerformanceRating => a.performance_rating().total_cmp(&b.performance_rating()),
            Self::ProfilePhoto => a.profile_photo().cmp(b.profile_photo()),
        }
    }
}

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum SortDirection {
    #[default]
    #[strum(to_string = "asc", serialize = "ascending")]
    #[serde(rename = "asc")]
    Ascending,
    #[strum(to_string = "desc", serialize = "descending")]
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl SortState {
    /// The sort state after the header of `column` has been selected.
    pub fn toggle(&self, column: SortColumn) -> Self {
        if self.column == column {
            Self {
                column,
                direction: self.direction.reversed(),
            }
        } else {
            // A different column than the currently sorted one has been selected
            Self {
                column,
                direction: SortDirection::Ascending,
            }
        }
    }

    pub fn compare(&self, a: &DriverRecord, b: &DriverRecord) -> Ordering {
        self.direction.apply(self.column.compare(a, b))
    }

    /// Arrow shown next to the header of `column`, if it is the sorted one.
    pub fn indicator(&self, column: SortColumn) -> Option<&'static str> {
        (self.column == column).then_some(match self.direction {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        })
    }
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            column: SortColumn::Name,
            direction: SortDirection::Ascending,
        }
    }
}

/// The view state a caller keeps between roster queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterQuery {
    /// Matched case-insensitively against driver names
    pub search_term: String,
    pub status_filter: StatusFilter,
    pub sort: SortState,
    /// 1-based
    pub page: usize,
}

impl RosterQuery {
    pub fn new(sort: SortState, status_filter: StatusFilter) -> Self {
        Self {
            sort,
            status_filter,
            ..Default::default()
        }
    }

    pub fn sort_by(&mut self, column: SortColumn) {
        self.sort = self.sort.toggle(column);
    }

    /// Change the search term, returning to the first page.
    pub fn search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.page = 1;
    }

    /// Change the status filter, returning to the first page.
    pub fn filter(&mut self, status_filter: StatusFilter) {
        self.status_filter = status_filter;
        self.page = 1;
    }

    /// Keep the current page within `[1, total_pages]`.
    pub fn clamp_page(&mut self, total_pages: usize) {
        self.page = self.page.clamp(1, total_pages.max(1));
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.page = self.page.saturating_add(1);
        self.clamp_page(total_pages);
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    fn matches(&self, needle: &str, record: &DriverRecord) -> bool {
        self.status_filter.matches(record.status())
            && record.name().to_lowercase().contains(needle)
    }
}

impl Default for RosterQuery {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            status_filter: StatusFilter::All,
            sort: SortState::default(),
            page: 1,
        }
    }
}

/// One page of a roster query.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterPage<'a> {
    pub drivers: Vec<&'a DriverRecord>,
    /// The page that was requested
    pub page: usize,
    /// Never less than 1, even when nothing matched
    pub total_pages: usize,
    /// How many drivers matched across all pages
    pub total_count: usize,
}

impl RosterPage<'_> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Run `query` over `records`. Ties in the sort order keep the order of `records`, and a page
/// past the end comes back empty.
pub fn run<'a>(
    records: impl IntoIterator<Item = &'a DriverRecord>,
    query: &RosterQuery,
) -> RosterPage<'a> {
    let needle = query.search_term.to_lowercase();

    let mut matched: Vec<&DriverRecord> = records
        .into_iter()
        .filter(|record| query.matches(&needle, record))
        .collect();

    // `sort_by` is stable
    matched.sort_by(|a, b| query.sort.compare(a, b));

    let total_count = matched.len();
    let start = query.page.saturating_sub(1).saturating_mul(ITEMS_PER_PAGE);

    RosterPage {
        drivers: matched
            .into_iter()
            .skip(start)
            .take(ITEMS_PER_PAGE)
            .collect(),
        page: query.page,
        total_pages: total_count.div_ceil(ITEMS_PER_PAGE).max(1),
        total_count,
    }
}
