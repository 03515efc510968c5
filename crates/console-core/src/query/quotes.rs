//! Quotes table pipeline: filter, then sort, then paginate.
//!
//! Runs over the complete quote set so a match or a sort winner on any
//! backend page can show up on any table page.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::domain::{Cell, Quote};

use super::pagination::{page_count, slice_page, PageRequest, PagerState};

/// Sortable quote columns, read from the first quotation's first detail-request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortColumn {
    Id,
    Amount,
    Date,
}

impl SortColumn {
    pub fn label(self) -> &'static str {
        match self {
            SortColumn::Id => "ID",
            SortColumn::Amount => "Amount",
            SortColumn::Date => "Date",
        }
    }

    pub fn key(self, quote: &Quote) -> Option<SortKey> {
        match self {
            SortColumn::Id => quote.first_quotation().map(|q| SortKey::id(&q.id)),
            SortColumn::Amount => quote.first_request().map(|r| SortKey::Number(r.insured_amount)),
            SortColumn::Date => quote.first_request().map(|r| SortKey::date(&r.start_date)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn flip(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: SortColumn,
    pub order: SortOrder,
}

impl Default for SortState {
    fn default() -> Self {
        Self { column: SortColumn::Id, order: SortOrder::Ascending }
    }
}

impl SortState {
    /// Header click: a new column sorts ascending, the same column flips
    pub fn toggle(self, column: SortColumn) -> Self {
        if self.column == column {
            Self { column, order: self.order.flip() }
        } else {
            Self { column, order: SortOrder::Ascending }
        }
    }

    /// Arrow shown next to the header of `column`
    pub fn indicator(&self, column: SortColumn) -> &'static str {
        match (self.column == column, self.order) {
            (false, _) => "",
            (true, SortOrder::Ascending) => " ▲",
            (true, SortOrder::Descending) => " ▼",
        }
    }
}

/// Comparable value of one sort column
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Text(String),
    Number(f64),
    Date(NaiveDateTime),
}

impl SortKey {
    /// Quotation ids arrive as integers; anything else compares as text
    fn id(raw: &str) -> Self {
        match raw.trim().parse::<i64>() {
            Ok(n) => SortKey::Number(n as f64),
            Err(_) => SortKey::Text(raw.to_string()),
        }
    }

    /// Dates the backend reports in an unknown format compare as text,
    /// after every parsed date.
    fn date(raw: &str) -> Self {
        const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];
        const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

        let raw = raw.trim();
        for format in DATE_FORMATS {
            if let Ok(d) = NaiveDate::parse_from_str(raw, format) {
                return SortKey::Date(d.and_time(NaiveTime::default()));
            }
        }
        for format in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
                return SortKey::Date(dt);
            }
        }
        match DateTime::parse_from_rfc3339(raw) {
            Ok(dt) => SortKey::Date(dt.naive_utc()),
            Err(_) => SortKey::Text(raw.to_string()),
        }
    }

    /// Text is the fallback of a column that didn't parse; it stays behind
    /// parsed values in either direction.
    fn rank(&self) -> u8 {
        match self {
            SortKey::Number(_) | SortKey::Date(_) => 0,
            SortKey::Text(_) => 1,
        }
    }

    fn compare(&self, other: &SortKey, order: SortOrder) -> Ordering {
        let within = match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Date(a), SortKey::Date(b)) => a.cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => return self.rank().cmp(&other.rank()),
        };
        order.apply(within)
    }
}

/// View state of the quotes screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteView {
    pub search: String,
    pub sort: SortState,
    pub page: u32,
}

impl QuoteView {
    pub fn new(page: u32) -> Self {
        Self { page: page.max(1), ..Default::default() }
    }

    /// New search text; the result set changed, so start over at page 1
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    pub fn sort_by(&mut self, column: SortColumn) {
        self.sort = self.sort.toggle(column);
        self.page = 1;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuotePage {
    pub rows: Vec<Quote>,
    /// Quotes left after filtering, across all pages
    pub matched: usize,
    pub pager: PagerState,
}

/// Case-insensitive substring match on the branch name
pub fn matches_branch(quote: &Quote, needle_lower: &str) -> bool {
    needle_lower.is_empty() || quote.body.branch_name.to_lowercase().contains(needle_lower)
}

/// Filter, sort and slice `quotes` for display. Equal keys keep backend
/// order; quotes without a value for the column always come last.
pub fn compose(quotes: &[Quote], view: &QuoteView, page_size: usize) -> QuotePage {
    let needle = view.search.to_lowercase();
    let column = view.sort.column;
    let order = view.sort.order;

    let mut keyed: Vec<(Option<SortKey>, &Quote)> = quotes
        .iter()
        .filter(|q| matches_branch(q, &needle))
        .map(|q| (column.key(q), q))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => a.compare(b, order),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    let sorted: Vec<Quote> = keyed.into_iter().map(|(_, q)| q.clone()).collect();
    let matched = sorted.len();
    let last_page = page_count(matched, page_size) as u32;
    let request = PageRequest::new(view.page.min(last_page), page_size);

    QuotePage {
        rows: slice_page(&sorted, request),
        matched,
        pager: PagerState::for_local(request, matched),
    }
}

/// Headings of the quotes table
pub const QUOTE_COLUMNS: [&str; 5] = ["ID", "Amount", "Date", "Branch", "Distributor"];

/// Cells in the order of [`QUOTE_COLUMNS`]
pub fn quote_cells(quote: &Quote) -> Vec<Cell> {
    let request = quote.first_request();
    vec![
        Cell::optional(quote.first_quotation().map(|q| q.id.as_str())),
        Cell::optional(request.map(|r| format!("{:.2}", r.insured_amount)).as_deref()),
        Cell::optional(request.map(|r| r.start_date.as_str())),
        Cell::text(&quote.body.branch_name),
        Cell::text(&quote.body.distributor_name),
    ]
}
