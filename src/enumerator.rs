//! Crawl target enumeration.
//!
//! Every source is addressed either by a flat page number or by a calendar
//! position (month, or day within a month). An [`Enumeration`] describes the
//! bounds for one source and [`Enumeration::targets`] walks them lazily in
//! crawl order.
//!
//! # Calendar walks
//!
//! Calendar sources are crawled newest first:
//!
//! ```text
//! start_year:  start_month, start_month - 1, ..., 1
//! then:        12, 11, ..., 1   for every year down to end_year
//! ```
//!
//! Day walks descend from the month's last day to the 1st. Only the very first
//! month of a walk may be partial, see [`PartialMonth`].

use crate::calendar::days_in_month;
use std::fmt;

/// One addressable listing page of a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlTarget {
    Page(u32),
    Month { year: i32, month: u32 },
    Day { year: i32, month: u32, day: u32 },
}

impl fmt::Display for CrawlTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrawlTarget::Page(page) => write!(f, "page {}", page),
            CrawlTarget::Month { year, month } => write!(f, "{}-{:02}", year, month),
            CrawlTarget::Day { year, month, day } => {
                write!(f, "{}-{:02}-{:02}", year, month, day)
            }
        }
    }
}

/// Shape of the first month of a day walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartialMonth {
    /// The whole month, last day down to the 1st.
    Full,
    /// Start at the given day and walk down to the 1st.
    Through(u32),
    /// Start at the month's last day and stop after the given day.
    DownTo(u32),
}

impl PartialMonth {
    /// `(first day visited, last day visited)` for a month of `days` days.
    fn bounds(self, days: u32) -> (u32, u32) {
        match self {
            PartialMonth::Full => (days, 1),
            PartialMonth::Through(day) => (day.min(days), 1),
            PartialMonth::DownTo(day) => (days, day.max(1)),
        }
    }
}

/// Bounds and addressing scheme of one source's crawl.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enumeration {
    /// Inclusive page range. Counts down when `start > end`.
    Pages { start: u32, end: u32 },
    /// One target per month, newest first.
    Months {
        start_year: i32,
        start_month: u32,
        end_year: i32,
    },
    /// One target per day, newest first.
    Days {
        start_year: i32,
        start_month: u32,
        first_month: PartialMonth,
        end_year: i32,
    },
}

impl Enumeration {
    /// Walk the targets from the beginning.
    pub fn targets(&self) -> Targets {
        let walk = match *self {
            Enumeration::Pages { start, end } => Walk::Pages {
                next: Some(start),
                end,
            },
            Enumeration::Months {
                start_year,
                start_month,
                end_year,
            } => Walk::Months(MonthWalk::new(start_year, start_month, end_year)),
            Enumeration::Days {
                start_year,
                start_month,
                first_month,
                end_year,
            } => Walk::Days(DayWalk {
                months: MonthWalk::new(start_year, start_month, end_year),
                first_month: Some(first_month),
                current: None,
                day: 0,
                floor: 1,
            }),
        };
        Targets { walk }
    }

    /// Replace the outer bounds: pages for page sources, years for calendar
    /// sources. `None` keeps the existing bound.
    pub fn with_range(self, start: Option<u32>, end: Option<u32>) -> Self {
        let year = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);
        match self {
            Enumeration::Pages { start: s, end: e } => Enumeration::Pages {
                start: start.unwrap_or(s),
                end: end.unwrap_or(e),
            },
            Enumeration::Months {
                start_year,
                start_month,
                end_year,
            } => Enumeration::Months {
                start_year: start.map(year).unwrap_or(start_year),
                start_month,
                end_year: end.map(year).unwrap_or(end_year),
            },
            Enumeration::Days {
                start_year,
                start_month,
                first_month,
                end_year,
            } => Enumeration::Days {
                start_year: start.map(year).unwrap_or(start_year),
                start_month,
                first_month,
                end_year: end.map(year).unwrap_or(end_year),
            },
        }
    }

    /// Replace where the first calendar period begins. Ignored for page
    /// sources; `start_day` only applies to day walks, where it is always the
    /// first day visited, whatever shape the default first month had.
    pub fn with_first_period(self, start_month: Option<u32>, start_day: Option<u32>) -> Self {
        match self {
            Enumeration::Pages { .. } => self,
            Enumeration::Months {
                start_year,
                start_month: m,
                end_year,
            } => Enumeration::Months {
                start_year,
                start_month: start_month.unwrap_or(m),
                end_year,
            },
            Enumeration::Days {
                start_year,
                start_month: m,
                first_month,
                end_year,
            } => {
                let first_month = start_day.map_or(first_month, PartialMonth::Through);
                Enumeration::Days {
                    start_year,
                    start_month: start_month.unwrap_or(m),
                    first_month,
                    end_year,
                }
            }
        }
    }
}

/// Lazy iterator over the targets of an [`Enumeration`].
#[derive(Debug, Clone)]
pub struct Targets {
    walk: Walk,
}

#[derive(Debug, Clone)]
enum Walk {
    Pages { next: Option<u32>, end: u32 },
    Months(MonthWalk),
    Days(DayWalk),
}

impl Iterator for Targets {
    type Item = CrawlTarget;

    fn next(&mut self) -> Option<CrawlTarget> {
        match &mut self.walk {
            Walk::Pages { next, end } => {
                let page = (*next)?;
                *next = match page.cmp(end) {
                    std::cmp::Ordering::Less => Some(page + 1),
                    std::cmp::Ordering::Greater => Some(page - 1),
                    std::cmp::Ordering::Equal => None,
                };
                Some(CrawlTarget::Page(page))
            }
            Walk::Months(months) => months
                .next()
                .map(|(year, month)| CrawlTarget::Month { year, month }),
            Walk::Days(days) => days.next(),
        }
    }
}

/// Descending `(year, month)` cursor.
#[derive(Debug, Clone)]
struct MonthWalk {
    cursor: Option<(i32, u32)>,
    end_year: i32,
}

impl MonthWalk {
    fn new(start_year: i32, start_month: u32, end_year: i32) -> Self {
        let cursor = (start_year >= end_year && start_month >= 1)
            .then(|| (start_year, start_month.min(12)));
        Self { cursor, end_year }
    }
}

impl Iterator for MonthWalk {
    type Item = (i32, u32);

    fn next(&mut self) -> Option<(i32, u32)> {
        let (year, month) = self.cursor?;
        self.cursor = if month > 1 {
            Some((year, month - 1))
        } else if year > self.end_year {
            Some((year - 1, 12))
        } else {
            None
        };
        Some((year, month))
    }
}

#[derive(Debug, Clone)]
struct DayWalk {
    months: MonthWalk,
    /// Consumed by the first month of the walk.
    first_month: Option<PartialMonth>,
    current: Option<(i32, u32)>,
    day: u32,
    floor: u32,
}

impl Iterator for DayWalk {
    type Item = CrawlTarget;

    fn next(&mut self) -> Option<CrawlTarget> {
        loop {
            if let Some((year, month)) = self.current {
                if self.day >= self.floor {
                    let day = self.day;
                    self.day -= 1;
                    return Some(CrawlTarget::Day { year, month, day });
                }
            }

            let (year, month) = self.months.next()?;
            let days = days_in_month(month, year);
            let (top, floor) = self
                .first_month
                .take()
                .unwrap_or(PartialMonth::Full)
                .bounds(days);
            self.current = Some((year, month));
            self.day = top;
            self.floor = floor.max(1);
        }
    }
}
