//! Pagination arithmetic.
//!
//! All page math happens here. Repositories only ever receive a
//! resolved [`Pagination`] window; front-ends only ever present a
//! [`PageState`].

use std::str::FromStr;

use thiserror::Error;

use crate::repositories::Pagination;

/// Bounds for the user-selectable page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    pub min_per_page: u64,
    pub max_per_page: u64,
    pub default_per_page: u64,
}

impl Default for PageBounds {
    fn default() -> Self {
        Self {
            min_per_page: 5,
            max_per_page: 100,
            default_per_page: 10,
        }
    }
}

impl PageBounds {
    pub const fn new(min_per_page: u64, max_per_page: u64, default_per_page: u64) -> Self {
        Self {
            min_per_page,
            max_per_page,
            default_per_page,
        }
    }

    /// Clamps a requested page size into the configured range.
    pub fn clamp_per_page(&self, per_page: u64) -> u64 {
        per_page.clamp(self.min_per_page, self.max_per_page)
    }

    /// Resolves an optional raw `per_page` parameter. Missing or
    /// unparseable values fall back to the default, numeric values
    /// are clamped.
    pub fn per_page_from_param(&self, param: Option<&str>) -> u64 {
        match param.map(str::trim).and_then(|s| s.parse::<u64>().ok()) {
            Some(n) => self.clamp_per_page(n),
            None => self.default_per_page,
        }
    }
}

/// Resolves an optional raw `page` parameter. Missing or unparseable
/// values mean the first page. Range clamping happens later in
/// [`PageState::new`] because it needs the total.
pub fn page_from_param(param: Option<&str>) -> u64 {
    param
        .map(str::trim)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(1)
}

/// The fully resolved paging state of one listing request.
///
/// An empty result set still has one (empty) page, so `page` and
/// `total_pages` are always at least 1 and navigation never has to
/// special-case zero rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub total: u64,
    pub per_page: u64,
    pub page: u64,
    pub total_pages: u64,
    pub offset: u64,
}

impl PageState {
    /// Derives the page state from a total row count, a page size and
    /// a requested page number. `per_page` must be positive; the
    /// requested page is clamped into `1..=total_pages`.
    pub fn new(total: u64, per_page: u64, page: u64) -> Self {
        debug_assert!(per_page > 0);
        let total_pages = total.div_ceil(per_page).max(1);
        let page = page.clamp(1, total_pages);
        let offset = (page - 1) * per_page;
        Self {
            total,
            per_page,
            page,
            total_pages,
            offset,
        }
    }

    /// Re-derives the state from a raw row offset, e.g. after a
    /// sequence of [`PageCommand`]s has moved the cursor.
    pub fn from_offset(total: u64, per_page: u64, offset: u64) -> Self {
        debug_assert!(per_page > 0);
        Self::new(total, per_page, offset / per_page + 1)
    }

    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// The page numbers to offer as direct links, at most `radius`
    /// on each side of the current page.
    pub fn window(&self, radius: u64) -> impl Iterator<Item = u64> {
        let first = self.page.saturating_sub(radius).max(1);
        let last = (self.page + radius).min(self.total_pages);
        first..=last
    }

    pub const fn to_pagination(self) -> Pagination {
        Pagination {
            offset: self.offset,
            limit: self.per_page,
        }
    }
}

/// A navigation command as typed at a listing prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCommand {
    Next,
    Previous,
    First,
    Last,
    Goto(u64),
    Exit,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PageCommandError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Page {page} is out of range 1..={total_pages}")]
    PageOutOfRange { page: u64, total_pages: u64 },
}

impl FromStr for PageCommand {
    type Err = PageCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "+" => Ok(Self::Next),
            "-" => Ok(Self::Previous),
            "<<" => Ok(Self::First),
            ">>" => Ok(Self::Last),
            "0" => Ok(Self::Exit),
            _ => match s.parse::<u64>() {
                Ok(page) => Ok(Self::Goto(page)),
                Err(_) => Err(PageCommandError::UnknownCommand(s.to_string())),
            },
        }
    }
}

impl PageCommand {
    /// Applies the command to a row offset, returning the new offset
    /// or `None` on [`PageCommand::Exit`].
    ///
    /// `Next` advances unconditionally. Stepping past the last page
    /// yields an offset beyond the data, which renders as an empty
    /// page that `-` or `<<` recovers from; the behavior is kept
    /// because the total may have grown since it was read.
    pub fn apply(
        self,
        offset: u64,
        per_page: u64,
        total_pages: u64,
    ) -> Result<Option<u64>, PageCommandError> {
        debug_assert!(per_page > 0);
        debug_assert!(total_pages > 0);
        let next = match self {
            Self::Next => offset + per_page,
            Self::Previous => offset.saturating_sub(per_page),
            Self::First => 0,
            Self::Last => (total_pages - 1) * per_page,
            Self::Goto(page) => {
                if page < 1 || page > total_pages {
                    return Err(PageCommandError::PageOutOfRange { page, total_pages });
                }
                (page - 1) * per_page
            }
            Self::Exit => return Ok(None),
        };
        Ok(Some(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_state_basic() {
        let s = PageState::new(95, 20, 5);
        assert_eq!(5, s.total_pages);
        assert_eq!(5, s.page);
        assert_eq!(80, s.offset);
        assert!(s.has_previous());
        assert!(!s.has_next());
    }

    #[test]
    fn page_state_empty_total_has_one_page() {
        let s = PageState::new(0, 10, 1);
        assert_eq!(1, s.total_pages);
        assert_eq!(1, s.page);
        assert_eq!(0, s.offset);
        assert!(!s.has_previous());
        assert!(!s.has_next());
    }

    #[test]
    fn page_state_exact_multiple() {
        let s = PageState::new(100, 20, 1);
        assert_eq!(5, s.total_pages);

        let s = PageState::new(101, 20, 1);
        assert_eq!(6, s.total_pages);
    }

    #[test]
    fn page_state_clamps_requested_page() {
        let s = PageState::new(30, 10, 99);
        assert_eq!(3, s.page);
        assert_eq!(20, s.offset);

        let s = PageState::new(30, 10, 0);
        assert_eq!(1, s.page);
        assert_eq!(0, s.offset);
    }

    #[test]
    fn page_state_from_offset() {
        let s = PageState::from_offset(95, 20, 80);
        assert_eq!(5, s.page);
        assert_eq!(80, s.offset);

        let s = PageState::from_offset(95, 20, 0);
        assert_eq!(1, s.page);
    }

    #[test]
    fn window_is_clipped_to_valid_pages() {
        let s = PageState::new(100, 10, 1);
        assert_eq!(vec![1, 2, 3], s.window(2).collect::<Vec<_>>());

        let s = PageState::new(100, 10, 5);
        assert_eq!(vec![3, 4, 5, 6, 7], s.window(2).collect::<Vec<_>>());

        let s = PageState::new(100, 10, 10);
        assert_eq!(vec![8, 9, 10], s.window(2).collect::<Vec<_>>());
    }

    #[test]
    fn per_page_param_resolution() {
        let bounds = PageBounds::default();
        assert_eq!(10, bounds.per_page_from_param(None));
        assert_eq!(10, bounds.per_page_from_param(Some("abc")));
        assert_eq!(25, bounds.per_page_from_param(Some("25")));
        assert_eq!(25, bounds.per_page_from_param(Some(" 25 ")));
        assert_eq!(5, bounds.per_page_from_param(Some("1")));
        assert_eq!(100, bounds.per_page_from_param(Some("5000")));
    }

    #[test]
    fn page_param_resolution() {
        assert_eq!(1, page_from_param(None));
        assert_eq!(1, page_from_param(Some("x")));
        assert_eq!(1, page_from_param(Some("-2")));
        assert_eq!(7, page_from_param(Some("7")));
    }

    #[test]
    fn parse_commands() {
        assert_eq!(Ok(PageCommand::Next), "+".parse());
        assert_eq!(Ok(PageCommand::Previous), "-".parse());
        assert_eq!(Ok(PageCommand::First), "<<".parse());
        assert_eq!(Ok(PageCommand::Last), ">>".parse());
        assert_eq!(Ok(PageCommand::Exit), "0".parse());
        assert_eq!(Ok(PageCommand::Goto(12)), "12".parse());
        assert_eq!(Ok(PageCommand::Goto(3)), " 3 ".parse());
        assert!(matches!(
            "huh".parse::<PageCommand>(),
            Err(PageCommandError::UnknownCommand(_))
        ));
        assert!(matches!(
            "".parse::<PageCommand>(),
            Err(PageCommandError::UnknownCommand(_))
        ));
    }

    #[test]
    fn next_and_previous_round_trip() {
        let offset = 40;
        let next = PageCommand::Next.apply(offset, 20, 5).unwrap().unwrap();
        assert_eq!(60, next);
        let back = PageCommand::Previous.apply(next, 20, 5).unwrap().unwrap();
        assert_eq!(offset, back);
    }

    #[test]
    fn previous_saturates_at_zero() {
        let back = PageCommand::Previous.apply(0, 20, 5).unwrap().unwrap();
        assert_eq!(0, back);
    }

    #[test]
    fn next_is_not_clamped() {
        // Offset 80 is the last page of 5; stepping forward still moves.
        let next = PageCommand::Next.apply(80, 20, 5).unwrap().unwrap();
        assert_eq!(100, next);
        // The empty page re-derives to the last valid page.
        let s = PageState::from_offset(95, 20, next);
        assert_eq!(5, s.page);
    }

    #[test]
    fn first_and_last() {
        assert_eq!(Some(0), PageCommand::First.apply(60, 20, 5).unwrap());
        assert_eq!(Some(80), PageCommand::Last.apply(0, 20, 5).unwrap());
    }

    #[test]
    fn goto_validates_range() {
        assert_eq!(Some(40), PageCommand::Goto(3).apply(0, 20, 5).unwrap());
        assert_eq!(
            Err(PageCommandError::PageOutOfRange {
                page: 6,
                total_pages: 5
            }),
            PageCommand::Goto(6).apply(0, 20, 5)
        );
        assert!(PageCommand::Goto(0).apply(0, 20, 5).is_err());
    }

    #[test]
    fn exit_yields_none() {
        assert_eq!(None, PageCommand::Exit.apply(40, 20, 5).unwrap());
    }
}
