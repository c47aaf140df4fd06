use chrono::{DateTime, Datelike, NaiveDate, Utc};
use uuid::Uuid;

use super::Post;
use crate::error::DomainError;

/// Selection strategy shared by every post listing.
///
/// Repositories translate a filter into their own query language;
/// [`PostFilter::matches`] is the reference predicate they must agree with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostFilter {
    All,
    /// Posts created within a calendar month, in UTC.
    Archive { year: i32, month: u32 },
    Category(Uuid),
}

impl PostFilter {
    /// Archive filter for `year`/`month`, rejecting months outside 1..=12.
    pub fn archive(year: i32, month: u32) -> Result<Self, DomainError> {
        let filter = Self::Archive { year, month };
        if filter.created_window().is_none() {
            return Err(DomainError::invalid(format!(
                "{year}-{month:02} is not a valid archive month"
            )));
        }
        Ok(filter)
    }

    pub fn matches(&self, post: &Post) -> bool {
        match self {
            Self::All => true,
            Self::Archive { year, month } => {
                post.created_time.year() == *year && post.created_time.month() == *month
            }
            Self::Category(id) => post.category_id == *id,
        }
    }

    /// Half-open `[start, end)` range of creation times an archive filter
    /// selects. `None` for other filters or an impossible month.
    pub fn created_window(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let Self::Archive { year, month } = *self else {
            return None;
        };
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let end = if month == 12 {
            NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        Some((
            start.and_hms_opt(0, 0, 0)?.and_utc(),
            end.and_hms_opt(0, 0, 0)?.and_utc(),
        ))
    }
}
