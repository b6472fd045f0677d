//! Query composition over weekly fetches: slicing, business-day offsets, and
//! multi-week windows.

use std::collections::BTreeSet;
use std::sync::Arc;

use time::Date;

use crate::dates::{add_business_days, date_range, format_date, week_end, week_start};
use crate::error::MenuError;
use crate::fetch::MenuFetcher;
use crate::model::{DayMenu, WeekMenu};

/// Answers the views the HTTP layer exposes. Cheap to clone; all clones
/// share the fetcher and its cache.
#[derive(Debug, Clone)]
pub struct MenuService {
    fetcher: Arc<MenuFetcher>,
}

impl MenuService {
    pub fn new(fetcher: Arc<MenuFetcher>) -> Self {
        Self { fetcher }
    }

    /// Monday through Friday of the week containing `anchor`. Days the
    /// upstream omitted stay absent.
    #[tracing::instrument(skip(self))]
    pub async fn week_menu(&self, anchor: Date) -> Result<WeekMenu, MenuError> {
        let raw = self.fetcher.get_week(anchor).await?;
        Ok(slice(&raw, week_start(anchor), week_end(anchor)))
    }

    /// `anchor` through Friday of the same week. A weekend anchor gets no
    /// special-casing; its Friday already passed, so the slice is empty.
    #[tracing::instrument(skip(self))]
    pub async fn remainder_of_week(&self, anchor: Date) -> Result<WeekMenu, MenuError> {
        let raw = self.fetcher.get_week(anchor).await?;
        Ok(slice(&raw, anchor, week_end(anchor)))
    }

    /// Single day `days_ahead` business days after `base`. A day the
    /// upstream omitted comes back as [`DayMenu::NoData`], never an error.
    #[tracing::instrument(skip(self))]
    pub async fn day_at_offset(&self, base: Date, days_ahead: i32) -> Result<WeekMenu, MenuError> {
        let target = add_business_days(base, days_ahead);
        let raw = self.fetcher.get_week(target).await?;
        let key = format_date(target);
        let menu = raw.get(&key).cloned().unwrap_or(DayMenu::NoData);
        Ok(WeekMenu::from([(key, menu)]))
    }

    pub async fn today(&self, d: Date) -> Result<WeekMenu, MenuError> {
        self.day_at_offset(d, 0).await
    }

    pub async fn tomorrow(&self, d: Date) -> Result<WeekMenu, MenuError> {
        self.day_at_offset(d, 1).await
    }

    /// `count` school days starting at `base` (which counts as day 1),
    /// skipping weekends. `count` is clamped to at least 1. Crossing a week
    /// boundary fetches each touched week once.
    #[tracing::instrument(skip(self))]
    pub async fn window_business_days(&self, base: Date, count: i32) -> Result<WeekMenu, MenuError> {
        let count = count.max(1);

        let mut dates = vec![base];
        while (dates.len() as i32) < count {
            let last = *dates.last().unwrap_or(&base);
            dates.push(add_business_days(last, 1));
        }

        let mondays: BTreeSet<Date> = dates.iter().map(|d| week_start(*d)).collect();
        let mut merged = WeekMenu::new();
        for monday in mondays {
            merged.append(&mut self.fetcher.get_week(monday).await?);
        }

        let mut out = WeekMenu::new();
        for d in dates {
            let key = format_date(d);
            let menu = merged.get(&key).cloned().unwrap_or(DayMenu::NoData);
            out.insert(key, menu);
        }
        Ok(out)
    }
}

fn slice(raw: &WeekMenu, start: Date, end: Date) -> WeekMenu {
    date_range(start, end)
        .filter_map(|d| {
            let key = format_date(d);
            raw.get(&key).map(|menu| (key, menu.clone()))
        })
        .collect()
}
