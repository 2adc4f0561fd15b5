use chrono::{Datelike, NaiveDate, Weekday};

use crate::app::AppState;

#[derive(Debug, Clone, PartialEq)]
pub struct MonthLayout {
    pub year: i32,
    pub month0: u32,
    pub weeks: Vec<Week>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Week {
    pub days: Vec<DayCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: Option<NaiveDate>,
    pub is_selected: bool,
    pub is_today: bool,
    pub has_events: bool,
    pub is_current_month: bool,
}

impl DayCell {
    pub fn new(date: Option<NaiveDate>) -> Self {
        Self {
            date,
            is_selected: false,
            is_today: false,
            has_events: false,
            is_current_month: true,
        }
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.is_selected = selected;
        self
    }

    pub fn with_today(mut self, today: bool) -> Self {
        self.is_today = today;
        self
    }

    pub fn with_events(mut self, has_events: bool) -> Self {
        self.has_events = has_events;
        self
    }

    pub fn with_current_month(mut self, current_month: bool) -> Self {
        self.is_current_month = current_month;
        self
    }
}

/// Week rows (Monday first) for the month the store is looking at. A
/// multi-day event marks every day it covers.
pub fn calculate_layout(state: &AppState) -> MonthLayout {
    let year = state.year;
    let month0 = state.month0;
    let today = chrono::Local::now().date_naive();

    let Some(first_day) = NaiveDate::from_ymd_opt(year, month0 + 1, 1) else {
        return MonthLayout { year, month0, weeks: Vec::new() };
    };

    let next_month_first = if month0 == 11 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month0 + 2, 1)
    };

    let Some(last_day) = next_month_first.and_then(|d| d.pred_opt()) else {
        return MonthLayout { year, month0, weeks: Vec::new() };
    };

    let mut weeks = Vec::new();
    let mut current_week = Week { days: Vec::new() };

    let days_before = first_day.weekday().num_days_from_monday() as i64;

    for i in 0..days_before {
        let prev_date = first_day
            .pred_opt()
            .and_then(|d| d.checked_sub_days(chrono::Days::new((days_before - i - 1) as u64)));

        current_week
            .days
            .push(DayCell::new(prev_date).with_current_month(false));
    }

    let mut current_date = first_day;
    while current_date <= last_day {
        let cell = DayCell::new(Some(current_date))
            .with_selected(state.selected_date == Some(current_date))
            .with_today(current_date == today)
            .with_events(!state.events_on(current_date).is_empty())
            .with_current_month(true);

        current_week.days.push(cell);

        if current_date.weekday() == Weekday::Sun {
            weeks.push(current_week);
            current_week = Week { days: Vec::new() };
        }

        let Some(next) = current_date.succ_opt() else { break };
        current_date = next;
    }

    if !current_week.days.is_empty() {
        while current_week.days.len() < 7 {
            current_week
                .days
                .push(DayCell::new(Some(current_date)).with_current_month(false));
            let Some(next) = current_date.succ_opt() else { break };
            current_date = next;
        }
        weeks.push(current_week);
    }

    MonthLayout { year, month0, weeks }
}
