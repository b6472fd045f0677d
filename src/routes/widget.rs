//! The embeddable widget: turns the service's raw per-day mapping into
//! display-ready day cards and renders them.

use askama::Template;
use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse},
};
use lunchboard_menu::dates::{add_business_days, format_date, parse_date};
use lunchboard_menu::{DayMenu, WeekMenu};
use serde::Deserialize;
use time::{Date, Duration};

use crate::error::AppError;
use crate::routes::params::{
    normalize_theme, normalize_view, parse_bool, parse_days_ahead, resolve_date, View,
};
use crate::routes::AppState;

/// One rendered day: bucket texts plus the labels the stylesheet hangs
/// highlighting off of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCard {
    pub date: String,
    /// Full weekday name, empty when the date key does not parse.
    pub weekday: String,
    pub relative: Option<&'static str>,
    pub breakfast: Option<String>,
    pub lunch: Option<String>,
    pub grab_and_go: Option<String>,
    pub deli_entree: Option<String>,
    pub no_school: Option<String>,
    pub no_data: bool,
}

impl DayCard {
    fn from_menu(date: String, menu: &DayMenu, relative: Option<&'static str>) -> Self {
        let weekday = parse_date(&date)
            .map(|d| d.weekday().to_string())
            .unwrap_or_default();

        let mut card = DayCard {
            date,
            weekday,
            relative,
            breakfast: None,
            lunch: None,
            grab_and_go: None,
            deli_entree: None,
            no_school: None,
            no_data: false,
        };
        match menu {
            DayMenu::Meals(set) => {
                card.breakfast = set.breakfast.clone();
                card.lunch = set.lunch.clone();
                card.grab_and_go = set.grab_and_go.clone();
                card.deli_entree = set.deli_entree.clone();
            }
            DayMenu::NoSchool(reason) => card.no_school = Some(reason.clone()),
            DayMenu::NoData => card.no_data = true,
        }
        card
    }

    pub fn is_yesterday(&self) -> bool {
        self.relative == Some("yesterday")
    }

    pub fn is_today(&self) -> bool {
        self.relative == Some("today")
    }

    pub fn is_tomorrow(&self) -> bool {
        self.relative == Some("tomorrow")
    }
}

/// Walks the mapping in date order and attaches each day's weekday name and
/// relative label (by calendar-day distance from `base`).
pub fn build_cards(data: &WeekMenu, base: Date) -> Vec<DayCard> {
    let yesterday = format_date(base - Duration::days(1));
    let today = format_date(base);
    let tomorrow = format_date(base + Duration::days(1));

    data.iter()
        .map(|(date, menu)| {
            let relative = if *date == yesterday {
                Some("yesterday")
            } else if *date == today {
                Some("today")
            } else if *date == tomorrow {
                Some("tomorrow")
            } else {
                None
            };
            DayCard::from_menu(date.clone(), menu, relative)
        })
        .collect()
}

#[derive(Template)]
#[template(path = "widget.html")]
struct WidgetTemplate {
    title: String,
    theme: &'static str,
    view: &'static str,
    anchor_date: String,
    highlight_date: String,
    days: Vec<DayCard>,
    show_header: bool,
    show_footer: bool,
}

#[derive(Debug, Deserialize)]
pub struct WidgetQuery {
    pub view: Option<String>,
    pub date: Option<String>,
    pub days_ahead: Option<String>,
    pub theme: Option<String>,
    pub show_header: Option<String>,
    pub show_footer: Option<String>,
}

/// GET /widget - rendered day cards for embedding.
pub async fn page(
    State(app): State<AppState>,
    Query(query): Query<WidgetQuery>,
) -> Result<impl IntoResponse, AppError> {
    let show_header = parse_bool(query.show_header.as_deref(), true);
    let show_footer = parse_bool(query.show_footer.as_deref(), true);
    let theme = normalize_theme(query.theme.as_deref());
    let view = normalize_view(query.view.as_deref());
    let base = resolve_date(query.date.as_deref(), &app.config.menu.timezone)?;
    let days_ahead = parse_days_ahead(query.days_ahead.as_deref());

    // Without an explicit view, days_ahead means "this many school days",
    // starting at the base date and skipping weekends.
    if query.view.is_none() {
        if let Some(count) = days_ahead.filter(|n| *n > 0) {
            let data = app.menu.window_business_days(base, count).await?;
            let template = WidgetTemplate {
                title: format!("Next {count} School Days"),
                theme,
                view: "window",
                anchor_date: format_date(base),
                highlight_date: format_date(base),
                days: build_cards(&data, base),
                show_header,
                show_footer,
            };
            return Ok(Html(template.render()?));
        }
    }

    // With a view, days_ahead only shifts the focused day.
    let days_ahead = days_ahead.unwrap_or(if view == View::Tomorrow { 1 } else { 0 });
    let highlight_date = format_date(add_business_days(base, days_ahead));

    let (title, data) = match view {
        View::Week => ("This Week".to_string(), app.menu.week_menu(base).await?),
        View::Remainder => (
            "Rest of This Week".to_string(),
            app.menu.remainder_of_week(base).await?,
        ),
        View::Today | View::Tomorrow => {
            let title = match days_ahead {
                0 => "Today's Menu".to_string(),
                1 => "Tomorrow's Menu".to_string(),
                n => format!("Menu in {n} School Days"),
            };
            (title, app.menu.day_at_offset(base, days_ahead).await?)
        }
    };

    let template = WidgetTemplate {
        title,
        theme,
        view: view.as_str(),
        anchor_date: format_date(base),
        highlight_date,
        days: build_cards(&data, base),
        show_header,
        show_footer,
    };
    Ok(Html(template.render()?))
}

#[cfg(test)]
mod tests {
    use lunchboard_menu::MealSet;
    use time::macros::date;

    use super::*;

    fn sample_week() -> WeekMenu {
        let mut set = MealSet::default();
        set.set(lunchboard_menu::Meal::Breakfast, "Pancakes".into());
        set.set(lunchboard_menu::Meal::Lunch, "Pizza".into());

        WeekMenu::from([
            ("2026-03-03".to_string(), DayMenu::Meals(set)),
            (
                "2026-03-04".to_string(),
                DayMenu::NoSchool("Snow Day".to_string()),
            ),
            ("2026-03-05".to_string(), DayMenu::NoData),
        ])
    }

    #[test]
    fn cards_come_out_in_date_order_with_weekday_names() {
        let cards = build_cards(&sample_week(), date!(2026 - 03 - 04));
        let dates: Vec<&str> = cards.iter().map(|c| c.date.as_str()).collect();
        assert_eq!(dates, vec!["2026-03-03", "2026-03-04", "2026-03-05"]);
        let weekdays: Vec<&str> = cards.iter().map(|c| c.weekday.as_str()).collect();
        assert_eq!(weekdays, vec!["Tuesday", "Wednesday", "Thursday"]);
    }

    #[test]
    fn relative_labels_follow_the_base_date() {
        let cards = build_cards(&sample_week(), date!(2026 - 03 - 04));
        assert!(cards[0].is_yesterday());
        assert!(cards[1].is_today());
        assert!(cards[2].is_tomorrow());

        let cards = build_cards(&sample_week(), date!(2026 - 03 - 20));
        assert!(cards.iter().all(|c| c.relative.is_none()));
    }

    #[test]
    fn card_states_mirror_the_day_menu() {
        let cards = build_cards(&sample_week(), date!(2026 - 03 - 04));
        assert_eq!(cards[0].breakfast.as_deref(), Some("Pancakes"));
        assert_eq!(cards[0].lunch.as_deref(), Some("Pizza"));
        assert_eq!(cards[1].no_school.as_deref(), Some("Snow Day"));
        assert!(cards[2].no_data);
    }

    #[test]
    fn widget_template_renders_cards_and_title() {
        let template = WidgetTemplate {
            title: "This Week".to_string(),
            theme: "dark",
            view: "week",
            anchor_date: "2026-03-04".to_string(),
            highlight_date: "2026-03-04".to_string(),
            days: build_cards(&sample_week(), date!(2026 - 03 - 04)),
            show_header: true,
            show_footer: true,
        };
        let html = template.render().unwrap();
        assert!(html.contains("This Week"));
        assert!(html.contains("Snow Day"));
        assert!(html.contains("Menu not available"));
        assert!(html.contains("lb-widget lb-theme-dark"));
        assert!(html.contains("lb-card lb-highlight"));
    }

    #[test]
    fn header_and_footer_can_be_hidden() {
        let template = WidgetTemplate {
            title: "This Week".to_string(),
            theme: "light",
            view: "week",
            anchor_date: "2026-03-04".to_string(),
            highlight_date: "2026-03-04".to_string(),
            days: Vec::new(),
            show_header: false,
            show_footer: false,
        };
        let html = template.render().unwrap();
        assert!(!html.contains(r#"class="lb-header""#));
        assert!(!html.contains(r#"class="lb-footer""#));
    }
}
