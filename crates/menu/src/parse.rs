//! Upstream wire shapes and the normalization pipeline.
//!
//! The feed is loosely structured: section headers arrive as ordinary food
//! items, item names hide in several different nestings, and closure notices
//! sometimes masquerade as lunch text. Everything here is pure; the network
//! side lives in [`fetch`](crate::fetch).

use serde::Deserialize;
use serde_json::Value;

use crate::model::{DayMenu, Meal, MealSet, WeekMenu};

/// One week of upstream data as it arrives on the wire. The provider emits
/// an explicit `null` for empty lists, so both list fields coerce null to
/// empty instead of failing the whole document.
#[derive(Debug, Deserialize)]
pub struct RawWeek {
    #[serde(default, deserialize_with = "null_to_default")]
    pub days: Vec<RawDay>,
}

#[derive(Debug, Deserialize)]
pub struct RawDay {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub menu_items: Vec<RawItem>,
}

fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single upstream entry, kept as raw JSON. The provider emits at least
/// four shapes for the same concept, sometimes several at once with only one
/// of them usable, so [`display_name`](RawItem::display_name) runs an ordered
/// set of probes rather than committing to one shape up front. An item no
/// probe understands is simply nameless; it never fails the whole week.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct RawItem(Value);

impl RawItem {
    /// The trimmed display name, or `None` when the item has no usable text.
    /// Probes in order: `food.name`, `name`, `text`, `menu_item.food.name`;
    /// the first non-empty string wins, so a `food` stub without a name
    /// still falls through to the flat keys.
    pub fn display_name(&self) -> Option<&str> {
        let item = self.0.as_object()?;
        [
            item.get("food").and_then(|f| f.get("name")),
            item.get("name"),
            item.get("text"),
            item.get("menu_item")
                .and_then(|m| m.get("food"))
                .and_then(|f| f.get("name")),
        ]
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|n| !n.is_empty())
    }
}

/// Closure phrases the feed buries inside ordinary lunch text.
const CLOSURE_KEYWORDS: [&str; 11] = [
    "conference",
    "conferences",
    "staff development",
    "inservice",
    "in-service",
    "teacher work day",
    "holiday",
    "no school",
    "school closed",
    "early release",
    "snow day",
];

const CONJUNCTIONS: [&str; 3] = ["with", "and", "or"];

/// Normalizes a raw week into per-day menus. Days without a `date` field are
/// skipped entirely; they do not become "No data".
pub fn parse_week(raw: &RawWeek) -> WeekMenu {
    let mut out = WeekMenu::new();

    for day in &raw.days {
        let Some(date_key) = day.date.as_deref().filter(|d| !d.is_empty()) else {
            continue;
        };

        if let Some(reason) = explicit_no_school(&day.menu_items) {
            out.insert(date_key.to_string(), DayMenu::NoSchool(reason.to_string()));
            continue;
        }

        let meals = parse_meals(&day.menu_items);
        let menu = if meals.is_empty() {
            DayMenu::NoData
        } else {
            maybe_convert_to_no_school(meals)
        };
        out.insert(date_key.to_string(), menu);
    }

    out
}

/// An item explicitly labeled "No school ..." wins over everything else on
/// that day.
fn explicit_no_school(items: &[RawItem]) -> Option<&str> {
    items
        .iter()
        .filter_map(RawItem::display_name)
        .find(|name| name.to_lowercase().starts_with("no school"))
}

/// State machine over the item stream. Headers like "Breakfast" or
/// "Grab & Go" arrive as food items and switch the current bucket; everything
/// after a header belongs to it until the next header.
fn parse_meals(items: &[RawItem]) -> MealSet {
    let mut tokens: [Vec<String>; 4] = Default::default();
    let mut current: Option<Meal> = None;

    for item in items {
        let Some(name) = item.display_name() else {
            continue;
        };
        let key = name.to_lowercase();
        let key = key.trim();

        if let Some(meal) = Meal::from_header(key) {
            current = Some(meal);
            continue;
        }

        // No header yet: guess the bucket from the item itself.
        let bucket = *current.get_or_insert_with(|| {
            if key.contains("breakfast") { Meal::Breakfast } else { Meal::Lunch }
        });

        if CONJUNCTIONS.contains(&key) {
            tokens[bucket as usize].push(key.to_string());
        } else {
            tokens[bucket as usize].push(name.to_string());
        }
    }

    let mut meals = MealSet::default();
    for meal in Meal::ALL {
        let toks = &tokens[meal as usize];
        if !toks.is_empty() {
            meals.set(meal, conjunction_junction(&toks.join(", ")));
        }
    }
    meals
}

/// The feed sometimes reports a closure as ordinary lunch text. When lunch is
/// the only filled bucket and its text either names a known closure reason or
/// is short enough to be a notice rather than a menu, reclassify the day.
///
/// The length fallback can misfire on a genuinely terse lunch-only menu;
/// `short_lunch_only_text_is_treated_as_closure` below pins the behavior so a
/// change is deliberate.
fn maybe_convert_to_no_school(meals: MealSet) -> DayMenu {
    let only_lunch = meals.lunch.as_deref().is_some_and(|l| !l.trim().is_empty())
        && [Meal::Breakfast, Meal::GrabAndGo, Meal::DeliEntree]
            .iter()
            .all(|m| meals.get(*m).is_none_or(|t| t.trim().is_empty()));

    if only_lunch {
        let reason = meals.lunch.as_deref().unwrap_or_default().trim().to_string();
        let lowered = reason.to_lowercase();
        let keyword_hit = CLOSURE_KEYWORDS.iter().any(|k| lowered.contains(k));
        if keyword_hit || reason.chars().count() <= 80 {
            return DayMenu::NoSchool(reason);
        }
    }

    DayMenu::Meals(meals)
}

/// Cleans up the comma-joined token stream. The steps depend on each other's
/// output and must run in this order.
pub fn conjunction_junction(s: &str) -> String {
    let s = ensure_space_after_w_slash(s);
    let s = replace_w_slash_with_with(&s);
    let s = remove_commas_around_conjunctions(&s);
    normalize_whitespace(&s)
}

fn is_word_boundary(prev: Option<char>) -> bool {
    prev.is_none_or(|c| !c.is_alphanumeric())
}

/// `w/Variety` -> `w/ Variety` (case-insensitive on the `w`).
fn ensure_space_after_w_slash(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 4);
    let mut i = 0;
    while i < chars.len() {
        let boundary = is_word_boundary(if i == 0 { None } else { Some(chars[i - 1]) });
        if boundary
            && chars[i].eq_ignore_ascii_case(&'w')
            && chars.get(i + 1) == Some(&'/')
            && chars.get(i + 2).is_some_and(|c| !c.is_whitespace())
        {
            out.push(chars[i]);
            out.push('/');
            out.push(' ');
            i += 2;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

/// Any remaining `w/` token becomes the word `with`.
fn replace_w_slash_with_with(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 8);
    let mut i = 0;
    while i < chars.len() {
        let boundary = is_word_boundary(if i == 0 { None } else { Some(chars[i - 1]) });
        if boundary && chars[i].eq_ignore_ascii_case(&'w') && chars.get(i + 1) == Some(&'/') {
            out.push_str("with");
            i += 2;
            // Absorb exactly one following space; step 1 guaranteed there is
            // one before any attached word.
            if chars.get(i) == Some(&' ') {
                out.push(' ');
                i += 1;
            }
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

/// `"Chicken, with, Rice"` -> `"Chicken with Rice"`; also handles the
/// one-sided `"with,"` and `",with"` leftovers.
fn remove_commas_around_conjunctions(s: &str) -> String {
    let mut out = s.to_string();
    for conj in CONJUNCTIONS {
        // Doubled spaces introduced here are collapsed by the final
        // whitespace pass.
        out = collapse_pattern(&out, conj, true, true);
        out = collapse_pattern(&out, conj, false, true);
        out = collapse_pattern(&out, conj, true, false);
    }
    out
}

/// Replaces every occurrence of `conj` (case-insensitive, whole word) that
/// has a comma on the requested side(s) with a space-padded bare conjunction,
/// consuming the commas and surrounding whitespace.
fn collapse_pattern(s: &str, conj: &str, comma_before: bool, comma_after: bool) -> String {
    let replacement = format!(" {conj} ");
    let lower: Vec<char> = s.to_lowercase().chars().collect();
    let chars: Vec<char> = s.chars().collect();
    let needle: Vec<char> = conj.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;

    'outer: while i < chars.len() {
        // Candidate start: optional whitespace, optional comma, optional
        // whitespace, then the conjunction word.
        let mut j = i;
        while j < chars.len() && chars[j].is_whitespace() {
            j += 1;
        }
        let mut matched_before = false;
        if comma_before {
            if j < chars.len() && chars[j] == ',' {
                matched_before = true;
                j += 1;
                while j < chars.len() && chars[j].is_whitespace() {
                    j += 1;
                }
            }
        }
        if (!comma_before || matched_before)
            && j + needle.len() <= lower.len()
            && lower[j..j + needle.len()] == needle[..]
        {
            let mut k = j + needle.len();
            // Whole-word check on the right edge.
            if chars.get(k).is_none_or(|c| !c.is_alphanumeric()) {
                // Whole-word check on the left edge of the word itself.
                let left_ok = j == 0 || !chars[j - 1].is_alphanumeric();
                if left_ok {
                    while k < chars.len() && chars[k].is_whitespace() {
                        k += 1;
                    }
                    if !comma_after || (k < chars.len() && chars[k] == ',') {
                        if comma_after {
                            k += 1;
                            while k < chars.len() && chars[k].is_whitespace() {
                                k += 1;
                            }
                        }
                        out.push_str(&replacement);
                        i = k;
                        continue 'outer;
                    }
                }
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

/// Collapses whitespace runs and trims the ends.
fn normalize_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_run = false;
    for c in s.chars() {
        if c.is_whitespace() {
            in_run = true;
        } else {
            if in_run && !out.is_empty() {
                out.push(' ');
            }
            in_run = false;
            out.push(c);
        }
    }
    out
}
