//! Normalized menu types shared by the parser, the service, and the HTTP
//! layer.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Placeholder text for days the upstream reported nothing usable.
pub const NO_DATA_TEXT: &str = "Menu not available";

const NO_SCHOOL_LABEL: &str = "No school";
const NO_DATA_LABEL: &str = "No data";

/// A whole query result: `YYYY-MM-DD` keys to day menus. The ISO key shape
/// makes the map's natural ordering chronological.
pub type WeekMenu = BTreeMap<String, DayMenu>;

/// The meal buckets the upstream publishes, in canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meal {
    Breakfast,
    Lunch,
    GrabAndGo,
    DeliEntree,
}

impl Meal {
    pub const ALL: [Meal; 4] = [Meal::Breakfast, Meal::Lunch, Meal::GrabAndGo, Meal::DeliEntree];

    pub fn label(self) -> &'static str {
        match self {
            Meal::Breakfast => "Breakfast",
            Meal::Lunch => "Lunch",
            Meal::GrabAndGo => "Grab & Go",
            Meal::DeliEntree => "Deli Entree",
        }
    }

    /// Maps a lower-cased, trimmed item name to the bucket it announces.
    /// The feed emits section headers as ordinary food items, with a couple
    /// of spelling variants.
    pub fn from_header(name: &str) -> Option<Meal> {
        match name {
            "breakfast" => Some(Meal::Breakfast),
            "lunch" => Some(Meal::Lunch),
            "grab & go" | "grab and go" => Some(Meal::GrabAndGo),
            "deli entree" | "deli entrée" => Some(Meal::DeliEntree),
            _ => None,
        }
    }
}

/// Cleaned display text per bucket. Buckets the upstream never filled stay
/// `None` and are omitted when serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealSet {
    pub breakfast: Option<String>,
    pub lunch: Option<String>,
    pub grab_and_go: Option<String>,
    pub deli_entree: Option<String>,
}

impl MealSet {
    pub fn get(&self, meal: Meal) -> Option<&str> {
        match meal {
            Meal::Breakfast => self.breakfast.as_deref(),
            Meal::Lunch => self.lunch.as_deref(),
            Meal::GrabAndGo => self.grab_and_go.as_deref(),
            Meal::DeliEntree => self.deli_entree.as_deref(),
        }
    }

    pub fn set(&mut self, meal: Meal, text: String) {
        let slot = match meal {
            Meal::Breakfast => &mut self.breakfast,
            Meal::Lunch => &mut self.lunch,
            Meal::GrabAndGo => &mut self.grab_and_go,
            Meal::DeliEntree => &mut self.deli_entree,
        };
        *slot = Some(text);
    }

    /// True when no bucket holds usable text.
    pub fn is_empty(&self) -> bool {
        Meal::ALL.iter().all(|m| self.get(*m).is_none_or(str::is_empty))
    }
}

/// One day's normalized menu: meal buckets, an explicit closure with its
/// reason text, or nothing usable at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayMenu {
    Meals(MealSet),
    NoSchool(String),
    NoData,
}

impl DayMenu {
    pub fn meals(&self) -> Option<&MealSet> {
        match self {
            DayMenu::Meals(set) => Some(set),
            _ => None,
        }
    }

    pub fn no_school_reason(&self) -> Option<&str> {
        match self {
            DayMenu::NoSchool(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, DayMenu::NoData)
    }
}

/// Serialized as a single-level map so API consumers see exactly the bucket
/// labels, in canonical order regardless of the order the feed used.
impl Serialize for DayMenu {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DayMenu::Meals(set) => {
                let filled = Meal::ALL.iter().filter(|m| set.get(**m).is_some()).count();
                let mut map = serializer.serialize_map(Some(filled))?;
                for meal in Meal::ALL {
                    if let Some(text) = set.get(meal) {
                        map.serialize_entry(meal.label(), text)?;
                    }
                }
                map.end()
            }
            DayMenu::NoSchool(reason) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(NO_SCHOOL_LABEL, reason)?;
                map.end()
            }
            DayMenu::NoData => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(NO_DATA_LABEL, NO_DATA_TEXT)?;
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_serialize_in_canonical_order() {
        let mut set = MealSet::default();
        set.set(Meal::DeliEntree, "Turkey Sub".into());
        set.set(Meal::Breakfast, "Pancakes".into());
        set.set(Meal::Lunch, "Pizza".into());

        let json = serde_json::to_string(&DayMenu::Meals(set)).unwrap();
        assert_eq!(
            json,
            r#"{"Breakfast":"Pancakes","Lunch":"Pizza","Deli Entree":"Turkey Sub"}"#
        );
    }

    #[test]
    fn unfilled_buckets_are_omitted() {
        let mut set = MealSet::default();
        set.set(Meal::Lunch, "Tacos".into());

        let json = serde_json::to_string(&DayMenu::Meals(set)).unwrap();
        assert_eq!(json, r#"{"Lunch":"Tacos"}"#);
    }

    #[test]
    fn closures_and_missing_days_have_fixed_shapes() {
        let closed = DayMenu::NoSchool("No School - Staff Development".into());
        assert_eq!(
            serde_json::to_string(&closed).unwrap(),
            r#"{"No school":"No School - Staff Development"}"#
        );
        assert_eq!(
            serde_json::to_string(&DayMenu::NoData).unwrap(),
            r#"{"No data":"Menu not available"}"#
        );
    }

    #[test]
    fn header_aliases_map_to_buckets() {
        assert_eq!(Meal::from_header("grab & go"), Some(Meal::GrabAndGo));
        assert_eq!(Meal::from_header("grab and go"), Some(Meal::GrabAndGo));
        assert_eq!(Meal::from_header("deli entrée"), Some(Meal::DeliEntree));
        assert_eq!(Meal::from_header("deli entree"), Some(Meal::DeliEntree));
        assert_eq!(Meal::from_header("brunch"), None);
    }

    #[test]
    fn empty_strings_count_as_empty() {
        let mut set = MealSet::default();
        assert!(set.is_empty());
        set.set(Meal::Lunch, String::new());
        assert!(set.is_empty());
        set.set(Meal::Lunch, "Chili".into());
        assert!(!set.is_empty());
    }
}
