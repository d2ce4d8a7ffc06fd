//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/IO types here — these are mapped from adapters.

use serde::{Deserialize, Serialize};

/// School level, derived from the Korean school name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchoolLevel {
    Elementary,
    Middle,
    High,
    Special,
    Other,
}

impl SchoolLevel {
    /// Derive the level from name substrings. `중학교` is checked before
    /// `고등학교` would ever match it, and `라온학교` marks the special school.
    pub fn from_school_name(name: &str) -> Self {
        if name.contains("초등학교") {
            Self::Elementary
        } else if name.contains("중학교") {
            Self::Middle
        } else if name.contains("고등학교") {
            Self::High
        } else if name.contains("라온학교") {
            Self::Special
        } else {
            Self::Other
        }
    }

    /// Rendering order for grouped output: elementary first, `Other` last.
    pub const DISPLAY_ORDER: [Self; 5] = [
        Self::Elementary,
        Self::Middle,
        Self::High,
        Self::Special,
        Self::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Elementary => "초등학교",
            Self::Middle => "중학교",
            Self::High => "고등학교",
            Self::Special => "특수학교",
            Self::Other => "기타",
        }
    }
}

/// One school from the static roster. Immutable input to a query cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchoolEntry {
    pub name: String,
    pub level: SchoolLevel,
}

impl SchoolEntry {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let level = SchoolLevel::from_school_name(&name);
        Self { name, level }
    }
}

/// Meal slot, with the provider's wire code (1/2/3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    pub const ALL: [Self; 3] = [Self::Breakfast, Self::Lunch, Self::Dinner];

    /// `MMEAL_SC_CODE` query value.
    pub fn wire_code(self) -> &'static str {
        match self {
            Self::Breakfast => "1",
            Self::Lunch => "2",
            Self::Dinner => "3",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Breakfast => "조식",
            Self::Lunch => "중식",
            Self::Dinner => "석식",
        }
    }
}

impl std::fmt::Display for MealSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One menu line item. `raw` is the provider text verbatim; the allergen
/// parse is display-time only and never alters it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishEntry {
    pub raw: String,
}

impl DishEntry {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Dish name with any trailing allergen-code group removed.
    /// Falls back to the whole raw text when no code group is present.
    pub fn name(&self) -> &str {
        match split_allergen_group(&self.raw) {
            Some((name, _)) => name,
            None => self.raw.trim(),
        }
    }

    /// Allergen codes parsed from a trailing `(1.5.6)` group. Empty when the
    /// raw text carries none (or the parenthesized tail is not a code list).
    pub fn allergen_codes(&self) -> Vec<u8> {
        match split_allergen_group(&self.raw) {
            Some((_, codes)) => codes,
            None => Vec::new(),
        }
    }
}

/// Splits `"백미밥 (1.5.6)"` into `("백미밥", [1, 5, 6])`. Returns `None`
/// unless the text ends with a parenthesized list of dot-separated positive
/// integers — anything else (notes, hangul in parentheses) is part of the name.
fn split_allergen_group(raw: &str) -> Option<(&str, Vec<u8>)> {
    let trimmed = raw.trim();
    let rest = trimmed.strip_suffix(')')?;
    let open = rest.rfind('(')?;
    let inner = &rest[open + 1..];
    if inner.is_empty() {
        return None;
    }
    let codes = inner
        .split('.')
        .map(|c| c.trim().parse::<u8>().ok().filter(|&n| n > 0))
        .collect::<Option<Vec<u8>>>()?;
    Some((rest[..open].trim_end(), codes))
}

/// Outcome of one school's lookup-and-fetch. Exactly one variant holds;
/// sentinel outcomes are values, not errors, and never abort a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "dishes")]
pub enum MenuOutcome {
    /// Ordered dishes, provider serving order preserved.
    Menu(Vec<DishEntry>),
    /// Provider has no record for this date/slot.
    NoData,
    /// Any I/O, parsing, or protocol error during the menu fetch.
    FetchFailed,
    /// The directory lookup yielded no usable school code.
    SchoolNotFound,
    /// Defensive catch-all: the worker task itself died.
    WorkerFailed,
}

/// Per-school result for one (date, slot) query cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuResult {
    pub level: SchoolLevel,
    pub school_name: String,
    pub outcome: MenuOutcome,
}

impl MenuResult {
    pub fn new(school: &SchoolEntry, outcome: MenuOutcome) -> Self {
        Self {
            level: school.level,
            school_name: school.name.clone(),
            outcome,
        }
    }

    /// True when the school has a usable menu (summary statistics treat all
    /// sentinel outcomes alike).
    pub fn has_menu(&self) -> bool {
        matches!(self.outcome, MenuOutcome::Menu(_))
    }
}
