use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a favorited destination
///
/// Stored as-is in JSON: either a bare string or a bare integer.
/// `"1"` and `1` are different ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FavoriteId {
    Number(i64),
    Text(String),
}

impl FavoriteId {
    /// Parse user input: all-digit strings become numbers, anything else text
    pub fn parse(input: &str) -> Self {
        match input.trim().parse::<i64>() {
            Ok(n) => FavoriteId::Number(n),
            Err(_) => FavoriteId::Text(input.trim().to_string()),
        }
    }
}

impl fmt::Display for FavoriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FavoriteId::Number(n) => write!(f, "{}", n),
            FavoriteId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for FavoriteId {
    fn from(s: &str) -> Self {
        FavoriteId::Text(s.to_string())
    }
}

impl From<String> for FavoriteId {
    fn from(s: String) -> Self {
        FavoriteId::Text(s)
    }
}

impl From<i64> for FavoriteId {
    fn from(n: i64) -> Self {
        FavoriteId::Number(n)
    }
}

/// A place we'd like people to go - read-only as far as favorites care
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: FavoriteId,
    pub name: String,
    /// 0.0 - 5.0
    pub rating: f32,
    pub reviews: u32,
    pub best_for: String,
    pub season: String,
    pub cost: String,
    pub image: String,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Destination {
    pub fn in_category(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }
}

/// Filters from the destinations page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    BudgetFriendly,
    Luxury,
    Beach,
    Mountains,
    Cultural,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::BudgetFriendly => "budget-friendly",
            Category::Luxury => "luxury",
            Category::Beach => "beach",
            Category::Mountains => "mountains",
            Category::Cultural => "cultural",
        }
    }

    /// Label shown on the filter button
    pub fn label(&self) -> &'static str {
        match self {
            Category::BudgetFriendly => "Budget Friendly",
            Category::Luxury => "Luxury",
            Category::Beach => "Beach",
            Category::Mountains => "Mountains",
            Category::Cultural => "Cultural",
        }
    }

    pub fn all() -> Vec<Category> {
        vec![
            Category::BudgetFriendly,
            Category::Luxury,
            Category::Beach,
            Category::Mountains,
            Category::Cultural,
        ]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '_'], "-");
        Category::all()
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "unknown category '{}' (expected one of: budget-friendly, luxury, beach, mountains, cultural)",
                    s
                )
            })
    }
}
