use crate::models::{Category, Destination, FavoriteId};
use crate::{Error, Result};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Read-only list of destinations
///
/// The favorites store doesn't depend on it - favorites can point at ids the
/// catalog has never heard of. The catalog just tells us what to render.
#[derive(Debug, Clone)]
pub struct Catalog {
    destinations: Vec<Destination>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids
    pub fn new(destinations: Vec<Destination>) -> Result<Self> {
        let mut seen = HashSet::new();
        for dest in &destinations {
            if !seen.insert(&dest.id) {
                return Err(Error::ConfigError(format!(
                    "Duplicate destination id in catalog: {}",
                    dest.id
                )));
            }
        }
        Ok(Self { destinations })
    }

    /// The destinations shipped with the app
    pub fn builtin() -> Self {
        Self {
            destinations: builtin_destinations(),
        }
    }

    /// Parse a JSON array of destinations
    pub fn from_json(raw: &str) -> Result<Self> {
        let destinations: Vec<Destination> = serde_json::from_str(raw)?;
        Self::new(destinations)
    }

    /// Load a catalog JSON file from disk
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&raw)
            .map_err(|e| Error::ConfigError(format!("Failed to load catalog {:?}: {}", path, e)))?;
        debug!("Loaded {} destinations from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    pub fn all(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn get(&self, id: &FavoriteId) -> Option<&Destination> {
        self.destinations.iter().find(|d| &d.id == id)
    }

    /// `None` means "All Destinations"
    pub fn filter(&self, category: Option<Category>) -> Vec<&Destination> {
        self.destinations
            .iter()
            .filter(|d| category.map_or(true, |c| d.in_category(c)))
            .collect()
    }

    /// Destinations whose id is among `ids`, in catalog order
    ///
    /// Unknown ids are skipped.
    pub fn favorites<'a, I>(&self, ids: I) -> Vec<&Destination>
    where
        I: IntoIterator<Item = &'a FavoriteId>,
    {
        let wanted: HashSet<&FavoriteId> = ids.into_iter().collect();
        self.destinations
            .iter()
            .filter(|d| wanted.contains(&d.id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[allow(clippy::too_many_arguments)]
fn destination(
    id: &str,
    name: &str,
    rating: f32,
    reviews: u32,
    best_for: &str,
    season: &str,
    cost: &str,
    categories: &[Category],
) -> Destination {
    Destination {
        id: FavoriteId::from(id),
        name: name.to_string(),
        rating,
        reviews,
        best_for: best_for.to_string(),
        season: season.to_string(),
        cost: cost.to_string(),
        image: format!("/images/destinations/{}.jpg", id),
        categories: categories.to_vec(),
    }
}

fn builtin_destinations() -> Vec<Destination> {
    use Category::*;

    vec![
        destination("paris", "Paris, France", 4.8, 2543, "Romance & Culture", "Apr - Jun", "$$$", &[Cultural, Luxury]),
        destination("tokyo", "Tokyo, Japan", 4.9, 3102, "Food & Technology", "Mar - May", "$$$", &[Cultural]),
        destination("bali", "Bali, Indonesia", 4.7, 1876, "Beaches & Wellness", "Apr - Oct", "$$", &[Beach, BudgetFriendly]),
        destination("rome", "Rome, Italy", 4.8, 2210, "History & Food", "Apr - Jun", "$$", &[Cultural]),
        destination("santorini", "Santorini, Greece", 4.9, 1654, "Sunsets & Romance", "May - Oct", "$$$$", &[Beach, Luxury]),
        destination("banff", "Banff, Canada", 4.8, 987, "Hiking & Lakes", "Jun - Sep", "$$", &[Mountains]),
        destination("lisbon", "Lisbon, Portugal", 4.6, 1320, "Food & Nightlife", "Mar - Oct", "$", &[Cultural, BudgetFriendly]),
        destination("zermatt", "Zermatt, Switzerland", 4.7, 742, "Skiing & Alpine Views", "Dec - Apr", "$$$$", &[Mountains, Luxury]),
    ]
}
