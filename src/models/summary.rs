use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::models::Category;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyData {
    pub month: String,
    pub carbon_amount: f64,
}

/// Aggregates computed by the service. The client never re-aggregates.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonSummary {
    pub total_carbon: f64,
    #[serde(default)]
    pub category_breakdown: CategoryBreakdown,
    #[serde(default)]
    pub monthly_data: Vec<MonthlyData>,
}

/// Category totals in the order the service listed them.
///
/// Decoded from a JSON object without going through a hash map, so iteration
/// order matches the document. A repeated key keeps its first position and
/// takes the last value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CategoryBreakdown(Vec<(Category, f64)>);

impl CategoryBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: Category, amount: f64) {
        match self.0.iter_mut().find(|(c, _)| *c == category) {
            Some(slot) => slot.1 = amount,
            None => self.0.push((category, amount)),
        }
    }

    pub fn get(&self, category: &Category) -> Option<f64> {
        self.0.iter().find(|(c, _)| c == category).map(|(_, a)| *a)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Category, f64)> {
        self.0.iter().map(|(c, a)| (c, *a))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, f64)> for CategoryBreakdown {
    fn from_iter<T: IntoIterator<Item = (&'a str, f64)>>(iter: T) -> Self {
        let mut out = CategoryBreakdown::new();
        for (name, amount) in iter {
            out.insert(Category::parse(name), amount);
        }
        out
    }
}

impl Serialize for CategoryBreakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (category, amount) in &self.0 {
            map.serialize_entry(category.as_str(), amount)?;
        }
        map.end()
    }
}

struct BreakdownVisitor;

impl<'de> Visitor<'de> for BreakdownVisitor {
    type Value = CategoryBreakdown;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping category names to amounts")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut out = CategoryBreakdown::new();
        while let Some((name, amount)) = access.next_entry::<String, f64>()? {
            out.insert(Category::parse(&name), amount);
        }
        Ok(out)
    }
}

impl<'de> Deserialize<'de> for CategoryBreakdown {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(BreakdownVisitor)
    }
}
