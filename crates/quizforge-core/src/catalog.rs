//! The topic catalog and the random topic picker.
//!
//! A catalog maps category names to ordered lists of subtopics. Construction
//! guarantees that there is at least one category and that no category is
//! empty, so picking never fails.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::QuizError;

/// Static mapping from category name to its subtopics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, Vec<String>>", into = "BTreeMap<String, Vec<String>>")]
pub struct TopicCatalog {
    categories: BTreeMap<String, Vec<String>>,
}

impl TopicCatalog {
    /// Build a catalog, rejecting empty catalogs and empty categories.
    pub fn new(categories: BTreeMap<String, Vec<String>>) -> Result<Self, QuizError> {
        if categories.is_empty() {
            return Err(QuizError::EmptyCatalog);
        }
        if let Some((name, _)) = categories.iter().find(|(_, subs)| subs.is_empty()) {
            return Err(QuizError::EmptyCategory(name.clone()));
        }
        Ok(Self { categories })
    }

    /// Convenience constructor from string slices.
    pub fn from_pairs(pairs: &[(&str, &[&str])]) -> Result<Self, QuizError> {
        let categories = pairs
            .iter()
            .map(|(name, subs)| {
                (
                    name.to_string(),
                    subs.iter().map(|s| s.to_string()).collect(),
                )
            })
            .collect();
        Self::new(categories)
    }

    /// The built-in JavaScript catalog.
    pub fn builtin() -> Self {
        Self {
            categories: BUILTIN_TOPICS
                .iter()
                .map(|(name, subs)| {
                    (
                        name.to_string(),
                        subs.iter().map(|s| s.to_string()).collect(),
                    )
                })
                .collect(),
        }
    }

    /// Narrow the catalog to a single category.
    pub fn restrict(&self, category: &str) -> Result<Self, QuizError> {
        match self.categories.get_key_value(category) {
            Some((name, subs)) => Ok(Self {
                categories: BTreeMap::from([(name.clone(), subs.clone())]),
            }),
            None => Err(QuizError::UnknownCategory {
                name: category.to_string(),
                available: self.category_names().collect::<Vec<_>>().join(", "),
            }),
        }
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Iterate over `(category, subtopics)` in category name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(name, subs)| (name.as_str(), subs.as_slice()))
    }

    pub fn contains_subtopic(&self, subtopic: &str) -> bool {
        self.categories
            .values()
            .any(|subs| subs.iter().any(|s| s == subtopic))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for TopicCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TryFrom<BTreeMap<String, Vec<String>>> for TopicCatalog {
    type Error = QuizError;

    fn try_from(categories: BTreeMap<String, Vec<String>>) -> Result<Self, Self::Error> {
        Self::new(categories)
    }
}

impl From<TopicCatalog> for BTreeMap<String, Vec<String>> {
    fn from(catalog: TopicCatalog) -> Self {
        catalog.categories
    }
}

const BUILTIN_TOPICS: &[(&str, &[&str])] = &[
    (
        "arrays",
        &[
            "map", "filter", "reduce", "includes", "indexOf", "pop", "push", "shift", "unshift",
        ],
    ),
    (
        "objects",
        &["keys", "values", "entries", "dot vs bracket notation"],
    ),
    (
        "loops",
        &["for loop", "while loop", "for...of loop", "forEach method"],
    ),
    ("strings", &["slice", "split", "join", "replace"]),
    (
        "functions",
        &[
            "function declaration",
            "function expression",
            "arrow function",
            "callback function",
        ],
    ),
];

/// Pick a category uniformly at random, then a subtopic within it.
pub fn pick_topic<'a, R: Rng + ?Sized>(catalog: &'a TopicCatalog, rng: &mut R) -> &'a str {
    let index = rng.gen_range(0..catalog.categories.len());
    let subtopics = catalog
        .categories
        .values()
        .nth(index)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let sub_index = rng.gen_range(0..subtopics.len());
    &subtopics[sub_index]
}

/// [`pick_topic`] with the thread-local entropy-seeded RNG.
pub fn pick_random_topic(catalog: &TopicCatalog) -> &str {
    pick_topic(catalog, &mut rand::thread_rng())
}
