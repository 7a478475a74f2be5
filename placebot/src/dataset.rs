//! Venue datasets.
//!
//! A dataset is the ordered list of venue records for one [`Category`]. The
//! records are opaque to the assistant apart from their `title`, which is
//! shown to the user; they are serialized verbatim into the prompt.

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Error, Result};
use crate::venue::Category;

/// A single venue record as stored on disk.
pub type Record = Map<String, Value>;

/// The loaded venues of one category.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    category: Category,
    records: Vec<Record>,
}

impl Dataset {
    /// Build a dataset from a parsed JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Dataset`] unless `value` is an array of objects that
    /// each carry a string `title`.
    pub fn from_value(category: Category, value: Value) -> Result<Self> {
        let Value::Array(items) = value else {
            return Err(Error::dataset(category, "expected a JSON array of venues"));
        };

        let records = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(record) if record.get("title").is_some_and(Value::is_string) => {
                    Ok(record)
                }
                Value::Object(_) => Err(Error::dataset(
                    category,
                    format!("venue #{index} has no string `title`"),
                )),
                _ => Err(Error::dataset(
                    category,
                    format!("venue #{index} is not a JSON object"),
                )),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { category, records })
    }

    /// Parse a dataset from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Dataset`] if the text is not valid JSON or fails the
    /// checks of [`Dataset::from_value`].
    pub fn from_json_str(category: Category, json: &str) -> Result<Self> {
        let value = serde_json::from_str(json)
            .map_err(|e| Error::dataset(category, format!("invalid JSON: {e}")))?;
        Self::from_value(category, value)
    }

    /// The category of these venues.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Display titles, in file order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.records
            .iter()
            .filter_map(|record| record.get("title").and_then(Value::as_str))
    }

    /// Number of venues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no venues.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serialize the records for embedding in a prompt.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if serialization fails.
    pub fn to_prompt_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.records)?)
    }
}

/// Source of venue datasets, keyed by category.
#[async_trait]
pub trait DatasetStore: Send + Sync {
    /// Load the dataset of a category.
    async fn load(&self, category: Category) -> Result<Dataset>;
}

/// Datasets stored as `<category>.json` files in one directory.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Default dataset directory, relative to the working directory.
    pub const DEFAULT_DIR: &'static str = "places-data";

    /// Create a store rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the dataset file for a category.
    #[must_use]
    pub fn path_for(&self, category: Category) -> PathBuf {
        self.root.join(format!("{category}.json"))
    }
}

impl Default for DirectoryStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DIR)
    }
}

#[async_trait]
impl DatasetStore for DirectoryStore {
    async fn load(&self, category: Category) -> Result<Dataset> {
        let path = self.path_for(category);
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| Error::dataset(category, format!("cannot read {}: {e}", path.display())))?;

        let dataset = Dataset::from_json_str(category, &content)?;
        debug!(path = %path.display(), venues = dataset.len(), "loaded dataset");
        Ok(dataset)
    }
}
