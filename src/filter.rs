//! Typed inventory filter criteria
//!
//! Replaces the old hand-built filter dialog with a declarative
//! configuration value. Criteria are applied to rows *before* they enter an
//! ExportRequest; the export engine itself never re-sorts.

use crate::types::{CellValue, RowRecord};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Stock-count bucket for one product row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockLevel {
    Empty,
    Low,
    Medium,
    High,
}

impl StockLevel {
    /// Bucket a raw stock count. Thresholds follow the store dashboard:
    /// below 10 is low, below 50 is medium.
    pub fn bucket(stock: f64) -> Self {
        if stock <= 0.0 {
            StockLevel::Empty
        } else if stock < 10.0 {
            StockLevel::Low
        } else if stock < 50.0 {
            StockLevel::Medium
        } else {
            StockLevel::High
        }
    }
}

/// Stock position relative to the row's own minimum-stock threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockRelation {
    Below,
    AtOrAbove,
}

impl StockRelation {
    pub fn of(stock: f64, minimum: f64) -> Self {
        if stock < minimum {
            StockRelation::Below
        } else {
            StockRelation::AtOrAbove
        }
    }
}

/// Sort order applied after filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Name,
    Stock,
    Price,
}

/// Which row keys hold the fields the criteria inspect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterKeys {
    pub name: String,
    pub stock: String,
    pub minimum: String,
    pub price: String,
}

impl Default for FilterKeys {
    fn default() -> Self {
        Self {
            name: "nombre".to_string(),
            stock: "stock".to_string(),
            minimum: "stock_minimo".to_string(),
            price: "precio".to_string(),
        }
    }
}

/// Declarative filter configuration. Empty criteria sets mean
/// "no restriction".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub stock_levels: Vec<StockLevel>,
    #[serde(default)]
    pub stock_relations: Vec<StockRelation>,
    #[serde(default)]
    pub sort_by: Option<SortBy>,
}

impl FilterCriteria {
    /// Filter and order rows per the criteria. Rows the criteria cannot
    /// evaluate (missing or non-numeric stock fields) read as zero, matching
    /// the null handling of the export paths.
    pub fn apply(&self, rows: &[RowRecord], keys: &FilterKeys) -> Vec<RowRecord> {
        let mut selected: Vec<RowRecord> = rows
            .iter()
            .filter(|row| self.matches(row, keys))
            .cloned()
            .collect();

        if let Some(sort_by) = self.sort_by {
            // Stable sort keeps the caller-established order among ties
            selected.sort_by(|a, b| compare(a, b, sort_by, keys));
        }

        selected
    }

    fn matches(&self, row: &RowRecord, keys: &FilterKeys) -> bool {
        let stock = numeric(row.get(&keys.stock));

        if !self.stock_levels.is_empty() && !self.stock_levels.contains(&StockLevel::bucket(stock))
        {
            return false;
        }

        if !self.stock_relations.is_empty() {
            let minimum = numeric(row.get(&keys.minimum));
            if !self
                .stock_relations
                .contains(&StockRelation::of(stock, minimum))
            {
                return false;
            }
        }

        true
    }
}

fn numeric(value: &CellValue) -> f64 {
    value.as_f64().unwrap_or(0.0)
}

fn compare(a: &RowRecord, b: &RowRecord, sort_by: SortBy, keys: &FilterKeys) -> Ordering {
    match sort_by {
        SortBy::Name => {
            let a = a.get(&keys.name).as_str().unwrap_or_default().to_lowercase();
            let b = b.get(&keys.name).as_str().unwrap_or_default().to_lowercase();
            a.cmp(&b)
        }
        SortBy::Stock => total_cmp(a, b, &keys.stock),
        SortBy::Price => total_cmp(a, b, &keys.price),
    }
}

fn total_cmp(a: &RowRecord, b: &RowRecord, key: &str) -> Ordering {
    numeric(a.get(key)).total_cmp(&numeric(b.get(key)))
}
