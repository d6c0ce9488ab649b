//! Work categories: a fixed default set plus user-defined additions.

use thiserror::Error;

/// Label used for entries without a category.
pub const DEFAULT_CATEGORY: &str = "Standard";

pub const DEFAULT_CATEGORIES: [&str; 10] = [
    "Standard",
    "Heures supplémentaires",
    "Travail de nuit",
    "Weekend",
    "Jours fériés",
    "Télétravail",
    "Déplacement",
    "Formation",
    "Réunion",
    "Support",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CategoryError {
    #[error("category name must not be empty")]
    Empty,
    #[error("default category '{0}' cannot be removed")]
    DefaultNotRemovable(String),
    #[error("category storage failed: {0}")]
    Storage(String),
}

pub fn is_default(name: &str) -> bool {
    DEFAULT_CATEGORIES.iter().any(|c| *c == name.trim())
}

/// Trims a new category name and rejects blank input.
pub fn normalize(name: &str) -> Result<String, CategoryError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CategoryError::Empty);
    }
    Ok(name.to_string())
}

pub fn check_removable(name: &str) -> Result<(), CategoryError> {
    if is_default(name) {
        return Err(CategoryError::DefaultNotRemovable(name.trim().to_string()));
    }
    Ok(())
}

/// Defaults first, then custom categories in their given order, duplicates dropped.
pub fn merge(custom: &[String]) -> Vec<String> {
    let mut all: Vec<String> = DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect();
    for name in custom {
        let name = name.trim();
        if !name.is_empty() && !all.iter().any(|c| c == name) {
            all.push(name.to_string());
        }
    }
    all
}
