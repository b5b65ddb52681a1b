//! Spending categories shared by the extraction prompt and its consumers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Fixed taxonomy the vision model is asked to classify transactions into
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Shopping,
    Leisure,
    Transport,
    Utilities,
    Healthcare,
    Transfer,
    Unknown,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Food,
        Category::Shopping,
        Category::Leisure,
        Category::Transport,
        Category::Utilities,
        Category::Healthcare,
        Category::Transfer,
        Category::Unknown,
    ];

    /// Wire label (lowercase)
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Shopping => "shopping",
            Category::Leisure => "leisure",
            Category::Transport => "transport",
            Category::Utilities => "utilities",
            Category::Healthcare => "healthcare",
            Category::Transfer => "transfer",
            Category::Unknown => "unknown",
        }
    }

    /// Illustrative members, as listed to the model
    pub fn examples(&self) -> &'static str {
        match self {
            Category::Food => "restaurants, groceries, cafes, food delivery",
            Category::Shopping => "retail stores, online shopping, clothing, electronics",
            Category::Leisure => "entertainment, movies, games, sports, hobbies",
            Category::Transport => "fuel, parking, public transport, ride-sharing, car services",
            Category::Utilities => "electricity, water, gas, internet, phone bills",
            Category::Healthcare => "medical, pharmacy, insurance, dental",
            Category::Transfer => "bank transfers, atm withdrawals, peer-to-peer payments",
            Category::Unknown => "unclear or unidentifiable transactions",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category label: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_ascii_lowercase();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == label)
            .ok_or(UnknownCategory(s.to_string()))
    }
}

/// Best-effort guess from a statement description, used only when the model
/// did not label a transaction itself.
pub fn guess_from_description(description: &str) -> Category {
    let desc = description.to_lowercase();
    let words: Vec<&str> = desc
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    // Multi-word keys match as phrases, single words only as whole words.
    let has = |keys: &[&str]| {
        keys.iter().any(|k| {
            if k.contains(' ') {
                desc.contains(k)
            } else {
                words.contains(k)
            }
        })
    };

    if has(&["transfer", "atm", "withdrawal", "zelle", "venmo", "paypal", "wire"]) {
        return Category::Transfer;
    }
    if has(&["restaurant", "restaurants", "grocery", "groceries", "cafe", "coffee", "doordash", "uber eats", "deliveroo", "bakery"]) {
        return Category::Food;
    }
    if has(&["fuel", "petrol", "shell", "parking", "metro", "transit", "uber", "lyft", "taxi", "train"]) {
        return Category::Transport;
    }
    if has(&["electric", "electricity", "water", "gas bill", "internet", "broadband", "phone", "mobile"]) {
        return Category::Utilities;
    }
    if has(&["pharmacy", "medical", "clinic", "hospital", "dental", "dentist", "insurance"]) {
        return Category::Healthcare;
    }
    if has(&["cinema", "movie", "netflix", "spotify", "steam", "gym", "concert", "theatre"]) {
        return Category::Leisure;
    }
    if has(&["amazon", "store", "stores", "shop", "mall", "clothing", "electronics"]) {
        return Category::Shopping;
    }

    Category::Unknown
}
