//! Sort keys accepted by the `sort` query parameter.

use serde::{Deserialize, Serialize};

/// Order in which repository search results are returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchOrder {
    Newest,
    Oldest,
    RecentUpdated,
    LeastUpdated,
    Alphabetically,
    AlphabeticallyReverse,
    StarsReverse,
    Stars,
    ForksReverse,
    Forks,
}

/// A recognised value of the `sort` query parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    Newest,
    Oldest,
    #[default]
    RecentUpdate,
    LeastUpdate,
    Alphabetically,
    ReverseAlphabetically,
    MostStars,
    FewestStars,
    MostForks,
    FewestForks,
}

impl SortKey {
    /// Map a raw query value to a sort key. Unknown or empty values fall back
    /// to [`SortKey::RecentUpdate`].
    pub fn from_query(raw: &str) -> Self {
        match raw {
            "newest" => SortKey::Newest,
            "oldest" => SortKey::Oldest,
            "recentupdate" => SortKey::RecentUpdate,
            "leastupdate" => SortKey::LeastUpdate,
            "alphabetically" => SortKey::Alphabetically,
            "reversealphabetically" => SortKey::ReverseAlphabetically,
            "moststars" => SortKey::MostStars,
            "feweststars" => SortKey::FewestStars,
            "mostforks" => SortKey::MostForks,
            "fewestforks" => SortKey::FewestForks,
            _ => SortKey::default(),
        }
    }

    /// The label echoed back to the page and into pagination links.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::RecentUpdate => "recentupdate",
            SortKey::LeastUpdate => "leastupdate",
            SortKey::Alphabetically => "alphabetically",
            SortKey::ReverseAlphabetically => "reversealphabetically",
            SortKey::MostStars => "moststars",
            SortKey::FewestStars => "feweststars",
            SortKey::MostForks => "mostforks",
            SortKey::FewestForks => "fewestforks",
        }
    }

    pub fn order(&self) -> SearchOrder {
        match self {
            SortKey::Newest => SearchOrder::Newest,
            SortKey::Oldest => SearchOrder::Oldest,
            SortKey::RecentUpdate => SearchOrder::RecentUpdated,
            SortKey::LeastUpdate => SearchOrder::LeastUpdated,
            SortKey::Alphabetically => SearchOrder::Alphabetically,
            SortKey::ReverseAlphabetically => SearchOrder::AlphabeticallyReverse,
            SortKey::MostStars => SearchOrder::StarsReverse,
            SortKey::FewestStars => SearchOrder::Stars,
            SortKey::MostForks => SearchOrder::ForksReverse,
            SortKey::FewestForks => SearchOrder::Forks,
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
