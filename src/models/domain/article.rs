use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Named entities extracted from an article, bucketed by kind.
///
/// Sets rather than lists: duplicates collapse and iteration order is
/// deterministic, which keeps the generated prompt stable for a given page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct KeyEntities {
    pub people: BTreeSet<String>,
    pub organizations: BTreeSet<String>,
    pub locations: BTreeSet<String>,
}

impl KeyEntities {
    pub fn is_empty(&self) -> bool {
        self.people.is_empty() && self.organizations.is_empty() && self.locations.is_empty()
    }
}

/// Normalized extraction of a Wikipedia article, used as LLM input.
///
/// Produced once per pipeline run and owned by it; never persisted on its
/// own. Immutable after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArticleDigest {
    pub title: String,
    pub summary: String,
    pub sections: Vec<String>,
    pub entities: KeyEntities,
}
