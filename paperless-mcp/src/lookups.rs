//! Lookup categories and the in-memory lookup cache
//!
//! Paperless attaches five kinds of metadata to documents. Listing any of
//! them requires walking a paginated endpoint, so fetched lists are held in
//! a TTL-based cache owned by the tool handlers rather than module state.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde_json::{Map, Value};

/// An opaque record returned by Paperless for a lookup item or document.
pub type RemoteItem = Map<String, Value>;

/// The five fixed metadata kinds attached to Paperless documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupCategory {
    /// Tags applied to documents
    Tags,
    /// Document type classifications
    DocumentTypes,
    /// Senders/receivers associated with documents
    Correspondents,
    /// Storage path assignments
    StoragePaths,
    /// User-defined custom fields
    CustomFields,
}

impl LookupCategory {
    /// All categories, in the canonical order used by list responses.
    pub const ALL: [LookupCategory; 5] = [
        LookupCategory::Tags,
        LookupCategory::DocumentTypes,
        LookupCategory::Correspondents,
        LookupCategory::StoragePaths,
        LookupCategory::CustomFields,
    ];

    /// Canonical plural name.
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupCategory::Tags => "tags",
            LookupCategory::DocumentTypes => "document_types",
            LookupCategory::Correspondents => "correspondents",
            LookupCategory::StoragePaths => "storage_paths",
            LookupCategory::CustomFields => "custom_fields",
        }
    }

    /// API list/create endpoint for this category.
    pub fn endpoint(&self) -> &'static str {
        match self {
            LookupCategory::Tags => "/api/tags/",
            LookupCategory::DocumentTypes => "/api/document_types/",
            LookupCategory::Correspondents => "/api/correspondents/",
            LookupCategory::StoragePaths => "/api/storage_paths/",
            LookupCategory::CustomFields => "/api/custom_fields/",
        }
    }

    /// Whether Paperless applies matching rules to this category.
    /// Custom fields carry no matching configuration.
    pub fn supports_matching(&self) -> bool {
        !matches!(self, LookupCategory::CustomFields)
    }

    /// The canonical plural names, for invalid-request payloads.
    pub fn allowed_names() -> Vec<String> {
        Self::ALL.iter().map(|c| c.as_str().to_string()).collect()
    }
}

/// Normalize a lookup-type name to its canonical category.
///
/// Accepts canonical plural names and singular aliases, case-insensitively
/// and ignoring surrounding whitespace. Empty or unknown input yields None.
pub fn normalize_lookup_type(lookup_type: &str) -> Option<LookupCategory> {
    let normalized = lookup_type.trim().to_lowercase();
    match normalized.as_str() {
        "tags" | "tag" => Some(LookupCategory::Tags),
        "document_types" | "document_type" => Some(LookupCategory::DocumentTypes),
        "correspondents" | "correspondent" => Some(LookupCategory::Correspondents),
        "storage_paths" | "storage_path" => Some(LookupCategory::StoragePaths),
        "custom_fields" | "custom_field" => Some(LookupCategory::CustomFields),
        _ => None,
    }
}

/// Resolve a matching-algorithm label to its integer code.
///
/// Integers pass through unchanged. Known labels map through the lexicon;
/// unrecognized values are returned as-is and left for Paperless to judge.
pub fn normalize_matching_algorithm(value: Value) -> Value {
    if value.is_number() {
        return value;
    }
    if let Value::String(ref raw) = value {
        let code = match raw.trim().to_lowercase().as_str() {
            "none" => Some(0),
            "any" => Some(1),
            "all" => Some(2),
            "exact" | "literal" => Some(3),
            "regex" | "regular_expression" | "regular expression" => Some(4),
            "fuzzy" => Some(5),
            "auto" => Some(6),
            _ => None,
        };
        if let Some(code) = code {
            return Value::from(code);
        }
    }
    value
}

/// The matching-algorithm code meaning "auto".
pub const MATCHING_ALGORITHM_AUTO: i64 = 6;

struct CacheEntry {
    fetched_at: Instant,
    items: Vec<RemoteItem>,
}

/// In-memory, TTL-based cache of full lookup listings.
///
/// A TTL of zero disables the cache: `put` stores nothing and `get` always
/// misses. Stale entries are dropped lazily on the read that finds them
/// expired. Entries for different categories are independent, and the
/// underlying map is safe for concurrent tool dispatch.
pub struct LookupCache {
    ttl: Duration,
    entries: DashMap<LookupCategory, CacheEntry>,
}

impl LookupCache {
    /// Create a cache with the given TTL.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: DashMap::new(),
        }
    }

    /// Cached items for a category, or None on a miss.
    pub fn get(&self, category: LookupCategory) -> Option<Vec<RemoteItem>> {
        if self.ttl.is_zero() {
            return None;
        }
        if let Some(entry) = self.entries.get(&category) {
            if entry.fetched_at.elapsed() <= self.ttl {
                return Some(entry.items.clone());
            }
        }
        // Expired entry, if any, is dropped rather than served.
        self.entries.remove(&category);
        None
    }

    /// Store a freshly fetched listing. No-op when caching is disabled.
    pub fn put(&self, category: LookupCategory, items: Vec<RemoteItem>) {
        if self.ttl.is_zero() {
            return;
        }
        self.entries.insert(
            category,
            CacheEntry {
                fetched_at: Instant::now(),
                items,
            },
        );
    }

    /// Remove a category's entry unconditionally. Called after a mutation
    /// so the next listing reflects the new item.
    pub fn invalidate(&self, category: LookupCategory) {
        self.entries.remove(&category);
    }
}
