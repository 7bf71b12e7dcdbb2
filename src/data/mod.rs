/// Data layer: core types, loading, and radius filtering.
///
/// Architecture:
/// ```text
///  mutations.json / DVF .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → MutationSet
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ MutationSet  │  Vec<Mutation>, each with its parcels
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  geodesic radius test → filtered indices
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
