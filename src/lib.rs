//! Core of the radius search: everything here is independent of the UI.
//!
//! ```text
//!  mutations.json / DVF .csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → MutationSet
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  Query(center, radius) → matching indices
//!   └──────────┘
//!        │
//!        ├──────────────┐
//!        ▼              ▼
//!   ┌──────────┐   ┌────────────┐
//!   │  stats    │   │ regression │  price ~ 1 + building + land
//!   └──────────┘   └────────────┘
//! ```
//!
//! [`session::handle_query`] ties the stages together for one interaction.

pub mod config;
pub mod data;
pub mod geo;
pub mod regression;
pub mod session;
pub mod stats;
