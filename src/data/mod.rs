//! Data layer: element model, loading, grid layout and filtering.
//!
//! Architecture:
//! ```text
//!  bundled / .json / .csv / http(s)
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  fetch → coerce numbers → validate layout
//!   └──────────┘
//!        │
//!        ▼
//!   ┌────────────────┐
//!   │ ElementDataset  │  Vec<Element>, category / phase choices
//!   └────────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  search + category + phase → per-element match flag
//!   └──────────┘
//! ```

pub mod filter;
pub mod grid;
pub mod loader;
pub mod model;
