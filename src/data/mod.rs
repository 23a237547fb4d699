/// Data layer: core types, parsing, and band filtering.
///
/// Architecture:
/// ```text
///  instrument .asc export
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  skip header/footer, parse lines → Spectrum
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Spectrum  │  Vec<Sample> in file order
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  peak / full-band window → samples in band
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
