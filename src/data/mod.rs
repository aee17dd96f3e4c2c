/// Data layer: core types, loading, reconstruction, resampling, output.
///
/// Architecture:
/// ```text
///   QE export (.csv)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawGrid (no header interpretation)
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ reconstruct │  colour/axis header rows → (channel, axis) columns
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ assemble  │  per-channel interpolant → WavelengthGrid → QeTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  writer   │  QeTable → QE_<brand>_<model>.tsv
///   └──────────┘
/// ```

pub mod assemble;
pub mod interpolate;
pub mod loader;
pub mod model;
pub mod reconstruct;
pub mod writer;
