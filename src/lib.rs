//! Public library API for decoding `.wld` fragment-table world files.

/// Header and fragment decoding, reference resolution, and post-decode passes.
pub mod wld;
