//! Font contract consumed by text rasterization.

use std::sync::Arc;

/// A parsed typeface.
pub trait FontFace: Send + Sync {
    /// Family name from the font's name table, if present.
    fn family_name(&self) -> Option<String>;

    fn units_per_em(&self) -> u16;

    fn glyph_count(&self) -> u16;

    /// The raw font file, for rasterizers that parse it themselves.
    fn data(&self) -> Arc<[u8]>;
}
