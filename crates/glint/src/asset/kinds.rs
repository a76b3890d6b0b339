//! Concrete asset kinds.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use glint_core::logging::targets;
use glint_core::{Object, ObjectBase};
use glint_render::{
    FontFace, Model, RenderError, ShaderProgram, ShaderSource, Texture, TextureData,
};
use parking_lot::RwLock;

use super::{Asset, AssetBase, builtin_shader};
use crate::error::{AssetError, AssetResult};

fn required_source(base: &AssetBase) -> AssetResult<Arc<[u8]>> {
    base.source()
        .ok_or_else(|| AssetError::MissingSource(base.object().name().to_string()))
}

fn log_init_failure(name: &str, err: &AssetError) {
    tracing::warn!(target: targets::ASSET, asset = name, error = %err, "asset failed to initialize");
}

// ============================================================================
// BinaryAsset
// ============================================================================

/// Raw bytes with no interpretation.
#[derive(Debug)]
pub struct BinaryAsset {
    base: AssetBase,
}

impl BinaryAsset {
    pub fn new(name: impl Into<Arc<str>>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            base: AssetBase::with_source(name, bytes),
        }
    }
}

impl Object for BinaryAsset {
    fn object_base(&self) -> &ObjectBase {
        self.base.object()
    }
}

impl Asset for BinaryAsset {
    fn asset_base(&self) -> &AssetBase {
        &self.base
    }
}

// ============================================================================
// TextureAsset
// ============================================================================

/// An encoded image decoded to RGBA8 on `init`.
///
/// The rendering backend uploads [`pixels`](Self::pixels) and records its
/// handle with [`set_gl_name`](Self::set_gl_name).
#[derive(Debug)]
pub struct TextureAsset {
    base: AssetBase,
    data: RwLock<Option<Arc<TextureData>>>,
    width: AtomicU32,
    height: AtomicU32,
    gl_name: AtomicU32,
}

impl TextureAsset {
    pub fn new(name: impl Into<Arc<str>>, encoded: impl Into<Arc<[u8]>>) -> Self {
        Self {
            base: AssetBase::with_source(name, encoded),
            data: RwLock::new(None),
            width: AtomicU32::new(0),
            height: AtomicU32::new(0),
            gl_name: AtomicU32::new(0),
        }
    }

    /// Decoded pixels, available while initialized.
    pub fn pixels(&self) -> Option<Arc<TextureData>> {
        self.data.read().clone()
    }

    pub fn set_gl_name(&self, name: u32) {
        self.gl_name.store(name, Ordering::Release);
    }

    fn load(&self) -> AssetResult<TextureData> {
        let source = required_source(&self.base)?;
        Ok(TextureData::decode(&source)?)
    }
}

impl Object for TextureAsset {
    fn object_base(&self) -> &ObjectBase {
        self.base.object()
    }

    fn init(&self) -> bool {
        if self.base.object().is_initialized() {
            return true;
        }
        match self.load() {
            Ok(data) => {
                self.width.store(data.width, Ordering::Release);
                self.height.store(data.height, Ordering::Release);
                *self.data.write() = Some(Arc::new(data));
                self.base.object().init()
            }
            Err(err) => {
                log_init_failure(&self.name(), &err);
                false
            }
        }
    }

    fn close(&self) {
        *self.data.write() = None;
        self.gl_name.store(0, Ordering::Release);
        self.base.object().close();
    }
}

impl Asset for TextureAsset {
    fn asset_base(&self) -> &AssetBase {
        &self.base
    }

    fn as_texture(&self) -> Option<&dyn Texture> {
        Some(self)
    }
}

impl Texture for TextureAsset {
    fn gl_name(&self) -> u32 {
        self.gl_name.load(Ordering::Acquire)
    }

    fn width(&self) -> u32 {
        self.width.load(Ordering::Acquire)
    }

    fn height(&self) -> u32 {
        self.height.load(Ordering::Acquire)
    }
}

// ============================================================================
// FontAsset
// ============================================================================

#[derive(Debug, Clone)]
struct FontInfo {
    family: Option<String>,
    units_per_em: u16,
    glyph_count: u16,
}

/// A TrueType/OpenType font, parsed on `init` to check it is usable.
#[derive(Debug)]
pub struct FontAsset {
    base: AssetBase,
    info: RwLock<Option<FontInfo>>,
}

impl FontAsset {
    pub fn new(name: impl Into<Arc<str>>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            base: AssetBase::with_source(name, bytes),
            info: RwLock::new(None),
        }
    }

    fn parse(&self) -> AssetResult<FontInfo> {
        let source = required_source(&self.base)?;
        let face = ttf_parser::Face::parse(&source, 0)
            .map_err(|err| RenderError::FontParse(err.to_string()))?;
        let family = face
            .names()
            .into_iter()
            .filter(|name| name.name_id == ttf_parser::name_id::FAMILY && name.is_unicode())
            .find_map(|name| name.to_string());
        Ok(FontInfo {
            family,
            units_per_em: face.units_per_em(),
            glyph_count: face.number_of_glyphs(),
        })
    }
}

impl Object for FontAsset {
    fn object_base(&self) -> &ObjectBase {
        self.base.object()
    }

    fn init(&self) -> bool {
        if self.base.object().is_initialized() {
            return true;
        }
        match self.parse() {
            Ok(info) => {
                *self.info.write() = Some(info);
                self.base.object().init()
            }
            Err(err) => {
                log_init_failure(&self.name(), &err);
                false
            }
        }
    }

    fn close(&self) {
        *self.info.write() = None;
        self.base.object().close();
    }
}

impl Asset for FontAsset {
    fn asset_base(&self) -> &AssetBase {
        &self.base
    }

    fn as_font(&self) -> Option<&dyn FontFace> {
        Some(self)
    }
}

impl FontFace for FontAsset {
    fn family_name(&self) -> Option<String> {
        self.info.read().as_ref().and_then(|info| info.family.clone())
    }

    fn units_per_em(&self) -> u16 {
        self.info.read().as_ref().map_or(0, |info| info.units_per_em)
    }

    fn glyph_count(&self) -> u16 {
        self.info.read().as_ref().map_or(0, |info| info.glyph_count)
    }

    fn data(&self) -> Arc<[u8]> {
        self.base.source().unwrap_or_else(|| Arc::from(Vec::new()))
    }
}

// ============================================================================
// ShaderAsset
// ============================================================================

/// A vertex/fragment source pair.
///
/// The rendering backend compiles the source and attaches the linked program
/// with [`attach_program`](Self::attach_program); until then the
/// [`ShaderProgram`] methods report nothing bound.
pub struct ShaderAsset {
    base: AssetBase,
    source: ShaderSource,
    program: RwLock<Option<Arc<dyn ShaderProgram>>>,
}

impl ShaderAsset {
    pub fn new(name: impl Into<Arc<str>>, source: ShaderSource) -> Self {
        Self {
            base: AssetBase::new(name),
            source,
            program: RwLock::new(None),
        }
    }

    /// A built-in program (`quad`, `line`, `text`), registered under its
    /// own name.
    ///
    /// # Panics
    ///
    /// Panics if no such program is embedded.
    pub fn builtin(name: &str) -> Self {
        Self::new(name, builtin_shader(name))
    }

    pub fn shader_source(&self) -> &ShaderSource {
        &self.source
    }

    pub fn attach_program(&self, program: Arc<dyn ShaderProgram>) {
        *self.program.write() = Some(program);
    }

    pub fn program(&self) -> Option<Arc<dyn ShaderProgram>> {
        self.program.read().clone()
    }
}

impl std::fmt::Debug for ShaderAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaderAsset")
            .field("base", &self.base)
            .field("program_attached", &self.program.read().is_some())
            .finish()
    }
}

impl Object for ShaderAsset {
    fn object_base(&self) -> &ObjectBase {
        self.base.object()
    }

    fn init(&self) -> bool {
        if let Err(err) = self.source.validate() {
            log_init_failure(&self.name(), &err.into());
            return false;
        }
        self.base.object().init()
    }

    fn close(&self) {
        *self.program.write() = None;
        self.base.object().close();
    }
}

impl Asset for ShaderAsset {
    fn asset_base(&self) -> &AssetBase {
        &self.base
    }

    fn as_shader(&self) -> Option<&dyn ShaderProgram> {
        Some(self)
    }
}

impl ShaderProgram for ShaderAsset {
    fn activate(&self) {
        match self.program() {
            Some(program) => program.activate(),
            None => tracing::trace!(target: targets::ASSET, shader = %self.name(), "no program attached"),
        }
    }

    fn uniform_location(&self, name: &str) -> i32 {
        self.program().map_or(-1, |program| program.uniform_location(name))
    }

    fn attrib_location(&self, name: &str) -> i32 {
        self.program().map_or(-1, |program| program.attrib_location(name))
    }

    fn gl_name(&self) -> u32 {
        self.program().map_or(0, |program| program.gl_name())
    }
}

// ============================================================================
// ModelAsset
// ============================================================================

/// Model buffers, validated on `init`.
#[derive(Debug)]
pub struct ModelAsset {
    base: AssetBase,
    model: Arc<Model>,
}

impl ModelAsset {
    pub fn new(name: impl Into<Arc<str>>, model: Model) -> Self {
        Self {
            base: AssetBase::new(name),
            model: Arc::new(model),
        }
    }

    pub fn model(&self) -> &Arc<Model> {
        &self.model
    }
}

impl Object for ModelAsset {
    fn object_base(&self) -> &ObjectBase {
        self.base.object()
    }

    fn init(&self) -> bool {
        if let Err(err) = self.model.validate() {
            log_init_failure(&self.name(), &err.into());
            return false;
        }
        self.base.object().init()
    }
}

impl Asset for ModelAsset {
    fn asset_base(&self) -> &AssetBase {
        &self.base
    }
}
