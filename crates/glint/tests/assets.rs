//! Asset library behavior through the public API.

mod common;

use std::io::Read;
use std::sync::Arc;

use glint::asset::{Asset, AssetLibrary, BinaryAsset, FontAsset, DEFAULT_FONT};
use glint::render::VirtualPlatform;
use glint::{Context, Object};

fn binary(name: &str, bytes: &[u8]) -> Arc<BinaryAsset> {
    Arc::new(BinaryAsset::new(name, bytes.to_vec()))
}

fn running_library() -> AssetLibrary {
    let library = AssetLibrary::new("test");
    library.init();
    library
}

#[test]
fn test_protected_assets_survive_every_removal() {
    common::setup();
    let library = running_library();
    let keep = binary("keep", b"original");
    keep.set_protected(true);
    library.add(keep.clone());
    library.update(0.016);
    assert!(keep.object_base().is_initialized());

    library.dispose("keep");
    library.remove("keep");
    library.dispose_all();
    library.remove_all();
    library.add(binary("keep", b"replacement"));
    library.update(0.016);

    let found = library.get("keep").expect("protected asset still registered");
    assert!(Arc::ptr_eq(&found, &(keep.clone() as Arc<dyn Asset>)));
    assert!(keep.object_base().is_initialized());
}

#[test]
fn test_unprotected_assets_are_disposed() {
    let library = running_library();
    let temp = binary("temp", b"bytes");
    library.add(temp.clone());
    library.update(0.016);
    assert!(temp.object_base().is_initialized());

    library.dispose("temp");
    assert!(library.get("temp").is_none());
    library.update(0.016);
    assert!(!temp.object_base().is_initialized());
}

#[test]
fn test_removal_leaves_assets_open() {
    let library = running_library();
    let kept_open = binary("kept", b"bytes");
    library.add(kept_open.clone());
    library.update(0.016);

    library.remove("kept");
    library.update(0.016);
    assert!(library.get("kept").is_none());
    assert!(kept_open.object_base().is_initialized());
}

#[test]
fn test_adds_between_updates_coalesce_into_one_flush() {
    let library = running_library();
    let first = binary("a", b"1");
    let second = binary("a", b"2");
    let third = binary("b", b"3");
    library.add(first.clone());
    library.add(second.clone());
    library.add(third.clone());
    assert!(library.has_pending_changes());

    library.update(0.016);
    assert_eq!(library.flush_count(), 1);
    assert!(!library.has_pending_changes());

    library.update(0.016);
    assert_eq!(library.flush_count(), 1);

    assert_eq!(library.names(), vec!["a".to_string(), "b".to_string()]);
    let a = library.get("a").and_then(|asset| asset.source());
    assert_eq!(a.as_deref(), Some(&b"2"[..]));
    assert!(!first.object_base().is_initialized());
    assert!(second.object_base().is_initialized());
    assert!(third.object_base().is_initialized());
}

#[test]
fn test_missing_reader_has_a_callable_closer() {
    let dir = tempfile::tempdir().expect("temp dir");
    let library = AssetLibrary::new("files").with_local_root(dir.path());

    let (reader, closer) = library.get_reader("nowhere.bin");
    assert!(reader.is_none());
    closer.close();
}

#[test]
fn test_readers_prefer_memory_then_local_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(dir.path().join("notes.txt"), b"from disk").expect("write file");
    let library = AssetLibrary::new("files").with_local_root(dir.path());
    library.add(binary("inline", b"from memory"));

    let mut text = String::new();
    let (reader, closer) = library.get_reader("inline");
    reader.expect("memory reader").read_to_string(&mut text).expect("read");
    closer.close();
    assert_eq!(text, "from memory");

    text.clear();
    let (reader, closer) = library.get_reader("notes.txt");
    let mut reader = reader.expect("file reader");
    reader.read_to_string(&mut text).expect("read");
    assert_eq!(text, "from disk");

    closer.close();
    assert!(reader.read(&mut [0u8; 4]).is_err());
}

#[test]
fn test_unknown_fonts_fall_back_to_the_default() {
    let library = AssetLibrary::new("fonts");
    library.add(Arc::new(FontAsset::new(DEFAULT_FONT, Vec::new())));
    library.add(binary("not-a-font", b"bytes"));

    let fallback = library.font_or_default("missing").map(|font| font.name());
    assert_eq!(fallback.as_deref(), Some(DEFAULT_FONT));
    let wrong_kind = library.font_or_default("not-a-font").map(|font| font.name());
    assert_eq!(wrong_kind.as_deref(), Some(DEFAULT_FONT));
}

#[test]
fn test_context_library_is_shared_and_protected() {
    let ctx = Context::new(VirtualPlatform::new());
    let library = ctx.assets();
    assert!(Arc::ptr_eq(&library, &ctx.assets()));

    library.init();
    library.close();
    assert!(library.object_base().is_initialized());
}
