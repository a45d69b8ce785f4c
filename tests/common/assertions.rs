//! Assertion helpers for tests.

use std::path::Path;

/// Assert a file is a JPEG with the given dimensions
pub fn assert_jpeg(path: &Path, width: u32, height: u32) {
    let bytes = std::fs::read(path)
        .unwrap_or_else(|e| panic!("Expected JPEG at {}: {e}", path.display()));
    assert!(
        bytes.starts_with(&[0xFF, 0xD8, 0xFF]),
        "Expected JPEG signature, got {:?}",
        &bytes[..4.min(bytes.len())]
    );
    let image = image::load_from_memory(&bytes).expect("JPEG should decode");
    assert_eq!((image.width(), image.height()), (width, height));
}

/// Assert a file is a PNG
pub fn assert_png(path: &Path) {
    let bytes = std::fs::read(path)
        .unwrap_or_else(|e| panic!("Expected PNG at {}: {e}", path.display()));
    assert!(
        bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]),
        "Expected PNG signature, got {:?}",
        &bytes[..4.min(bytes.len())]
    );
}

/// Read a JSON file
pub fn read_json(path: &Path) -> serde_json::Value {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Expected JSON at {}: {e}", path.display()));
    serde_json::from_str(&content).expect("Invalid JSON")
}
