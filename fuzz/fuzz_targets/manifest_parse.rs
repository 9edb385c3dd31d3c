//! Fuzz target for deck manifest parsing.
//!
//! This fuzzer feeds arbitrary byte sequences to the JSON and YAML manifest
//! parsers. Every JSON manifest that parses is classified, has its layout
//! inferred and its shapes projected onto a raster, checking for panics,
//! crashes, or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use slidebox::classify::MasterElementClassifier;
use slidebox::grid::infer_layout;
use slidebox::ir::manifest::{from_manifest_slice, from_manifest_yaml_slice};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = from_manifest_yaml_slice(data);

    let Ok(manifest) = from_manifest_slice(data) else {
        return;
    };
    let Ok(geometry) = manifest.geometry(1500, 1125) else {
        return;
    };
    let _ = manifest.geometry_at_dpi(150);
    let classifier = MasterElementClassifier::new();
    for slide in &manifest.slides {
        let _ = classifier.classify_slide(&slide.shapes, &geometry);
        let content = classifier.content_shapes(&slide.shapes, &geometry);
        let _ = infer_layout(&content, &geometry);
        for shape in &slide.shapes {
            let _ = geometry.to_pixels(&shape.bounds);
        }
    }
});
