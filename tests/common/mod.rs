#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use slidebox::ir::manifest::write_manifest;
use slidebox::ir::{DeckManifest, GridLayout, Rect, ShapeDescriptor, ShapeKind, SlideManifest};

/// 4:3 slide in EMU.
pub const SLIDE_W: i64 = 9_144_000;
pub const SLIDE_H: i64 = 6_858_000;

/// The same slide rendered at 150 DPI.
pub const IMAGE_W: u32 = 1500;
pub const IMAGE_H: u32 = 1125;

/// EMU per pixel at 150 DPI.
pub const EMU_PER_PX: i64 = 6096;

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const INK: Rgb<u8> = Rgb([30, 30, 30]);

pub fn blank_slide() -> RgbImage {
    RgbImage::from_pixel(IMAGE_W, IMAGE_H, WHITE)
}

/// Paints `[x1, x2) x [y1, y2)` with ink.
pub fn fill(img: &mut RgbImage, x1: u32, y1: u32, x2: u32, y2: u32) {
    for y in y1..y2.min(img.height()) {
        for x in x1..x2.min(img.width()) {
            img.put_pixel(x, y, INK);
        }
    }
}

/// A shape given in pixel coordinates, stored in EMU.
pub fn shape_px(id: u64, kind: ShapeKind, x: i64, y: i64, w: i64, h: i64) -> ShapeDescriptor {
    ShapeDescriptor::new(
        id,
        kind,
        Rect::from_xywh(x * EMU_PER_PX, y * EMU_PER_PX, w * EMU_PER_PX, h * EMU_PER_PX),
    )
}

/// Saves `img` as `slide-<page>.png` in `dir`.
pub fn write_slide(dir: &Path, page: usize, img: &RgbImage) -> PathBuf {
    fs::create_dir_all(dir).expect("create slide dir");
    let path = dir.join(format!("slide-{}.png", page));
    img.save(&path).expect("write slide png");
    path
}

/// Writes a manifest for a 4:3 deck with the given slides.
pub fn write_deck(path: &Path, slides: Vec<(Option<GridLayout>, Vec<ShapeDescriptor>)>) {
    let manifest = DeckManifest {
        slide_width: SLIDE_W,
        slide_height: SLIDE_H,
        source: None,
        slides: slides
            .into_iter()
            .map(|(layout, shapes)| SlideManifest { layout, shapes })
            .collect(),
    };
    write_manifest(path, &manifest).expect("write manifest");
}
