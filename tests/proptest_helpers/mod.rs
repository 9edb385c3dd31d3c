#![allow(dead_code)]

use image::{Rgb, RgbImage};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};
use slidebox::ir::{PlaceholderKind, Rect, Region, ShapeDescriptor, ShapeKind, SlideGeometry};

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// A filled rectangle to paint onto a raster, with its ink value.
#[derive(Clone, Debug)]
pub struct Blot {
    pub rect: Region,
    pub value: u8,
}

/// Rasters up to 160x120 with a few dark blots and some near-white noise.
pub fn arb_raster() -> BoxedStrategy<RgbImage> {
    (40u32..=160, 30u32..=120)
        .prop_flat_map(|(width, height)| {
            (
                Just(width),
                Just(height),
                proptest::collection::vec(arb_blot(width, height), 0..6),
                proptest::collection::vec((0..width, 0..height, 250u8..=255), 0..20),
            )
        })
        .prop_map(|(width, height, blots, noise)| {
            let mut img = RgbImage::from_pixel(width, height, WHITE);
            for blot in &blots {
                paint(&mut img, blot);
            }
            for (x, y, v) in noise {
                img.put_pixel(x, y, Rgb([v, 255, v]));
            }
            img
        })
        .boxed()
}

pub fn arb_blot(width: u32, height: u32) -> BoxedStrategy<Blot> {
    (0..width, 0..height, 1u32..=40, 1u32..=40, 0u8..250)
        .prop_map(move |(x, y, w, h, value)| Blot {
            rect: Region::new(
                i64::from(x),
                i64::from(y),
                i64::from((x + w).min(width)),
                i64::from((y + h).min(height)),
            ),
            value,
        })
        .boxed()
}

pub fn paint(img: &mut RgbImage, blot: &Blot) {
    for y in blot.rect.y1..blot.rect.y2 {
        for x in blot.rect.x1..blot.rect.x2 {
            img.put_pixel(x as u32, y as u32, Rgb([blot.value, blot.value, 255]));
        }
    }
}

/// Any non-empty region, possibly reaching outside a `width` x `height` image.
pub fn arb_region(width: u32, height: u32) -> BoxedStrategy<Region> {
    let (w, h) = (i64::from(width), i64::from(height));
    (-10..w, -10..h, 1i64..=w + 10, 1i64..=h + 10)
        .prop_map(|(x, y, rw, rh)| Region::new(x, y, x + rw, y + rh))
        .boxed()
}

/// A slide geometry in EMU with a plausible raster size.
pub fn arb_geometry() -> BoxedStrategy<SlideGeometry> {
    (
        prop_oneof![Just((9_144_000i64, 6_858_000i64)), Just((12_192_000, 6_858_000))],
        300u32..=2000,
    )
        .prop_map(|((sw, sh), image_w)| {
            let image_h = (i64::from(image_w) * sh / sw).max(1) as u32;
            SlideGeometry::new(sw, sh, image_w, image_h).expect("valid geometry")
        })
        .boxed()
}

pub fn arb_shape_kind() -> BoxedStrategy<ShapeKind> {
    prop_oneof![
        Just(ShapeKind::Picture),
        Just(ShapeKind::TextBox),
        Just(ShapeKind::Line),
        Just(ShapeKind::Other),
        prop_oneof![
            Just(PlaceholderKind::SectionTitle),
            Just(PlaceholderKind::Logo),
            Just(PlaceholderKind::PageNumber),
            Just(PlaceholderKind::Footer),
            Just(PlaceholderKind::Date),
        ]
        .prop_map(ShapeKind::Placeholder),
    ]
    .boxed()
}

/// Shapes placed anywhere on a 12_192_000 x 6_858_000 slide (or slightly off it).
pub fn arb_shape() -> BoxedStrategy<ShapeDescriptor> {
    (
        any::<u64>(),
        arb_shape_kind(),
        -100_000i64..12_192_000,
        -100_000i64..6_858_000,
        0i64..12_192_000,
        0i64..6_858_000,
        proptest::option::of(prop_oneof![
            proptest::string::string_regex("[0-9]{1,2}\\. ?[가-힣A-Za-z]{1,6}")
                .expect("valid section title regex"),
            proptest::string::string_regex("[ -~]{0,20}").expect("valid text regex"),
        ]),
    )
        .prop_map(|(id, kind, x, y, w, h, text)| {
            let shape = ShapeDescriptor::new(id, kind, Rect::from_xywh(x, y, w, h));
            match text {
                Some(text) => shape.with_text(text),
                None => shape,
            }
        })
        .boxed()
}
