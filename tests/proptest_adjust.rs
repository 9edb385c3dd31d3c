use proptest::prelude::*;
use slidebox::adjust::{adjust, edge_band, AdjustOptions, Edge};
use slidebox::ir::Region;
use slidebox::raster::region_has_content;

mod proptest_helpers;

use proptest_helpers::arb_raster;

fn arb_case() -> impl Strategy<Value = (image::RgbImage, Region, AdjustOptions)> {
    arb_raster().prop_flat_map(|img| {
        let (w, h) = (i64::from(img.width()), i64::from(img.height()));
        (
            Just(img),
            (0..w, 0..h, any::<(u16, u16)>()).prop_map(move |(x, y, (sw, sh))| {
                let x2 = x + 1 + i64::from(sw) % (w - x);
                let y2 = y + 1 + i64::from(sh) % (h - y);
                Region::new(x, y, x2, y2)
            }),
            (1u32..=6, 0u32..=25, 200u8..=250).prop_map(|(line_width, max_adjust, threshold)| {
                AdjustOptions {
                    line_width,
                    max_adjust,
                    background_threshold: threshold,
                }
            }),
        )
    })
}

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn every_edge_is_clear_or_at_its_limit((img, rect, opts) in arb_case()) {
        let image = Region::image_bounds(img.width(), img.height());
        let max = i64::from(opts.max_adjust);
        let band = opts.band_width();
        let t = opts.background_threshold;

        let out = adjust(&img, &rect, &image, &opts);
        let r = out.rect;

        prop_assert!(r.contains(&rect), "{} shrank to {}", rect, r);
        prop_assert!(image.contains(&r));
        prop_assert!(rect.expand(max).contains(&r));

        // Horizontal edges are checked over the original x span, vertical
        // edges over the adjusted y span.
        let checks = [
            (Edge::Top, r.y1, (rect.x1, rect.x2), (rect.y1 - max).max(image.y1)),
            (Edge::Bottom, r.y2, (rect.x1, rect.x2), (rect.y2 + max).min(image.y2)),
            (Edge::Left, r.x1, (r.y1, r.y2), (rect.x1 - max).max(image.x1)),
            (Edge::Right, r.x2, (r.y1, r.y2), (rect.x2 + max).min(image.x2)),
        ];
        for (edge, pos, span, limit) in checks {
            let clear = !region_has_content(&img, &edge_band(edge, pos, span, band), t);
            let exhausted = out.exhausted.contains(&edge);
            prop_assert_eq!(clear, !exhausted, "{} edge at {}", edge, pos);
            if exhausted {
                prop_assert_eq!(pos, limit, "{} edge", edge);
            }
        }
    }

    #[test]
    fn adjustment_respects_a_tighter_limit((img, rect, opts) in arb_case(), grow in 0i64..10) {
        let limit = rect.expand(grow);
        let out = adjust(&img, &rect, &limit, &opts);
        prop_assert!(limit.contains(&out.rect), "{} outside {}", out.rect, limit);
        prop_assert!(out.rect.contains(&rect));
    }
}
