//! Fuzz target for the string forms accepted on the command line.
//!
//! Grid layouts (`RxC`) and overlay colors (names or `#rrggbb`) are parsed
//! from arbitrary UTF-8 input; anything that parses must display back to a
//! string that parses to the same value.

#![no_main]

use libfuzzer_sys::fuzz_target;
use slidebox::ir::GridLayout;
use slidebox::visualize::OverlayColor;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(layout) = text.parse::<GridLayout>() {
        assert_eq!(layout.to_string().parse::<GridLayout>().ok(), Some(layout));
    }
    if let Ok(color) = text.parse::<OverlayColor>() {
        assert_eq!(color.to_string().parse::<OverlayColor>().ok(), Some(color));
    }
});
