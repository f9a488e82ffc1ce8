//! Colors and icon glyphs shared by the producers, so the bar looks like one
//! program instead of ten.

/// `#rrggbb` strings for [`Block::color`](barpipe_shared_util::Block).
pub mod color {
    pub const RED: &str = "#f92672";
    pub const GREEN: &str = "#a6e22e";
    pub const ORANGE: &str = "#fd971f";
    pub const YELLOW: &str = "#e6db74";
    pub const BLUE: &str = "#66d9ef";
    pub const MAGENTA: &str = "#ae81ff";
    pub const WHITE: &str = "#f8f8f2";
    pub const GREY: &str = "#d2d2cd";
    pub const BLACK: &str = "#1b1d1e";
}

/// Private-use-area glyphs from the icon font the bar is configured with.
pub mod icon {
    pub const CLOCK: char = '\u{f017}';
    pub const VOLUME_OFF: char = '\u{f026}';
    pub const VOLUME_UP: char = '\u{f028}';
    pub const HDD: char = '\u{f0a0}';
    pub const FLOPPY: char = '\u{f0c7}';
    pub const SPINNER: char = '\u{f110}';
    pub const REFRESH: char = '\u{f021}';
    pub const DOWNLOAD: char = '\u{f019}';
    pub const WARN: char = '\u{f071}';
    pub const TIMES: char = '\u{f00d}';
    pub const COFFEE: char = '\u{f0f4}';
    pub const GRADUATION_CAP: char = '\u{f19d}';
    pub const BED: char = '\u{f236}';
    pub const MEMORY: char = '\u{f1c0}';
    pub const CPU: char = '\u{f108}';
}
