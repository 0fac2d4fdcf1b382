//! Dataset colors.

/// Colors assigned to new datasets, cycling by dataset count.
pub const PALETTE: [&str; 10] = [
    "#4A90E2", "#E24A90", "#90E24A", "#E2904A", "#4AE290", "#904AE2", "#E2E24A", "#4A4AE2",
    "#E24A4A", "#4AE2E2",
];

/// Color for the `index`-th dataset.
pub fn color_for(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Parse a `#RRGGBB` color into RGB components.
pub fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}
