use tubely_core::AspectRatio;

/// Allowed distance between the cross-multiplied sides.
const TOLERANCE: i64 = 15;

/// Classify a frame size into an aspect ratio bucket.
///
/// Uses integer cross-multiplication with a fixed absolute band, so the
/// match gets stricter (relative to size) as resolution grows. Landscape is
/// tested first and wins when both bands match, which is the case for a
/// zero-sized frame.
pub fn classify(width: i64, height: i64) -> AspectRatio {
    if within_band(width * 9, height * 16) {
        AspectRatio::Landscape
    } else if within_band(width * 16, height * 9) {
        AspectRatio::Portrait
    } else {
        AspectRatio::Other
    }
}

fn within_band(lhs: i64, rhs: i64) -> bool {
    lhs >= rhs - TOLERANCE && lhs <= rhs + TOLERANCE
}
