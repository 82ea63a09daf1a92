//! Program block geometry.
//!
//! Converts a program's UTC timestamps into a horizontal offset and width
//! on the 24-hour axis at a given scale. Geometry is computed per render
//! from the stored ISO strings and never cached on the model.

use crate::timeutil;

/// Horizontal placement of one program on the hour axis, in pixels
/// (or terminal cells, for a cell-sized scale).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgramBlock {
    /// Distance from the 00:00 edge.
    pub offset: f64,
    /// Horizontal size of the block.
    pub width: f64,
}

/// Compute the block for a program, or `None` when it should not render.
///
/// Offset is `utc_fractional_hour(start) * pixels_per_hour`; width is the
/// clamped duration times the same scale. A nonpositive duration (end at or
/// before start, or unparseable input) suppresses the block entirely; this
/// is the single hide decision for degenerate records.
pub fn program_block(start: &str, end: &str, pixels_per_hour: f64) -> Option<ProgramBlock> {
    let duration = timeutil::duration_hours(start, end);
    if duration <= 0.0 {
        return None;
    }
    Some(ProgramBlock {
        offset: timeutil::utc_fractional_hour(start) * pixels_per_hour,
        width: duration * pixels_per_hour,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_at_eighty_pixels_per_hour() {
        let block = program_block("2024-03-10T02:30:00Z", "2024-03-10T04:00:00Z", 80.0).unwrap();
        assert_eq!(block.offset, 200.0);
        assert_eq!(block.width, 120.0);
    }

    #[test]
    fn test_block_scales_with_zoom() {
        let block = program_block("2024-03-10T06:00:00Z", "2024-03-10T07:00:00Z", 4.0).unwrap();
        assert_eq!(block.offset, 24.0);
        assert_eq!(block.width, 4.0);
    }

    #[test]
    fn test_zero_duration_suppressed() {
        let block = program_block("2024-03-10T04:00:00Z", "2024-03-10T04:00:00Z", 80.0);
        assert!(block.is_none());
    }

    #[test]
    fn test_inverted_interval_suppressed() {
        let block = program_block("2024-03-10T04:00:00Z", "2024-03-10T02:00:00Z", 80.0);
        assert!(block.is_none());
    }

    #[test]
    fn test_unparseable_start_suppressed() {
        let block = program_block("garbage", "2024-03-10T04:00:00Z", 80.0);
        assert!(block.is_none());
    }
}
