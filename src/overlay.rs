//! Places the floating information card relative to a marker.
//!
//! Pure geometry over the latest [`MapSnapshot`](crate::sync::MapSnapshot)
//! fields: the card lands on the side of the marker facing away from the map
//! center, flips near the map edges, and is finally clamped fully inside the
//! visible area.

use crate::core::constants::{CARD_HEIGHT, CARD_MARGIN, CARD_OFFSET, CARD_WIDTH};
use crate::core::geo::{PixelPoint, PixelSize};
use serde::{Deserialize, Serialize};

/// Top/left offset for the card, in container pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardPosition {
    pub left: f64,
    pub top: f64,
}

/// Fixed card dimensions plus the marker gap and edge margin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardLayout {
    pub width: f64,
    pub height: f64,
    /// Gap between the marker and the near card edge
    pub offset: f64,
    /// Minimum distance kept from the map edges
    pub margin: f64,
}

impl Default for CardLayout {
    fn default() -> Self {
        Self {
            width: CARD_WIDTH,
            height: CARD_HEIGHT,
            offset: CARD_OFFSET,
            margin: CARD_MARGIN,
        }
    }
}

/// Computes where the card goes for a marker at `marker`, given the map
/// center pixel and container size from the latest snapshot.
///
/// Callers must not invoke this with an absent marker; the marker pixel here
/// is always the projection of a real tracked coordinate.
///
/// Three steps, in order:
/// 1. Quadrant decision: the card grows toward the side of the map the
///    marker is *not* on. A marker exactly at the center counts as "not less
///    than" on both axes and takes the upper-left branch.
/// 2. Edge-safety override: within half a card dimension of an edge the card
///    is forced toward the map interior regardless of step 1.
/// 3. Final clamp into `[margin, size - card - margin]` per axis. For a map
///    smaller than the card the interval inverts and the margin wins; the
///    result stays well-defined instead of panicking.
pub fn calculate_card_position(
    marker: PixelPoint,
    map_center: PixelPoint,
    map_size: PixelSize,
    layout: &CardLayout,
) -> CardPosition {
    let mut left = if marker.x < map_center.x {
        marker.x + layout.offset
    } else {
        marker.x - layout.width - layout.offset
    };
    let mut top = if marker.y < map_center.y {
        marker.y + layout.offset
    } else {
        marker.y - layout.height - layout.offset
    };

    if marker.x < layout.width / 2.0 {
        left = marker.x + layout.offset;
    } else if marker.x > map_size.width - layout.width / 2.0 {
        left = marker.x - layout.width - layout.offset;
    }
    if marker.y < layout.height / 2.0 {
        top = marker.y + layout.offset;
    } else if marker.y > map_size.height - layout.height / 2.0 {
        top = marker.y - layout.height - layout.offset;
    }

    // min-then-max keeps the margin dominant when the interval inverts
    CardPosition {
        left: left
            .min(map_size.width - layout.width - layout.margin)
            .max(layout.margin),
        top: top
            .min(map_size.height - layout.height - layout.margin)
            .max(layout.margin),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> CardLayout {
        CardLayout::default()
    }

    fn map_size() -> PixelSize {
        PixelSize::new(1_000.0, 1_000.0)
    }

    fn center() -> PixelPoint {
        PixelPoint::new(500.0, 500.0)
    }

    #[test]
    fn test_marker_upper_left_of_center_opens_down_right() {
        let marker = PixelPoint::new(400.0, 300.0);
        let position = calculate_card_position(marker, center(), map_size(), &layout());

        assert_eq!(position.left, marker.x + CARD_OFFSET);
        assert_eq!(position.top, marker.y + CARD_OFFSET);
    }

    #[test]
    fn test_marker_lower_right_of_center_opens_up_left() {
        let marker = PixelPoint::new(600.0, 700.0);
        let position = calculate_card_position(marker, center(), map_size(), &layout());

        assert_eq!(position.left, marker.x - CARD_WIDTH - CARD_OFFSET);
        assert_eq!(position.top, marker.y - CARD_HEIGHT - CARD_OFFSET);
    }

    #[test]
    fn test_marker_at_center_takes_upper_left_branch() {
        let marker = center();
        let position = calculate_card_position(marker, center(), map_size(), &layout());

        assert_eq!(position.left, marker.x - CARD_WIDTH - CARD_OFFSET);
        assert_eq!(position.top, marker.y - CARD_HEIGHT - CARD_OFFSET);
    }

    #[test]
    fn test_mixed_quadrant() {
        // Right of center, above it
        let marker = PixelPoint::new(700.0, 300.0);
        let position = calculate_card_position(marker, center(), map_size(), &layout());

        assert_eq!(position.left, marker.x - CARD_WIDTH - CARD_OFFSET);
        assert_eq!(position.top, marker.y + CARD_OFFSET);
    }

    #[test]
    fn test_edge_override_near_left_edge() {
        // Marker left of center would normally open rightward anyway, so use
        // a marker right of center but hugging the left edge after a pan:
        // the override must force the card rightward.
        let marker = PixelPoint::new(100.0, 500.0);
        let shifted_center = PixelPoint::new(50.0, 500.0);
        let position = calculate_card_position(marker, shifted_center, map_size(), &layout());

        assert_eq!(position.left, marker.x + CARD_OFFSET);
    }

    #[test]
    fn test_edge_override_near_right_edge() {
        let marker = PixelPoint::new(920.0, 500.0);
        let shifted_center = PixelPoint::new(950.0, 500.0);
        let position = calculate_card_position(marker, shifted_center, map_size(), &layout());

        assert_eq!(position.left, marker.x - CARD_WIDTH - CARD_OFFSET);
    }

    #[test]
    fn test_edge_override_vertical() {
        let marker = PixelPoint::new(500.0, 40.0);
        let shifted_center = PixelPoint::new(500.0, 20.0);
        let position = calculate_card_position(marker, shifted_center, map_size(), &layout());

        assert_eq!(position.top, marker.y + CARD_OFFSET);
    }

    #[test]
    fn test_result_always_inside_margins() {
        let layout = layout();
        let size = map_size();
        let positions = [
            PixelPoint::new(-200.0, -200.0),
            PixelPoint::new(0.0, 0.0),
            PixelPoint::new(999.0, 999.0),
            PixelPoint::new(1_500.0, 1_500.0),
            PixelPoint::new(10.0, 990.0),
        ];

        for marker in positions {
            let position = calculate_card_position(marker, center(), size, &layout);
            assert!(position.left >= layout.margin, "left too small for {:?}", marker);
            assert!(
                position.left <= size.width - layout.width - layout.margin,
                "left too large for {:?}",
                marker
            );
            assert!(position.top >= layout.margin, "top too small for {:?}", marker);
            assert!(
                position.top <= size.height - layout.height - layout.margin,
                "top too large for {:?}",
                marker
            );
        }
    }

    #[test]
    fn test_degenerate_map_smaller_than_card_does_not_panic() {
        let tiny = PixelSize::new(100.0, 60.0);
        let position =
            calculate_card_position(PixelPoint::new(50.0, 30.0), PixelPoint::new(50.0, 30.0), tiny, &layout());

        // Margin wins when the clamp interval inverts
        assert_eq!(position.left, CARD_MARGIN);
        assert_eq!(position.top, CARD_MARGIN);
    }
}
