//! Screen geometry and pointer hit-testing.
//!
//! Coordinates are abstract layout units (terminal cells in the TUI). The
//! token grid is recomputed from the live pile set on every query, so the
//! layout never holds game state of its own.

use crate::piles::PileSet;
use crate::{MAX_TOKENS_PER_ROW, ROWS};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{instrument, trace};

/// Pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_new::new)]
pub struct Point {
    /// Horizontal coordinate, growing rightwards.
    pub x: u16,
    /// Vertical coordinate, growing downwards.
    pub y: u16,
}

/// Axis-aligned rectangle. Left/top edges inclusive, right/bottom exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_new::new)]
pub struct Region {
    /// Left edge.
    pub x: u16,
    /// Top edge.
    pub y: u16,
    /// Width.
    pub width: u16,
    /// Height.
    pub height: u16,
}

impl Region {
    /// True if `point` lies inside the rectangle.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && u32::from(point.x) < u32::from(self.x) + u32::from(self.width)
            && point.y >= self.y
            && u32::from(point.y) < u32::from(self.y) + u32::from(self.height)
    }

    /// A point guaranteed to be inside the rectangle.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }
}

/// Named fixed rectangles the frame driver and controller react to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter, strum::Display,
)]
pub enum RegionKind {
    /// Settings gear icon.
    Gear,
    /// Accept the pending move.
    Accept,
    /// Reject the pending move.
    Deny,
    /// "Play again?" text block.
    PlayAgain,
    /// "Random amount of crystals" checkbox in the settings overlay.
    SettingsCheckbox,
}

/// Token under the pointer: row plus zero-based column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct TokenHit {
    /// Row index.
    pub row: usize,
    /// Column index, counted from the left end of the row.
    pub col: u8,
}

/// Fixed screen geometry: the token grid origin, token size and the named
/// button rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Layout {
    grid_origin: Point,
    token_width: u16,
    token_height: u16,
    gear: Region,
    accept: Region,
    deny: Region,
    play_again: Region,
    settings_checkbox: Region,
}

impl Layout {
    /// Creates a layout from explicit geometry.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        grid_origin: Point,
        token_width: u16,
        token_height: u16,
        gear: Region,
        accept: Region,
        deny: Region,
        play_again: Region,
        settings_checkbox: Region,
    ) -> Self {
        assert!(token_width > 0 && token_height > 0, "tokens need a size");
        Self {
            grid_origin,
            token_width,
            token_height,
            gear,
            accept,
            deny,
            play_again,
            settings_checkbox,
        }
    }

    /// Rectangle of a named region.
    pub fn region(&self, kind: RegionKind) -> Region {
        match kind {
            RegionKind::Gear => self.gear,
            RegionKind::Accept => self.accept,
            RegionKind::Deny => self.deny,
            RegionKind::PlayAgain => self.play_again,
            RegionKind::SettingsCheckbox => self.settings_checkbox,
        }
    }

    /// Where column `col` of `row` sits when the row is at rest.
    pub fn token_rect(&self, row: usize, col: u8) -> Region {
        Region::new(
            self.grid_origin.x + u16::from(col) * self.token_width,
            self.grid_origin.y + row as u16 * self.token_height,
            self.token_width,
            self.token_height,
        )
    }

    /// Rectangle covering every token slot of the grid.
    pub fn grid_bounds(&self) -> Region {
        Region::new(
            self.grid_origin.x,
            self.grid_origin.y,
            u16::from(MAX_TOKENS_PER_ROW) * self.token_width,
            ROWS as u16 * self.token_height,
        )
    }
}

impl Default for Layout {
    /// Geometry for an 80x24 terminal: the grid on the left, the status
    /// panel with accept/deny on the right, the round-end prompt centred.
    fn default() -> Self {
        Self::new(
            Point::new(2, 4),
            5,
            4,
            Region::new(72, 0, 6, 1),
            Region::new(47, 15, 9, 3),
            Region::new(60, 15, 9, 3),
            Region::new(21, 12, 38, 1),
            Region::new(25, 11, 30, 1),
        )
    }
}

/// Pure hit-testing over a layout and the pile set it is showing.
#[derive(Debug, Clone, Copy)]
pub struct SelectionMapper<'a> {
    layout: &'a Layout,
    piles: &'a PileSet,
}

impl<'a> SelectionMapper<'a> {
    /// Creates a mapper for the current frame.
    pub fn new(layout: &'a Layout, piles: &'a PileSet) -> Self {
        Self { layout, piles }
    }

    /// Token under `point`, if any.
    ///
    /// Only existing tokens are hit: column `col` of row `i` exists iff
    /// `col < piles[i]`, so a hit always names a row with tokens left.
    #[instrument(skip(self), level = "trace")]
    pub fn hit_token(&self, point: Point) -> Option<TokenHit> {
        let origin = self.layout.grid_origin;
        if point.x < origin.x || point.y < origin.y {
            return None;
        }

        let row = usize::from((point.y - origin.y) / self.layout.token_height);
        if row >= ROWS {
            return None;
        }

        let col = (point.x - origin.x) / self.layout.token_width;
        if col >= u16::from(self.piles.count(row)) {
            return None;
        }

        let hit = TokenHit::new(row, col as u8);
        trace!(?hit, "Pointer over token");
        Some(hit)
    }

    /// True if `point` falls inside the named region.
    pub fn hit_region(&self, point: Point, region: RegionKind) -> bool {
        self.layout.region(region).contains(point)
    }

    /// First named region containing `point`.
    pub fn region_at(&self, point: Point) -> Option<RegionKind> {
        RegionKind::iter().find(|&kind| self.hit_region(point, kind))
    }

    /// Pointer position that hits column `col` of `row`.
    pub fn token_center(&self, row: usize, col: u8) -> Point {
        self.layout.token_rect(row, col).center()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_edges() {
        let r = Region::new(10, 5, 3, 2);
        assert!(r.contains(Point::new(10, 5)));
        assert!(r.contains(Point::new(12, 6)));
        assert!(!r.contains(Point::new(13, 6)));
        assert!(!r.contains(Point::new(12, 7)));
        assert!(!r.contains(Point::new(9, 5)));
    }

    #[test]
    fn test_hit_token_maps_grid() {
        let layout = Layout::default();
        let piles = PileSet::standard();
        let mapper = SelectionMapper::new(&layout, &piles);

        // Row 3 starts at y = 4 + 3 * 4; column 2 at x = 2 + 2 * 5.
        assert_eq!(mapper.hit_token(Point::new(12, 16)), Some(TokenHit::new(3, 2)));
        assert_eq!(mapper.hit_token(Point::new(2, 4)), Some(TokenHit::new(0, 0)));
    }

    #[test]
    fn test_hit_token_ignores_missing_tokens() {
        let layout = Layout::default();
        let piles = PileSet::standard();
        let mapper = SelectionMapper::new(&layout, &piles);

        // Row 0 has a single token; column 1 is empty space.
        assert_eq!(mapper.hit_token(Point::new(8, 4)), None);
        // Left of and above the grid.
        assert_eq!(mapper.hit_token(Point::new(0, 4)), None);
        assert_eq!(mapper.hit_token(Point::new(2, 0)), None);
        // Below the last row.
        assert_eq!(mapper.hit_token(Point::new(2, 20)), None);
    }

    #[test]
    fn test_hit_token_empty_row() {
        let layout = Layout::default();
        let piles = PileSet::from_counts([0, 3, 5, 7]);
        let mapper = SelectionMapper::new(&layout, &piles);
        assert_eq!(mapper.hit_token(Point::new(2, 4)), None);
    }

    #[test]
    fn test_token_center_round_trips() {
        let layout = Layout::default();
        let piles = PileSet::standard();
        let mapper = SelectionMapper::new(&layout, &piles);
        for row in 0..ROWS {
            for col in 0..piles.count(row) {
                let hit = mapper.hit_token(mapper.token_center(row, col));
                assert_eq!(hit, Some(TokenHit::new(row, col)));
            }
        }
    }

    #[test]
    fn test_default_regions_are_disjoint_from_grid() {
        let layout = Layout::default();
        let grid = layout.grid_bounds();
        for kind in [RegionKind::Accept, RegionKind::Deny, RegionKind::Gear] {
            let center = layout.region(kind).center();
            assert!(!grid.contains(center), "{kind} overlaps the grid");
        }
    }

    #[test]
    fn test_region_at() {
        let layout = Layout::default();
        let piles = PileSet::standard();
        let mapper = SelectionMapper::new(&layout, &piles);
        assert_eq!(mapper.region_at(layout.accept().center()), Some(RegionKind::Accept));
        assert_eq!(mapper.region_at(layout.deny().center()), Some(RegionKind::Deny));
        assert_eq!(mapper.region_at(Point::new(0, 23)), None);
    }
}
