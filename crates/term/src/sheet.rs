//! Block tile sheet.
//!
//! The sheet is plain text laid out as [`SHEET_ROWS`] x [`SHEET_COLS`] tiles.
//! Tile `i` sits at sheet row `i / SHEET_COLS`, column `i % SHEET_COLS`.
//! A tile is twice as wide as it is tall so it looks square in a terminal.
//!
//! Layout of the bundled sheet:
//! - tiles 0..=7: one per board color, indexed by `Cell::tile_index`
//! - tiles 8..=14: the same colors for the next-piece preview
//! - tile 15: empty playfield cell

use anyhow::{bail, Result};

pub const SHEET_ROWS: usize = 2;
pub const SHEET_COLS: usize = 8;
pub const TILE_COUNT: usize = SHEET_ROWS * SHEET_COLS;

pub const PREVIEW_TILE_OFFSET: usize = SHEET_COLS;
pub const EMPTY_TILE: usize = TILE_COUNT - 1;

const EMBEDDED_SHEET: &str = include_str!("../assets/blocks.txt");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSheet {
    lines: Vec<Vec<char>>,
    tile_w: usize,
    tile_h: usize,
}

impl BlockSheet {
    /// Load the sheet bundled with the binary.
    pub fn embedded() -> Result<Self> {
        Self::parse(EMBEDDED_SHEET)
    }

    /// Parse and validate a sheet.
    pub fn parse(text: &str) -> Result<Self> {
        let lines: Vec<Vec<char>> = text
            .lines()
            .map(|l| l.trim_end_matches('\r').chars().collect())
            .collect();

        if lines.is_empty() {
            bail!("tile sheet is empty");
        }
        let sheet_w = lines[0].len();
        if let Some((i, line)) = lines.iter().enumerate().find(|(_, l)| l.len() != sheet_w) {
            bail!(
                "tile sheet line {} is {} columns wide, expected {}",
                i + 1,
                line.len(),
                sheet_w
            );
        }

        let sheet_h = lines.len();
        if sheet_h % SHEET_ROWS != 0 || sheet_w % SHEET_COLS != 0 {
            bail!(
                "invalid dimensions ({sheet_w}x{sheet_h}) for a {SHEET_ROWS}x{SHEET_COLS} tile sheet"
            );
        }
        let tile_w = sheet_w / SHEET_COLS;
        let tile_h = sheet_h / SHEET_ROWS;
        if tile_w == 0 || tile_w != tile_h * 2 {
            bail!("tiles must be twice as wide as tall, got {tile_w}x{tile_h}");
        }

        Ok(Self {
            lines,
            tile_w,
            tile_h,
        })
    }

    /// Tile width in terminal columns.
    pub fn tile_w(&self) -> usize {
        self.tile_w
    }

    /// Tile height in terminal rows.
    pub fn tile_h(&self) -> usize {
        self.tile_h
    }

    /// Lines of tile `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= TILE_COUNT`.
    pub fn tile(&self, index: usize) -> impl Iterator<Item = &[char]> + '_ {
        assert!(
            index < TILE_COUNT,
            "tile index {index} out of range for sheet of {TILE_COUNT}"
        );
        let row = index / SHEET_COLS;
        let col = index % SHEET_COLS;
        let x = col * self.tile_w;
        self.lines[row * self.tile_h..(row + 1) * self.tile_h]
            .iter()
            .map(move |line| &line[x..x + self.tile_w])
    }
}
