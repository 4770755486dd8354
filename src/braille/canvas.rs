/// First codepoint of the Unicode Braille block (empty pattern)
pub const BRAILLE_BLANK: char = '\u{2800}';

/// Dot bits indexed by [y % 4][x % 2]
///
/// ```text
/// (0,0) (1,0)   0x01 0x08
/// (0,1) (1,1)   0x02 0x10
/// (0,2) (1,2)   0x04 0x20
/// (0,3) (1,3)   0x40 0x80
/// ```
const DOT_BITS: [[u8; 2]; 4] = [[0x01, 0x08], [0x02, 0x10], [0x04, 0x20], [0x40, 0x80]];

/// Braille canvas: every character cell carries a 2x4 dot grid, so a
/// `cols` x `rows` canvas addresses `cols*2` x `rows*4` pixels.
#[derive(Clone)]
pub struct BrailleCanvas {
    cols: usize,
    rows: usize,
    cells: Vec<u8>,
}

impl BrailleCanvas {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![0u8; cols * rows],
        }
    }

    /// Light a dot; anything outside the canvas (including negatives) is ignored
    pub fn set(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        let (cx, cy) = (x / 2, y / 4);
        if cx >= self.cols || cy >= self.rows {
            return;
        }
        self.cells[cy * self.cols + cx] |= DOT_BITS[y % 4][x % 2];
    }

    pub fn is_set(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        let (cx, cy) = (x / 2, y / 4);
        if cx >= self.cols || cy >= self.rows {
            return false;
        }
        self.cells[cy * self.cols + cx] & DOT_BITS[y % 4][x % 2] != 0
    }

    /// Number of lit dots
    pub fn lit(&self) -> u32 {
        self.cells.iter().map(|b| b.count_ones()).sum()
    }

    /// Braille glyph at a character cell, `None` when the cell is empty
    pub fn glyph(&self, col: usize, row: usize) -> Option<char> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        match self.cells[row * self.cols + col] {
            0 => None,
            bits => char::from_u32(BRAILLE_BLANK as u32 + bits as u32),
        }
    }

    /// Iterate over non-empty cells as (col, row, glyph)
    pub fn glyphs(&self) -> impl Iterator<Item = (usize, usize, char)> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.cols).filter_map(move |col| self.glyph(col, row).map(|ch| (col, row, ch)))
        })
    }

    #[cfg(test)]
    pub fn to_string(&self) -> String {
        (0..self.rows)
            .map(|row| {
                (0..self.cols)
                    .map(|col| self.glyph(col, row).unwrap_or(BRAILLE_BLANK))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_dot() {
        let mut canvas = BrailleCanvas::new(1, 1);
        canvas.set(0, 0);
        assert_eq!(canvas.to_string(), "⠁");
    }

    #[test]
    fn test_full_cell() {
        let mut canvas = BrailleCanvas::new(1, 1);
        for x in 0..2 {
            for y in 0..4 {
                canvas.set(x, y);
            }
        }
        assert_eq!(canvas.to_string(), "⣿");
        assert_eq!(canvas.lit(), 8);
    }

    #[test]
    fn test_out_of_bounds_ignored() {
        let mut canvas = BrailleCanvas::new(2, 1);
        canvas.set(-1, 0);
        canvas.set(4, 0);
        canvas.set(0, 4);
        assert_eq!(canvas.lit(), 0);
        assert!(canvas.glyphs().next().is_none());
    }

    #[test]
    fn test_diagonal_spans_cells() {
        let mut canvas = BrailleCanvas::new(2, 1);
        for i in 0..4 {
            canvas.set(i, i);
        }
        assert_eq!(canvas.to_string(), "⠑⢄");
        assert!(canvas.is_set(3, 3));
        assert!(!canvas.is_set(3, 0));
    }
}
