use crate::game::Rgb;

/// How a single cell was last painted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPaint {
    pub fill: Rgb,
    pub outline: Option<Rgb>,
}

/// Persistent grid of painted cells
///
/// Mirrors a framebuffer: cells keep their paint until painted over or
/// cleared, so only changed cells need drawing each tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    columns: usize,
    rows: usize,
    cells: Vec<CellPaint>,
}

impl Canvas {
    pub fn new(columns: usize, rows: usize, background: Rgb) -> Self {
        Self {
            columns,
            rows,
            cells: vec![
                CellPaint {
                    fill: background,
                    outline: None,
                };
                columns * rows
            ],
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn clear(&mut self, background: Rgb) {
        self.cells.fill(CellPaint {
            fill: background,
            outline: None,
        });
    }

    /// Paint a cell; out-of-range coordinates are ignored
    pub fn paint(&mut self, column: usize, row: usize, fill: Rgb, outline: Option<Rgb>) {
        if column < self.columns && row < self.rows {
            self.cells[row * self.columns + column] = CellPaint { fill, outline };
        }
    }

    pub fn get(&self, column: usize, row: usize) -> Option<CellPaint> {
        if column < self.columns && row < self.rows {
            Some(self.cells[row * self.columns + column])
        } else {
            None
        }
    }

    /// Cells of one row, left to right
    pub fn row(&self, row: usize) -> &[CellPaint] {
        let start = row * self.columns;
        &self.cells[start..start + self.columns]
    }
}
