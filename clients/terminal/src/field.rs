//! Maps field coordinates onto terminal cells.

use pong_sim::consts::*;
use pong_sim::{Fx, Side, Vec2};
use std::ops::RangeInclusive;

/// Paddle/ball footprint in cell coordinates (inclusive bounds)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub left: usize,
    pub right: usize,
    pub top: usize,
    pub bottom: usize,
}

impl CellRect {
    pub fn rows(&self) -> RangeInclusive<usize> {
        self.top..=self.bottom
    }

    pub fn cols(&self) -> RangeInclusive<usize> {
        self.left..=self.right
    }

    pub fn height(&self) -> usize {
        self.bottom - self.top + 1
    }
}

/// Scales the fixed playfield into a `cols` x `rows` grid.
///
/// Paddle footprints keep the same size wherever the paddle is.
#[derive(Debug, Clone, Copy)]
pub struct FieldScaler {
    cols: usize,
    rows: usize,
}

impl FieldScaler {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
        }
    }

    fn scale(value: Fx, extent: Fx, cells: usize) -> usize {
        let cell = (value.max(0) as i64 * cells as i64) / extent as i64;
        (cell as usize).min(cells - 1)
    }

    fn span(length: Fx, extent: Fx, cells: usize) -> usize {
        let scaled = (length as i64 * cells as i64 + extent as i64 / 2) / extent as i64;
        (scaled as usize).clamp(1, cells)
    }

    pub fn col(&self, x: Fx) -> usize {
        Self::scale(x, FIELD_WIDTH, self.cols)
    }

    pub fn row(&self, y: Fx) -> usize {
        Self::scale(y, FIELD_HEIGHT, self.rows)
    }

    pub fn paddle_height(&self) -> usize {
        Self::span(PADDLE_HEIGHT, FIELD_HEIGHT, self.rows)
    }

    pub fn paddle_width(&self) -> usize {
        Self::span(PADDLE_WIDTH, FIELD_WIDTH, self.cols)
    }

    /// Cells covered by the paddle whose top edge is at `y`
    pub fn paddle_rect(&self, y: Fx, side: Side) -> CellRect {
        let height = self.paddle_height();
        let width = self.paddle_width();
        let top = self.row(y).min(self.rows - height);
        let left = match side {
            Side::Left => 0,
            Side::Right => self.cols - width,
        };

        CellRect {
            left,
            right: left + width - 1,
            top,
            bottom: top + height - 1,
        }
    }

    /// Cell holding the ball; off-field positions pin to the nearest edge
    pub fn ball_cell(&self, pos: Vec2) -> (usize, usize) {
        (self.col(pos.x), self.row(pos.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pong_sim::{fx, Ball};

    #[test]
    fn test_paddle_height_consistency() {
        let scaler = FieldScaler::new(60, 20);
        let expected = scaler.paddle_height();
        assert_eq!(expected, 4);

        let mut y = PADDLE_MIN_Y;
        while y <= PADDLE_MAX_Y {
            for side in [Side::Left, Side::Right] {
                let rect = scaler.paddle_rect(y, side);
                assert_eq!(rect.height(), expected, "height changed at y={}", fx::to_int(y));
                assert!(rect.bottom < 20);
            }
            y += PADDLE_SPEED;
        }
    }

    #[test]
    fn test_paddles_hug_walls() {
        let scaler = FieldScaler::new(60, 20);

        let left = scaler.paddle_rect(0, Side::Left);
        let right = scaler.paddle_rect(0, Side::Right);

        assert_eq!(left.cols(), 0..=9);
        assert_eq!(right.cols(), 50..=59);
    }

    #[test]
    fn test_paddle_extremes() {
        let scaler = FieldScaler::new(60, 20);

        assert_eq!(scaler.paddle_rect(PADDLE_MIN_Y, Side::Left).top, 0);
        assert_eq!(scaler.paddle_rect(PADDLE_MAX_Y, Side::Left).bottom, 19);
    }

    #[test]
    fn test_ball_cell_pins_off_field() {
        let scaler = FieldScaler::new(60, 20);

        assert_eq!(scaler.ball_cell(Ball::center_pos()), (29, 9));
        assert_eq!(
            scaler.ball_cell(Vec2::new(fx::from_int(-1), fx::from_int(-2))),
            (0, 0)
        );
        assert_eq!(
            scaler.ball_cell(Vec2::new(FIELD_WIDTH + BALL_SIZE, FIELD_HEIGHT)),
            (59, 19)
        );
    }

    #[test]
    fn test_tiny_grid_does_not_underflow() {
        let scaler = FieldScaler::new(0, 0);
        let rect = scaler.paddle_rect(PADDLE_MAX_Y, Side::Right);

        assert_eq!(rect, CellRect { left: 0, right: 0, top: 0, bottom: 0 });
    }
}
