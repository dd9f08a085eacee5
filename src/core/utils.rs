//! Square arithmetic on the 0x88 layout: the high nibble holds the row, the
//! low nibble the column, and any position with a bit of `0x88` set is off
//! the board.

/** Walks the squares strictly between two squares on one line. */
#[derive(Debug)]
pub struct BetweenIterator {
    current: u8,
    target: u8,
    step: u8,
}

impl Iterator for BetweenIterator {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.current = self.current.wrapping_add(self.step);
        if self.current == self.target || !is_valid_coord(self.current) {
            None
        } else {
            Some(self.current)
        }
    }
}

/** Caller must make sure `from` and `to` share a rank, file or diagonal. */
pub fn between(from: u8, to: u8) -> BetweenIterator {
    debug_assert!(
        from != to && (is_in_straight_line(from, to) || is_in_diagonal_line(from, to)),
        "Points can't form line to search between them!"
    );
    let (rows, cols) = delta(from, to);
    BetweenIterator {
        current: from,
        target: to,
        step: step(rows.signum(), cols.signum()),
    }
}

/** Walks from a square (exclusive) in one direction until the board edge. */
pub struct DirectionIterator {
    position: u8,
    direction: u8,
}

impl Iterator for DirectionIterator {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.position = self.position.wrapping_add(self.direction);
        if is_valid_coord(self.position) {
            Some(self.position)
        } else {
            None
        }
    }
}

pub fn in_direction(position: u8, direction: u8) -> DirectionIterator {
    DirectionIterator {
        position,
        direction,
    }
}

/** 0x88 offset for a row/column delta, negative deltas wrap. */
#[inline]
pub fn step(rows: i8, cols: i8) -> u8 {
    (rows as u8).wrapping_mul(0x10).wrapping_add(cols as u8)
}

/** Signed (rows, cols) from `a` to `b`. */
#[inline]
pub fn delta(a: u8, b: u8) -> (i8, i8) {
    let (a_row, a_col): (u8, u8) = unpack_pos(a);
    let (b_row, b_col): (u8, u8) = unpack_pos(b);
    (b_row as i8 - a_row as i8, b_col as i8 - a_col as i8)
}

pub fn is_in_straight_line(a: u8, b: u8) -> bool {
    let (rows, cols) = delta(a, b);
    rows == 0 || cols == 0
}

pub fn is_in_diagonal_line(a: u8, b: u8) -> bool {
    let (rows, cols) = delta(a, b);
    rows.abs() == cols.abs()
}

#[inline]
pub fn is_valid_coord(coord: u8) -> bool {
    coord & 0x88 == 0x00
}

#[inline]
pub fn compact_pos(row: u8, col: u8) -> u8 {
    row << 4 | col
}

#[inline]
pub fn unpack_pos<T: From<u8>>(pos: u8) -> (T, T) {
    (((pos & 0xf0) >> 4).into(), (pos & 0x0f).into())
}
