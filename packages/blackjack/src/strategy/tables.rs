//! Basic strategy charts. Columns are the dealer up-card value 2 through 11
//! (Ace = 11).

use super::OptimalMove;

const H: OptimalMove = OptimalMove::Hit;
const S: OptimalMove = OptimalMove::Stand;
const D: OptimalMove = OptimalMove::Double;
const P: OptimalMove = OptimalMove::Split;
const R: OptimalMove = OptimalMove::Surrender;

pub const HARD_MIN: u8 = 5;
pub const HARD_MAX: u8 = 21;
pub const SOFT_MIN: u8 = 13;
pub const SOFT_MAX: u8 = 21;

/// Hard totals 5..=21.
#[rustfmt::skip]
pub static HARD: [[OptimalMove; 10]; 17] = [
    //  2  3  4  5  6  7  8  9  10 A
    [H, H, H, H, H, H, H, H, H, H], // 5
    [H, H, H, H, H, H, H, H, H, H], // 6
    [H, H, H, H, H, H, H, H, H, H], // 7
    [H, H, H, H, H, H, H, H, H, H], // 8
    [H, D, D, D, D, H, H, H, H, H], // 9
    [D, D, D, D, D, D, D, D, H, H], // 10
    [D, D, D, D, D, D, D, D, D, D], // 11
    [H, H, S, S, S, H, H, H, H, H], // 12
    [S, S, S, S, S, H, H, H, H, H], // 13
    [S, S, S, S, S, H, H, H, H, H], // 14
    [S, S, S, S, S, H, H, H, R, H], // 15
    [S, S, S, S, S, H, H, R, R, R], // 16
    [S, S, S, S, S, S, S, S, S, S], // 17
    [S, S, S, S, S, S, S, S, S, S], // 18
    [S, S, S, S, S, S, S, S, S, S], // 19
    [S, S, S, S, S, S, S, S, S, S], // 20
    [S, S, S, S, S, S, S, S, S, S], // 21
];

/// Soft totals 13..=21 (A-2 through A-10).
#[rustfmt::skip]
pub static SOFT: [[OptimalMove; 10]; 9] = [
    //  2  3  4  5  6  7  8  9  10 A
    [H, H, H, D, D, H, H, H, H, H], // 13
    [H, H, H, D, D, H, H, H, H, H], // 14
    [H, H, D, D, D, H, H, H, H, H], // 15
    [H, H, D, D, D, H, H, H, H, H], // 16
    [H, D, D, D, D, H, H, H, H, H], // 17
    [S, D, D, D, D, S, S, H, H, H], // 18
    [S, S, S, S, S, S, S, S, S, S], // 19
    [S, S, S, S, S, S, S, S, S, S], // 20
    [S, S, S, S, S, S, S, S, S, S], // 21
];

/// Pairs, rows 2-2, 3-3, ... 9-9, 10-10 (any ten-value rank), A-A.
#[rustfmt::skip]
pub static PAIRS: [[OptimalMove; 10]; 10] = [
    //  2  3  4  5  6  7  8  9  10 A
    [P, P, P, P, P, P, H, H, H, H], // 2
    [P, P, P, P, P, P, H, H, H, H], // 3
    [H, H, H, P, P, H, H, H, H, H], // 4
    [D, D, D, D, D, D, D, D, H, H], // 5
    [P, P, P, P, P, H, H, H, H, H], // 6
    [P, P, P, P, P, P, H, H, H, H], // 7
    [P, P, P, P, P, P, P, P, P, P], // 8
    [P, P, P, P, P, S, P, P, S, S], // 9
    [S, S, S, S, S, S, S, S, S, S], // 10
    [P, P, P, P, P, P, P, P, P, P], // A
];
