//! Standard 4x5 grid templates.
//!
//! Each row is five space-separated symbols: `.` for a free cell, a digit
//! for a value constraint, or a color letter (`R`, `Y`, `G`, `B`, `P`).

use crate::core::DiceColor;
use crate::grid::{Constraint, GridTemplate};

const ROWS: usize = 4;
const COLS: usize = 5;

const PATTERNS: &[(&str, u32, [&str; ROWS])] = &[
    ("Kaleidoscopic Dream", 4, ["Y B . . 1", "G . 5 . 4", "3 . R . G", "2 . . B Y"]),
    ("Virtus", 5, ["4 . 2 5 G", ". . 6 G 2", ". 3 G 4 .", "5 G 1 . ."]),
    ("Aurorae Magnificus", 5, ["5 G B P 2", "P . . . Y", "Y . 6 . P", "1 . . G 4"]),
    ("Via Lux", 4, ["Y . 6 . .", ". 1 5 . 2", "3 Y R P .", ". . 4 3 R"]),
    ("Bellesguard", 3, ["B 6 . . Y", ". 3 B . .", ". 5 6 2 .", ". 4 . 1 G"]),
    ("Firmitas", 5, ["P 6 . . 3", "5 P 3 . .", ". 2 P 1 .", ". 1 5 P 4"]),
    ("Industria", 5, ["1 R 3 . 6", "5 4 R 2 .", ". . 5 R 1", ". . . 3 R"]),
    ("Fractal Drops", 3, [". 4 . Y 6", "R . 2 . .", ". . R P 1", "B Y . . ."]),
];

fn color_for(letter: char) -> Option<DiceColor> {
    DiceColor::ALL.into_iter().find(|color| color.letter() == letter)
}

fn parse(title: &str, difficulty: u32, rows: &[&str; ROWS]) -> GridTemplate {
    let mut template = GridTemplate::new(title, ROWS, COLS, difficulty);
    for (row, line) in rows.iter().enumerate() {
        for (col, symbol) in line.split_whitespace().enumerate() {
            let mut chars = symbol.chars();
            let constraint = match chars.next() {
                Some(c) if c.is_ascii_digit() => c.to_digit(10).map(|v| Constraint::value(v as u8)),
                Some(c) => color_for(c).map(Constraint::color),
                None => None,
            };
            if let Some(constraint) = constraint {
                template = template.with_constraint(row, col, constraint);
            }
        }
    }
    template
}

/// Eight templates, enough for two players with four options each.
#[must_use]
pub fn grid_templates() -> Vec<GridTemplate> {
    PATTERNS
        .iter()
        .map(|(title, difficulty, rows)| parse(title, *difficulty, rows))
        .collect()
}
