use std::fmt;

use glam::{ivec2, IVec2};

/// Rectangular character map drawn as text.
///
/// Leading blank lines and indentation shared by every line are stripped so
/// maps can be written inline in indented source or data files.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct AsciiMap {
    rows: Vec<Vec<char>>,
}

impl AsciiMap {
    pub fn new(text: &str) -> Self {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .skip_while(|line| line.is_empty())
            .collect();

        // Trailing blank lines go too.
        let len = lines
            .iter()
            .rposition(|line| !line.is_empty())
            .map_or(0, |i| i + 1);
        let lines = &lines[..len];

        let indent = lines
            .iter()
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().take_while(|c| c.is_whitespace()).count())
            .min()
            .unwrap_or(0);

        AsciiMap {
            rows: lines
                .iter()
                .map(|line| line.chars().skip(indent).collect())
                .collect(),
        }
    }

    /// Size of the map, width is the length of the longest row.
    pub fn dim(&self) -> IVec2 {
        let w = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        ivec2(w as i32, self.rows.len() as i32)
    }

    pub fn get(&self, pos: IVec2) -> Option<char> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        self.rows
            .get(pos.y as usize)
            .and_then(|row| row.get(pos.x as usize))
            .copied()
    }

    /// Iterate the non-whitespace cells of the map in reading order.
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, char)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, c)| !c.is_whitespace())
                .map(move |(x, &c)| (ivec2(x as i32, y as i32), c))
        })
    }
}

impl fmt::Display for AsciiMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for c in row {
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
