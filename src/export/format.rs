//! Value formatting for scene-description parameter lists.
//!
//! Floats are written with six decimals, matching C `%f`.

use std::fmt;

use glam::{Mat4, Vec2, Vec3};

/// A float written as `%f`.
#[derive(Debug, Clone, Copy)]
pub struct Fixed(pub f32);

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

/// Three space-separated floats, e.g. a color or a point.
#[derive(Debug, Clone, Copy)]
pub struct Triple(pub Vec3);

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", Fixed(self.0.x), Fixed(self.0.y), Fixed(self.0.z))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Pair(pub Vec2);

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", Fixed(self.0.x), Fixed(self.0.y))
    }
}

/// `true`/`false` as a quoted bool parameter value.
#[derive(Debug, Clone, Copy)]
pub struct Bool(pub bool);

impl fmt::Display for Bool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.0)
    }
}

/// A `ConcatTransform` directive for an already converted matrix.
///
/// Rows are written in host row-vector order, so the translation lands in
/// the last row. For a column-major `Mat4` that is one column per row.
#[derive(Debug, Clone, Copy)]
pub struct ConcatTransform<'a>(pub &'a Mat4);

impl fmt::Display for ConcatTransform<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cols = self.0.to_cols_array_2d();
        for (i, row) in cols.iter().enumerate() {
            let lead = if i == 0 { "\tConcatTransform [" } else { "\t                 " };
            let tail = if i == 3 { "]" } else { "\n" };
            write!(
                f,
                "{lead}{} {} {} {}{tail}",
                Fixed(row[0]),
                Fixed(row[1]),
                Fixed(row[2]),
                Fixed(row[3])
            )?;
        }
        Ok(())
    }
}
