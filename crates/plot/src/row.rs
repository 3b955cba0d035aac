use foundation::math::{Axis, Vec3};

/// Stable identity of a row, assigned once when the row is added.
///
/// Nodes are bound to rows by `RowId`, so reordering or filtering the row
/// set never hands a node to a different row.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub u64);

/// One data point. `y` is elevation; `x` and `z` are the ground-plane position.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Row {
    pub id: RowId,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Row {
    pub fn value(&self, axis: Axis) -> f64 {
        axis.of(self.position())
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Ordered row set that hands out ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rows {
    rows: Vec<Row>,
    next_id: u64,
}

impl Rows {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = [f64; 3]>,
    {
        let mut rows = Self::new();
        for [x, y, z] in points {
            rows.push(x, y, z);
        }
        rows
    }

    pub fn push(&mut self, x: f64, y: f64, z: f64) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        self.rows.push(Row { id, x, y, z });
        id
    }

    pub fn remove(&mut self, id: RowId) -> Option<Row> {
        let pos = self.rows.iter().position(|r| r.id == id)?;
        Some(self.rows.remove(pos))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Row> {
        self.rows.iter_mut()
    }

    pub fn as_slice(&self) -> &[Row] {
        &self.rows
    }

    /// Reorders rows in place; ids travel with their rows.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&Row, &Row) -> std::cmp::Ordering,
    {
        self.rows.sort_by(compare);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn points(&self) -> Vec<[f64; 3]> {
        self.rows.iter().map(|r| [r.x, r.y, r.z]).collect()
    }
}

impl<'a> IntoIterator for &'a Rows {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
