use std::collections::HashMap;

/// Bounding-box index over country regions.
/// Each region is inserted into every cell its bbox overlaps, so a point
/// query never misses a containing region but may return extra candidates
/// (eliminated by the exact polygon test).
pub struct CountryGrid {
    cells: HashMap<(i32, i32), Vec<usize>>,
    cell_size: f64,
}

impl CountryGrid {
    pub fn new(cell_size: f64) -> Self {
        Self {
            cells: HashMap::new(),
            cell_size,
        }
    }

    #[inline(always)]
    fn to_cell(&self, lon: f64, lat: f64) -> (i32, i32) {
        let x = (lon / self.cell_size).floor() as i32;
        let y = (lat / self.cell_size).floor() as i32;
        (x, y)
    }

    /// Build from region bounding boxes `(min_lon, min_lat, max_lon, max_lat)`.
    /// Regions without a bbox (empty geometry) keep their index but are never returned.
    pub fn build(
        bboxes: impl Iterator<Item = Option<(f64, f64, f64, f64)>>,
        cell_size: f64,
    ) -> Self {
        let mut grid = Self::new(cell_size);
        for (idx, bbox) in bboxes.enumerate() {
            let Some((min_lon, min_lat, max_lon, max_lat)) = bbox else {
                continue;
            };
            let min_cell = grid.to_cell(min_lon, min_lat);
            let max_cell = grid.to_cell(max_lon, max_lat);
            for y in min_cell.1..=max_cell.1 {
                for x in min_cell.0..=max_cell.0 {
                    grid.cells.entry((x, y)).or_default().push(idx);
                }
            }
        }
        grid
    }

    /// Regions whose bbox cell covers the point, in ascending index order
    pub fn candidates(&self, lon: f64, lat: f64) -> Vec<usize> {
        let mut out = self
            .cells
            .get(&self.to_cell(lon, lat))
            .cloned()
            .unwrap_or_default();
        out.sort_unstable();
        out.dedup();
        out
    }
}
