use foundation::rng::Rng;

use crate::config::GridConfig;
use crate::row::Rows;

/// Demo data: a jittered `size × size` lattice with random elevations.
///
/// Lattice cell `(i, j)` lands at `x = i·u / (size-1)`, `z = j·u' / (size-1)`
/// with independent uniform `u, u'` in `[0, 1)`, so points crowd towards the
/// origin. Elevation is uniform in `[0, max_elevation)`.
pub fn generate_grid(config: &GridConfig, rng: &mut Rng) -> Rows {
    let mut rows = Rows::new();
    let denom = config.size.saturating_sub(1).max(1) as f64;
    for i in 0..config.size {
        for j in 0..config.size {
            let x = (i as f64 * rng.next_f64()) / denom;
            let y = config.max_elevation * rng.next_f64();
            let z = (j as f64 * rng.next_f64()) / denom;
            rows.push(x, y, z);
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::generate_grid;
    use crate::config::GridConfig;
    use foundation::rng::Rng;

    #[test]
    fn default_grid_has_121_rows_inside_domain() {
        let rows = generate_grid(&GridConfig::default(), &mut Rng::new(1));
        assert_eq!(rows.len(), 121);
        for row in &rows {
            assert!((0.0..=1.0).contains(&row.x));
            assert!((0.0..=1.0).contains(&row.z));
            assert!((0.0..10.0).contains(&row.y));
        }
    }

    #[test]
    fn same_seed_same_grid() {
        let config = GridConfig::default();
        let a = generate_grid(&config, &mut Rng::new(9));
        let b = generate_grid(&config, &mut Rng::new(9));
        assert_eq!(a, b);
    }

    #[test]
    fn single_cell_grid_sits_at_origin() {
        let config = GridConfig {
            size: 1,
            max_elevation: 10.0,
        };
        let rows = generate_grid(&config, &mut Rng::new(3));
        assert_eq!(rows.len(), 1);
        assert_eq!((rows.as_slice()[0].x, rows.as_slice()[0].z), (0.0, 0.0));
    }
}
