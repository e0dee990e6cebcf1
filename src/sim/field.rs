//! Block field generation
//!
//! Rows are laid out from the paddle-facing edge (row 0) toward the ceiling.
//! Blocks in a row sit edge to edge, each with a width drawn from the layout's
//! choices, so rows have data-dependent total width. Special blocks are drawn
//! without replacement from the rows past `reserved_rows`.

use glam::Vec3;
use rand::Rng;
use rand::seq::{IndexedRandom, index};

use super::state::{Block, BlockField};
use crate::config::GameConfig;
use crate::error::SimError;

/// Look variants a regular block can be drawn with (special blocks use 0)
pub const BLOCK_VARIANTS: u8 = 4;

/// Everything the generator needs to lay out one field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldLayout {
    pub rows: u32,
    pub cols: u32,
    pub reserved_rows: u32,
    pub special_count: u32,
    pub width_choices: Vec<f32>,
    /// Left edge on X, block height on Y, depth of row 0 on Z
    pub start: Vec3,
    pub row_spacing: f32,
    pub block_height: f32,
    pub block_depth: f32,
}

impl FieldLayout {
    /// Layout from session tuning, with blocks at the paddle's height
    pub fn from_config(config: &GameConfig, baseline_y: f32) -> Self {
        Self {
            rows: config.rows,
            cols: config.cols,
            reserved_rows: config.reserved_rows,
            special_count: config.special_count,
            width_choices: config.width_choices.clone(),
            start: Vec3::new(config.field_start_x, baseline_y, config.field_start_z),
            row_spacing: config.row_spacing,
            block_height: config.block_height,
            block_depth: config.block_depth,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Cells in rows `>= reserved_rows`
    pub fn eligible_cells(&self) -> usize {
        self.rows.saturating_sub(self.reserved_rows) as usize * self.cols as usize
    }

    /// Reject layouts that cannot produce a full field
    pub fn validate(&self) -> Result<(), SimError> {
        if self.cell_count() == 0 {
            return Err(SimError::config(format!(
                "cannot generate an empty {}x{} field",
                self.rows, self.cols
            )));
        }
        if self.reserved_rows > self.rows {
            return Err(SimError::config(format!(
                "reserved_rows ({}) exceeds rows ({})",
                self.reserved_rows, self.rows
            )));
        }
        if self.special_count as usize > self.eligible_cells() {
            return Err(SimError::config(format!(
                "{} special blocks requested from {} eligible cells",
                self.special_count,
                self.eligible_cells()
            )));
        }
        if self.width_choices.is_empty() {
            return Err(SimError::config("no block widths to choose from"));
        }
        if let Some(w) = self
            .width_choices
            .iter()
            .find(|w| !w.is_finite() || **w <= 0.0)
        {
            return Err(SimError::config(format!("invalid block width {w}")));
        }
        for (name, value) in [
            ("block_height", self.block_height),
            ("block_depth", self.block_depth),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimError::config(format!("{name} must be positive, got {value}")));
            }
        }
        if !self.start.is_finite() || !self.row_spacing.is_finite() {
            return Err(SimError::config(format!(
                "field origin {} and row spacing {} must be finite",
                self.start, self.row_spacing
            )));
        }
        Ok(())
    }
}

/// Generate a full field with ids starting at `first_id`
pub fn generate<R: Rng + ?Sized>(
    layout: &FieldLayout,
    first_id: u32,
    rng: &mut R,
) -> Result<BlockField, SimError> {
    layout.validate()?;

    // Special cells, as offsets into the eligible (row-major) sub-grid
    let reserved_cells = layout.reserved_rows as usize * layout.cols as usize;
    let mut special = vec![false; layout.cell_count()];
    for offset in index::sample(
        rng,
        layout.eligible_cells(),
        layout.special_count as usize,
    ) {
        special[reserved_cells + offset] = true;
    }

    let half_height = layout.block_height / 2.0;
    let half_depth = layout.block_depth / 2.0;
    let mut blocks = Vec::with_capacity(layout.cell_count());
    let mut id = first_id;

    for row in 0..layout.rows {
        let z = layout.start.z - row as f32 * layout.row_spacing;
        let mut x = layout.start.x;

        for col in 0..layout.cols {
            // validate() guarantees at least one width
            let width = layout
                .width_choices
                .choose(rng)
                .copied()
                .unwrap_or(layout.width_choices[0]);
            let cell = (row * layout.cols + col) as usize;
            let variant = if special[cell] {
                0
            } else {
                rng.random_range(0..BLOCK_VARIANTS)
            };

            blocks.push(Block {
                id,
                row,
                col,
                pos: Vec3::new(x + width / 2.0, layout.start.y, z),
                half_width: width / 2.0,
                half_height,
                half_depth,
                special: special[cell],
                variant,
            });

            x += width;
            id += 1;
        }
    }

    Ok(BlockField::from_blocks(blocks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn layout(rows: u32, cols: u32, reserved_rows: u32, special_count: u32) -> FieldLayout {
        FieldLayout {
            rows,
            cols,
            reserved_rows,
            special_count,
            width_choices: vec![20.0],
            start: Vec3::new(-200.0, 50.0, -100.0),
            row_spacing: 0.5,
            block_height: 20.0,
            block_depth: 10.0,
        }
    }

    #[test]
    fn test_default_field() {
        let mut rng = Pcg32::seed_from_u64(1);
        let field = generate(&layout(16, 20, 3, 2), 1, &mut rng).unwrap();

        assert_eq!(field.len(), 320);
        assert_eq!(field.special_count(), 2);

        let first = field.blocks()[0];
        assert_eq!(first.id, 1);
        assert_eq!(first.pos, Vec3::new(-190.0, 50.0, -100.0));
        assert_eq!(first.half_depth, 5.0);

        // Row 1 starts a fresh row half a unit deeper
        let row1 = field.blocks()[20];
        assert_eq!((row1.row, row1.col), (1, 0));
        assert_eq!(row1.pos, Vec3::new(-190.0, 50.0, -100.5));

        let last_in_row = field.blocks()[19];
        assert_eq!(last_in_row.pos.x + last_in_row.half_width, 200.0);
    }

    #[test]
    fn test_variable_widths_edge_to_edge() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut l = layout(2, 12, 0, 1);
        l.width_choices = vec![10.0, 20.0, 30.0];
        let field = generate(&l, 1, &mut rng).unwrap();

        for row in field.blocks().chunks(12) {
            let mut edge = -200.0;
            for block in row {
                assert!((block.pos.x - block.half_width - edge).abs() < 1e-4);
                edge = block.pos.x + block.half_width;
            }
        }
    }

    #[test]
    fn test_variants_are_seeded() {
        let l = layout(16, 20, 3, 2);
        let a = generate(&l, 1, &mut Pcg32::seed_from_u64(11)).unwrap();
        let b = generate(&l, 1, &mut Pcg32::seed_from_u64(11)).unwrap();

        let variants: Vec<u8> = a.blocks().iter().map(|b| b.variant).collect();
        assert_eq!(variants, b.blocks().iter().map(|b| b.variant).collect::<Vec<_>>());
        assert!(variants.iter().all(|&v| v < BLOCK_VARIANTS));
        // 318 draws over 4 variants never all land on one
        assert!(variants.iter().any(|&v| v != variants[0]));
        assert!(a.blocks().iter().filter(|b| b.special).all(|b| b.variant == 0));
    }

    #[test]
    fn test_infeasible_specials_fail() {
        let mut rng = Pcg32::seed_from_u64(1);
        let err = generate(&layout(4, 1, 3, 2), 1, &mut rng).unwrap_err();
        assert!(matches!(err, SimError::Configuration(_)));

        // Every row reserved
        assert!(generate(&layout(3, 5, 3, 1), 1, &mut rng).is_err());
    }

    #[test]
    fn test_specials_fill_all_eligible_cells() {
        let mut rng = Pcg32::seed_from_u64(9);
        let field = generate(&layout(4, 2, 3, 2), 1, &mut rng).unwrap();
        let specials: Vec<_> = field.blocks().iter().filter(|b| b.special).collect();

        assert_eq!(specials.len(), 2);
        assert!(specials.iter().all(|b| b.row == 3));
    }

    #[test]
    fn test_empty_widths_fail() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut l = layout(2, 2, 0, 0);
        l.width_choices.clear();
        assert!(generate(&l, 1, &mut rng).is_err());
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = generate(&layout(16, 20, 3, 2), 1, &mut Pcg32::seed_from_u64(77)).unwrap();
        let b = generate(&layout(16, 20, 3, 2), 1, &mut Pcg32::seed_from_u64(77)).unwrap();
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_field_shape(
            rows in 1u32..20,
            cols in 1u32..20,
            reserved in 0u32..20,
            k in 0u32..10,
            seed in any::<u64>(),
        ) {
            let reserved = reserved.min(rows);
            let l = layout(rows, cols, reserved, k);
            let mut rng = Pcg32::seed_from_u64(seed);
            let result = generate(&l, 1, &mut rng);

            if ((rows - reserved) * cols) < k {
                prop_assert!(matches!(result, Err(SimError::Configuration(_))));
            } else {
                let field = result.unwrap();
                prop_assert_eq!(field.len(), (rows * cols) as usize);
                prop_assert_eq!(field.special_count(), k as usize);
                prop_assert!(field.blocks().iter().filter(|b| b.special).all(|b| b.row >= reserved));
            }
        }
    }
}
