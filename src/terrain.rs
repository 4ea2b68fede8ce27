//! Initial crust generation and rift filling.

use crate::chunk::{Chunk, Layer, RockType};
use crate::constants::RUPTURE_THICKNESS_M;
use crate::geometry::{Length, Point, WrappedTorusSpace};
use crate::region::Region;
use noise::{NoiseFn, Perlin};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    b + (a - b) * t
}

/// Generate a `width` x `height` field of single-layer basalt chunks whose
/// thicknesses follow a coarse noise field.
///
/// The noise is sampled on a grid of `cell`-sized tiles, mapped into
/// `[min_height, max_height]` meters, bilinearly upsampled with toroidal
/// wrap of the coarse grid and perturbed per cell by a small jitter. The
/// result is row-major, exactly `height` rows of `width` chunks.
pub fn generate_chunk_field(
    width: i32,
    height: i32,
    cell: i32,
    min_height: f32,
    max_height: f32,
    seed: u32,
) -> Vec<Vec<Chunk>> {
    assert!(width > 0 && height > 0 && cell > 0);
    assert!(max_height >= min_height);

    let coarse_w = ((width + cell - 1) / cell).max(1);
    let coarse_h = ((height + cell - 1) / cell).max(1);

    let perlin = Perlin::new(seed);
    let mut rng = StdRng::seed_from_u64(seed as u64);
    let range = max_height - min_height;

    let mut coarse = vec![vec![0.0f32; coarse_w as usize]; coarse_h as usize];
    for (i, row) in coarse.iter_mut().enumerate() {
        for (j, value) in row.iter_mut().enumerate() {
            // Perlin output is in [-1, 1]; fold it into the height range.
            let sample = perlin.get([j as f64 * 0.73 + 0.5, i as f64 * 0.73 + 0.5]) as f32;
            *value = min_height + (sample + 1.0) * 0.5 * range;
        }
    }

    let mut rows = Vec::with_capacity(height as usize);
    for y in 0..height {
        let mut row = Vec::with_capacity(width as usize);
        let ci = y / cell;
        let ii = (ci + 1) % coarse_h;
        let ty = (y % cell) as f32 / cell as f32;

        for x in 0..width {
            let cj = x / cell;
            let jj = (cj + 1) % coarse_w;
            let tx = (x % cell) as f32 / cell as f32;

            let h00 = coarse[ci as usize][cj as usize];
            let h01 = coarse[ci as usize][jj as usize];
            let h10 = coarse[ii as usize][cj as usize];
            let h11 = coarse[ii as usize][jj as usize];

            let h0 = lerp(h01, h00, tx);
            let h1 = lerp(h11, h10, tx);
            let h = lerp(h1, h0, ty);
            let jitter = (rng.gen_range(-1.0..1.0f32)) * 0.05 * range;

            let thickness = Length::from_meters((h + jitter).max(min_height.max(1.0)));
            row.push(Chunk::new(Layer::new(RockType::Basalt, thickness)));
        }
        rows.push(row);
    }
    rows
}

/// Fill an empty global cell from an adjacent region, modelling upwelling
/// at a rift.
///
/// Averages the thickness of the region's chunks among the cell's wrapped
/// 4-neighbors, and deposits a basalt column of 0.9x that average at the
/// cell when the average is at or below the rupture thickness. The region
/// grid grows when the cell lies just outside it. Returns whether a chunk
/// was deposited.
pub fn fill_empty_point(space: &WrappedTorusSpace, point: Point, region: &mut Region) -> bool {
    let bounds = region.bounding_box();

    let mut total_m = 0.0f32;
    let mut count = 0usize;
    for neighbor in space.neighbors(point) {
        let unwrapped = match space.get_unwrapped(&bounds, neighbor) {
            Some(p) => p,
            None => continue,
        };
        if let Some(chunk) = region.chunk_at(region.to_local(unwrapped)) {
            total_m += chunk.thickness().meters();
            count += 1;
        }
    }
    if count == 0 {
        return false;
    }

    let average_m = total_m / count as f32;
    if average_m > RUPTURE_THICKNESS_M {
        // Crust this thick does not rupture; the gap stays open.
        return false;
    }

    // The cell may only be expressible next to the region as one of its
    // duplicates. Without one the region is not actually bordering here.
    let target = space
        .duplicates(point)
        .into_iter()
        .find(|dup| bounds.expand_by_one().contains(*dup));
    let target = match target {
        Some(t) => t,
        None => return false,
    };

    let layer = Layer::new(RockType::Basalt, Length::from_meters(average_m * 0.9));
    region.set_chunk(region.to_local(target), Chunk::new(layer));
    true
}
