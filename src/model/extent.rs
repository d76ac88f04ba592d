use serde::{Deserialize, Serialize};

/// Voxel coordinate picked on a displayed slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seed {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl Seed {
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }
}

/// Size of a volume along its three spatial axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extent {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
}

impl Extent {
    pub const fn new(width: usize, height: usize, depth: usize) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    pub fn shape_zyx(&self) -> [usize; 3] {
        [self.depth, self.height, self.width]
    }

    pub fn slice_len(&self) -> usize {
        self.width * self.height
    }

    pub fn voxel_count(&self) -> usize {
        self.slice_len() * self.depth
    }

    pub fn contains(&self, seed: Seed) -> bool {
        seed.x < self.width && seed.y < self.height && seed.z < self.depth
    }

    /// Row-major offset of `seed` in a `[Z, Y, X]` buffer.
    pub fn offset(&self, seed: Seed) -> usize {
        (seed.z * self.height + seed.y) * self.width + seed.x
    }

    pub fn seed_at(&self, offset: usize) -> Seed {
        let slice = self.slice_len();
        let z = offset / slice;
        let within = offset % slice;
        Seed::new(within % self.width, within / self.width, z)
    }

    pub fn clamp_slice(&self, index: i64) -> usize {
        index.clamp(0, self.depth.saturating_sub(1) as i64) as usize
    }

    /// Face-connected neighbours of `offset` that stay inside the grid.
    pub fn face_neighbors(&self, offset: usize) -> impl Iterator<Item = usize> + use<> {
        let seed = self.seed_at(offset);
        let (width, height, depth) = (self.width, self.height, self.depth);
        let slice = self.slice_len();
        let candidates = [
            (seed.x > 0).then(|| offset - 1),
            (seed.x + 1 < width).then(|| offset + 1),
            (seed.y > 0).then(|| offset - width),
            (seed.y + 1 < height).then(|| offset + width),
            (seed.z > 0).then(|| offset - slice),
            (seed.z + 1 < depth).then(|| offset + slice),
        ];
        candidates.into_iter().flatten()
    }
}
