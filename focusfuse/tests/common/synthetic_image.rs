use focusfuse::{Dimensions, Photo, PixelGrid};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// High-contrast checkerboard: `light` on even cells, `dark` on odd ones.
pub fn checkerboard(width: usize, height: usize, cell: usize, light: u8, dark: u8) -> Photo {
    assert!(cell > 0, "cell size must be positive");
    Photo::new(PixelGrid::from_fn(Dimensions::new(width, height), |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            light
        } else {
            dark
        }
    }))
}

/// Keeps `sharp` where `in_focus(x, y)` holds and replaces the rest with a
/// flat `defocused` level, the limit of a fully out-of-focus region.
pub fn defocus_outside(sharp: &Photo, defocused: u8, in_focus: impl Fn(usize, usize) -> bool) -> Photo {
    Photo::new(PixelGrid::from_fn(sharp.dimensions(), |x, y| {
        if in_focus(x, y) {
            sharp.get(x, y)
        } else {
            defocused
        }
    }))
}

/// Uniform noise with a fixed seed.
pub fn noise(width: usize, height: usize, seed: u64) -> Photo {
    let mut rng = StdRng::seed_from_u64(seed);
    Photo::new(PixelGrid::from_fn(Dimensions::new(width, height), |_, _| {
        rng.random::<u8>()
    }))
}

/// Sum of squared horizontal and vertical neighbour differences over the
/// columns `x0..x1`; a simple focus measure.
pub fn gradient_energy(photo: &Photo, x0: usize, x1: usize) -> u64 {
    let mut energy = 0u64;
    for y in 0..photo.height() - 1 {
        for x in x0..x1 - 1 {
            let here = i64::from(photo.get(x, y));
            let dx = i64::from(photo.get(x + 1, y)) - here;
            let dy = i64::from(photo.get(x, y + 1)) - here;
            energy += (dx * dx + dy * dy) as u64;
        }
    }
    energy
}

/// Mean absolute intensity difference between two photos of equal size.
pub fn mean_abs_error(a: &Photo, b: &Photo) -> f64 {
    assert_eq!(a.dimensions(), b.dimensions());
    let total: u64 = a
        .pixels()
        .pixels()
        .iter()
        .zip(b.pixels().pixels())
        .map(|(&p, &q)| u64::from(p.abs_diff(q)))
        .sum();
    total as f64 / a.dimensions().area() as f64
}
