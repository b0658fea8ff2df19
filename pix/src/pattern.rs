//! Procedural test frames for the LCD demos.
//!
//! The lab boards have no storage for real images, so the demos generate
//! their frames. Every generator here is deterministic (the noise frame
//! takes its seed as a parameter) to keep output comparable across runs.

use rand::{Rng, SeedableRng};

use crate::{rgb565, Rgb565};

/// Fills `frame`, laid out as rows of `width` pixels, from `f(x, y)`.
///
/// Excess pixels past the last full row are left untouched.
///
/// # Panics
///
/// If `width` is zero.
pub fn fill(
    frame: &mut [Rgb565],
    width: usize,
    f: impl Fn(usize, usize) -> Rgb565,
) {
    let full = width * (frame.len() / width);
    for (i, px) in frame.iter_mut().enumerate().take(full) {
        *px = f(i % width, i / width);
    }
}

/// The classic XOR pattern, scrolled by `shift` to make frames differ.
pub fn xor_grid(x: usize, y: usize, shift: usize) -> Rgb565 {
    let v = ((x + shift) ^ y) as u8;
    rgb565(v, v.wrapping_mul(3), v.wrapping_mul(5))
}

/// Checkerboard of `cell`-sized squares alternating `a` and `b`.
///
/// # Panics
///
/// If `cell` is zero.
pub fn checkerboard(
    x: usize,
    y: usize,
    cell: usize,
    a: Rgb565,
    b: Rgb565,
) -> Rgb565 {
    if (x / cell + y / cell) % 2 == 0 {
        a
    } else {
        b
    }
}

/// Horizontal red and vertical blue ramps with green on the diagonal.
pub fn gradient(x: usize, y: usize, width: usize, height: usize) -> Rgb565 {
    let r = (x * 255 / width.max(1)) as u8;
    let b = (y * 255 / height.max(1)) as u8;
    rgb565(r, r & b, b)
}

/// Fills `frame` with seeded noise.
pub fn noise(frame: &mut [Rgb565], seed: u64) {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(seed);
    for px in frame.iter_mut() {
        *px = rng.gen();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_addresses_row_major() {
        let mut frame = [0u16; 12];
        fill(&mut frame, 4, |x, y| (y * 10 + x) as Rgb565);
        assert_eq!(frame[0], 0);
        assert_eq!(frame[3], 3);
        assert_eq!(frame[4], 10);
        assert_eq!(frame[11], 23);
    }

    #[test]
    fn fill_leaves_partial_rows_alone() {
        let mut frame = [0xFFFFu16 >> 1; 10];
        fill(&mut frame, 4, |_, _| 0);
        // Two full rows written, the ragged tail untouched.
        assert!(frame[..8].iter().all(|&p| p == 0));
        assert!(frame[8..].iter().all(|&p| p == 0x7FFF));
    }

    #[test]
    fn xor_grid_scrolls() {
        // Shifting by one column must reproduce the neighbor's pixel.
        assert_eq!(xor_grid(3, 7, 1), xor_grid(4, 7, 0));
        assert_ne!(xor_grid(0, 0, 0), xor_grid(0, 0, 1));
    }

    #[test]
    fn checkerboard_alternates_cells() {
        let (a, b) = (0xF800, 0x001F);
        assert_eq!(checkerboard(0, 0, 8, a, b), a);
        assert_eq!(checkerboard(8, 0, 8, a, b), b);
        assert_eq!(checkerboard(8, 8, 8, a, b), a);
        assert_eq!(checkerboard(7, 0, 8, a, b), a);
    }

    #[test]
    fn noise_is_reproducible() {
        let mut one = [0u16; 64];
        let mut two = [0u16; 64];
        noise(&mut one, 11181981);
        noise(&mut two, 11181981);
        assert_eq!(one[..], two[..]);

        noise(&mut two, 42);
        assert_ne!(one[..], two[..]);
    }
}
