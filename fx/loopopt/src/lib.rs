//! Loop-optimization kernels for the profiling exercise: each naive form
//! next to its hand-optimized twin, so the performance counter can put a
//! number on the transformation.
//!
//! The kernels are intentionally dumb (elementwise adds and a dot
//! product) because the exercise is about loop shape, not about the
//! arithmetic inside.
//!
//! Architecture-independent; the tests run on the host.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

/// Adds `y` into `x` elementwise; when `clear` is set, also zeroes `y`
/// behind itself. The condition is tested inside the loop, once per
/// element, which is exactly the waste unswitching removes.
///
/// # Panics
///
/// If the slices differ in length (the unswitched form too).
pub fn add_clear_naive(x: &mut [i32], y: &mut [i32], clear: bool) {
    assert_eq!(x.len(), y.len());
    for i in 0..x.len() {
        x[i] = x[i].wrapping_add(y[i]);
        if clear {
            y[i] = 0;
        }
    }
}

/// [`add_clear_naive`] after loop unswitching: the condition is hoisted
/// and each arm carries a straight-line loop.
pub fn add_clear_unswitched(x: &mut [i32], y: &mut [i32], clear: bool) {
    assert_eq!(x.len(), y.len());
    if clear {
        for i in 0..x.len() {
            x[i] = x[i].wrapping_add(y[i]);
            y[i] = 0;
        }
    } else {
        for i in 0..x.len() {
            x[i] = x[i].wrapping_add(y[i]);
        }
    }
}

/// Dot product, one element per iteration.
///
/// # Panics
///
/// If the slices differ in length (the unrolled form too).
pub fn dot_naive(a: &[i32], b: &[i32]) -> i32 {
    assert_eq!(a.len(), b.len());
    let mut acc = 0i32;
    for i in 0..a.len() {
        acc = acc.wrapping_add(a[i].wrapping_mul(b[i]));
    }
    acc
}

/// Dot product unrolled by four, with a scalar loop for the ragged tail.
pub fn dot_unrolled4(a: &[i32], b: &[i32]) -> i32 {
    assert_eq!(a.len(), b.len());
    let mut acc = 0i32;
    let mut a4 = a.chunks_exact(4);
    let mut b4 = b.chunks_exact(4);
    for (a4, b4) in (&mut a4).zip(&mut b4) {
        acc = acc
            .wrapping_add(a4[0].wrapping_mul(b4[0]))
            .wrapping_add(a4[1].wrapping_mul(b4[1]))
            .wrapping_add(a4[2].wrapping_mul(b4[2]))
            .wrapping_add(a4[3].wrapping_mul(b4[3]));
    }
    for (&a1, &b1) in a4.remainder().iter().zip(b4.remainder()) {
        acc = acc.wrapping_add(a1.wrapping_mul(b1));
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(len: usize) -> (Vec<i32>, Vec<i32>) {
        let x = (0..len as i32).map(|i| i * 3 - 7).collect();
        let y = (0..len as i32).map(|i| 11 - i).collect();
        (x, y)
    }

    #[test]
    fn unswitched_matches_naive_with_clear() {
        let (mut x1, mut y1) = fixture(100);
        let (mut x2, mut y2) = (x1.clone(), y1.clone());

        add_clear_naive(&mut x1, &mut y1, true);
        add_clear_unswitched(&mut x2, &mut y2, true);

        assert_eq!(x1, x2);
        assert_eq!(y1, y2);
        assert!(y1.iter().all(|&v| v == 0));
    }

    #[test]
    fn unswitched_matches_naive_without_clear() {
        let (mut x1, mut y1) = fixture(100);
        let (mut x2, mut y2) = (x1.clone(), y1.clone());

        add_clear_naive(&mut x1, &mut y1, false);
        add_clear_unswitched(&mut x2, &mut y2, false);

        assert_eq!(x1, x2);
        assert_eq!(y1, y2);
        assert_eq!(y1, fixture(100).1, "y must be untouched");
    }

    #[test]
    fn dot_forms_agree_on_ragged_lengths() {
        for len in &[0usize, 1, 3, 4, 7, 1000] {
            let (a, b) = fixture(*len);
            assert_eq!(dot_naive(&a, &b), dot_unrolled4(&a, &b), "len = {}", len);
        }
    }

    #[test]
    fn dot_of_known_vectors() {
        assert_eq!(dot_naive(&[1, 2, 3], &[4, 5, 6]), 32);
        assert_eq!(dot_unrolled4(&[1, 2, 3], &[4, 5, 6]), 32);
    }

    #[test]
    #[should_panic]
    fn length_mismatch_panics() {
        dot_naive(&[1, 2], &[1]);
    }
}
