//! RGB-to-grayscale conversion, in the shapes used by the optimization
//! exercise.
//!
//! All variants compute the same ITU-style weighted sum
//! `0.30*R + 0.59*G + 0.11*B` over `0x00BBGGRR` words and replicate the
//! result into all three channels. They differ only in how the weights
//! are scaled, which is the point: each one trades a little accuracy
//! against the soft core's very expensive integer division.
//!
//! The per-buffer forms exist as separate functions (rather than one
//! function taking a variant flag) so a profiling run times exactly the
//! loop under study and not a branch in its body.
//!
//! Architecture-independent; the tests run on the host.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

use pix::rgb888;

/// Replicates an 8-bit luminance into the `0x00BBGGRR` channels.
#[inline(always)]
fn splat(y: u32) -> u32 {
    y | (y << 8) | (y << 16)
}

/// The naive form: one integer division per channel.
#[inline(always)]
pub fn per_channel_div(px: u32) -> u32 {
    let y = (rgb888::red(px) * 30) / 100
        + (rgb888::green(px) * 59) / 100
        + (rgb888::blue(px) * 11) / 100;
    splat(y)
}

/// First rewrite: sum the weighted channels, divide once.
#[inline(always)]
pub fn single_div(px: u32) -> u32 {
    let y = (rgb888::red(px) * 30
        + rgb888::green(px) * 59
        + rgb888::blue(px) * 11)
        / 100;
    splat(y)
}

/// Second rewrite: weights rescaled to 256ths so the division becomes a
/// shift. `77 + 151 + 28 = 256`, so white maps to white exactly.
#[inline(always)]
pub fn shift_weights(px: u32) -> u32 {
    let y = (rgb888::red(px) * 77
        + rgb888::green(px) * 151
        + rgb888::blue(px) * 28)
        >> 8;
    splat(y)
}

/// Converts a frame with [`per_channel_div`].
///
/// # Panics
///
/// If the slices differ in length (all the buffer forms do this).
pub fn convert_per_channel_div(src: &[u32], dst: &mut [u32]) {
    assert_eq!(src.len(), dst.len());
    for (d, &s) in dst.iter_mut().zip(src) {
        *d = per_channel_div(s);
    }
}

/// Converts a frame with [`single_div`].
pub fn convert_single_div(src: &[u32], dst: &mut [u32]) {
    assert_eq!(src.len(), dst.len());
    for (d, &s) in dst.iter_mut().zip(src) {
        *d = single_div(s);
    }
}

/// Converts a frame with [`shift_weights`].
pub fn convert_shift(src: &[u32], dst: &mut [u32]) {
    assert_eq!(src.len(), dst.len());
    for (d, &s) in dst.iter_mut().zip(src) {
        *d = shift_weights(s);
    }
}

/// Converts a frame with [`shift_weights`], four pixels per iteration.
///
/// The manual unroll amortizes the loop bookkeeping the same way the
/// hand-unrolled C loop did; the ragged tail is handled separately.
pub fn convert_shift_unrolled(src: &[u32], dst: &mut [u32]) {
    assert_eq!(src.len(), dst.len());
    let mut d = dst.chunks_exact_mut(4);
    let mut s = src.chunks_exact(4);
    for (d4, s4) in (&mut d).zip(&mut s) {
        d4[0] = shift_weights(s4[0]);
        d4[1] = shift_weights(s4[1]);
        d4[2] = shift_weights(s4[2]);
        d4[3] = shift_weights(s4[3]);
    }
    for (d1, &s1) in d.into_remainder().iter_mut().zip(s.remainder()) {
        *d1 = shift_weights(s1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn luma(px: u32) -> u32 {
        // All variants splat, so the low byte is the luminance.
        px & 0xFF
    }

    fn is_splatted(px: u32) -> bool {
        let y = px & 0xFF;
        px == (y | (y << 8) | (y << 16))
    }

    /// Steps through channel space coarsely but past every extreme.
    fn sample_pixels(mut f: impl FnMut(u32)) {
        let steps = [0u8, 1, 17, 85, 128, 200, 254, 255];
        for &r in &steps {
            for &g in &steps {
                for &b in &steps {
                    f(rgb888::pack(r, g, b));
                }
            }
        }
    }

    #[test]
    fn white_survives_the_cheaper_variants() {
        let white = rgb888::pack(0xFF, 0xFF, 0xFF);
        assert_eq!(single_div(white), 0x00FF_FFFF);
        assert_eq!(shift_weights(white), 0x00FF_FFFF);
        // The per-channel truncation loses a count: this is the lab's
        // motivating example for deferring the division.
        assert_eq!(per_channel_div(white), 0x00FE_FEFE);
    }

    #[test]
    fn neutral_input_is_preserved_by_single_div() {
        for v in 0..=255u8 {
            let px = rgb888::pack(v, v, v);
            assert_eq!(luma(single_div(px)), u32::from(v));
        }
    }

    #[test]
    fn all_variants_splat_all_channels() {
        sample_pixels(|px| {
            assert!(is_splatted(per_channel_div(px)));
            assert!(is_splatted(single_div(px)));
            assert!(is_splatted(shift_weights(px)));
        });
    }

    #[test]
    fn per_channel_never_exceeds_single_div() {
        // Truncating three times can only lose counts relative to
        // truncating once, and at most two of them.
        sample_pixels(|px| {
            let per = luma(per_channel_div(px));
            let single = luma(single_div(px));
            assert!(per <= single);
            assert!(single - per <= 2, "px = {:#08x}", px);
        });
    }

    #[test]
    fn shift_stays_close_to_single_div() {
        // 77/256, 151/256, 28/256 sit within a quarter percent of the
        // true weights; with truncation that bounds the error at 2.
        sample_pixels(|px| {
            let shift = luma(shift_weights(px)) as i32;
            let single = luma(single_div(px)) as i32;
            assert!((shift - single).abs() <= 2, "px = {:#08x}", px);
        });
    }

    #[test]
    fn unrolled_matches_plain_shift() {
        for len in &[0usize, 1, 3, 4, 5, 103] {
            let src: Vec<u32> = (0..*len as u32)
                .map(|i| rgb888::pack(i as u8, (i * 3) as u8, (i * 7) as u8))
                .collect();
            let mut plain = vec![0; src.len()];
            let mut unrolled = vec![0; src.len()];
            convert_shift(&src, &mut plain);
            convert_shift_unrolled(&src, &mut unrolled);
            assert_eq!(plain, unrolled, "len = {}", len);
        }
    }

    #[test]
    #[should_panic]
    fn length_mismatch_panics() {
        convert_shift(&[0; 4], &mut [0; 3]);
    }
}
