//! Playback-speed adjustment via linear-interpolation resampling.
//!
//! This is an amplitude-domain resample, not a pitch-preserving time
//! stretch: speeding audio up raises its pitch and slowing it down lowers
//! it, exactly like changing the playback rate of a tape. That trade-off
//! is accepted for the short utterances this crate produces.

use std::borrow::Cow;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum ResampleError {
    #[error("invalid speed factor {0}: must be finite and greater than zero")]
    InvalidSpeed(f32),
}

/// Resample a waveform to play back at `speed` times the original rate.
///
/// A `speed` above 1.0 shortens the output, below 1.0 lengthens it. The
/// output length is `floor(len / speed)`; output samples are taken at
/// evenly spaced positions spanning `[0, len - 1]` and linearly
/// interpolated between neighbouring input samples.
///
/// `speed == 1.0` is the identity and borrows the input without copying.
/// Non-finite, zero, or negative speeds are rejected.
pub fn stretch(waveform: &[f32], speed: f32) -> Result<Cow<'_, [f32]>, ResampleError> {
    if !speed.is_finite() || speed <= 0.0 {
        return Err(ResampleError::InvalidSpeed(speed));
    }

    if speed == 1.0 || waveform.is_empty() {
        return Ok(Cow::Borrowed(waveform));
    }

    let out_len = (waveform.len() as f64 / speed as f64).floor() as usize;
    if out_len == 0 {
        return Ok(Cow::Owned(Vec::new()));
    }
    if out_len == 1 {
        return Ok(Cow::Owned(vec![waveform[0]]));
    }

    let last = (waveform.len() - 1) as f64;
    let step = last / (out_len - 1) as f64;

    let mut out = Vec::with_capacity(out_len);
    for i in 0..out_len {
        let pos = step * i as f64;
        let idx = pos as usize;
        let frac = pos - idx as f64;
        let sample = if idx + 1 < waveform.len() {
            waveform[idx] as f64 * (1.0 - frac) + waveform[idx + 1] as f64 * frac
        } else {
            waveform[idx] as f64
        };
        out.push(sample as f32);
    }

    Ok(Cow::Owned(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_speed_is_the_borrowed_identity() {
        let wave = vec![0.1, -0.2, 0.3, -0.4];
        let out = stretch(&wave, 1.0).expect("unit speed must succeed");
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out.as_ref(), wave.as_slice());
    }

    #[test]
    fn doubling_speed_halves_the_length() {
        let wave: Vec<f32> = (0..1001).map(|i| i as f32).collect();
        let out = stretch(&wave, 2.0).expect("stretch must succeed");
        assert_eq!(out.len(), wave.len() / 2);
    }

    #[test]
    fn halving_speed_doubles_the_length() {
        let wave: Vec<f32> = (0..500).map(|i| (i as f32).sin()).collect();
        let out = stretch(&wave, 0.5).expect("stretch must succeed");
        assert_eq!(out.len(), wave.len() * 2);
    }

    #[test]
    fn interpolation_spans_the_full_input_range() {
        // linspace(0, 1, 4) over [0.0, 1.0] -> 0, 1/3, 2/3, 1
        let out = stretch(&[0.0, 1.0], 0.5).expect("stretch must succeed");
        assert_eq!(out.len(), 4);
        assert!((out[0] - 0.0).abs() < 1e-6);
        assert!((out[1] - 1.0 / 3.0).abs() < 1e-6);
        assert!((out[2] - 2.0 / 3.0).abs() < 1e-6);
        assert!((out[3] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn endpoints_are_preserved() {
        let wave: Vec<f32> = (0..100).map(|i| i as f32 / 100.0).collect();
        for speed in [0.25, 0.75, 1.5, 3.0] {
            let out = stretch(&wave, speed).expect("stretch must succeed");
            assert_eq!(out[0], wave[0], "first sample must survive at {speed}x");
            let last_in = *wave.last().expect("non-empty input");
            let last_out = *out.last().expect("non-empty output");
            assert!(
                (last_out - last_in).abs() < 1e-6,
                "last sample must survive at {speed}x"
            );
        }
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(stretch(&[], 2.0).expect("must succeed").is_empty());
        assert!(stretch(&[], 0.5).expect("must succeed").is_empty());
    }

    #[test]
    fn extreme_speed_collapses_to_one_sample() {
        let wave = vec![0.5, 0.6, 0.7];
        let out = stretch(&wave, 2.5).expect("stretch must succeed");
        assert_eq!(out.as_ref(), &[0.5]);
    }

    #[test]
    fn degenerate_speeds_are_rejected() {
        let wave = vec![0.0, 1.0];
        for speed in [0.0, -1.0, f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let err = stretch(&wave, speed).expect_err("speed must be rejected");
            assert!(matches!(err, ResampleError::InvalidSpeed(_)));
        }
    }
}
