use microfft::Complex32;

use crate::config::AUDIO;

/// Real-input magnitude spectrum
///
/// Implement this trait to plug in a different FFT backend.
pub trait SpectrumTransform {
    /// Write `input.len() / 2` bin magnitudes into `output`.
    ///
    /// `input` may be used as scratch space and is garbage afterwards.
    fn magnitudes(&mut self, input: &mut [f32], output: &mut [f32]);
}

/// Transform backed by `microfft`, for power-of-two windows of 64 to 1024
/// samples
#[derive(Debug, Default, Clone, Copy)]
pub struct MicroFft;

impl SpectrumTransform for MicroFft {
    fn magnitudes(&mut self, input: &mut [f32], output: &mut [f32]) {
        let len = input.len();
        let Some(bins) = forward(input) else {
            log::warn!("dsp: unsupported window of {} samples", len);
            output.fill(0.0);
            return;
        };

        for (magnitude, bin) in output.iter_mut().zip(bins.iter()) {
            *magnitude = libm::sqrtf(bin.re * bin.re + bin.im * bin.im);
        }
        // The DC bin carries the Nyquist term in its imaginary part
        if let (Some(dc), Some(bin)) = (output.first_mut(), bins.first()) {
            *dc = libm::fabsf(bin.re);
        }
    }
}

fn forward(input: &mut [f32]) -> Option<&mut [Complex32]> {
    use microfft::real::{rfft_64, rfft_128, rfft_256, rfft_512, rfft_1024};

    match input.len() {
        64 => <&mut [f32; 64]>::try_from(input)
            .ok()
            .map(|window| rfft_64(window).as_mut_slice()),
        128 => <&mut [f32; 128]>::try_from(input)
            .ok()
            .map(|window| rfft_128(window).as_mut_slice()),
        256 => <&mut [f32; 256]>::try_from(input)
            .ok()
            .map(|window| rfft_256(window).as_mut_slice()),
        512 => <&mut [f32; 512]>::try_from(input)
            .ok()
            .map(|window| rfft_512(window).as_mut_slice()),
        1024 => <&mut [f32; 1024]>::try_from(input)
            .ok()
            .map(|window| rfft_1024(window).as_mut_slice()),
        _ => None,
    }
}

/// Run `transform` and apply the calibration constant to every bin
pub fn spectrum(transform: &mut dyn SpectrumTransform, input: &mut [f32], output: &mut [f32]) {
    transform.magnitudes(input, output);
    for magnitude in output.iter_mut() {
        *magnitude *= AUDIO.spectrum_scale;
    }
}
