use core::convert::TryInto;

/// The smallest and largest FFT sizes provided by `microfft`.
const MIN_FFT_SIZE: usize = 8;
const MAX_FFT_SIZE: usize = 4096;

/// Returns true if `size` is a power of two that [real_fft] can transform.
pub fn is_supported_fft_size(size: usize) -> bool {
    size.is_power_of_two() && size >= MIN_FFT_SIZE && size <= MAX_FFT_SIZE
}

/// Performs an in-place real FFT of `buffer`, returning the first `buffer.len() / 2`
/// complex bins. The real valued coefficient at the Nyquist frequency is packed into the
/// imaginary part of the DC bin.
///
/// Panics if the buffer length is not a supported size, see [is_supported_fft_size].
pub fn real_fft(buffer: &mut [f32]) -> &mut [microfft::Complex32] {
    let fft_size = buffer.len();
    // Each arm matches the array length, so the conversions cannot fail.
    match fft_size {
        8 => microfft::real::rfft_8(buffer.try_into().unwrap()),
        16 => microfft::real::rfft_16(buffer.try_into().unwrap()),
        32 => microfft::real::rfft_32(buffer.try_into().unwrap()),
        64 => microfft::real::rfft_64(buffer.try_into().unwrap()),
        128 => microfft::real::rfft_128(buffer.try_into().unwrap()),
        256 => microfft::real::rfft_256(buffer.try_into().unwrap()),
        512 => microfft::real::rfft_512(buffer.try_into().unwrap()),
        1024 => microfft::real::rfft_1024(buffer.try_into().unwrap()),
        2048 => microfft::real::rfft_2048(buffer.try_into().unwrap()),
        4096 => microfft::real::rfft_4096(buffer.try_into().unwrap()),
        _ => panic!("Unsupported fft size {}", fft_size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_sizes() {
        assert!(is_supported_fft_size(8));
        assert!(is_supported_fft_size(2048));
        assert!(is_supported_fft_size(4096));
        assert!(!is_supported_fft_size(4));
        assert!(!is_supported_fft_size(8192));
        assert!(!is_supported_fft_size(1000));
    }

    #[test]
    fn test_dc_and_nyquist_packing() {
        // Constant input puts all energy in the DC bin.
        let mut buffer = [1.0_f32; 32];
        let fft = real_fft(&mut buffer);
        assert_eq!(fft.len(), 16);
        assert!((fft[0].re - 32.0).abs() < 1e-4);
        for bin in fft.iter().skip(1) {
            assert!(bin.norm_sqr() < 1e-6);
        }

        // Alternating input puts all energy at the Nyquist frequency.
        let mut buffer = [0.0_f32; 16];
        for (i, value) in buffer.iter_mut().enumerate() {
            *value = if i % 2 == 0 { 1.0 } else { -1.0 };
        }
        let fft = real_fft(&mut buffer);
        assert!(fft[0].re.abs() < 1e-4);
        assert!((fft[0].im - 16.0).abs() < 1e-4);
    }

    #[test]
    #[should_panic]
    fn test_unsupported_size() {
        let mut buffer = [0.0_f32; 12];
        let _ = real_fft(&mut buffer);
    }
}
