/// Hard clipping distortion: amplifies by `drive` and clips to [-1, 1].
#[inline]
pub fn distort(sample: f32, drive: f32) -> f32 {
    (sample * drive).max(-1.0).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_range() {
        let drives = [0.0_f32, 0.5, 1.0, 2.0, 10.0, 1000.0, -3.0];
        for drive in drives.iter() {
            let mut x = -5.0_f32;
            while x <= 5.0 {
                let y = distort(x, *drive);
                assert!(y >= -1.0 && y <= 1.0);
                x += 0.01;
            }
        }
    }

    #[test]
    fn test_linear_region() {
        assert_eq!(distort(0.25, 2.0), 0.5);
        assert_eq!(distort(-0.25, 2.0), -0.5);
        assert_eq!(distort(0.75, 2.0), 1.0);
        assert_eq!(distort(-0.75, 2.0), -1.0);
    }
}
