use rasterkit_image::ImageError;

use super::kernel::KernelMatrix;

/// Create a box blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
///
/// # Returns
///
/// A vector of uniform weights summing to one.
pub fn box_blur_kernel_1d(kernel_size: usize) -> Vec<f32> {
    vec![1.0 / kernel_size as f32; kernel_size]
}

/// Create a gaussian blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
/// * `sigma` - The sigma of the gaussian kernel.
///
/// # Returns
///
/// A vector of normalized weights.
pub fn gaussian_kernel_1d(kernel_size: usize, sigma: f32) -> Vec<f32> {
    if kernel_size == 0 {
        return Vec::new();
    }

    let mut kernel = Vec::with_capacity(kernel_size);

    let mean = (kernel_size - 1) as f32 / 2.0;
    let sigma_sq = sigma * sigma;

    // compute the kernel
    for i in 0..kernel_size {
        let x = i as f32 - mean;
        kernel.push((-(x * x) / (2.0 * sigma_sq)).exp());
    }

    // normalize the kernel
    let norm = kernel.iter().sum::<f32>();
    kernel.iter_mut().for_each(|k| *k /= norm);
    kernel
}

/// Create the paired 3x3 sobel kernels.
///
/// # Returns
///
/// The horizontal and vertical gradient kernels, in that order.
pub fn sobel_kernels_3x3() -> Result<(KernelMatrix, KernelMatrix), ImageError> {
    #[rustfmt::skip]
    let kernel_x = KernelMatrix::new(3, 3, vec![
        -1.0, 0.0, 1.0,
        -2.0, 0.0, 2.0,
        -1.0, 0.0, 1.0,
    ])?;

    #[rustfmt::skip]
    let kernel_y = KernelMatrix::new(3, 3, vec![
        -1.0, -2.0, -1.0,
         0.0,  0.0,  0.0,
         1.0,  2.0,  1.0,
    ])?;

    Ok((kernel_x, kernel_y))
}

/// Create the 4-neighbour 3x3 laplacian kernel.
pub fn laplacian_kernel_3x3() -> Result<KernelMatrix, ImageError> {
    #[rustfmt::skip]
    let kernel = KernelMatrix::new(3, 3, vec![
        0.0,  1.0, 0.0,
        1.0, -4.0, 1.0,
        0.0,  1.0, 0.0,
    ])?;

    Ok(kernel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_box_blur_kernel_1d() {
        let kernel = box_blur_kernel_1d(5);
        assert_eq!(kernel, vec![0.2; 5]);
    }

    #[test]
    fn test_gaussian_kernel_1d() {
        let kernel = gaussian_kernel_1d(5, 0.5);

        assert_eq!(kernel.len(), 5);
        assert_relative_eq!(kernel.iter().sum::<f32>(), 1.0, max_relative = 1e-6);

        // symmetric with the mass at the centre
        assert_eq!(kernel[0], kernel[4]);
        assert_eq!(kernel[1], kernel[3]);
        assert!(kernel[2] > kernel[1]);
    }

    #[test]
    fn test_sobel_kernels_3x3() -> Result<(), ImageError> {
        let (kernel_x, kernel_y) = sobel_kernels_3x3()?;

        assert_eq!(kernel_x.get(1, 0), -2.0);
        assert_eq!(kernel_x.get(1, 2), 2.0);
        assert_eq!(kernel_y.get(0, 1), -2.0);
        assert_eq!(kernel_y.get(2, 1), 2.0);

        // transposes of one another
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(kernel_x.get(y, x), kernel_y.get(x, y));
            }
        }
        Ok(())
    }

    #[test]
    fn test_laplacian_kernel_3x3() -> Result<(), ImageError> {
        let kernel = laplacian_kernel_3x3()?;
        let sum: f32 = (0..3)
            .flat_map(|y| (0..3).map(move |x| (y, x)))
            .map(|(y, x)| kernel.get(y, x))
            .sum();
        assert_eq!(sum, 0.0);
        Ok(())
    }
}
