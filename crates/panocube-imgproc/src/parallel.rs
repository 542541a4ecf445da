use rayon::prelude::*;

use panocube_image::Image;
use panocube_tensor::Tensor2;

/// Apply a function to each pixel for grid sampling in parallel.
///
/// The destination rows are processed in parallel; `f` receives the source
/// coordinates stored in `map_x` and `map_y` for the pixel and its channels.
///
/// The maps are expected to have the same rows and cols as `dst`.
pub fn par_iter_rows_resample<T, const C: usize>(
    dst: &mut Image<T, C>,
    map_x: &Tensor2<f32>,
    map_y: &Tensor2<f32>,
    f: impl Fn(&f32, &f32, &mut [T]) + Send + Sync,
) where
    T: Send + Sync,
{
    let cols = dst.cols();
    if cols == 0 {
        return;
    }

    let map_x_slice = map_x.as_slice();
    let map_y_slice = map_y.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(C * cols)
        .zip(map_x_slice.par_chunks_exact(cols))
        .zip(map_y_slice.par_chunks_exact(cols))
        .for_each(|((dst_chunk, map_x_chunk), map_y_chunk)| {
            dst_chunk
                .chunks_exact_mut(C)
                .zip(map_x_chunk.iter().zip(map_y_chunk.iter()))
                .for_each(|(dst_pixel, (x, y))| {
                    f(x, y, dst_pixel);
                });
        });
}

/// Fill two coordinate grids in parallel by rows.
///
/// `f` is called with `(row, col)` and returns the `(x, y)` pair stored at that
/// position of `map_x` and `map_y`. Both grids must have the same shape.
pub fn par_iter_rows_grid(
    map_x: &mut Tensor2<f32>,
    map_y: &mut Tensor2<f32>,
    f: impl Fn(usize, usize) -> (f32, f32) + Send + Sync,
) {
    let cols = map_x.shape[1];
    if cols == 0 {
        return;
    }

    map_x
        .as_slice_mut()
        .par_chunks_exact_mut(cols)
        .zip(map_y.as_slice_mut().par_chunks_exact_mut(cols))
        .enumerate()
        .for_each(|(row, (x_chunk, y_chunk))| {
            x_chunk
                .iter_mut()
                .zip(y_chunk.iter_mut())
                .enumerate()
                .for_each(|(col, (x, y))| {
                    (*x, *y) = f(row, col);
                });
        });
}
