use panocube_tensor::{Tensor2, TensorError};

use crate::parallel;

/// Evenly spaced samples over the closed interval `[start, end]`.
///
/// A single sample yields `start`; zero samples yield an empty vector.
///
/// # Example
///
/// ```
/// use panocube_imgproc::interpolation::grid::linspace;
///
/// assert_eq!(linspace(-1.0, 1.0, 5), vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
/// assert_eq!(linspace(-2.0, 2.0, 1), vec![-2.0]);
/// ```
pub fn linspace(start: f64, end: f64, num: usize) -> Vec<f64> {
    match num {
        0 => vec![],
        1 => vec![start],
        _ => {
            let span = end - start;
            let last = (num - 1) as f64;
            (0..num)
                .map(|i| {
                    // pin the last sample so rounding never overshoots the interval
                    if i == num - 1 {
                        end
                    } else {
                        start + span * i as f64 / last
                    }
                })
                .collect()
        }
    }
}

/// Create the x and y maps of a `rows` x `cols` grid from a function.
///
/// # Arguments
///
/// * `cols` - The number of columns indicating the width of the grid
/// * `rows` - The number of rows indicating the height of the grid
/// * `f` - Maps `(col, row)` to the `(x, y)` value stored at that position
///
/// # Returns
///
/// A tuple of 2D tensors of shape (rows, cols) holding the x and y values
pub fn meshgrid_from_fn(
    cols: usize,
    rows: usize,
    f: impl Fn(usize, usize) -> (f32, f32) + Send + Sync,
) -> Result<(Tensor2<f32>, Tensor2<f32>), TensorError> {
    let mut map_x = Tensor2::from_shape_vec([rows, cols], vec![0.0; rows * cols])?;
    let mut map_y = Tensor2::from_shape_vec([rows, cols], vec![0.0; rows * cols])?;

    parallel::par_iter_rows_grid(&mut map_x, &mut map_y, |r, c| f(c, r));

    Ok((map_x, map_y))
}
