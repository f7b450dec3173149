//! Conversions between ndarray and nalgebra containers.
//!
//! Problems and results are expressed with ndarray; the dense solve runs on
//! nalgebra's decompositions.

use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2};

/// Convert an ndarray Array2 to a nalgebra DMatrix.
pub fn ndarray_to_nalgebra<T: nalgebra::Scalar>(arr: &Array2<T>) -> DMatrix<T> {
    DMatrix::from_fn(arr.nrows(), arr.ncols(), |i, j| arr[[i, j]].clone())
}

pub fn ndarray_vec_to_nalgebra<T: nalgebra::Scalar>(arr: &Array1<T>) -> DVector<T> {
    DVector::from_iterator(arr.len(), arr.iter().cloned())
}

pub fn nalgebra_vec_to_ndarray<T: nalgebra::Scalar>(vec: &DVector<T>) -> Array1<T> {
    vec.iter().cloned().collect()
}
