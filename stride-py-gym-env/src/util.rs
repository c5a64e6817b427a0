//! Conversion between numpy arrays and [`ArrayD`].
use anyhow::{anyhow, Result};
use ndarray::ArrayD;
use num_traits::AsPrimitive;
use numpy::{Element, PyArrayDyn};
use pyo3::{IntoPy, PyAny, PyObject, Python};

/// Converts a numpy array of `T1` to [`ArrayD`] of `T2`.
pub fn pyobj_to_arrayd<T1, T2>(obj: &PyAny) -> Result<ArrayD<T2>>
where
    T1: Element + AsPrimitive<T2>,
    T2: 'static + Copy,
{
    let arr: &PyArrayDyn<T1> = obj
        .extract()
        .map_err(|e| anyhow!("Expected a numpy array of {}: {}", std::any::type_name::<T1>(), e))?;
    Ok(arr.to_owned_array().mapv(|x| x.as_()))
}

/// Converts [`ArrayD<f32>`] to a numpy array.
pub fn arrayd_to_pyobj(py: Python, arr: &ArrayD<f32>) -> PyObject {
    PyArrayDyn::<f32>::from_array(py, arr).into_py(py)
}
