//! Conversions between element kinds

use primat_core::MatrixElement;

use super::Matrix;

impl<T: MatrixElement> Matrix<T> {
    /// Same-shaped matrix of the generic nullable kind
    pub fn boxed(&self) -> Matrix<Option<T>> {
        self.map(|value| Some(value.clone()))
    }

    /// Widen every cell through a lossless `From` conversion
    pub fn convert<U>(&self) -> Matrix<U>
    where
        U: MatrixElement + From<T>,
    {
        self.map(|value| U::from(value.clone()))
    }
}

impl<T: MatrixElement> Matrix<Option<T>> {
    /// Back to the primitive kind; `None` cells become the kind's zero
    pub fn unbox(&self) -> Matrix<T> {
        self.map(|value| value.clone().unwrap_or_else(T::zero))
    }
}
