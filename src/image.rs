//! 2D projection images

pub type ImageData = Array2<Intensityf32>;

/// Number of (rows, columns) of a projection
pub type Shape = (usize, usize);

#[derive(Clone, Debug, PartialEq)]
pub struct Projection {
    pub data: ImageData,
}

impl Projection {

    pub fn new(data: ImageData) -> Self { Self { data } }

    pub fn zeros(shape: Shape) -> Self { Self::new(Array2::zeros(shape)) }

    pub fn shape(&self) -> Shape { self.data.dim() }

    /// Largest sample, used to compare projections at consecutive angles.
    ///
    /// NaN if any sample is NaN; negative infinity if there are no samples.
    pub fn summary_max(&self) -> Intensityf32 {
        self.data.iter().fold(Intensityf32::NEG_INFINITY, |max, &x| {
            if max.is_nan() || x.is_nan() { Intensityf32::NAN }
            else                          { max.max(x) }
        })
    }

    /// Samples in row-major order
    pub fn row_major(&self) -> Vec<Intensityf32> { self.data.iter().copied().collect() }
}

impl core::ops::Index<(usize, usize)> for Projection {
    type Output = Intensityf32;
    #[inline]
    fn index(&self, i: (usize, usize)) -> &Self::Output { &self.data[i] }
}

impl core::ops::IndexMut<(usize, usize)> for Projection {
    #[inline]
    fn index_mut(&mut self, i: (usize, usize)) -> &mut Self::Output { &mut self.data[i] }
}


// ----- Imports ------------------------------------------------------------------------------------------
use ndarray::Array2;
use units::todo::Intensityf32;
