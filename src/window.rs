use ndarray::Array1;
use num::{traits::FloatConst, Float};
use serde::{Deserialize, Serialize};


#[allow(clippy::len_without_is_empty)]
pub trait WindowFunction<T> {
    fn len(&self) -> usize;
    fn coef(&self, index: usize) -> T;

    fn to_array(&self) -> Array1<T> {
        (0..self.len()).map(|i| self.coef(i)).collect()
    }

    fn with_len(self, len: usize) -> Self
    where
        Self: Sized;
}


#[derive(Debug, Clone)]
pub struct Rectangular<T> {
    len: usize,
    _p: std::marker::PhantomData<*const T>,
}

impl<T> Rectangular<T> {
    pub fn new(len: usize) -> Self {
        Rectangular { len, _p: std::marker::PhantomData }
    }
}

impl<T: Float> WindowFunction<T> for Rectangular<T> {
    fn len(&self) -> usize {
        self.len
    }

    fn coef(&self, _index: usize) -> T {
        T::one()
    }

    fn with_len(self, len: usize) -> Self {
        Rectangular::new(len)
    }
}


/// Raised cosine `a0 - a1 cos(2 pi n / (N - 1))`, covers Hann and Hamming.
#[derive(Debug, Clone)]
pub struct GenericHann<T> {
    len: usize,
    a0: T,
    a1: T,
}

impl<T> GenericHann<T> {
    pub fn new(len: usize, a0: T, a1: T) -> Self {
        GenericHann { len, a0, a1 }
    }
}

impl<T: Float + FloatConst> WindowFunction<T> for GenericHann<T> {
    fn len(&self) -> usize {
        self.len
    }

    fn coef(&self, index: usize) -> T {
        if self.len == 1 {
            return T::one();
        }

        let two_pi = T::from(2.0).unwrap() * T::PI();
        let n = T::from(self.len - 1).unwrap();
        let i = T::from(index).unwrap();

        self.a0 - self.a1 * T::cos(two_pi * i / n)
    }

    fn with_len(self, len: usize) -> Self {
        GenericHann { len, a0: self.a0, a1: self.a1 }
    }
}


#[derive(Debug, Clone)]
pub struct Blackman<T> {
    len: usize,
    a0: T,
    a1: T,
    a2: T,
}

impl<T> Blackman<T> {
    pub fn new(len: usize, a0: T, a1: T, a2: T) -> Self {
        Blackman { len, a0, a1, a2 }
    }
}

impl<T: Float + FloatConst> WindowFunction<T> for Blackman<T> {
    fn len(&self) -> usize {
        self.len
    }

    fn coef(&self, index: usize) -> T {
        if self.len == 1 {
            return T::one();
        }

        let two_pi = T::from(2.0).unwrap() * T::PI();
        let four_pi = T::from(4.0).unwrap() * T::PI();
        let n = T::from(self.len - 1).unwrap();
        let i = T::from(index).unwrap();

        self.a0 - self.a1 * T::cos(two_pi * i / n) + self.a2 * T::cos(four_pi * i / n)
    }

    fn with_len(self, len: usize) -> Self {
        Blackman { len, a0: self.a0, a1: self.a1, a2: self.a2 }
    }
}


pub fn rectangular<T: Float>(len: usize) -> Rectangular<T> {
    Rectangular::new(len)
}

pub fn hann<T: Float>(len: usize) -> GenericHann<T> {
    let a0 = T::from(0.5).unwrap();
    let a1 = T::one() - a0;

    GenericHann::new(len, a0, a1)
}

pub fn hamming<T: Float>(len: usize) -> GenericHann<T> {
    let a0 = T::from(25.0 / 46.0).unwrap();
    let a1 = T::one() - a0;

    GenericHann::new(len, a0, a1)
}

pub fn blackman<T: Float>(len: usize) -> Blackman<T> {
    let a0 = T::from(0.42).unwrap();
    let a1 = T::from(0.50).unwrap();
    let a2 = T::from(0.08).unwrap();

    Blackman::new(len, a0, a1, a2)
}


/// Periodic variant of a symmetric window: computed with one extra sample
/// which is then dropped.
#[derive(Debug, Clone)]
pub struct Periodic<W> {
    base: W,
}

impl<W> Periodic<W> {
    pub fn new(base: W) -> Self {
        Periodic { base }
    }
}

impl<W, T> WindowFunction<T> for Periodic<W>
where
    W: WindowFunction<T>,
{
    fn len(&self) -> usize {
        self.base.len() - 1
    }

    fn coef(&self, index: usize) -> T {
        self.base.coef(index)
    }

    fn with_len(self, len: usize) -> Self {
        Periodic::new(self.base.with_len(len + 1))
    }
}

pub fn periodic<W, T>(base: W) -> Periodic<W>
where
    W: WindowFunction<T>,
{
    let len = base.len() + 1;
    Periodic::new(base.with_len(len))
}


#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum WindowType {
    Rectangular,
    Hann,
    Hamming,
    Blackman,
}

impl Default for WindowType {
    fn default() -> Self {
        WindowType::Hann
    }
}

/// Window selection as found in parameter files.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Window {
    #[serde(default, rename = "type")]
    pub ty: WindowType,

    #[serde(default)]
    pub periodic: bool,
}

impl Window {
    pub fn build<'a, T>(&self, len: usize) -> Box<dyn WindowFunction<T> + 'a>
    where
        T: Float + FloatConst + 'a,
    {
        if self.periodic {
            match self.ty {
                WindowType::Rectangular => Box::new(periodic(rectangular(len))),
                WindowType::Hann        => Box::new(periodic(hann(len))),
                WindowType::Hamming     => Box::new(periodic(hamming(len))),
                WindowType::Blackman    => Box::new(periodic(blackman(len))),
            }
        } else {
            match self.ty {
                WindowType::Rectangular => Box::new(rectangular(len)),
                WindowType::Hann        => Box::new(hann(len)),
                WindowType::Hamming     => Box::new(hamming(len)),
                WindowType::Blackman    => Box::new(blackman(len)),
            }
        }
    }
}
