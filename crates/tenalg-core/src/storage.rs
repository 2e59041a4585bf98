//! Rebindable contiguous storage for tensor elements
//!
//! A tensor owns exactly one storage buffer whose length always equals the
//! product of its extents. Dynamic tensors use the growable [`VecStorage`];
//! fully static tensors use the in-place [`ArrayStorage`].

/// Contiguous element buffer
pub trait Storage<T> {
    fn as_slice(&self) -> &[T];
    fn as_mut_slice(&mut self) -> &mut [T];

    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

/// Storage that can change length when the owning tensor's extents change
pub trait ResizableStorage<T>: Storage<T> {
    fn from_elem(len: usize, value: T) -> Self;
    fn from_vec(data: Vec<T>) -> Self;

    /// Grows or shrinks to `len`, filling new slots with `value`
    fn resize(&mut self, len: usize, value: T);
}

/// Heap-allocated, growable storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VecStorage<T> {
    data: Vec<T>,
}

// manual impl: an empty buffer needs no `T: Default`
impl<T> Default for VecStorage<T> {
    fn default() -> Self {
        Self { data: Vec::new() }
    }
}

impl<T> Storage<T> for VecStorage<T> {
    fn as_slice(&self) -> &[T] {
        &self.data
    }

    fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T: Clone> ResizableStorage<T> for VecStorage<T> {
    fn from_elem(len: usize, value: T) -> Self {
        Self {
            data: vec![value; len],
        }
    }

    fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    fn resize(&mut self, len: usize, value: T) {
        self.data.resize(len, value);
    }
}

impl<T> VecStorage<T> {
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

/// Fixed-capacity in-place storage for fully static tensors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayStorage<T, const N: usize> {
    data: [T; N],
}

impl<T, const N: usize> ArrayStorage<T, N> {
    pub fn new(data: [T; N]) -> Self {
        Self { data }
    }

    pub fn from_elem(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            data: std::array::from_fn(|_| value.clone()),
        }
    }
}

impl<T, const N: usize> Storage<T> for ArrayStorage<T, N> {
    fn as_slice(&self) -> &[T] {
        &self.data
    }

    fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    fn len(&self) -> usize {
        N
    }

    fn is_empty(&self) -> bool {
        N == 0
    }
}
