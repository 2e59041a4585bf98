//! Diagnostic text formatting
//!
//! Produces the nested bracketed representation: `[a b; c d]`-style blocks
//! for matrices, `cat(r,...)` wrapping for rank three and above. This is a
//! human-readable diagnostic format, not a stable wire format.

use super::TensorBase;
use crate::extents::{Extents, Shape};
use crate::storage::Storage;
use std::fmt;

fn print_block<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    r: usize,
    offset: usize,
    data: &[T],
    strides: &[usize],
    dims: &[usize],
) -> fmt::Result {
    if r < 2 {
        write!(f, "[")?;
        for row in 0..dims[0] {
            for col in 0..dims[1] {
                write!(f, "{} ", data[offset + row * strides[0] + col * strides[1]])?;
            }
            if row + 1 < dims[0] {
                writeln!(f, ";")?;
            }
        }
        write!(f, "]")
    } else {
        writeln!(f, "cat({},...", r + 1)?;
        for d in 0..dims[r] {
            print_block(f, r - 1, offset + d * strides[r], data, strides, dims)?;
            if d + 1 < dims[r] {
                writeln!(f, ",...")?;
            }
        }
        write!(f, ")")
    }
}

impl<T, E, S> fmt::Display for TensorBase<T, E, S>
where
    T: fmt::Display,
    E: Extents,
    S: Storage<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dims = self.extents.dims();
        let data = self.storage.as_slice();

        if data.is_empty() {
            return write!(f, "[]");
        }

        if self.extents.is_scalar() {
            return write!(f, "[{}]", data[0]);
        }

        if self.extents.is_vector() {
            // column vectors separate with ';', row vectors with ','
            let cat = if dims[0] > *dims.get(1).unwrap_or(&1) {
                ';'
            } else {
                ','
            };
            write!(f, "[")?;
            for (i, v) in data.iter().enumerate() {
                if i > 0 {
                    write!(f, "{} ", cat)?;
                }
                write!(f, "{}", v)?;
            }
            return write!(f, "]");
        }

        // unit axes carry no structure; print the squeezed block
        let squeezed = self.extents.squeeze();
        let mut strides: Shape = Shape::new();
        for (&d, &w) in dims.iter().zip(self.strides.as_slice()) {
            if dims.len() <= 2 || d != 1 {
                strides.push(w);
            }
        }
        while strides.len() < squeezed.rank() {
            strides.push(0);
        }
        print_block(f, squeezed.rank() - 1, 0, data, &strides, squeezed.dims())
    }
}

#[cfg(test)]
mod tests {
    use crate::layout::Layout;
    use crate::tensor::Tensor;

    #[test]
    fn test_scalar_display() {
        let t = Tensor::scalar(7);
        assert_eq!(t.to_string(), "[7]");
    }

    #[test]
    fn test_row_and_column_vector_display() {
        let row = Tensor::from_vec(vec![1, 2, 3], &[1, 3]).unwrap();
        assert_eq!(row.to_string(), "[1, 2, 3]");

        let col = Tensor::from_vec(vec![1, 2, 3], &[3, 1]).unwrap();
        assert_eq!(col.to_string(), "[1; 2; 3]");
    }

    #[test]
    fn test_matrix_display_is_row_major_visual() {
        // first-order buffer [1,2,3,4] for {2,2} is [[1,3],[2,4]]
        let t = Tensor::from_vec(vec![1, 2, 3, 4], &[2, 2]).unwrap();
        assert_eq!(t.to_string(), "[1 3 ;\n2 4 ]");

        let t = Tensor::from_vec_with_layout(vec![1, 2, 3, 4], &[2, 2], Layout::LastOrder).unwrap();
        assert_eq!(t.to_string(), "[1 2 ;\n3 4 ]");
    }

    #[test]
    fn test_trailing_unit_axes_print_as_matrix() {
        let t = Tensor::from_vec(vec![1, 2, 3, 4, 5, 6], &[2, 3, 1]).unwrap();
        assert_eq!(t.to_string(), "[1 3 5 ;\n2 4 6 ]");
    }

    #[test]
    fn test_interior_unit_axis_is_squeezed() {
        let t = Tensor::from_vec(vec![1, 2, 3, 4], &[2, 1, 2]).unwrap();
        assert_eq!(t.to_string(), "[1 3 ;\n2 4 ]");
    }

    #[test]
    fn test_rank3_display_uses_cat() {
        let t = Tensor::<i32>::zeros(&[2, 2, 2]).unwrap();
        let s = t.to_string();
        assert!(s.starts_with("cat(3,..."));
        assert!(s.ends_with(')'));
    }
}
