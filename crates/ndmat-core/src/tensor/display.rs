//! Text rendering of tensors
//!
//! Rank-2 tensors print as `[a,b;\n c,d];`. A rank-1 tensor prints as a
//! single row. Higher ranks print one rank-2 page per combination of the
//! trailing indices, each prefixed by `m(:,:,k,...) = `. Elements are
//! rendered through [`Element::fmt_element`], so reals show `+Inf`, `-Inf`
//! and `NaN` and complex values show `a + jb`. The formatter's width and
//! precision apply to every element.

use std::fmt;

use super::types::Tensor;
use crate::element::{Element, ElementDisplay};
use crate::sets::Subscript;

impl<T: Element> fmt::Display for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rank() {
            0 => f.write_str("[];"),
            1 => write_page(f, &self.data, 1, self.shape()[0], |k| k),
            2 => write_page(f, &self.data, self.shape()[0], self.shape()[1], |k| k),
            _ => {
                let (rows, columns) = (self.shape()[0], self.shape()[1]);
                let pages = Subscript::generate(&self.shape()[2..]);
                let column_stride = self.subscript.strides()[1];
                for page in 0..pages.cardinality() {
                    if page != 0 {
                        f.write_str("\n\n")?;
                    }
                    let trailing = pages.index_of(page).unwrap_or_default();
                    f.write_str("m(:,:")?;
                    for index in &trailing {
                        write!(f, ",{}", index)?;
                    }
                    f.write_str(") = \n\n")?;

                    // offset of element (0, 0, trailing...)
                    let base: usize = trailing
                        .iter()
                        .zip(&self.subscript.strides()[2..])
                        .map(|(&i, &s)| i * s)
                        .sum();
                    let row_stride = self.subscript.strides()[0];
                    write_page(f, &self.data, rows, columns, |k| {
                        base + (k / columns) * row_stride + (k % columns) * column_stride
                    })?;
                }
                Ok(())
            }
        }
    }
}

fn write_page<T, F>(
    f: &mut fmt::Formatter<'_>,
    data: &[T],
    rows: usize,
    columns: usize,
    offset: F,
) -> fmt::Result
where
    T: Element,
    F: Fn(usize) -> usize,
{
    f.write_str("[")?;
    for i in 0..rows {
        if i != 0 {
            f.write_str(";\n ")?;
        }
        for j in 0..columns {
            if j != 0 {
                f.write_str(",")?;
            }
            write_element(f, &data[offset(i * columns + j)])?;
        }
    }
    f.write_str("];")
}

fn write_element<T: Element>(f: &mut fmt::Formatter<'_>, value: &T) -> fmt::Result {
    let text = match f.precision() {
        Some(precision) => format!("{:.*}", precision, ElementDisplay(value)),
        None => ElementDisplay(value).to_string(),
    };
    match f.width() {
        Some(width) => write!(f, "{:>width$}", text, width = width),
        None => f.write_str(&text),
    }
}

#[cfg(test)]
mod tests {
    use crate::Tensor;

    #[test]
    fn test_matrix_format() {
        let t = Tensor::from_vec(vec![1, 2, 3, 4], &[2, 2]).unwrap();
        assert_eq!(t.to_string(), "[1,2;\n 3,4];");
    }

    #[test]
    fn test_vector_and_empty_format() {
        let v = Tensor::from_vec(vec![true, false], &[2]).unwrap();
        assert_eq!(v.to_string(), "[true,false];");
        assert_eq!(Tensor::<f64>::empty().to_string(), "[];");
    }

    #[test]
    fn test_special_values_and_width() {
        let t = Tensor::from_vec(vec![f64::INFINITY, f64::NAN, -1.5], &[1, 3]).unwrap();
        assert_eq!(t.to_string(), "[+Inf,NaN,-1.5];");
        assert_eq!(format!("{:5.1}", t), "[ +Inf,  NaN, -1.5];");
    }

    #[test]
    fn test_rank_three_pages() {
        let t = Tensor::from_vec((0..8).collect::<Vec<i32>>(), &[2, 2, 2]).unwrap();
        let expected = "m(:,:,0) = \n\n[0,2;\n 4,6];\n\nm(:,:,1) = \n\n[1,3;\n 5,7];";
        assert_eq!(t.to_string(), expected);
    }
}
