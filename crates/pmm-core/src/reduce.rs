//! Dot-product style reductions over two indexable sources.
//!
//! Both entry points compute `sum over k in 0..length of combine(row[k], col[k])`,
//! folding with `+` from zero. [`dot_fused`] walks the indices directly,
//! [`dot_zipped`] reduces a [`zip_lazy`] sequence. They are interchangeable.

use crate::matrix::Element;
use crate::zip::{zip_lazy, Indexed};

/// Per-pair combine step of a reduction: two elements in, one scalar out.
pub trait Combine<L, R> {
    fn combine(&self, l: L, r: R) -> Element;
}

/// `l * r`, the combine step of a matrix product.
#[derive(Debug, Clone, Copy, Default)]
pub struct Multiply;

/// `l + r`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Add;

impl<L, R> Combine<L, R> for Multiply
where
    L: Into<Element>,
    R: Into<Element>,
{
    fn combine(&self, l: L, r: R) -> Element {
        let (l, r): (Element, Element) = (l.into(), r.into());
        l * r
    }
}

impl<L, R> Combine<L, R> for Add
where
    L: Into<Element>,
    R: Into<Element>,
{
    fn combine(&self, l: L, r: R) -> Element {
        let (l, r): (Element, Element) = (l.into(), r.into());
        l + r
    }
}

impl<L, R> Combine<L, R> for fn(L, R) -> Element {
    fn combine(&self, l: L, r: R) -> Element {
        self(l, r)
    }
}

/// Fused traverse-and-reduce over `row` and `col`.
///
/// Overflow of the accumulator is not checked beyond what `i64` arithmetic
/// does in the current build profile.
pub fn dot_fused<A, B, C>(row: A, col: B, length: usize, combine: &C) -> Element
where
    A: Indexed,
    B: Indexed,
    C: Combine<A::Item, B::Item> + ?Sized,
{
    let mut sum: Element = 0;
    for k in 0..length {
        sum += combine.combine(row.at(k), col.at(k));
    }
    sum
}

/// The same reduction as [`dot_fused`], expressed as a fold over a lazy zip
/// of the two sources.
pub fn dot_zipped<A, B, C>(row: A, col: B, length: usize, combine: &C) -> Element
where
    A: Indexed,
    B: Indexed,
    C: Combine<A::Item, B::Item> + ?Sized,
{
    zip_lazy(length, (row, col))
        .iter()
        .fold(0, |sum, (a, b)| sum + combine.combine(a, b))
}
