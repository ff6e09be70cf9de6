//! Lazy sequences built from a value function and an increment function.
//!
//! [`LambdaSeq`] describes a half-open range of positions `[first, last)`.
//! Nothing is stored per element: a [`Cursor`] evaluates the value function at
//! its current position when pulled and moves with the increment function.
//! Every call to [`LambdaSeq::iter`] starts a fresh traversal, so a sequence
//! can be walked any number of times with the same results.
//!
//! [`zip_lazy`] uses this to pair up N indexable sources at a shared index.

/// A source that can be read at an index without being consumed.
pub trait Indexed {
    type Item;

    /// Element at position `k`.
    ///
    /// # Panics
    /// Implementations panic if `k` is out of range.
    fn at(&self, k: usize) -> Self::Item;
}

impl<T: Copy> Indexed for &[T] {
    type Item = T;

    fn at(&self, k: usize) -> T {
        self[k]
    }
}

impl<T: Copy> Indexed for &Vec<T> {
    type Item = T;

    fn at(&self, k: usize) -> T {
        self[k]
    }
}

impl<T: Copy, const N: usize> Indexed for &[T; N] {
    type Item = T;

    fn at(&self, k: usize) -> T {
        self[k]
    }
}

/// A tuple of [`Indexed`] sources read together at one index.
pub trait Sources {
    type Item;

    fn gather(&self, k: usize) -> Self::Item;
}

macro_rules! impl_sources {
    ($($src:ident $idx:tt),+) => {
        impl<$($src: Indexed),+> Sources for ($($src,)+) {
            type Item = ($($src::Item,)+);

            fn gather(&self, k: usize) -> Self::Item {
                ($(self.$idx.at(k),)+)
            }
        }
    };
}

impl_sources!(A 0);
impl_sources!(A 0, B 1);
impl_sources!(A 0, B 1, C 2);
impl_sources!(A 0, B 1, C 2, D 3);
impl_sources!(A 0, B 1, C 2, D 3, E 4);
impl_sources!(A 0, B 1, C 2, D 3, E 4, F 5);

/// A restartable lazy sequence over positions `[first, last)`.
///
/// The increment function must reach `last` exactly; a cursor only stops when
/// its position compares equal to `last`.
pub struct LambdaSeq<V, I, P> {
    value: V,
    increment: I,
    first: P,
    last: P,
}

impl<V, I, P: Clone> LambdaSeq<V, I, P> {
    pub fn new(value: V, increment: I, first: P, last: P) -> Self {
        LambdaSeq {
            value,
            increment,
            first,
            last,
        }
    }

    /// Cursor at the first position.
    pub fn begin(&self) -> Cursor<'_, V, I, P> {
        Cursor {
            seq: self,
            position: self.first.clone(),
        }
    }

    /// Cursor at the end position. It never yields anything.
    pub fn end(&self) -> Cursor<'_, V, I, P> {
        Cursor {
            seq: self,
            position: self.last.clone(),
        }
    }

    /// Start a new traversal.
    pub fn iter(&self) -> Cursor<'_, V, I, P> {
        self.begin()
    }
}

impl<'a, V, I, P, T> IntoIterator for &'a LambdaSeq<V, I, P>
where
    V: Fn(&P) -> T,
    I: Fn(&P) -> P,
    P: Clone + PartialEq,
{
    type Item = T;
    type IntoIter = Cursor<'a, V, I, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A position within a [`LambdaSeq`].
///
/// Two cursors are equal when their positions are equal; the value function
/// is never consulted.
pub struct Cursor<'a, V, I, P> {
    seq: &'a LambdaSeq<V, I, P>,
    position: P,
}

impl<V, I, P> Cursor<'_, V, I, P> {
    pub fn position(&self) -> &P {
        &self.position
    }
}

impl<V, I, P: Clone> Clone for Cursor<'_, V, I, P> {
    fn clone(&self) -> Self {
        Cursor {
            seq: self.seq,
            position: self.position.clone(),
        }
    }
}

impl<V, I, P: PartialEq> PartialEq for Cursor<'_, V, I, P> {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl<V, I, P, T> Iterator for Cursor<'_, V, I, P>
where
    V: Fn(&P) -> T,
    I: Fn(&P) -> P,
    P: PartialEq,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.position == self.seq.last {
            return None;
        }
        let item = (self.seq.value)(&self.position);
        self.position = (self.seq.increment)(&self.position);
        Some(item)
    }
}

/// Pair `sources` element by element over indices `0..length`.
///
/// `length` bounds the traversal even when the sources are longer. Sources
/// shorter than `length` panic when the missing index is reached.
///
/// ```
/// use pmm_core::zip::zip_lazy;
///
/// let a = [1, 2, 3];
/// let b = [4, 5, 6];
/// let pairs: Vec<_> = zip_lazy(3, (&a, &b)).iter().collect();
/// assert_eq!(pairs, vec![(1, 4), (2, 5), (3, 6)]);
/// ```
pub fn zip_lazy<S: Sources>(
    length: usize,
    sources: S,
) -> LambdaSeq<impl Fn(&usize) -> S::Item, impl Fn(&usize) -> usize, usize> {
    LambdaSeq::new(
        move |k: &usize| sources.gather(*k),
        |k: &usize| k + 1,
        0,
        length,
    )
}
