//! Shape descriptors shared by every expression node.
//!
//! A dimension is either known when the type is defined (`Dim::Fixed`) or resolved at run
//! time (`Dim::Dynamic`). Expression types carry their dimensions at the type level through
//! [`Dimension`] (`Const<N>` or `Dyn`), and the assignment engine reads the derived [`Shape`]
//! in `const` context only, so a dynamic extent can never leak into an unrolling decision.

use std::fmt::Debug;

/// A single extent: fixed at type-definition time, or dynamic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dim {
    Fixed(usize),
    Dynamic,
}

impl Dim {
    pub const fn is_dynamic(self) -> bool {
        matches!(self, Dim::Dynamic)
    }

    /// The fixed extent, if any.
    pub const fn fixed(self) -> Option<usize> {
        match self {
            Dim::Fixed(n) => Some(n),
            Dim::Dynamic => None,
        }
    }

    /// `true` only if `self` is `Fixed(n)`.
    pub const fn is_fixed(self, n: usize) -> bool {
        match self {
            Dim::Fixed(m) => m == n,
            Dim::Dynamic => false,
        }
    }

    /// Product of two extents; dynamic if either factor is dynamic or the product overflows.
    pub const fn mul(self, other: Dim) -> Dim {
        match (self, other) {
            (Dim::Fixed(a), Dim::Fixed(b)) => match a.checked_mul(b) {
                Some(n) => Dim::Fixed(n),
                None => Dim::Dynamic,
            },
            _ => Dim::Dynamic,
        }
    }
}

/// Compile-time shape metadata of an expression type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub rows: Dim,
    pub cols: Dim,
    pub max_rows: Dim,
    pub max_cols: Dim,
}

impl Shape {
    /// Shape whose upper bounds equal its compile-time extents.
    pub const fn new(rows: Dim, cols: Dim) -> Self {
        Self { rows, cols, max_rows: rows, max_cols: cols }
    }

    pub const fn with_max(rows: Dim, cols: Dim, max_rows: Dim, max_cols: Dim) -> Self {
        Self { rows, cols, max_rows, max_cols }
    }

    /// `rows * cols`, or `Dynamic` if either factor is dynamic.
    pub const fn size(&self) -> Dim {
        self.rows.mul(self.cols)
    }

    pub const fn max_size(&self) -> Dim {
        self.max_rows.mul(self.max_cols)
    }

    /// Row or column vector at compile time.
    pub const fn is_vector(&self) -> bool {
        self.rows.is_fixed(1) || self.cols.is_fixed(1)
    }
}

/// Type-level dimension: [`Const<N>`] for fixed extents, [`Dyn`] for run-time ones.
pub trait Dimension: Copy + Debug + Eq + 'static {
    const DIM: Dim;

    /// The extent this value stands for at run time.
    fn value(&self) -> usize;

    /// Build the dimension for a run-time extent. Panics if a fixed dimension is asked to
    /// represent any other extent.
    fn from_usize(n: usize) -> Self;
}

/// A dimension fixed to `N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Const<const N: usize>;

impl<const N: usize> Dimension for Const<N> {
    const DIM: Dim = Dim::Fixed(N);

    #[inline(always)]
    fn value(&self) -> usize {
        N
    }

    fn from_usize(n: usize) -> Self {
        assert_eq!(n, N, "fixed dimension {} cannot hold extent {}", N, n);
        Const
    }
}

/// A dimension known only at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dyn(pub usize);

impl Dimension for Dyn {
    const DIM: Dim = Dim::Dynamic;

    #[inline(always)]
    fn value(&self) -> usize {
        self.0
    }

    fn from_usize(n: usize) -> Self {
        Dyn(n)
    }
}
