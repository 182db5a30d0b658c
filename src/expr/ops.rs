//! `std::ops` overloads that build expression nodes.
//!
//! `&a + &b` and `&a * &b` build [`CwiseBinary`] and [`Product`] nodes over borrowed
//! containers; the nodes themselves compose further by value. Scalar scaling goes through
//! [`ExprExt::scale`](super::ExprExt::scale).

use std::ops::{Add, Mul, Neg, Sub};

use crate::core::shape::Dimension;
use crate::core::traits::{Expr, Scalar};
use crate::expr::cwise::{BinaryOp, CwiseBinary, CwiseUnary, Difference, Negate, Sum, UnaryOp};
use crate::expr::{Lazy, Product, Transpose};
use crate::matrix::{Matrix, Shared};

macro_rules! impl_container_ops {
    ($container:ident) => {
        impl<'a, T, R, C, Rhs> Add<Rhs> for &'a $container<T, R, C>
        where
            T: Scalar,
            R: Dimension,
            C: Dimension,
            Rhs: Expr<Scalar = T>,
        {
            type Output = CwiseBinary<Sum, &'a $container<T, R, C>, Rhs>;
            fn add(self, rhs: Rhs) -> Self::Output {
                CwiseBinary::new(Sum, self, rhs)
            }
        }

        impl<'a, T, R, C, Rhs> Sub<Rhs> for &'a $container<T, R, C>
        where
            T: Scalar,
            R: Dimension,
            C: Dimension,
            Rhs: Expr<Scalar = T>,
        {
            type Output = CwiseBinary<Difference, &'a $container<T, R, C>, Rhs>;
            fn sub(self, rhs: Rhs) -> Self::Output {
                CwiseBinary::new(Difference, self, rhs)
            }
        }

        impl<'a, T, R, C, Rhs> Mul<Rhs> for &'a $container<T, R, C>
        where
            T: Scalar,
            R: Dimension,
            C: Dimension,
            Rhs: Expr<Scalar = T>,
        {
            type Output = Product<&'a $container<T, R, C>, Rhs>;
            fn mul(self, rhs: Rhs) -> Self::Output {
                Product::new(self, rhs)
            }
        }

        impl<'a, T, R, C> Neg for &'a $container<T, R, C>
        where
            T: Scalar,
            R: Dimension,
            C: Dimension,
        {
            type Output = CwiseUnary<Negate, &'a $container<T, R, C>>;
            fn neg(self) -> Self::Output {
                CwiseUnary::new(Negate, self)
            }
        }
    };
}

impl_container_ops!(Matrix);
impl_container_ops!(Shared);

macro_rules! impl_node_ops {
    (impl[$($gen:tt)*] $node:ty where [$($bound:tt)*]) => {
        impl<$($gen)*, Rhs> Add<Rhs> for $node
        where
            $($bound)*
            Rhs: Expr<Scalar = <$node as Expr>::Scalar>,
        {
            type Output = CwiseBinary<Sum, $node, Rhs>;
            fn add(self, rhs: Rhs) -> Self::Output {
                CwiseBinary::new(Sum, self, rhs)
            }
        }

        impl<$($gen)*, Rhs> Sub<Rhs> for $node
        where
            $($bound)*
            Rhs: Expr<Scalar = <$node as Expr>::Scalar>,
        {
            type Output = CwiseBinary<Difference, $node, Rhs>;
            fn sub(self, rhs: Rhs) -> Self::Output {
                CwiseBinary::new(Difference, self, rhs)
            }
        }

        impl<$($gen)*, Rhs> Mul<Rhs> for $node
        where
            $($bound)*
            Rhs: Expr<Scalar = <$node as Expr>::Scalar>,
        {
            type Output = Product<$node, Rhs>;
            fn mul(self, rhs: Rhs) -> Self::Output {
                Product::new(self, rhs)
            }
        }

        impl<$($gen)*> Neg for $node
        where
            $($bound)*
        {
            type Output = CwiseUnary<Negate, $node>;
            fn neg(self) -> Self::Output {
                CwiseUnary::new(Negate, self)
            }
        }
    };
}

impl_node_ops!(impl[E] Transpose<E> where [E: Expr,]);
impl_node_ops!(impl[E] Lazy<E> where [E: Expr,]);
impl_node_ops!(impl[Op, E] CwiseUnary<Op, E> where [E: Expr, Op: UnaryOp<E::Scalar>,]);
impl_node_ops!(
    impl[Op, L, R] CwiseBinary<Op, L, R>
    where [L: Expr, R: Expr<Scalar = L::Scalar>, Op: BinaryOp<L::Scalar>,]
);
impl_node_ops!(impl[L, R] Product<L, R> where [L: Expr, R: Expr<Scalar = L::Scalar>,]);
