//! Matrix module: owned and shared dense containers.

pub mod dense;
pub use dense::{
    DMatrix, DVector, Matrix, Matrix2, Matrix3, Matrix4, RowDVector, SMatrix, SVector, Vector2,
    Vector3, Vector4,
};
pub mod selfadjoint;
pub use selfadjoint::{Full, Lower, OperatorView, SelfAdjointView, Triangle, UpLo, Upper};
pub mod shared;
pub use shared::Shared;
