//! Policy without a deep learning backend.
//!
//! A trained actor network is exported as an [`Mlp`] serialized with bincode
//! and run with plain `f32` arithmetic. This is what the evaluation binary
//! uses to replay a trained walker.
mod mat;
mod mlp;
mod policy;
pub use mat::Mat;
pub use mlp::Mlp;
pub use policy::MlpPolicy;
