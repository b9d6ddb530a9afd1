pub mod detection;
pub mod impl_fake;
pub mod impl_tract_onnx;
pub mod interface;
pub mod models;
pub mod tract;
