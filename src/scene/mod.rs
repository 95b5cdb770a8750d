//! 场景图边界
//!
//! 渲染器之外控制器唯一需要的场景对象：角色模型的变换和骨骼。

pub mod model;

pub use model::{Model, ModelData};
