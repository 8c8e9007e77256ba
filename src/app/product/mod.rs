//! 产品应用：只读目录上的查询、统计与（不落地的）写接口

pub mod catalog;
pub mod handler;
pub mod model;
pub mod query;
pub mod service;
pub mod validation;

pub use catalog::Catalog;
pub use model::Product;
pub use service::ProductService;
