/// Order service interface
pub mod order;
/// Portfolio service interface
pub mod portfolio;
/// Product service interface
pub mod product;
/// Session service interface
pub mod session;
