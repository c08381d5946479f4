/// Order service implementation for the client
pub mod order_service;
/// Portfolio service implementation for the client
pub mod portfolio_service;
/// Product service implementation for the client
pub mod product_service;
/// Session service implementation for the client
pub mod session_service;

pub use crate::application::interfaces::order::OrderService;
pub use crate::application::interfaces::portfolio::PortfolioService;
pub use crate::application::interfaces::product::ProductService;
pub use crate::application::interfaces::session::SessionService;
