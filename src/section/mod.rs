pub mod components;
pub mod factory;
pub mod traits;

pub use components::*;
pub use factory::*;
pub use traits::*;
