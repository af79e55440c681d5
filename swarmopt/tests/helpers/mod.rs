
pub mod objectives;
pub mod utils;
