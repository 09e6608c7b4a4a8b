pub mod alert;
pub mod config;
pub mod query;
pub mod response;
pub mod risk;
pub mod vault;

pub use alert::*;
pub use config::*;
pub use query::*;
pub use response::*;
pub use risk::*;
pub use vault::*;
