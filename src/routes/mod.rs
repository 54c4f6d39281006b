pub mod explain;
pub mod generate;
pub mod health;
pub mod openapi;
