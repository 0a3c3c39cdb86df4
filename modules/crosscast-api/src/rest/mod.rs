pub mod connect;
pub mod posts;
pub mod publish;
