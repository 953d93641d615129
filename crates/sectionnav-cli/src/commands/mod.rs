pub mod replay;
pub mod routes;
