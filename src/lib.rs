pub mod api;
pub mod config;
pub mod net;
pub mod route;
pub mod topo;

#[cfg(test)]
mod test;
