pub mod collect;
pub mod config;
pub mod configure;
pub mod modules;
