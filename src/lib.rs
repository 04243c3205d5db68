pub mod cgpa;
pub mod config;
pub mod form;
pub mod output;
pub mod scheme;
pub mod session;
