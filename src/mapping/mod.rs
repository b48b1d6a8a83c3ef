// Column detection: which spreadsheet column holds which hierarchy stage

pub mod mapper;

pub use mapper::*;
