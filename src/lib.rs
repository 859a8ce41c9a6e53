pub mod calendar;
pub mod config;
pub mod error;
pub mod fetch;
pub mod months;
pub mod output;
pub mod run;

pub use error::CalendarError;
