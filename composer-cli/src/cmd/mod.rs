pub mod catalog;
pub mod config;
pub mod execute;
pub mod history;
pub mod progress;
pub mod run;
