pub mod config;
pub mod github;
pub mod issue;
pub mod output;
pub mod run;
pub mod storage;
