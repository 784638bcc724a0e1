pub mod activity;
pub mod samples;
pub mod user;
