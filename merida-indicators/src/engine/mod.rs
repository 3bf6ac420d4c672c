pub mod correlation;
pub mod coverage;
pub mod wait_time;
