pub mod job_tags;
pub mod jobs;
pub mod tags;
