pub mod jobs;
pub mod probes;
pub mod root;
pub mod tags;
