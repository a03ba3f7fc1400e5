// Application layer - Fetch cycle, presentation and polling
pub mod poller;
pub mod presenter;
pub mod sample_source;
