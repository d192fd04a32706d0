//! Backend commands queued from UI to backend worker.

pub enum BackendCommand {
    LoadBatch {
        generation: u64,
        start_page: u32,
        desired_count: usize,
    },
    FetchPortrait {
        url: String,
    },
}
