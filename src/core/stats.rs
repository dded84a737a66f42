/// Counters from a completed build
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildStats {
    pub document_count: u32,
    pub batch_count: usize,
    pub term_count: usize,
}
