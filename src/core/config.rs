use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct BuilderConfig {
    pub output_prefix: PathBuf,  // Base name for final and scratch files
    pub batch_size: usize,       // Records per batch; the memory knob
    pub threads: usize,          // Total budget: 1 dispatcher + workers
}

impl Default for BuilderConfig {
    fn default() -> Self {
        BuilderConfig {
            output_prefix: PathBuf::from("./fwd"),
            batch_size: 10_000,
            threads: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(2)
                .max(2),
        }
    }
}
