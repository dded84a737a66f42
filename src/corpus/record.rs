/// A single corpus document, as handed to the batch workers.
///
/// Record sources only ever produce valid records; anything malformed is
/// skipped inside the reader and never reaches a worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRecord {
    pub trecid: String,   // Stable external document identifier
    pub content: String,  // Raw content; tokenization consumes it
    pub url: String,      // May be empty
}

impl DocumentRecord {
    pub fn new(trecid: String, content: String) -> Self {
        DocumentRecord {
            trecid,
            content,
            url: String::new(),
        }
    }

    pub fn with_url(trecid: String, content: String, url: String) -> Self {
        DocumentRecord {
            trecid,
            content,
            url,
        }
    }
}
