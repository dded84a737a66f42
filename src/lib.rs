pub mod core;
pub mod corpus;
pub mod analysis;
pub mod postings;
pub mod builder;

/*
┌─────────────────────────── FINDEX PIPELINE ────────────────────────────┐
│                                                                         │
│  RecordReader ──> ForwardIndexBuilder (dispatcher thread)               │
│       │                  │ cuts batches of batch_size records           │
│       │                  │ bounded channel: ≤ 2·(threads−1) in flight   │
│       │                  ▼                                              │
│       │           batch workers (threads − 1)                          │
│       │             ContentTokenizer ─> TermNormalizer ─> local ids     │
│       │             emit  <prefix>.batch.<n>            (postings)      │
│       │                   <prefix>.batch.<n>.documents / .urls / .terms │
│       │                  ▼                                              │
│       │           merge phase (dispatcher thread, after join)           │
│       │             collect_terms: span-stack merge of sorted runs      │
│       │             reverse_mapping + in-place postings remap           │
│       │             concatenate batches behind a fresh header           │
│       │             remove scratch files                                │
│       ▼                  ▼                                              │
│  final files:  <prefix>  <prefix>.documents  <prefix>.urls              │
│                <prefix>.terms (sorted, unique; line index = term id)    │
│                                                                         │
└─────────────────────────────────────────────────────────────────────────┘
*/
