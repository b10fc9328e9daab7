mod evaluation;
mod pipeline_ops;

pub use evaluation::Evaluation;
pub use pipeline_ops::{prepare, run, train_and_evaluate};
