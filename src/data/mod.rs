mod loader;
mod parser;
mod sample;
mod sampler;

pub use loader::{LoadError, load_bank, save_bank_json};
pub use parser::{Block, ParseState, parse_html};
pub use sample::sample_bank;
pub use sampler::{sample_questions, sample_questions_with_rng};
