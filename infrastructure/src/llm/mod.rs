//! Language model adapters

mod openai_compatible;

pub use openai_compatible::OpenAiCompatibleModel;
