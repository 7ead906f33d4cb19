pub mod gemini;
pub mod media;
pub mod openai;

pub use gemini::GeminiQuizAdapter;
pub use media::load_media;
pub use openai::OpenAiQuizAdapter;
