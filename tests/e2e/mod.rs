// End-to-end tests for the pronunciation batcher API
//
// Each test starts the real router on an ephemeral port. Provider calls go
// either to an in-process fake repository or to a local axum server standing
// in for the Gemini / OpenAI HTTP APIs, so no test touches the network.

mod test_health;
mod test_openai_provider;
mod test_previews;
