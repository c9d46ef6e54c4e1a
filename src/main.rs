//! Learn Unknown - Self-Teaching Fallback Skill
//!
//! Records utterances the assistant could not answer and turns taught
//! answers into new intents.

use anyhow::Result;

fn main() -> Result<()> {
    // Initialize logging (WARN level by default, use RUST_LOG=info for debug)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    // Run CLI
    learn_unknown::cli::run()
}
