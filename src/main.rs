use std::io::Read;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use fake_news_detector::{
    app,
    config::{Cli, Command},
    healthcheck_with_port,
    observability::init_tracing,
    training,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Healthcheck runs before tracing so the probe output stays terse.
    if let Command::Healthcheck(config) = &cli.command {
        match healthcheck_with_port(config.port).await {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("Healthcheck failed: {e}");
                std::process::exit(1)
            }
        }
    }

    init_tracing(cli.log_format);
    install_panic_hook();

    match cli.command {
        Command::Train(config) => {
            let report = tokio::task::spawn_blocking(move || training::run(&config))
                .await
                .context("training task panicked")?
                .context("training failed")?;
            info!(
                accuracy = report.evaluation.accuracy,
                vocabulary_size = report.vocabulary_size,
                "Training finished"
            );
            println!("Accuracy: {:.4}", report.evaluation.accuracy);
        }
        Command::Serve(config) => {
            app::run_server(&config)
                .await
                .context("server exited with error")?;
        }
        Command::Predict(config) => {
            let text = match &config.text {
                Some(text) => text.clone(),
                None => {
                    let mut buffer = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buffer)
                        .context("failed to read text from stdin")?;
                    buffer
                }
            };
            let verdict = app::run_predict(&config, &text).with_context(|| {
                format!("failed to classify with artifacts in {}", config.model_dir.display())
            })?;
            println!(
                "{} ({:.2}% confidence; p(real)={:.4}, p(fake)={:.4})",
                verdict.label,
                verdict.confidence_pct,
                verdict.probabilities.real(),
                verdict.probabilities.fake()
            );
        }
        Command::Healthcheck(_) => unreachable!("handled before tracing initialization"),
    }

    Ok(())
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        let thread = std::thread::current();
        let thread_name = thread.name().unwrap_or("unnamed");
        let message = panic_info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| {
                panic_info
                    .payload()
                    .downcast_ref::<String>()
                    .map(String::as_str)
            })
            .unwrap_or("unknown panic payload");

        if let Some(location) = panic_info.location() {
            error!(
                thread = thread_name,
                file = location.file(),
                line = location.line(),
                message,
                "panic occurred"
            );
        } else {
            error!(thread = thread_name, message, "panic occurred");
        }
    }));
}
