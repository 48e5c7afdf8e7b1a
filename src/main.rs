use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    medtracker_lib::init_tracing();

    match medtracker_lib::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
