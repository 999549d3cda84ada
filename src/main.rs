mod telemetry;

use murmur_core::{Application, TracingAlarmPresenter};
use murmur_infra::setup_context;
use std::sync::Arc;
use telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("murmur".into(), "info".into());
    init_subscriber(subscriber);

    let context = setup_context().await;

    let app = Application::new(context, Arc::new(TracingAlarmPresenter)).await;

    tokio::signal::ctrl_c().await?;
    app.shutdown();
    Ok(())
}
