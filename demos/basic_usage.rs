//! Lists properties and their open work orders.
//!
//! ```text
//! RESMAN_PARTNER_ID=... RESMAN_API_KEY=... RESMAN_ACCOUNT_ID=... \
//!     RUST_LOG=resman_client=debug cargo run --example basic_usage
//! ```

use std::process::ExitCode;

use resman_client::config::field;
use resman_client::resources::{WorkOrderQuery, WorkOrderStatus};
use resman_client::{ConfigError, ResManClient, ResManConfig};
use tracing::Level;
use tracing_subscriber::EnvFilter;

fn setup_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn settings_from_env() -> ResManConfig {
    let var = |name: &str| std::env::var(name).unwrap_or_default();
    ResManConfig::new(
        var("RESMAN_PARTNER_ID"),
        var("RESMAN_API_KEY"),
        var("RESMAN_ACCOUNT_ID"),
    )
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_tracing();

    let client = match ResManClient::new(&settings_from_env()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {e}");
            if let ConfigError::MissingRequired { field: missing, .. } = e {
                eprintln!("\nSet RESMAN_{} in the environment.", env_suffix(missing));
            }
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(account_id = %client.account_id(), "ResMan client ready");

    // Failures are already logged by the client.
    let Ok(properties) = client.properties().get_properties().await else {
        return ExitCode::from(2);
    };

    for property in &properties {
        println!("{} ({})", property.name, property.property_id);

        let query = WorkOrderQuery::new(property.property_id.as_str()).with_statuses([
            WorkOrderStatus::Submitted,
            WorkOrderStatus::NotStarted,
            WorkOrderStatus::InProgress,
        ]);
        if let Ok(orders) = client
            .work_orders()
            .get_work_orders(&query)
            .await
        {
            for order in orders {
                println!(
                    "  #{} [{:?}] {}",
                    order.number, order.status, order.description
                );
            }
        }
    }

    ExitCode::SUCCESS
}

fn env_suffix(missing: &str) -> &'static str {
    match missing {
        field::INTEGRATION_PARTNER_ID => "PARTNER_ID",
        field::API_KEY => "API_KEY",
        _ => "ACCOUNT_ID",
    }
}
