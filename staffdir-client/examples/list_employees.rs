//! Minimal example: print every employee from a running backend.
//!
//! Run: API_BASE_URL=http://localhost:8080/employee cargo run --example list_employees

use staffdir_client::{ClientConfig, DirectoryClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = std::env::var("API_BASE_URL")
        .unwrap_or_else(|_| "http://localhost:8080/employee".into());

    let client = DirectoryClient::new(&ClientConfig::new(base_url));

    for employee in client.list_all().await? {
        println!(
            "{:<8} {:<24} {:<28} {}",
            employee.id.as_deref().unwrap_or("-"),
            employee.name,
            employee.email,
            employee.job_title,
        );
    }

    Ok(())
}
