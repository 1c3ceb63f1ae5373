use heap::{ClientConfig, TrackEvent, UserProperties};

#[tokio::main]
async fn main() -> heap::Result<()> {
    env_logger::init();

    let app_id = std::env::var("HEAP_APP_ID").unwrap_or_default();
    let client = ClientConfig::from_app_id(app_id).to_client()?;

    // Track a signup for a known user.
    let response = client
        .track(
            &TrackEvent::new("signup")
                .identity("user@example.com")
                .property("plan", "pro")
                .timestamp(chrono::Utc::now()),
        )
        .await?;
    println!("track: {}", response.status);

    let response = client
        .add_user_properties(&UserProperties::new("user@example.com").property("plan", "pro"))
        .await?;
    println!("add_user_properties: {}", response.status);

    Ok(())
}
