//! Simple SDK Example
//!
//! Logs in, searches for tutors, and opens the first profile found.
//!
//! # Usage
//!
//! Point the client at a running marketplace backend, then:
//!
//! ```bash
//! cargo run --example simple
//! ```

use promarket_sdk::protocol::types::SearchParams;
use promarket_sdk::ApiClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Promarket SDK - Simple Example");
    println!("==============================\n");

    let client = ApiClient::new("http://127.0.0.1:8080/api")?;

    // 1. Log in (the seed data ships a user1/pass account)
    println!("1. Logging in...");
    let login = client.login("user1", "pass").await?;
    println!("   ✓ Logged in as user {}\n", login.user_id);

    // 2. Search for tutors
    println!("2. Searching for tutors...");
    let page = client
        .search(SearchParams {
            service_type: "Tutor".to_string(),
            ..Default::default()
        })
        .await?;

    println!(
        "   ✓ {} providers found (page {} of {}):",
        page.total_users, page.page, page.total_pages
    );
    for card in &page.users {
        println!(
            "     - #{} {} | {} years | {} rub",
            card.id, card.name, card.experience, card.price
        );
    }
    println!();

    // 3. View the first profile in full
    if let Some(card) = page.users.first() {
        println!("3. Opening profile #{}...", card.id);
        let profile = client.get_profile(card.id).await?;
        println!("   ✓ {} ({})", profile.name, profile.service_type);
        if let Some(about) = &profile.about {
            println!("     {}", about);
        }
        println!();
    }

    // 4. Log out
    println!("4. Logging out...");
    client.logout().await?;
    println!("   ✓ Session ended");

    println!("\n✓ Example completed successfully!");

    Ok(())
}
