use anyhow::{Result, bail};
use pulseboard_application::Intent;
use pulseboard_core::auth::Credentials;

use crate::bootstrap::App;

pub async fn login(app: &App, username: String, password: String) -> Result<()> {
    let coordinator = &app.coordinator;
    coordinator
        .dispatch(Intent::Login(Credentials::new(username, password)))
        .await?;

    let session = coordinator.session().snapshot().await;
    if let Some(error) = session.error {
        bail!(error);
    }
    match session.user {
        Some(user) => println!("Signed in as {} ({})", user.name, user.role),
        None => println!("Signed in"),
    }
    Ok(())
}

pub async fn logout(app: &App) -> Result<()> {
    let coordinator = &app.coordinator;
    if !coordinator.restore_session().await {
        println!("Not logged in");
        return Ok(());
    }
    coordinator.dispatch(Intent::Logout).await?;
    println!("Signed out");
    Ok(())
}

pub async fn status(app: &App) -> Result<()> {
    let coordinator = &app.coordinator;
    coordinator.restore_session().await;

    let session = coordinator.session().snapshot().await;
    if !session.is_authenticated {
        println!("Not logged in");
        return Ok(());
    }

    match &session.user {
        Some(user) => {
            println!("User:   {} <{}>", user.name, user.email);
            println!("Role:   {}", user.role);
        }
        None => println!("User:   (unknown)"),
    }
    println!(
        "Unread: {} notification(s)",
        coordinator.notifications().unread_count().await
    );
    Ok(())
}
