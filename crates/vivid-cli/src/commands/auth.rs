use super::{Context, prompt};
use anyhow::Result;
use vivid_application::AuthSessionController;
use vivid_core::user::UserProfile;

fn controller(ctx: &Context) -> AuthSessionController {
    AuthSessionController::new(ctx.gateway.clone(), ctx.store.clone())
}

fn credential(value: Option<String>, label: &str) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => prompt(label),
    }
}

pub async fn login(ctx: &Context, email: Option<String>, password: Option<String>) -> Result<()> {
    let email = credential(email, "Email")?;
    let password = credential(password, "Password")?;

    let mut auth = controller(ctx);
    auth.login(&email, &password).await?;
    println!("✓ {}", auth.greeting());
    Ok(())
}

pub async fn signup(ctx: &Context, email: Option<String>, password: Option<String>) -> Result<()> {
    let email = credential(email, "Email")?;
    let password = credential(password, "Password")?;

    let mut auth = controller(ctx);
    let session = auth.signup(&email, &password).await?;
    println!(
        "✓ Account created for {}",
        session.identity().unwrap_or_default()
    );
    println!("{}", auth.greeting());
    Ok(())
}

pub fn logout(ctx: &Context) -> Result<()> {
    controller(ctx).logout()?;
    println!("Signed out");
    Ok(())
}

pub fn whoami(ctx: &Context) -> Result<()> {
    let auth = controller(ctx);
    let session = auth.session();
    match session.identity() {
        Some(identity) if session.is_active() => {
            println!("{}", auth.greeting());
            println!("Signed in as {}", identity);
        }
        _ => println!("Not signed in"),
    }
    Ok(())
}

pub fn set_profile(ctx: &Context, first: String, last: String) -> Result<()> {
    let auth = controller(ctx);
    auth.save_profile(&UserProfile {
        first_name: first.trim().to_string(),
        last_name: last.trim().to_string(),
    })?;
    println!("✓ Profile saved");
    Ok(())
}

pub async fn user_count(ctx: &Context) -> Result<()> {
    let count = controller(ctx).registered_user_count().await?;
    println!("{} registered users", count);
    Ok(())
}
