use super::{Context, prompt};
use anyhow::Result;
use vivid_application::{CommentThreadController, Confirmation, DeleteOutcome};

/// Asks on stdin; only `y` or `yes` confirms.
struct StdinConfirmation;

impl Confirmation for StdinConfirmation {
    fn confirm(&self, message: &str) -> bool {
        match prompt(&format!("{} [y/N]", message)) {
            Ok(answer) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                tracing::warn!("[CLI] Could not read confirmation: {}", e);
                false
            }
        }
    }
}

fn controller(ctx: &Context, post_id: &str) -> CommentThreadController {
    CommentThreadController::new(ctx.gateway.clone(), ctx.store.clone(), post_id)
}

fn print_thread(thread: &CommentThreadController) {
    if thread.comments().is_empty() {
        println!("No comments yet");
    }
    for comment in thread.comments() {
        let marker = if thread.can_mutate(comment) { " (you)" } else { "" };
        println!(
            "[{}] {}{} · {}",
            comment.id,
            comment.owner_identity,
            marker,
            comment.display_timestamp()
        );
        println!("    {}", comment.content);
    }
}

pub async fn list(ctx: &Context, post_id: &str) -> Result<()> {
    let mut thread = controller(ctx, post_id);
    thread.refresh().await?;
    print_thread(&thread);
    Ok(())
}

pub async fn add(ctx: &Context, post_id: &str, content: &str) -> Result<()> {
    let mut thread = controller(ctx, post_id);
    thread.create(content).await?;
    println!("✓ Comment added");
    print_thread(&thread);
    Ok(())
}

pub async fn edit(ctx: &Context, post_id: &str, comment_id: &str, content: &str) -> Result<()> {
    let mut thread = controller(ctx, post_id);
    thread.save_edit(comment_id, content).await?;
    println!("✓ Comment updated");
    print_thread(&thread);
    Ok(())
}

pub async fn delete(ctx: &Context, post_id: &str, comment_id: &str, yes: bool) -> Result<()> {
    let mut thread = controller(ctx, post_id);
    let outcome = if yes {
        thread.delete(comment_id, &|_: &str| true).await?
    } else {
        thread.delete(comment_id, &StdinConfirmation).await?
    };

    match outcome {
        DeleteOutcome::Deleted => println!("✓ Comment deleted"),
        DeleteOutcome::Cancelled => println!("Cancelled"),
    }
    Ok(())
}
