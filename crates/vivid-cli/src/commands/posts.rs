use super::Context;
use anyhow::Result;
use vivid_application::PostCollectionController;
use vivid_core::post::{Post, parse_tags};

fn controller(ctx: &Context) -> PostCollectionController {
    PostCollectionController::new(
        ctx.gateway.clone(),
        ctx.store.clone(),
        ctx.config.author_user_id.clone(),
    )
}

fn print_summary(post: &Post) {
    println!("[{}] {}", post.id, post.title);
    println!(
        "    by {} · {} · {}",
        post.author,
        post.display_date(),
        post.read_time()
    );
    if !post.tags.is_empty() {
        println!("    #{}", post.tags.join(" #"));
    }
}

pub async fn list(ctx: &Context, search: Option<&str>) -> Result<()> {
    let mut posts = controller(ctx);
    posts.refresh().await?;

    let matches = posts.search(search.unwrap_or_default());
    if matches.is_empty() {
        println!("No posts found");
    }
    for post in matches {
        print_summary(post);
    }
    Ok(())
}

pub async fn create(ctx: &Context, title: &str, content: &str, tags: &str) -> Result<()> {
    let mut posts = controller(ctx);
    let post = posts.create(title, content, parse_tags(tags)).await?;
    println!("✓ Published");
    print_summary(&post);
    Ok(())
}

pub async fn show(ctx: &Context, id: &str) -> Result<()> {
    let post = controller(ctx).open(id).await?;
    print_summary(&post);
    println!();
    println!("{}", post.content);
    Ok(())
}
