use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "vivid")]
#[command(about = "Vivid CLI - sign in, read and write posts and comments", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with an existing account
    Login {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account and sign in
    Signup {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// End the current session
    Logout,
    /// Show who is signed in
    Whoami,
    /// Local profile used for the greeting
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Registered users
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
    /// Blog posts
    Posts {
        #[command(subcommand)]
        action: PostsAction,
    },
    /// Comments on a post
    Comments {
        #[command(subcommand)]
        action: CommentsAction,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Set first and last name
    Set {
        #[arg(long)]
        first: String,
        #[arg(long, default_value = "")]
        last: String,
    },
}

#[derive(Subcommand)]
enum UsersAction {
    /// Print the number of registered users
    Count,
}

#[derive(Subcommand)]
enum PostsAction {
    /// List posts, optionally filtered
    List {
        #[arg(long)]
        search: Option<String>,
    },
    /// Publish a new post
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        /// Comma-separated tags
        #[arg(long, default_value = "")]
        tags: String,
    },
    /// Show one post
    Show { id: String },
}

#[derive(Subcommand)]
enum CommentsAction {
    /// List the comments of a post
    List { post: String },
    /// Comment on a post
    Add { post: String, content: String },
    /// Replace the text of one of your comments
    Edit {
        post: String,
        comment: String,
        content: String,
    },
    /// Delete one of your comments
    Delete {
        post: String,
        comment: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "vivid=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = commands::Context::load()?;

    let outcome = match cli.command {
        Commands::Login { email, password } => commands::auth::login(&ctx, email, password).await,
        Commands::Signup { email, password } => {
            commands::auth::signup(&ctx, email, password).await
        }
        Commands::Logout => commands::auth::logout(&ctx),
        Commands::Whoami => commands::auth::whoami(&ctx),
        Commands::Profile { action } => match action {
            ProfileAction::Set { first, last } => commands::auth::set_profile(&ctx, first, last),
        },
        Commands::Users { action } => match action {
            UsersAction::Count => commands::auth::user_count(&ctx).await,
        },
        Commands::Posts { action } => match action {
            PostsAction::List { search } => commands::posts::list(&ctx, search.as_deref()).await,
            PostsAction::Create {
                title,
                content,
                tags,
            } => commands::posts::create(&ctx, &title, &content, &tags).await,
            PostsAction::Show { id } => commands::posts::show(&ctx, &id).await,
        },
        Commands::Comments { action } => match action {
            CommentsAction::List { post } => commands::comments::list(&ctx, &post).await,
            CommentsAction::Add { post, content } => {
                commands::comments::add(&ctx, &post, &content).await
            }
            CommentsAction::Edit {
                post,
                comment,
                content,
            } => commands::comments::edit(&ctx, &post, &comment, &content).await,
            CommentsAction::Delete { post, comment, yes } => {
                commands::comments::delete(&ctx, &post, &comment, yes).await
            }
        },
    };

    commands::report(outcome)
}
