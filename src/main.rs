use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use strum::IntoEnumIterator;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use semillas::auth::{FirebaseAuth, IdpCredential};
use semillas::models::{
    CreateProject, MemberDecision, NewDiscussionPost, PROJECT_CATEGORIES, ProjectStatus,
};
use semillas::navigation::{Navigation, Route};
use semillas::stores::SeedList;
use semillas::{AppContext, Config};

#[derive(Parser, Debug)]
#[command(name = "semillas")]
#[command(about = "Command-line client for the open experimental seed network")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Browse and manage projects
    #[command(subcommand)]
    Projects(ProjectsCommand),

    /// Sign in with a Google ID token
    Login {
        #[arg(long)]
        id_token: String,
    },

    /// Sign out and forget the stored token
    Logout,

    /// Show the signed-in profile
    Whoami,

    /// Edit the seeds you have or want
    Profile {
        #[arg(value_enum)]
        list: ListArg,
        #[arg(value_enum)]
        action: ToggleArg,
        seed: String,
    },

    /// Project discussions
    #[command(subcommand)]
    Forum(ForumCommand),

    /// List organizations
    Orgs,

    /// Cookie consent
    Consent {
        #[arg(value_enum)]
        action: ConsentArg,
    },

    /// Check whether a path is reachable with the current session
    Route { path: String },
}

#[derive(Subcommand, Debug)]
enum ProjectsCommand {
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, value_parser = parse_status)]
        status: Option<ProjectStatus>,
    },
    Show {
        id: String,
    },
    Members {
        id: String,
    },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long, default_value = "")]
        image: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long, default_value_t = 0)]
        volunteers: i64,
        #[arg(long)]
        requirements: Option<String>,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    Delete {
        id: String,
    },
    Join {
        id: String,
        #[arg(long)]
        message: Option<String>,
    },
    Accept {
        project_id: String,
        membership_id: String,
    },
    Reject {
        project_id: String,
        membership_id: String,
    },
}

#[derive(Subcommand, Debug)]
enum ForumCommand {
    List {
        project_id: String,
    },
    Post {
        project_id: String,
        content: String,
        #[arg(long)]
        reply_to: Option<String>,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ListArg {
    Have,
    Want,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ToggleArg {
    Add,
    Remove,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ConsentArg {
    Accept,
    Reject,
    Status,
}

fn parse_status(s: &str) -> Result<ProjectStatus, String> {
    let normalized = s.trim().to_uppercase().replace(['-', ' '], "_");
    normalized.parse().map_err(|_| {
        let valid: Vec<String> = ProjectStatus::iter().map(|s| s.as_ref().to_string()).collect();
        format!("unknown status '{}', expected one of {}", s, valid.join(", "))
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "semillas=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    if config.dev_mode {
        tracing::info!("Running in DEVELOPMENT mode");
    }

    let mut ctx = AppContext::from_config(&config).context("Failed to initialize client")?;

    if let Err(e) = ctx.users.restore_session().await {
        tracing::warn!("Could not restore session: {}", e);
    }

    let outcome = run(&mut ctx, cli.command).await;

    for toast in ctx.toaster.toasts() {
        eprintln!("[{}] {}", toast.status.as_ref(), toast.text);
    }
    ctx.teardown();

    outcome
}

async fn run(ctx: &mut AppContext<FirebaseAuth>, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Projects(cmd) => run_projects(ctx, cmd).await?,

        Command::Login { id_token } => {
            let user = ctx
                .users
                .sign_in_with_google(&IdpCredential::GoogleIdToken(id_token))
                .await
                .context("Sign-in failed")?;
            println!("Signed in as {} ({})", user.name, user.id);
        }

        Command::Logout => {
            ctx.users.sign_out().await?;
            println!("Signed out");
        }

        Command::Whoami => match ctx.users.user() {
            Some(user) => {
                println!("{} ({})", user.name, user.id);
                if let Some(email) = &user.email {
                    println!("email:      {}", email);
                }
                if let Some(location) = &user.location {
                    println!("location:   {}", location);
                }
                println!("have:       {}", user.have.join(", "));
                println!("want:       {}", user.want.join(", "));
            }
            None => println!("Not signed in"),
        },

        Command::Profile { list, action, seed } => {
            let list = match list {
                ListArg::Have => SeedList::Have,
                ListArg::Want => SeedList::Want,
            };
            let state = matches!(action, ToggleArg::Add);
            ctx.users
                .update_seed_list(list, &seed, state)
                .await
                .context("Failed to update profile")?;
            ctx.toaster.success("Perfil actualizado", None);
        }

        Command::Forum(ForumCommand::List { project_id }) => {
            ctx.forum.fetch(&project_id).await?;
            for post in ctx.forum.posts() {
                let reply = post
                    .reply_to_post_id
                    .as_deref()
                    .map(|id| format!(" (re: {})", id))
                    .unwrap_or_default();
                println!("{}{} - {}", post.user_name, reply, post.content);
            }
        }

        Command::Forum(ForumCommand::Post {
            project_id,
            content,
            reply_to,
        }) => {
            let Some(user) = ctx.users.user() else {
                bail!("{}", semillas::navigation::SIGN_IN_REQUIRED);
            };
            let post = NewDiscussionPost {
                content,
                user_name: user.name.clone(),
                user_image: user.image.clone(),
                attachments: None,
                reply_to_post_id: reply_to,
            };
            let created = ctx.forum.post(&project_id, &post).await?;
            println!("Posted {}", created.id);
        }

        Command::Orgs => {
            for org in ctx.organizations.list().await? {
                println!("{}\t{}", org.id, org.name.as_deref().unwrap_or("-"));
            }
        }

        Command::Consent { action } => {
            match action {
                ConsentArg::Accept => ctx.cookies.accept(),
                ConsentArg::Reject => ctx.cookies.reject(),
                ConsentArg::Status => {}
            }
            println!("{}", ctx.cookies.state().as_ref());
        }

        Command::Route { path } => {
            let Some(route) = Route::parse(&path) else {
                bail!("No route matches {}", path);
            };
            match ctx.navigate(route) {
                Navigation::Proceed(route) => println!("{} -> {}", route.name(), route),
                Navigation::Blocked { redirect, notice } => {
                    println!("{} (redirect to {})", notice, redirect);
                }
            }
        }
    }

    Ok(())
}

async fn run_projects(ctx: &mut AppContext<FirebaseAuth>, cmd: ProjectsCommand) -> anyhow::Result<()> {
    let projects = &mut ctx.projects;

    match cmd {
        ProjectsCommand::List {
            search,
            category,
            status,
        } => {
            if let Some(c) = &category {
                if !PROJECT_CATEGORIES.contains(&c.as_str()) {
                    tracing::warn!(category = %c, "Category is not one of the known categories");
                }
            }
            projects.fetch().await?;
            projects.set_search_bar_filter(search);
            projects.set_category_filter(category);
            projects.set_status_filter(status);

            for p in projects.projects() {
                println!(
                    "{}\t{}\t{}\t{}",
                    p.id,
                    p.status.label(),
                    p.category.as_deref().unwrap_or("-"),
                    p.title
                );
            }
        }

        ProjectsCommand::Show { id } => {
            let p = projects.fetch_project(&id).await?;
            println!("{} [{}]", p.title, p.status.label());
            println!("{}", p.description);
            println!("owner:      {}", p.owner);
            println!("volunteers: {}", p.volunteers_needed);
            if let Some(req) = &p.volunteer_requirements {
                println!("requires:   {}", req);
            }
            if let Some(location) = &p.location {
                println!("location:   {}", location);
            }
            println!("tags:       {}", p.tags.join(", "));
        }

        ProjectsCommand::Members { id } => {
            projects.fetch_members(&id).await?;
            for m in projects.current_project_members() {
                println!(
                    "{}\t{}\t{}\t{}",
                    m.id,
                    m.user_id,
                    m.role.as_ref(),
                    m.status.label()
                );
            }
        }

        ProjectsCommand::Create {
            title,
            description,
            image,
            category,
            location,
            volunteers,
            requirements,
            tags,
        } => {
            let input = CreateProject {
                title,
                description,
                image,
                category,
                location,
                volunteers_needed: volunteers,
                volunteer_requirements: requirements,
                tags,
            };
            let created = projects.create(&input).await?;
            println!("{}", created.id);
            ctx.toaster.success("Proyecto creado", None);
        }

        ProjectsCommand::Delete { id } => {
            projects.delete(&id).await?;
            ctx.toaster.success("Proyecto eliminado", None);
        }

        ProjectsCommand::Join { id, message } => {
            let membership = projects.join(&id, message.as_deref()).await?;
            println!("Request {} is {}", membership.id, membership.status.label());
        }

        ProjectsCommand::Accept {
            project_id,
            membership_id,
        } => {
            let m = projects
                .manage_member(&project_id, &membership_id, MemberDecision::Accepted)
                .await?;
            println!("{} {}", m.id, m.status.label());
        }

        ProjectsCommand::Reject {
            project_id,
            membership_id,
        } => {
            let m = projects
                .manage_member(&project_id, &membership_id, MemberDecision::Rejected)
                .await?;
            println!("{} {}", m.id, m.status.label());
        }
    }

    Ok(())
}
