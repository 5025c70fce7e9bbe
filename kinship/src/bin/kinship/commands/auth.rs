use anyhow::Context;
use clap::Args;
use kinship::SessionStore;

use super::Result;
use crate::context::AppContext;
use crate::examples::ExampleGroup;
use crate::output::OutputManager;

pub const EXAMPLES: &[ExampleGroup] = &[
    ExampleGroup {
        title: "Sign in",
        commands: &[
            "kinship login --token $KINSHIP_TOKEN                 # Store a token",
            "kinship login --token $KINSHIP_TOKEN --user 65f0c1  # Store a token and fetch the profile",
        ],
    },
    ExampleGroup {
        title: "Session",
        commands: &["kinship whoami", "kinship logout"],
    },
];

#[derive(Args)]
pub struct LoginArgs {
    /// Bearer token issued by the Kinship backend
    #[arg(long, env = "KINSHIP_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Id of the account the token belongs to; its profile is cached in the session
    #[arg(long)]
    pub user: Option<String>,
}

pub async fn handle_login(args: LoginArgs, ctx: &mut AppContext, output: &OutputManager) -> Result<()> {
    ctx.client.session_mut().init(args.token, None)?;

    if let Some(user_id) = args.user.as_deref() {
        output.progress("Fetching profile");
        let user = ctx.client.users().get(user_id).await;
        output.clear_line();
        let user = user.with_context(|| format!("Failed to fetch user {user_id}"))?;
        ctx.client.session_mut().set_user(user);
    }

    ctx.save_session()?;
    output.success(&format!("Logged in. Session saved to {}", ctx.store.path().display()));
    if args.user.is_none() {
        output.warning("No user id given. Interactions need one: log in again with --user <id>.");
    }
    Ok(())
}

pub fn handle_logout(ctx: &mut AppContext, output: &OutputManager) -> Result<()> {
    ctx.client.session_mut().clear();
    ctx.store.clear()?;
    output.success("Logged out.");
    Ok(())
}

pub fn handle_whoami(ctx: &AppContext, output: &OutputManager) -> Result<()> {
    let session = ctx.client.session();
    if !session.is_authenticated() {
        output.warning("Not logged in.");
        output.info("Run 'kinship login --token <token>' to start a session.");
        return Ok(());
    }

    output.heading("Session");
    output.key_value("API", ctx.config.api_url.as_str());
    output.key_value("Session file", &ctx.store.path().display().to_string());
    match session.user() {
        Some(user) => {
            output.key_value("User", &ctx.viewer_id().unwrap_or_else(|| "-".to_string()));
            output.key_value("Name", &user.name);
            output.key_value("Profile complete", &format!("{}%", user.completion_percent()));
        }
        None => output.info("No profile cached. Log in with --user to fetch it."),
    }
    Ok(())
}
