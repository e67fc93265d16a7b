//! CLI commands

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use tracing::info;
use videoflix_core::Navigation;
use videoflix_http::ClientContext;
use videoflix_http::types::{
    LoginRequest, PasswordResetConfirmRequest, PasswordResetRequest, RegisterRequest,
};

/// Sign-in used by commands that need an authenticated session
#[derive(Args, Debug, Default)]
pub struct SignIn {
    /// Account email; signs in when the backend session is not active
    #[arg(long, env = "VIDEOFLIX_EMAIL")]
    email: Option<String>,

    /// Account password
    #[arg(long, env = "VIDEOFLIX_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Restore the session and show who is signed in
    Status,

    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "VIDEOFLIX_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign out and end the backend session
    Logout,

    /// Create an account
    Register {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        /// Repeat the password
        #[arg(long)]
        confirm_password: String,
    },

    /// Request a password reset mail
    ResetPassword {
        #[arg(long)]
        email: String,
    },

    /// Set a new password from a reset link
    ConfirmPassword {
        /// `uid` parameter of the reset link
        #[arg(long)]
        uid: String,

        /// `token` parameter of the reset link
        #[arg(long)]
        token: String,

        #[arg(long)]
        password: String,

        #[arg(long)]
        confirm_password: String,
    },

    /// Confirm an email address
    VerifyEmail {
        /// Token from the verification link
        token: String,
    },

    /// List movies, or show one movie
    Movies {
        id: Option<u64>,

        #[command(flatten)]
        sign_in: SignIn,
    },

    /// Navigate to an application route
    Open {
        /// Location such as `/home` or `/movie/3`
        path: String,

        #[command(flatten)]
        sign_in: SignIn,
    },
}

impl Commands {
    /// Whether the command starts from a restored session
    const fn needs_bootstrap(&self) -> bool {
        !matches!(
            self,
            Self::Register { .. }
                | Self::ResetPassword { .. }
                | Self::ConfirmPassword { .. }
                | Self::VerifyEmail { .. }
        )
    }

    pub async fn execute(self, ctx: ClientContext) -> Result<()> {
        if self.needs_bootstrap() {
            let authenticated = ctx.bootstrapper().run().await;
            info!(authenticated, "Session restored");
        }

        match self {
            Self::Status => status(&ctx),
            Self::Login { email, password } => login(&ctx, email, password).await,
            Self::Logout => logout(&ctx).await,
            Self::Register {
                email,
                password,
                confirm_password,
            } => register(&ctx, email, password, confirm_password).await,
            Self::ResetPassword { email } => reset_password(&ctx, email).await,
            Self::ConfirmPassword {
                uid,
                token,
                password,
                confirm_password,
            } => self::confirm_password(&ctx, uid, token, password, confirm_password).await,
            Self::VerifyEmail { token } => verify_email(&ctx, &token).await,
            Self::Movies { id, sign_in } => {
                sign_in.ensure(&ctx).await?;
                movies(&ctx, id).await
            }
            Self::Open { path, sign_in } => {
                sign_in.ensure(&ctx).await?;
                open(&ctx, &path).await
            }
        }
    }
}

impl SignIn {
    async fn ensure(self, ctx: &ClientContext) -> Result<()> {
        if ctx.session.is_authenticated().current() {
            return Ok(());
        }
        match (self.email, self.password) {
            (Some(email), Some(password)) => login(ctx, email, password).await,
            (Some(_), None) | (None, Some(_)) => bail!("--email and --password go together"),
            (None, None) => Ok(()),
        }
    }
}

fn status(ctx: &ClientContext) -> Result<()> {
    let output = match ctx.session.identity() {
        Some(identity) => serde_json::json!({
            "authenticated": true,
            "user_id": identity.user_id,
            "expires_at": identity.expires_at,
            "reauth_valid": ctx.session.has_valid_reauth(),
        }),
        None => serde_json::json!({ "authenticated": false }),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn login(ctx: &ClientContext, email: String, password: String) -> Result<()> {
    let request = LoginRequest::new(email, password);
    match ctx.auth.login(&request).await {
        Ok(response) => {
            if !ctx.session.is_authenticated().current() {
                bail!("Login returned an unusable access token");
            }
            println!(
                "{}",
                response.message.as_deref().unwrap_or("Login successful.")
            );
            Ok(())
        }
        Err(e) => bail!(e.user_message()),
    }
}

async fn logout(ctx: &ClientContext) -> Result<()> {
    ctx.auth.logout().await;
    println!("Logged out.");
    navigate(ctx, &ctx.config.auth.login_route).await
}

async fn register(
    ctx: &ClientContext,
    email: String,
    password: String,
    confirm_password: String,
) -> Result<()> {
    let request = RegisterRequest {
        email,
        password,
        confirm_password,
    };
    match ctx.auth.register(&request).await {
        Ok(_) => {
            println!("Registration successful. Check your inbox to verify your email.");
            Ok(())
        }
        Err(e) => bail!(e.user_message()),
    }
}

async fn reset_password(ctx: &ClientContext, email: String) -> Result<()> {
    match ctx
        .auth
        .request_password_reset(&PasswordResetRequest { email })
        .await
    {
        Ok(response) => {
            println!(
                "{}",
                response
                    .message
                    .as_deref()
                    .unwrap_or("Password reset email sent.")
            );
            Ok(())
        }
        Err(e) => bail!(e.user_message()),
    }
}

async fn confirm_password(
    ctx: &ClientContext,
    uid: String,
    token: String,
    new_password: String,
    confirm_password: String,
) -> Result<()> {
    let request = PasswordResetConfirmRequest {
        uid,
        token,
        new_password,
    };
    match ctx.auth.confirm_new_password(&request, &confirm_password).await {
        Ok(_) => {
            println!("Password changed. You can now log in.");
            Ok(())
        }
        Err(e) => bail!(e.user_message()),
    }
}

async fn verify_email(ctx: &ClientContext, token: &str) -> Result<()> {
    match ctx.auth.verify_email(token).await {
        Ok(response) => {
            println!(
                "{}",
                response.message.as_deref().unwrap_or("Email verified.")
            );
            Ok(())
        }
        Err(message) => bail!(message),
    }
}

async fn movies(ctx: &ClientContext, id: Option<u64>) -> Result<()> {
    let output = match id {
        Some(id) => serde_json::to_string_pretty(&ctx.client.get_movie(id).await?)?,
        None => serde_json::to_string_pretty(&ctx.client.list_movies().await?)?,
    };
    println!("{output}");
    Ok(())
}

async fn open(ctx: &ClientContext, path: &str) -> Result<()> {
    navigate(ctx, path).await
}

async fn navigate(ctx: &ClientContext, path: &str) -> Result<()> {
    match ctx.router.navigate(path).await? {
        Navigation::Entered(matched) => {
            println!("{} ({})", matched.path, matched.route.pattern);
            for (name, value) in &matched.params {
                println!("  {name} = {value}");
            }
        }
        Navigation::Redirected { to } => println!("Redirected to {to}"),
    }
    Ok(())
}
