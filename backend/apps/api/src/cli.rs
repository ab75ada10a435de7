//! Command line interface

use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use profile::PgProfileRepository;
use profile::ProfileError;
use profile::application::{CreateUserInput, CreateUserUseCase};

use crate::app;
use crate::config::ServerConfig;

#[derive(Debug, Parser)]
#[command(name = "api", version, about = "Profiles REST API server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Create a profile with staff and superuser rights
    Createsuperuser(SuperuserArgs),
}

#[derive(Debug, Args)]
pub struct SuperuserArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub name: String,
    #[arg(long, env = "SUPERUSER_PASSWORD", hide_env_values = true)]
    pub password: String,
}

impl Cli {
    pub async fn run(self, config: ServerConfig) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Serve) {
            Command::Serve => app::serve(config).await,
            Command::Createsuperuser(args) => create_superuser(config, args).await,
        }
    }
}

async fn create_superuser(config: ServerConfig, args: SuperuserArgs) -> anyhow::Result<()> {
    let Some(database_url) = config.database_url.as_deref() else {
        bail!("DATABASE_URL must be set to create a superuser");
    };
    let pool = app::connect(database_url, config.max_connections).await?;

    let use_case = CreateUserUseCase::new(
        Arc::new(PgProfileRepository::new(pool)),
        Arc::new(config.profile_config()),
    );
    let input = CreateUserInput {
        email: Some(args.email),
        name: Some(args.name),
        password: Some(args.password),
    };

    match use_case.execute_superuser(input).await {
        Ok(profile) => {
            println!("Superuser created: {} (id {})", profile.email, profile.id);
            Ok(())
        }
        Err(ProfileError::Validation(errors)) => {
            for (field, messages) in errors.iter() {
                for message in messages {
                    eprintln!("{field}: {message}");
                }
            }
            bail!("superuser was not created")
        }
        Err(err) => Err(err).context("failed to create superuser"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_serve() {
        let cli = Cli::try_parse_from(["api"]).unwrap();
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["api", "serve"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Serve)));
    }

    #[test]
    fn test_createsuperuser_args() {
        let cli = Cli::try_parse_from([
            "api",
            "createsuperuser",
            "--email",
            "admin@example.com",
            "--name",
            "Admin",
            "--password",
            "correct-horse-battery",
        ])
        .unwrap();

        match cli.command {
            Some(Command::Createsuperuser(args)) => {
                assert_eq!(args.email, "admin@example.com");
                assert_eq!(args.name, "Admin");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_createsuperuser_requires_email() {
        assert!(Cli::try_parse_from(["api", "createsuperuser", "--name", "Admin"]).is_err());
    }
}
