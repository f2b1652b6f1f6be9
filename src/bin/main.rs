use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use box_ai_mcp::{
    BoxClient, BoxConfig, Credentials, DEFAULT_API_BASE, DEFAULT_TOKEN_URL, DEVELOPER_TOKEN_ENV,
    Session, SubjectType, create_server, tools,
};

// rmcp imports for MCP stdio server mode
use rmcp::service::ServiceExt;
use rmcp::transport::stdio;

#[derive(Parser)]
#[command(name = "box-ai-mcp")]
#[command(about = "MCP server for Box AI metadata extraction")]
struct Cli {
    #[command(flatten)]
    box_args: BoxArgs,
    /// Defaults to `mcp-stdio`
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct BoxArgs {
    /// Box content API base URL
    #[arg(long, global = true, env = "BOX_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,
    /// Box OAuth2 token endpoint
    #[arg(long, global = true, env = "BOX_TOKEN_URL", default_value = DEFAULT_TOKEN_URL)]
    token_url: String,
    /// Fallback access token used when none has been set at runtime
    #[arg(long, global = true, env = DEVELOPER_TOKEN_ENV, hide_env_values = true)]
    developer_token: Option<String>,
}

impl BoxArgs {
    fn into_config(self) -> BoxConfig {
        let config = BoxConfig::with_endpoints(self.api_base, self.token_url);
        match self.developer_token {
            Some(token) => config.with_developer_token(token),
            None => config,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run as an MCP stdio server (for use in mcp.json)
    McpStdio,
    /// Run the JWT flow once and print the token metadata
    Token {
        #[arg(long, env = "BOX_CLIENT_ID")]
        client_id: String,
        #[arg(long, env = "BOX_CLIENT_SECRET", hide_env_values = true)]
        client_secret: String,
        /// PEM private key contents
        #[arg(long, env = "BOX_PRIVATE_KEY", hide_env_values = true, conflicts_with = "private_key_file")]
        private_key: Option<String>,
        /// Path to a PEM private key file
        #[arg(long)]
        private_key_file: Option<PathBuf>,
        #[arg(long, env = "BOX_PUBLIC_KEY_ID")]
        public_key_id: String,
        /// `user` or `enterprise`
        #[arg(long, env = "BOX_SUBJECT_TYPE", default_value = "enterprise")]
        subject_type: SubjectType,
        #[arg(long, env = "BOX_SUBJECT_ID")]
        subject_id: String,
        /// Also print the access token itself
        #[arg(long, default_value_t = false)]
        print_token: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the MCP protocol, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("box_ai_mcp=info".parse()?)
                .add_directive("rmcp=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let config = cli.box_args.into_config();

    match cli.command.unwrap_or(Commands::McpStdio) {
        Commands::McpStdio => {
            info!(
                api_base = %config.api_base,
                fallback_token = config.developer_token.is_some(),
                "Starting Box MCP stdio server (rmcp)"
            );

            let server = create_server(config);

            // Run as an MCP stdio server. McpServer implements ServerHandler.
            let service = server
                .as_ref()
                .clone()
                .serve(stdio())
                .await
                .inspect_err(|e| tracing::error!("serving error: {:?}", e))?;

            // Block until the MCP session ends.
            service.waiting().await?;
            info!("MCP stdio server session ended");
        }
        Commands::Token {
            client_id,
            client_secret,
            private_key,
            private_key_file,
            public_key_id,
            subject_type,
            subject_id,
            print_token,
        } => {
            let private_key = match (private_key, private_key_file) {
                (Some(pem), _) => pem,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("reading private key from {}", path.display()))?,
                (None, None) => anyhow::bail!(
                    "a private key is required (--private-key, BOX_PRIVATE_KEY or --private-key-file)"
                ),
            };

            let credentials = Credentials {
                client_id,
                client_secret,
                private_key,
                public_key_id,
                subject_type,
                subject_id,
            };

            // Fresh session: the fallback token must not mask a failed exchange.
            let session = Arc::new(Session::new(None));
            let client = BoxClient::new(config, session.clone());
            let output = tools::authenticate(&client, &credentials).await?;

            println!("{}", serde_json::to_string_pretty(&output)?);
            if print_token {
                if let Some(token) = session.active_token().await {
                    println!("{}", token);
                }
            }
        }
    }

    Ok(())
}
